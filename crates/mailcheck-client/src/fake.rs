//! In-process resolvers for tests and demos.
//!
//! [`StaticResolver`] answers from a fixed table and records every query it
//! sees. [`DemoResolver`] invents plausible answers with seeded randomness,
//! for showing the report without touching the network.

use async_trait::async_trait;
use mailcheck_core::{MailcheckError, RecordType, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::resolver::Resolver;

/// Failure a [`StaticResolver`] entry can simulate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FakeFailure {
    /// Transport timeout
    Timeout,
    /// Connection refused/reset
    Connection,
    /// Resolver returned something that is not DoH JSON
    Malformed,
    /// Resolver returned SERVFAIL
    ServFail,
    /// Never answer
    Hang,
}

#[derive(Debug, Clone)]
enum Entry {
    Records(Vec<String>),
    Failure(FakeFailure),
}

type Key = (String, RecordType);

/// Table-driven resolver. Names without an entry have no records.
#[derive(Clone, Default)]
pub struct StaticResolver {
    entries: HashMap<Key, Entry>,
    queries: Arc<Mutex<Vec<Key>>>,
}

impl StaticResolver {
    /// Create an empty resolver
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `name`/`record_type` with the given data strings
    #[must_use]
    pub fn records<I, S>(mut self, name: &str, record_type: RecordType, data: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entries.insert(
            (name.to_string(), record_type),
            Entry::Records(data.into_iter().map(Into::into).collect()),
        );
        self
    }

    /// Answer a TXT query
    #[must_use]
    pub fn txt(self, name: &str, data: &[&str]) -> Self {
        self.records(name, RecordType::Txt, data.iter().copied())
    }

    /// Answer an MX query
    #[must_use]
    pub fn mx(self, name: &str, data: &[&str]) -> Self {
        self.records(name, RecordType::Mx, data.iter().copied())
    }

    /// Fail queries for `name`/`record_type`
    #[must_use]
    pub fn fail(mut self, name: &str, record_type: RecordType, failure: FakeFailure) -> Self {
        self.entries
            .insert((name.to_string(), record_type), Entry::Failure(failure));
        self
    }

    /// Every query seen so far, in order
    #[must_use]
    pub fn queries(&self) -> Vec<(String, RecordType)> {
        self.queries
            .lock()
            .map(|q| q.clone())
            .unwrap_or_default()
    }

    /// Returns true if `name` was queried with any type
    #[must_use]
    pub fn was_queried(&self, name: &str) -> bool {
        self.queries().iter().any(|(n, _)| n == name)
    }
}

#[async_trait]
impl Resolver for StaticResolver {
    async fn lookup(&self, name: &str, record_type: RecordType) -> Result<Vec<String>> {
        let key = (name.to_string(), record_type);
        if let Ok(mut queries) = self.queries.lock() {
            queries.push(key.clone());
        }

        match self.entries.get(&key) {
            None => Ok(Vec::new()),
            Some(Entry::Records(data)) => Ok(data.clone()),
            Some(Entry::Failure(failure)) => match failure {
                FakeFailure::Timeout => Err(MailcheckError::Timeout(0)),
                FakeFailure::Connection => {
                    Err(MailcheckError::Connection("connection refused".into()))
                }
                FakeFailure::Malformed => Err(MailcheckError::UnexpectedResponse(
                    "expected value at line 1 column 1".into(),
                )),
                FakeFailure::ServFail => Err(MailcheckError::Resolver { rcode: 2 }),
                FakeFailure::Hang => std::future::pending().await,
            },
        }
    }
}

/// Selectors the demo resolver publishes DKIM keys under
const DEMO_SELECTORS: [&str; 3] = ["google", "selector1", "default"];

/// Resolver that makes up answers.
///
/// Each mechanism of each domain passes with probability `pass_rate`. The
/// outcome depends only on the seed and the queried name, so the same seed
/// produces the same report for a domain however the lookups interleave,
/// across runs and toolchain versions.
#[derive(Debug, Clone)]
pub struct DemoResolver {
    seed: u64,
    pass_rate: f64,
}

impl DemoResolver {
    /// Create a demo resolver
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            pass_rate: 0.6,
        }
    }

    /// Probability that a mechanism passes, clamped to 0..=1
    #[must_use]
    pub fn pass_rate(mut self, rate: f64) -> Self {
        self.pass_rate = rate.clamp(0.0, 1.0);
        self
    }

    fn seed_for(&self, scope: &str, domain: &str) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(self.seed.to_le_bytes());
        hasher.update(scope.as_bytes());
        hasher.update([0]);
        hasher.update(domain.as_bytes());
        hasher.finalize().into()
    }

    fn rng_for(&self, scope: &str, domain: &str) -> StdRng {
        StdRng::from_seed(self.seed_for(scope, domain))
    }

    fn answer(&self, name: &str, record_type: RecordType) -> Vec<String> {
        if record_type == RecordType::Mx {
            let mut rng = self.rng_for("mx", name);
            return if rng.random_bool(self.pass_rate) {
                vec![format!("10 mx1.{name}."), format!("20 mx2.{name}.")]
            } else {
                Vec::new()
            };
        }

        if let Some(domain) = name.strip_prefix("_dmarc.") {
            let mut rng = self.rng_for("dmarc", domain);
            return if rng.random_bool(self.pass_rate) {
                vec![format!("\"v=DMARC1; p=quarantine; rua=mailto:dmarc@{domain}\"")]
            } else {
                Vec::new()
            };
        }

        if let Some((selector, domain)) = name.split_once("._domainkey.") {
            let mut rng = self.rng_for("dkim", domain);
            if !rng.random_bool(self.pass_rate) {
                return Vec::new();
            }
            let published = DEMO_SELECTORS[rng.random_range(0..DEMO_SELECTORS.len())];
            return if selector == published {
                vec!["\"v=DKIM1; k=rsa; p=MIGfMA0GCSqGSIb3DQEBAQUAA4GNADCBiQKBgQDdemo\"".into()]
            } else {
                Vec::new()
            };
        }

        let mut rng = self.rng_for("spf", name);
        if rng.random_bool(self.pass_rate) {
            vec!["\"v=spf1 include:_spf.google.com ~all\"".into()]
        } else {
            Vec::new()
        }
    }
}

#[async_trait]
impl Resolver for DemoResolver {
    async fn lookup(&self, name: &str, record_type: RecordType) -> Result<Vec<String>> {
        Ok(self.answer(name, record_type))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn static_resolver_answers_and_records_queries() {
        let resolver = StaticResolver::new()
            .txt("example.com", &["\"v=spf1 -all\""])
            .fail("_dmarc.example.com", RecordType::Txt, FakeFailure::Timeout);

        let spf = resolver.lookup("example.com", RecordType::Txt).await.unwrap();
        assert_eq!(spf, vec!["\"v=spf1 -all\""]);

        let err = resolver.lookup("_dmarc.example.com", RecordType::Txt).await.unwrap_err();
        assert!(matches!(err, MailcheckError::Timeout(_)));

        assert!(resolver.lookup("example.com", RecordType::Mx).await.unwrap().is_empty());
        assert_eq!(resolver.queries().len(), 3);
        assert!(resolver.was_queried("_dmarc.example.com"));
        assert!(!resolver.was_queried("google._domainkey.example.com"));
    }

    #[tokio::test]
    async fn demo_resolver_is_deterministic() {
        let a = DemoResolver::new(7);
        let b = DemoResolver::new(7);
        for name in ["example.com", "_dmarc.example.com", "google._domainkey.example.com"] {
            assert_eq!(
                a.lookup(name, RecordType::Txt).await.unwrap(),
                b.lookup(name, RecordType::Txt).await.unwrap()
            );
        }
    }

    #[test]
    fn demo_seed_derivation_is_pinned() {
        let seed = DemoResolver::new(7).seed_for("mx", "example.com");
        assert_eq!(seed[..8], [0x27, 0x50, 0x01, 0xb6, 0xf0, 0xf0, 0xea, 0x2c]);
        assert_ne!(seed, DemoResolver::new(7).seed_for("dmarc", "example.com"));
        assert_ne!(seed, DemoResolver::new(8).seed_for("mx", "example.com"));
    }

    #[tokio::test]
    async fn demo_pass_rate_extremes() {
        let always = DemoResolver::new(1).pass_rate(1.0);
        assert!(!always.lookup("example.com", RecordType::Txt).await.unwrap().is_empty());
        assert!(!always.lookup("example.com", RecordType::Mx).await.unwrap().is_empty());

        let never = DemoResolver::new(1).pass_rate(0.0);
        for selector in DEMO_SELECTORS {
            let name = format!("{selector}._domainkey.example.com");
            assert!(never.lookup(&name, RecordType::Txt).await.unwrap().is_empty());
        }
    }
}
