//! The domain analyzer: normalize, check all four mechanisms concurrently,
//! aggregate.

use mailcheck_client::Resolver;
use mailcheck_core::{DomainQuery, DomainReport, Result};
use tracing::{debug, info};

use crate::config::AnalyzerConfig;
use crate::{dkim, dmarc, mx, spf};

/// Email authentication analyzer over a resolver
pub struct Analyzer<R> {
    resolver: R,
    config: AnalyzerConfig,
}

impl<R: Resolver> Analyzer<R> {
    /// Create an analyzer with default configuration
    pub fn new(resolver: R) -> Self {
        Self::with_config(resolver, AnalyzerConfig::default())
    }

    /// Create an analyzer with custom configuration
    pub const fn with_config(resolver: R, config: AnalyzerConfig) -> Self {
        Self { resolver, config }
    }

    /// Configuration in use
    pub const fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// The underlying resolver
    pub const fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Analyze raw user input.
    ///
    /// Fails only when the input does not normalize to a domain. Lookup
    /// failures are reported inside the returned report.
    pub async fn analyze(&self, raw: &str) -> Result<DomainReport> {
        let domain = DomainQuery::parse(raw)?;
        Ok(self.analyze_query(domain).await)
    }

    /// Analyze an already normalized domain.
    pub async fn analyze_query(&self, domain: DomainQuery) -> DomainReport {
        let timeout = self.config.lookup_timeout;
        debug!(domain = %domain, selectors = self.config.selectors.len(), "analyzing");

        let (spf, dkim, dmarc, mx) = tokio::join!(
            spf::check_spf(&self.resolver, &domain, timeout),
            dkim::check_dkim(&self.resolver, &domain, &self.config.selectors, timeout),
            dmarc::check_dmarc(&self.resolver, &domain, timeout),
            mx::check_mx(&self.resolver, &domain, timeout),
        );

        let report = DomainReport::with_weights(domain, spf, dkim, dmarc, mx, &self.config.weights);
        info!(
            domain = %report.domain(),
            score = report.score(),
            issues = report.issues().len(),
            "analysis complete"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mailcheck_client::{FakeFailure, StaticResolver};
    use mailcheck_core::{CheckStatus, MailcheckError, Mechanism, RecordType};
    use std::time::{Duration, Instant};

    #[tokio::test]
    async fn invalid_input_fails_before_any_lookup() {
        let resolver = StaticResolver::new();
        let analyzer = Analyzer::new(resolver.clone());
        let err = analyzer.analyze("not a domain").await.unwrap_err();
        assert!(matches!(err, MailcheckError::InvalidDomain(_)));
        assert!(resolver.queries().is_empty());
    }

    #[tokio::test]
    async fn always_four_results_even_when_everything_breaks() {
        let resolver = StaticResolver::new()
            .fail("example.com", RecordType::Txt, FakeFailure::Hang)
            .fail("example.com", RecordType::Mx, FakeFailure::Connection)
            .fail("_dmarc.example.com", RecordType::Txt, FakeFailure::Malformed)
            .fail("google._domainkey.example.com", RecordType::Txt, FakeFailure::Timeout);
        let config = AnalyzerConfig::new()
            .selectors(["google"])
            .lookup_timeout(Duration::from_millis(30));
        let analyzer = Analyzer::with_config(resolver, config);

        let report = analyzer.analyze("https://www.example.com/").await.unwrap();

        assert_eq!(report.results().count(), 4);
        assert_eq!(report.result(Mechanism::Spf).status, CheckStatus::Error);
        assert_eq!(report.result(Mechanism::Mx).status, CheckStatus::Error);
        assert_eq!(report.result(Mechanism::Dmarc).status, CheckStatus::Error);
        assert_eq!(report.result(Mechanism::Dkim).status, CheckStatus::Fail);
        assert_eq!(report.issues(), &Mechanism::ALL);
        assert_eq!(report.score(), 0);
    }

    #[tokio::test]
    async fn one_failure_does_not_affect_the_others() {
        let resolver = StaticResolver::new()
            .txt("example.com", &["\"v=spf1 -all\""])
            .txt("_dmarc.example.com", &["\"v=DMARC1; p=reject\""])
            .txt("default._domainkey.example.com", &["\"v=DKIM1; p=MIIB\""])
            .fail("example.com", RecordType::Mx, FakeFailure::ServFail);

        let report = Analyzer::new(resolver).analyze("example.com").await.unwrap();
        assert_eq!(report.issues(), &[Mechanism::Mx]);
        assert_eq!(report.score(), 85);
        assert_eq!(report.result(Mechanism::Dkim).selector.as_deref(), Some("default"));
    }

    #[tokio::test]
    async fn checks_run_concurrently() {
        let resolver = StaticResolver::new()
            .fail("example.com", RecordType::Txt, FakeFailure::Hang)
            .fail("example.com", RecordType::Mx, FakeFailure::Hang)
            .fail("_dmarc.example.com", RecordType::Txt, FakeFailure::Hang)
            .fail("google._domainkey.example.com", RecordType::Txt, FakeFailure::Hang);
        let config = AnalyzerConfig::new()
            .selectors(["google"])
            .lookup_timeout(Duration::from_millis(300));
        let analyzer = Analyzer::with_config(resolver, config);

        let started = Instant::now();
        let report = analyzer.analyze("example.com").await.unwrap();
        let elapsed = started.elapsed();

        assert!(report.results().all(|r| !r.is_pass()));
        assert_eq!(report.issues(), &Mechanism::ALL);
        // Sequential lookups would need at least 1200ms.
        assert!(elapsed < Duration::from_millis(900), "took {elapsed:?}");
    }
}
