//! Domain input normalization.
//!
//! Visitors paste all kinds of things into a domain field: full URLs,
//! `www.` hosts, mixed case, trailing paths. Everything is reduced to a bare
//! lower-case host name before any lookup is made.

use serde::{Deserialize, Serialize};

use crate::error::{MailcheckError, Result};

/// A normalized domain name, ready to be queried.
///
/// Deserialized values pass through [`normalize_domain`] like parsed ones.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DomainQuery(String);

impl DomainQuery {
    /// Normalize raw user input into a domain query.
    pub fn parse(raw: &str) -> Result<Self> {
        normalize_domain(raw).map(Self)
    }

    /// The normalized domain
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Build a name under this domain (`_dmarc`, `google._domainkey`, ...)
    #[must_use]
    pub fn subdomain(&self, prefix: &str) -> String {
        format!("{prefix}.{}", self.0)
    }
}

impl std::fmt::Display for DomainQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for DomainQuery {
    type Err = MailcheckError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for DomainQuery {
    type Error = MailcheckError;

    fn try_from(raw: String) -> Result<Self> {
        Self::parse(&raw)
    }
}

impl From<DomainQuery> for String {
    fn from(query: DomainQuery) -> Self {
        query.0
    }
}

impl AsRef<str> for DomainQuery {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Reduce raw input to a bare, lower-case domain.
///
/// Strips a leading `http://` or `https://`, leading `www.` labels, anything
/// from the first `/`, `?` or `#`, a `:port` suffix and a trailing dot.
/// Idempotent on its own output.
pub fn normalize_domain(raw: &str) -> Result<String> {
    let lowered = raw.trim().to_lowercase();

    let mut host = lowered.as_str();
    for scheme in ["https://", "http://"] {
        if let Some(rest) = host.strip_prefix(scheme) {
            host = rest;
            break;
        }
    }
    if let Some(end) = host.find(['/', '?', '#']) {
        host = &host[..end];
    }
    if let Some((name, _port)) = host.rsplit_once(':') {
        host = name;
    }
    host = host.strip_suffix('.').unwrap_or(host);

    while let Some(rest) = host.strip_prefix("www.") {
        if !rest.contains('.') {
            break;
        }
        host = rest;
    }

    validate(host, raw)?;
    Ok(host.to_string())
}

fn validate(host: &str, raw: &str) -> Result<()> {
    if host.is_empty() {
        return Err(MailcheckError::InvalidDomain(format!("{raw:?} is empty")));
    }

    if let Some(bad) = host
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '.'))
    {
        return Err(MailcheckError::InvalidDomain(format!(
            "{raw:?} contains invalid character {bad:?}"
        )));
    }

    let labels: Vec<&str> = host.split('.').collect();
    if labels.len() < 2 {
        return Err(MailcheckError::InvalidDomain(format!(
            "{raw:?} has no top-level domain"
        )));
    }
    if labels.iter().any(|l| l.is_empty() || l.len() > 63) {
        return Err(MailcheckError::InvalidDomain(format!(
            "{raw:?} has an empty or oversized label"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_scheme_www_and_path() {
        assert_eq!(
            normalize_domain("https://www.Example.com/path").unwrap(),
            "example.com"
        );
        assert_eq!(
            normalize_domain("http://shop.example.co.uk/a/b?c=d").unwrap(),
            "shop.example.co.uk"
        );
    }

    #[test]
    fn strips_port_query_and_trailing_dot() {
        assert_eq!(normalize_domain("example.com:8443").unwrap(), "example.com");
        assert_eq!(normalize_domain("example.com?utm=x").unwrap(), "example.com");
        assert_eq!(normalize_domain("  EXAMPLE.COM.  ").unwrap(), "example.com");
    }

    #[test]
    fn is_idempotent() {
        for raw in [
            "https://www.Example.com/path",
            "WWW.mail.example.org",
            "http://example.net:80/#top",
            "sub.domain.io",
        ] {
            let once = normalize_domain(raw).unwrap();
            assert_eq!(normalize_domain(&once).unwrap(), once);
        }
    }

    #[test]
    fn www_is_kept_when_it_is_the_registered_name() {
        assert_eq!(normalize_domain("www.www.example.com").unwrap(), "example.com");
        assert_eq!(normalize_domain("www.com").unwrap(), "www.com");
    }

    #[test]
    fn rejects_garbage() {
        for raw in [
            "",
            "   ",
            "localhost",
            "https://",
            "exa mple.com",
            "example..com",
            ".com",
            "ex_ample.com",
        ] {
            let err = normalize_domain(raw).unwrap_err();
            assert!(matches!(err, MailcheckError::InvalidDomain(_)), "{raw:?}");
        }
    }

    #[test]
    fn domain_query_builds_subdomains() {
        let q = DomainQuery::parse("Example.com").unwrap();
        assert_eq!(q.subdomain("_dmarc"), "_dmarc.example.com");
        assert_eq!(q.to_string(), "example.com");
    }

    #[test]
    fn deserializing_normalizes_and_validates() {
        let q: DomainQuery = serde_json::from_str("\"https://www.Example.com/x\"").unwrap();
        assert_eq!(q.as_str(), "example.com");
        assert_eq!(serde_json::to_string(&q).unwrap(), "\"example.com\"");

        assert!(serde_json::from_str::<DomainQuery>("\"NOT A DOMAIN\"").is_err());
    }
}
