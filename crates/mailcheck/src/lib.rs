//! Check a domain's email authentication setup.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! #[tokio::main]
//! async fn main() -> mailcheck::Result<()> {
//!     let report = mailcheck::analyze("https://www.example.com").await?;
//!
//!     println!("{}: {}/100", report.domain(), report.score());
//!     for result in report.results() {
//!         println!("  {:6} {:7} {}", result.mechanism, result.status, result.message);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! For a custom resolver endpoint, selector list or timeout, build an
//! [`Analyzer`] directly:
//!
//! ```rust,ignore
//! use mailcheck::{Analyzer, AnalyzerConfig, DohClient};
//! use std::time::Duration;
//!
//! let client = DohClient::builder()
//!     .endpoint("https://cloudflare-dns.com/dns-query")
//!     .build();
//! let config = AnalyzerConfig::new()
//!     .selectors(["google", "selector1", "mandrill"])
//!     .lookup_timeout(Duration::from_secs(3));
//! let report = Analyzer::with_config(client, config).analyze("example.com").await?;
//! ```
//!
//! # Features
//!
//! - `default` - Uses rustls for TLS
//! - `rustls` - Use rustls for TLS (recommended)
//! - `native-tls` - Use system native TLS

#![doc(html_root_url = "https://docs.rs/mailcheck/0.3.0")]

// Re-export core types
pub use mailcheck_core::*;

// Re-export clients
pub use mailcheck_client::{
    DemoResolver, DohClient, DohClientBuilder, FakeFailure, LeadSink, RelayClient,
    RelayClientBuilder, Resolver, RetryConfig, StaticResolver, DEFAULT_RESOLVER_URL,
};

// Re-export the analyzer
pub use mailcheck_analyzer::{Analyzer, AnalyzerConfig, DEFAULT_LOOKUP_TIMEOUT, DEFAULT_SELECTORS};

// Re-export runtime for convenience
pub use serde;
pub use serde_json;
pub use tokio;

/// Analyze a domain against the default public resolver.
pub async fn analyze(domain: &str) -> Result<DomainReport> {
    Analyzer::new(DohClient::new()).analyze(domain).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn analyze_rejects_garbage_without_network() {
        let err = analyze("definitely not a domain").await.unwrap_err();
        assert!(matches!(err, MailcheckError::InvalidDomain(_)));
    }

    #[tokio::test]
    async fn demo_resolver_plugs_into_the_analyzer() {
        let analyzer = Analyzer::new(DemoResolver::new(42).pass_rate(1.0));
        let report = analyzer.analyze("demo-shop.example").await.unwrap();
        assert_eq!(report.results().count(), 4);
        assert!(report.passed(Mechanism::Spf));
        assert!(report.passed(Mechanism::Dmarc));
        assert!(report.passed(Mechanism::Mx));
    }
}
