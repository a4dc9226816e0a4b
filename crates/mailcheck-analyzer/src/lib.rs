//! Email authentication analysis for a domain.
//!
//! Given any [`Resolver`](mailcheck_client::Resolver), the [`Analyzer`] checks
//! SPF, DKIM, DMARC and MX concurrently and folds the four results into a
//! scored [`DomainReport`](mailcheck_core::DomainReport). Lookup failures
//! never abort an analysis; they surface as `error` results.
//!
//! The individual checks are public for callers that only need one.

#![doc(html_root_url = "https://docs.rs/mailcheck-analyzer/0.3.0")]

mod analyzer;
mod config;
pub mod dkim;
pub mod dmarc;
mod lookup;
pub mod mx;
pub mod spf;

pub use analyzer::Analyzer;
pub use config::{AnalyzerConfig, DEFAULT_LOOKUP_TIMEOUT, DEFAULT_SELECTORS};
pub use lookup::clean_txt;
