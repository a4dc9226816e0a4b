//! Core types for the mailcheck domain analyzer.
//!
//! This crate provides the foundational types used across the workspace:
//!
//! - **Types**: check results, the aggregated [`DomainReport`], DoH wire types
//! - **Errors**: error taxonomy with [`MailcheckError`]
//! - **Normalization**: [`DomainQuery`] and [`normalize_domain`]
//! - **Scoring**: [`ScoreWeights`]
//! - **Funnel**: the caller-owned [`LeadSession`] and revenue [`impact`] calculator
//!
//! # Example
//!
//! ```rust,ignore
//! use mailcheck_core::{DomainReport, Mechanism, Result};
//!
//! fn summarize(report: &DomainReport) -> Result<()> {
//!     println!("{}: {}/100", report.domain(), report.score());
//!     for issue in report.issues() {
//!         println!("  missing {issue}");
//!     }
//!     Ok(())
//! }
//! ```

#![doc(html_root_url = "https://docs.rs/mailcheck-core/0.3.0")]

mod domain;
mod error;
pub mod funnel;
pub mod impact;
mod scoring;
pub mod types;

pub use domain::{normalize_domain, DomainQuery};
pub use error::{MailcheckError, Result};
pub use funnel::{FunnelStage, LeadSession};
pub use impact::{ImpactEstimate, ImpactInputs};
pub use scoring::ScoreWeights;
pub use types::*;
