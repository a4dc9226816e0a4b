//! # mailcheck-cli
//!
//! Command-line front end for the `mailcheck` analyzer.
//!
//! ## Features
//!
//! - **Domain checks**: SPF, DKIM, DMARC and MX with a 0-100 score
//! - **Impact calculator**: estimated revenue lost to poor inbox placement
//! - **Educational mode**: `--explain` describes the lookups a command makes
//! - **Multiple output formats**: Pretty, JSON, CSV, YAML

pub mod cli;
pub mod config;
pub mod education;
pub mod output;

pub use cli::run;
