//! HTTP clients for mailcheck.
//!
//! This crate provides the [`DohClient`] used to resolve records through a
//! JSON DNS-over-HTTPS endpoint, the [`Resolver`] trait the analyzer is
//! written against, in-process fakes, and the [`RelayClient`] that forwards
//! captured leads.

#![doc(html_root_url = "https://docs.rs/mailcheck-client/0.3.0")]

mod client;
mod config;
pub mod fake;
mod relay;
mod resolver;

pub use client::{DohClient, DohClientBuilder, DEFAULT_RESOLVER_URL};
pub use config::*;
pub use fake::{DemoResolver, FakeFailure, StaticResolver};
pub use mailcheck_core::{MailcheckError, Result};
pub use relay::{LeadSink, RelayClient, RelayClientBuilder};
pub use resolver::Resolver;
