//! The resolver seam.

use async_trait::async_trait;
use mailcheck_core::{RecordType, Result};
use std::sync::Arc;

/// Source of DNS answers.
///
/// Implementations return the presentation-format `data` strings of the
/// answers, an empty list when the name has no records of that type, and
/// an error only when the lookup itself failed.
#[async_trait]
pub trait Resolver: Send + Sync {
    /// Look up records of `record_type` at `name`
    async fn lookup(&self, name: &str, record_type: RecordType) -> Result<Vec<String>>;
}

#[async_trait]
impl<R: Resolver + ?Sized> Resolver for Arc<R> {
    async fn lookup(&self, name: &str, record_type: RecordType) -> Result<Vec<String>> {
        (**self).lookup(name, record_type).await
    }
}

#[async_trait]
impl<R: Resolver + ?Sized> Resolver for &R {
    async fn lookup(&self, name: &str, record_type: RecordType) -> Result<Vec<String>> {
        (**self).lookup(name, record_type).await
    }
}
