//! SPF presence check.

use mailcheck_client::Resolver;
use mailcheck_core::{excerpt, DomainQuery, Mechanism, RecordCheckResult, RecordType};
use std::time::Duration;
use tracing::warn;

use crate::lookup::{bounded, find_record};

/// Version tag every SPF record starts with
pub const SPF_TAG: &str = "v=spf1";

/// Look for an SPF record on the domain itself.
pub async fn check_spf<R: Resolver + ?Sized>(
    resolver: &R,
    domain: &DomainQuery,
    timeout: Duration,
) -> RecordCheckResult {
    match bounded(resolver, domain.as_str(), RecordType::Txt, timeout).await {
        Ok(answers) => match find_record(&answers, &[SPF_TAG]) {
            Some(record) => RecordCheckResult::pass(
                Mechanism::Spf,
                format!("SPF record found: {}", excerpt(&record)),
            )
            .with_record(record),
            None => RecordCheckResult::fail(Mechanism::Spf, "no SPF record found"),
        },
        Err(e) => {
            warn!(domain = %domain, error = %e, "SPF lookup failed");
            RecordCheckResult::error(Mechanism::Spf, format!("SPF lookup failed: {e}"))
        }
    }
}
