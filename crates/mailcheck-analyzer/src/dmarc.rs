//! DMARC presence check.

use mailcheck_client::Resolver;
use mailcheck_core::{excerpt, DomainQuery, Mechanism, RecordCheckResult, RecordType};
use std::time::Duration;
use tracing::warn;

use crate::lookup::{bounded, find_record};

/// Version tag every DMARC record starts with
pub const DMARC_TAG: &str = "v=DMARC1";

/// Look for a DMARC policy at `_dmarc.<domain>`.
pub async fn check_dmarc<R: Resolver + ?Sized>(
    resolver: &R,
    domain: &DomainQuery,
    timeout: Duration,
) -> RecordCheckResult {
    let name = domain.subdomain("_dmarc");

    match bounded(resolver, &name, RecordType::Txt, timeout).await {
        Ok(answers) => match find_record(&answers, &[DMARC_TAG]) {
            Some(record) => RecordCheckResult::pass(
                Mechanism::Dmarc,
                format!("DMARC record found: {}", excerpt(&record)),
            )
            .with_record(record),
            None => RecordCheckResult::fail(Mechanism::Dmarc, "no DMARC record found"),
        },
        Err(e) => {
            warn!(name = %name, error = %e, "DMARC lookup failed");
            RecordCheckResult::error(Mechanism::Dmarc, format!("DMARC lookup failed: {e}"))
        }
    }
}
