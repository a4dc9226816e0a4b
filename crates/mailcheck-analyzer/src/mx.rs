//! MX presence check.

use mailcheck_client::Resolver;
use mailcheck_core::{DomainQuery, Mechanism, RecordCheckResult, RecordType};
use std::time::Duration;
use tracing::warn;

use crate::lookup::bounded;

/// Check that the domain names at least one mail exchanger.
pub async fn check_mx<R: Resolver + ?Sized>(
    resolver: &R,
    domain: &DomainQuery,
    timeout: Duration,
) -> RecordCheckResult {
    match bounded(resolver, domain.as_str(), RecordType::Mx, timeout).await {
        Ok(answers) => {
            let records: Vec<&str> = answers
                .iter()
                .map(|a| a.trim())
                .filter(|a| !a.is_empty())
                .collect();
            match records.first() {
                Some(first) => RecordCheckResult::pass(
                    Mechanism::Mx,
                    format!("{} MX record(s) found, first: {first}", records.len()),
                )
                .with_record(records.join(", ")),
                None => RecordCheckResult::fail(Mechanism::Mx, "no MX records found"),
            }
        }
        Err(e) => {
            warn!(domain = %domain, error = %e, "MX lookup failed");
            RecordCheckResult::error(Mechanism::Mx, format!("MX lookup failed: {e}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mailcheck_client::StaticResolver;
    use mailcheck_core::CheckStatus;

    fn domain() -> DomainQuery {
        DomainQuery::parse("example.com").unwrap()
    }

    #[tokio::test]
    async fn reports_count_and_first_record() {
        let resolver = StaticResolver::new().mx(
            "example.com",
            &["1 aspmx.l.google.com.", "5 alt1.aspmx.l.google.com."],
        );
        let result = check_mx(&resolver, &domain(), Duration::from_secs(1)).await;
        assert_eq!(result.status, CheckStatus::Pass);
        assert_eq!(result.message, "2 MX record(s) found, first: 1 aspmx.l.google.com.");
    }

    #[tokio::test]
    async fn no_records_fails() {
        let resolver = StaticResolver::new();
        let result = check_mx(&resolver, &domain(), Duration::from_secs(1)).await;
        assert_eq!(result.status, CheckStatus::Fail);
        assert_eq!(result.message, "no MX records found");
    }
}
