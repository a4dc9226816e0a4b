//! DKIM selector probing.
//!
//! There is no way to list a domain's DKIM keys, so a fixed list of common
//! selectors is tried in order. Probing is sequential and stops at the first
//! selector that publishes a key; selectors after it are never queried, and
//! the reported selector is always the earliest match in list order.

use mailcheck_client::Resolver;
use mailcheck_core::{excerpt, DomainQuery, Mechanism, RecordCheckResult, RecordType};
use std::time::Duration;
use tracing::{debug, warn};

use crate::lookup::{bounded, find_record};

/// Any of these marks an answer as a DKIM key record. Many published keys
/// omit the version tag, so the key type and key data tags count too.
pub const DKIM_TAGS: [&str; 4] = ["v=DKIM1", "k=rsa", "k=ed25519", "p="];

/// Try `selectors` in order under `<selector>._domainkey.<domain>`.
pub async fn check_dkim<R: Resolver + ?Sized>(
    resolver: &R,
    domain: &DomainQuery,
    selectors: &[String],
    timeout: Duration,
) -> RecordCheckResult {
    let mut failed_lookups = 0usize;

    for selector in selectors {
        let name = domain.subdomain(&format!("{selector}._domainkey"));

        match bounded(resolver, &name, RecordType::Txt, timeout).await {
            Ok(answers) => {
                if let Some(record) = find_record(&answers, &DKIM_TAGS) {
                    debug!(domain = %domain, selector = %selector, "DKIM key found");
                    return RecordCheckResult::pass(
                        Mechanism::Dkim,
                        format!(
                            "DKIM record found at selector '{selector}': {}",
                            excerpt(&record)
                        ),
                    )
                    .with_record(record)
                    .with_selector(selector.clone());
                }
            }
            Err(e) => {
                warn!(name = %name, error = %e, "DKIM selector lookup failed, continuing");
                failed_lookups += 1;
            }
        }
    }

    let mut message = format!(
        "no DKIM record found (selectors tried: {})",
        selectors.join(", ")
    );
    if failed_lookups > 0 {
        message.push_str(&format!("; {failed_lookups} lookup(s) failed"));
    }
    RecordCheckResult::fail(Mechanism::Dkim, message)
}
