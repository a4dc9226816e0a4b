//! Bounded resolver calls and TXT answer handling.

use mailcheck_client::Resolver;
use mailcheck_core::{MailcheckError, RecordType, Result};
use std::time::Duration;
use tracing::debug;

/// Resolve with an upper bound on wall time.
#[allow(clippy::cast_possible_truncation)]
pub async fn bounded<R: Resolver + ?Sized>(
    resolver: &R,
    name: &str,
    record_type: RecordType,
    timeout: Duration,
) -> Result<Vec<String>> {
    debug!(name = %name, %record_type, "lookup");
    tokio::time::timeout(timeout, resolver.lookup(name, record_type))
        .await
        .map_err(|_| MailcheckError::Timeout(timeout.as_millis() as u64))?
}

/// Turn a presentation-format TXT answer into its text.
///
/// DoH resolvers return TXT data quoted, and long records as several
/// quoted chunks (`"v=DKIM1; k=rsa; " "p=MIGf..."`). Chunks are joined.
pub fn clean_txt(data: &str) -> String {
    let trimmed = data.trim();
    if !trimmed.starts_with('"') {
        return trimmed.to_string();
    }

    let mut out = String::with_capacity(trimmed.len());
    let mut in_quotes = false;
    let mut escaped = false;
    for c in trimmed.chars() {
        if escaped {
            out.push(c);
            escaped = false;
        } else if c == '\\' && in_quotes {
            escaped = true;
        } else if c == '"' {
            in_quotes = !in_quotes;
        } else if in_quotes {
            out.push(c);
        }
    }
    out
}

/// First answer whose text contains any of `tags`, compared case-insensitively.
pub fn find_record(answers: &[String], tags: &[&str]) -> Option<String> {
    answers.iter().map(|a| clean_txt(a)).find(|text| {
        let lower = text.to_ascii_lowercase();
        tags.iter().any(|tag| lower.contains(&tag.to_ascii_lowercase()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mailcheck_client::{FakeFailure, StaticResolver};

    #[test]
    fn strips_quotes_and_joins_chunks() {
        assert_eq!(clean_txt("\"v=spf1 -all\""), "v=spf1 -all");
        assert_eq!(
            clean_txt("\"v=DKIM1; k=rsa; \" \"p=MIGfMA0\""),
            "v=DKIM1; k=rsa; p=MIGfMA0"
        );
        assert_eq!(clean_txt("v=spf1 ~all"), "v=spf1 ~all");
        assert_eq!(clean_txt(r#""say \"hi\"""#), r#"say "hi""#);
    }

    #[test]
    fn finds_first_tagged_record() {
        let answers = vec![
            "\"google-site-verification=abc\"".to_string(),
            "\"v=spf1 include:_spf.example.com ~all\"".to_string(),
            "\"v=spf1 -all\"".to_string(),
        ];
        assert_eq!(
            find_record(&answers, &["v=spf1"]).as_deref(),
            Some("v=spf1 include:_spf.example.com ~all")
        );
        assert_eq!(find_record(&answers, &["v=DMARC1"]), None);
    }

    #[test]
    fn tag_match_ignores_case() {
        let answers = vec!["\"V=DMARC1; P=reject\"".to_string()];
        assert!(find_record(&answers, &["v=DMARC1"]).is_some());
    }

    #[tokio::test]
    async fn hanging_lookup_is_cut_off() {
        let resolver =
            StaticResolver::new().fail("example.com", RecordType::Txt, FakeFailure::Hang);
        let err = bounded(&resolver, "example.com", RecordType::Txt, Duration::from_millis(20))
            .await
            .unwrap_err();
        assert!(matches!(err, MailcheckError::Timeout(20)));
    }
}
