use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{DomainReport, Mechanism};

/// Lead payload accepted by the relay.
///
/// The relay forwards the whole body to the spreadsheet log and the
/// email, domain, source and list id to the marketing platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadSubmission {
    /// Captured email address
    pub email: String,

    /// Domain that was analyzed
    pub domain: String,

    /// Where the lead came from
    pub source: String,

    /// Marketing list to subscribe the profile to
    #[serde(default, rename = "klaviyoListId", skip_serializing_if = "Option::is_none")]
    pub list_id: Option<String>,

    /// Overall report score
    pub score: u8,

    /// Names of mechanisms that did not pass
    pub issues: Vec<String>,

    /// SPF pass flag
    pub spf: bool,

    /// DKIM pass flag
    pub dkim: bool,

    /// DMARC pass flag
    pub dmarc: bool,

    /// MX pass flag
    pub mx: bool,

    /// Submission time
    pub timestamp: DateTime<Utc>,
}

impl LeadSubmission {
    /// Build a submission from a report and the captured address
    #[must_use]
    pub fn from_report(
        email: impl Into<String>,
        report: &DomainReport,
        source: impl Into<String>,
        list_id: Option<String>,
    ) -> Self {
        Self {
            email: email.into(),
            domain: report.domain().to_string(),
            source: source.into(),
            list_id,
            score: report.score(),
            issues: report.issues().iter().map(ToString::to_string).collect(),
            spf: report.passed(Mechanism::Spf),
            dkim: report.passed(Mechanism::Dkim),
            dmarc: report.passed(Mechanism::Dmarc),
            mx: report.passed(Mechanism::Mx),
            timestamp: Utc::now(),
        }
    }
}

/// Relay response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayAck {
    /// Raw result from the spreadsheet sink
    #[serde(default)]
    pub sheets_result: Option<serde_json::Value>,

    /// Raw result from the marketing platform
    #[serde(default)]
    pub klaviyo_result: Option<serde_json::Value>,

    /// Overall success flag
    #[serde(default)]
    pub ok: bool,
}

impl RelayAck {
    /// First error message reported by either sink
    #[must_use]
    pub fn error_message(&self) -> Option<String> {
        [&self.sheets_result, &self.klaviyo_result]
            .into_iter()
            .flatten()
            .find_map(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ack_surfaces_sink_errors() {
        let ack: RelayAck = serde_json::from_str(
            r#"{"sheetsResult":{"status":"ok"},"klaviyoResult":{"error":"bad list"},"ok":false}"#,
        )
        .unwrap();
        assert!(!ack.ok);
        assert_eq!(ack.error_message().as_deref(), Some("bad list"));
    }
}
