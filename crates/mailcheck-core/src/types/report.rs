use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{CheckStatus, Mechanism};
use crate::domain::DomainQuery;
use crate::scoring::ScoreWeights;

/// Longest record excerpt kept in a check message
pub const RECORD_EXCERPT_LEN: usize = 100;

/// Result of checking one authentication mechanism
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordCheckResult {
    /// Mechanism that was checked
    pub mechanism: Mechanism,

    /// Outcome
    pub status: CheckStatus,

    /// Human-readable explanation
    pub message: String,

    /// Raw record text, when one was found
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record: Option<String>,

    /// DKIM selector that matched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector: Option<String>,
}

impl RecordCheckResult {
    /// A passing result
    #[must_use]
    pub fn pass(mechanism: Mechanism, message: impl Into<String>) -> Self {
        Self::new(mechanism, CheckStatus::Pass, message)
    }

    /// A failing result
    #[must_use]
    pub fn fail(mechanism: Mechanism, message: impl Into<String>) -> Self {
        Self::new(mechanism, CheckStatus::Fail, message)
    }

    /// A result for a lookup that could not be completed
    #[must_use]
    pub fn error(mechanism: Mechanism, message: impl Into<String>) -> Self {
        Self::new(mechanism, CheckStatus::Error, message)
    }

    fn new(mechanism: Mechanism, status: CheckStatus, message: impl Into<String>) -> Self {
        Self {
            mechanism,
            status,
            message: message.into(),
            record: None,
            selector: None,
        }
    }

    /// Attach the raw record
    #[must_use]
    pub fn with_record(mut self, record: impl Into<String>) -> Self {
        self.record = Some(record.into());
        self
    }

    /// Attach the DKIM selector
    #[must_use]
    pub fn with_selector(mut self, selector: impl Into<String>) -> Self {
        self.selector = Some(selector.into());
        self
    }

    /// Returns true if the mechanism passed
    #[must_use]
    pub const fn is_pass(&self) -> bool {
        self.status.is_pass()
    }
}

/// Truncate a record to [`RECORD_EXCERPT_LEN`] characters, marking the cut.
#[must_use]
pub fn excerpt(record: &str) -> String {
    if record.chars().count() <= RECORD_EXCERPT_LEN {
        record.to_string()
    } else {
        let cut: String = record.chars().take(RECORD_EXCERPT_LEN).collect();
        format!("{cut}...")
    }
}

/// Deliverability report for one domain.
///
/// Score and issues are derived from the four results at construction
/// and cannot drift from them. Deserialization recomputes both, so a
/// stored report cannot claim a score its results do not earn.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "ReportWire")]
pub struct DomainReport {
    domain: DomainQuery,
    spf: RecordCheckResult,
    dkim: RecordCheckResult,
    dmarc: RecordCheckResult,
    mx: RecordCheckResult,
    score: u8,
    issues: Vec<Mechanism>,
    #[serde(skip_serializing_if = "ScoreWeights::is_standard")]
    weights: ScoreWeights,
    checked_at: DateTime<Utc>,
}

/// Stored form of a report. Any stored score and issues are ignored.
#[derive(Deserialize)]
struct ReportWire {
    domain: DomainQuery,
    spf: RecordCheckResult,
    dkim: RecordCheckResult,
    dmarc: RecordCheckResult,
    mx: RecordCheckResult,
    #[serde(default)]
    weights: ScoreWeights,
    checked_at: DateTime<Utc>,
}

impl TryFrom<ReportWire> for DomainReport {
    type Error = String;

    fn try_from(wire: ReportWire) -> Result<Self, Self::Error> {
        let results = [&wire.spf, &wire.dkim, &wire.dmarc, &wire.mx];
        for (expected, result) in Mechanism::ALL.iter().zip(results) {
            if result.mechanism != *expected {
                return Err(format!(
                    "{} result stored in the {} slot",
                    result.mechanism, expected
                ));
            }
        }

        let mut report = Self::with_weights(
            wire.domain,
            wire.spf,
            wire.dkim,
            wire.dmarc,
            wire.mx,
            &wire.weights,
        );
        report.checked_at = wire.checked_at;
        Ok(report)
    }
}

impl DomainReport {
    /// Aggregate four results using the default weights
    #[must_use]
    pub fn new(
        domain: DomainQuery,
        spf: RecordCheckResult,
        dkim: RecordCheckResult,
        dmarc: RecordCheckResult,
        mx: RecordCheckResult,
    ) -> Self {
        Self::with_weights(domain, spf, dkim, dmarc, mx, &ScoreWeights::default())
    }

    /// Aggregate four results using custom weights
    #[must_use]
    pub fn with_weights(
        domain: DomainQuery,
        spf: RecordCheckResult,
        dkim: RecordCheckResult,
        dmarc: RecordCheckResult,
        mx: RecordCheckResult,
        weights: &ScoreWeights,
    ) -> Self {
        let results = [&spf, &dkim, &dmarc, &mx];
        let score = weights.score(results.iter().map(|r| (r.mechanism, r.status)));
        let issues = results
            .iter()
            .filter(|r| !r.is_pass())
            .map(|r| r.mechanism)
            .collect();

        Self {
            domain,
            spf,
            dkim,
            dmarc,
            mx,
            score,
            issues,
            weights: *weights,
            checked_at: Utc::now(),
        }
    }

    /// The normalized domain that was analyzed
    #[must_use]
    pub const fn domain(&self) -> &DomainQuery {
        &self.domain
    }

    /// Overall score, 0-100
    #[must_use]
    pub const fn score(&self) -> u8 {
        self.score
    }

    /// Mechanisms that did not pass, in report order
    #[must_use]
    pub fn issues(&self) -> &[Mechanism] {
        &self.issues
    }

    /// When the analysis finished
    #[must_use]
    pub const fn checked_at(&self) -> DateTime<Utc> {
        self.checked_at
    }

    /// Weights the score was computed with
    #[must_use]
    pub const fn weights(&self) -> &ScoreWeights {
        &self.weights
    }

    /// Result for a single mechanism
    #[must_use]
    pub const fn result(&self, mechanism: Mechanism) -> &RecordCheckResult {
        match mechanism {
            Mechanism::Spf => &self.spf,
            Mechanism::Dkim => &self.dkim,
            Mechanism::Dmarc => &self.dmarc,
            Mechanism::Mx => &self.mx,
        }
    }

    /// All four results, in report order
    pub fn results(&self) -> impl Iterator<Item = &RecordCheckResult> {
        Mechanism::ALL.into_iter().map(|m| self.result(m))
    }

    /// Returns true if every mechanism passed
    #[must_use]
    pub fn is_healthy(&self) -> bool {
        self.issues.is_empty()
    }

    /// Pass flag for a mechanism
    #[must_use]
    pub const fn passed(&self, mechanism: Mechanism) -> bool {
        self.result(mechanism).is_pass()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn domain() -> DomainQuery {
        DomainQuery::parse("example.com").unwrap()
    }

    fn all(status: CheckStatus) -> [RecordCheckResult; 4] {
        Mechanism::ALL.map(|m| match status {
            CheckStatus::Pass => RecordCheckResult::pass(m, "ok"),
            CheckStatus::Error => RecordCheckResult::error(m, "boom"),
            _ => RecordCheckResult::fail(m, "missing"),
        })
    }

    fn report(results: [RecordCheckResult; 4]) -> DomainReport {
        let [spf, dkim, dmarc, mx] = results;
        DomainReport::new(domain(), spf, dkim, dmarc, mx)
    }

    #[test]
    fn all_pass_is_max_score_and_no_issues() {
        let report = report(all(CheckStatus::Pass));
        assert_eq!(report.score(), 100);
        assert!(report.issues().is_empty());
        assert!(report.is_healthy());
    }

    #[test]
    fn all_fail_is_min_score_and_every_issue() {
        let report = report(all(CheckStatus::Fail));
        assert_eq!(report.score(), 0);
        assert_eq!(report.issues(), &Mechanism::ALL);
    }

    #[test]
    fn errors_count_as_issues() {
        let mut results = all(CheckStatus::Pass);
        results[2] = RecordCheckResult::error(Mechanism::Dmarc, "timed out");
        let report = report(results);
        assert_eq!(report.issues(), &[Mechanism::Dmarc]);
        assert!(report.score() < 100);
        assert_eq!(report.results().count(), 4);
    }

    #[test]
    fn excerpt_truncates_long_records() {
        let long = "v=spf1 ".to_string() + &"include:_spf.example.com ".repeat(10);
        let cut = excerpt(&long);
        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), RECORD_EXCERPT_LEN + 3);
        assert_eq!(excerpt("v=spf1 -all"), "v=spf1 -all");
    }

    #[test]
    fn report_serializes_statuses_lowercase() {
        let report = report(all(CheckStatus::Pass));
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["spf"]["status"], "pass");
        assert_eq!(json["domain"], "example.com");
        assert_eq!(json["score"], 100);
    }

    #[test]
    fn deserializing_recomputes_score_and_issues() {
        let mut json = serde_json::to_value(report(all(CheckStatus::Fail))).unwrap();
        json["score"] = 100.into();
        json["issues"] = serde_json::json!([]);

        let restored: DomainReport = serde_json::from_value(json).unwrap();
        assert_eq!(restored.score(), 0);
        assert_eq!(restored.issues(), &Mechanism::ALL);
    }

    #[test]
    fn deserializing_rejects_an_unnormalized_domain() {
        let mut json = serde_json::to_value(report(all(CheckStatus::Pass))).unwrap();
        json["domain"] = "NOT A DOMAIN".into();
        assert!(serde_json::from_value::<DomainReport>(json).is_err());
    }

    #[test]
    fn deserializing_rejects_misplaced_results() {
        let mut json = serde_json::to_value(report(all(CheckStatus::Pass))).unwrap();
        let spf = json["spf"].clone();
        json["spf"] = json["mx"].clone();
        json["mx"] = spf;
        assert!(serde_json::from_value::<DomainReport>(json).is_err());
    }

    #[test]
    fn custom_weights_survive_a_round_trip() {
        let weights = ScoreWeights {
            spf: 50,
            dkim: 0,
            dmarc: 50,
            mx: 0,
        };
        let [_, dkim, dmarc, mx] = all(CheckStatus::Fail);
        let original = DomainReport::with_weights(
            domain(),
            RecordCheckResult::pass(Mechanism::Spf, "ok"),
            dkim,
            dmarc,
            mx,
            &weights,
        );
        assert_eq!(original.score(), 50);

        let json = serde_json::to_value(&original).unwrap();
        assert_eq!(json["weights"]["spf"], 50);
        let restored: DomainReport = serde_json::from_value(json).unwrap();
        assert_eq!(restored.score(), 50);
        assert_eq!(restored.checked_at(), original.checked_at());
    }

    #[test]
    fn standard_weights_are_not_serialized() {
        let json = serde_json::to_value(report(all(CheckStatus::Pass))).unwrap();
        assert!(json.get("weights").is_none());
    }
}
