//! Caller-owned lead funnel.
//!
//! The analyzer itself is stateless. A front end that wants to gate the
//! revenue calculator behind email capture keeps one [`LeadSession`] per
//! visitor and walks it through check, capture, calculate.

use serde::{Deserialize, Serialize};

use crate::error::{MailcheckError, Result};
use crate::impact::{self, ImpactEstimate, ImpactInputs};
use crate::types::{DomainReport, LeadSubmission};

/// Furthest step a visitor has completed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FunnelStage {
    /// Nothing done yet
    #[default]
    Start,
    /// A domain report is available
    DomainChecked,
    /// Email captured, calculator unlocked
    EmailCaptured,
}

/// Progress of one visitor through the funnel
#[derive(Debug, Clone, Default)]
pub struct LeadSession {
    report: Option<DomainReport>,
    email: Option<String>,
}

impl LeadSession {
    /// Start an empty session
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current stage
    #[must_use]
    pub fn stage(&self) -> FunnelStage {
        match (&self.report, &self.email) {
            (None, _) => FunnelStage::Start,
            (Some(_), None) => FunnelStage::DomainChecked,
            (Some(_), Some(_)) => FunnelStage::EmailCaptured,
        }
    }

    /// Store a finished report. Checking a new domain resets the captured email.
    pub fn record_report(&mut self, report: DomainReport) {
        if self
            .report
            .as_ref()
            .is_some_and(|r| r.domain() != report.domain())
        {
            self.email = None;
        }
        self.report = Some(report);
    }

    /// The stored report
    #[must_use]
    pub const fn report(&self) -> Option<&DomainReport> {
        self.report.as_ref()
    }

    /// The captured address
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Capture the visitor's address. Requires a report.
    pub fn capture_email(&mut self, email: &str) -> Result<()> {
        if self.report.is_none() {
            return Err(MailcheckError::Funnel(
                "check a domain before capturing an email".into(),
            ));
        }
        self.email = Some(validate_email(email)?);
        Ok(())
    }

    /// Returns true once the calculator may be shown
    #[must_use]
    pub fn calculator_unlocked(&self) -> bool {
        self.stage() == FunnelStage::EmailCaptured
    }

    /// Run the revenue calculator. Requires a captured email.
    pub fn estimate_impact(&self, inputs: &ImpactInputs) -> Result<ImpactEstimate> {
        match (&self.report, &self.email) {
            (Some(report), Some(_)) => impact::estimate(report.score(), inputs),
            _ => Err(MailcheckError::Funnel(
                "the calculator unlocks after email capture".into(),
            )),
        }
    }

    /// Relay payload for the captured lead
    pub fn lead_submission(
        &self,
        source: &str,
        list_id: Option<String>,
    ) -> Result<LeadSubmission> {
        match (&self.report, &self.email) {
            (Some(report), Some(email)) => Ok(LeadSubmission::from_report(
                email.clone(),
                report,
                source,
                list_id,
            )),
            _ => Err(MailcheckError::Funnel(
                "no captured lead to submit".into(),
            )),
        }
    }
}

/// Shape check for an email address: one `@`, a non-empty local part and
/// a dotted domain. Returns the trimmed, domain-lowercased address.
pub fn validate_email(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    let invalid = || MailcheckError::InvalidEmail(trimmed.to_string());

    let (local, domain) = trimmed.split_once('@').ok_or_else(invalid)?;
    if local.is_empty()
        || domain.contains('@')
        || trimmed.chars().any(char::is_whitespace)
    {
        return Err(invalid());
    }
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|l| l.is_empty()) {
        return Err(invalid());
    }

    Ok(format!("{local}@{}", domain.to_lowercase()))
}
