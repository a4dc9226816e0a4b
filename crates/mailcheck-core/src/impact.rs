//! Revenue impact of poor email authentication.
//!
//! A deliberately simple model: inbox placement scales linearly with the
//! report score, from 60% at score 0 to 95% at score 100. Every email that
//! a perfectly configured domain would have landed, but this one does not,
//! is revenue left on the table.

use serde::{Deserialize, Serialize};

use crate::error::{MailcheckError, Result};

/// Inbox placement at score 0
pub const FLOOR_INBOX_RATE: f64 = 0.60;

/// Inbox placement at score 100
pub const BASELINE_INBOX_RATE: f64 = 0.95;

/// Sender-provided figures for the calculator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpactInputs {
    /// Emails sent per month
    pub monthly_emails: u64,

    /// Average order value, in the sender's currency
    pub average_order_value: f64,

    /// Percentage of delivered emails that convert, 0-100
    pub conversion_rate_pct: f64,
}

impl ImpactInputs {
    /// Reject negative, non-finite or out-of-range figures
    pub fn validate(&self) -> Result<()> {
        if !self.average_order_value.is_finite() || self.average_order_value < 0.0 {
            return Err(MailcheckError::Config(format!(
                "average order value must be a non-negative number, got {}",
                self.average_order_value
            )));
        }
        if !(0.0..=100.0).contains(&self.conversion_rate_pct) {
            return Err(MailcheckError::Config(format!(
                "conversion rate must be between 0 and 100, got {}",
                self.conversion_rate_pct
            )));
        }
        Ok(())
    }
}

/// Calculator output
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpactEstimate {
    /// Estimated inbox placement for this domain
    pub inbox_rate: f64,

    /// Inbox placement of a fully authenticated domain
    pub baseline_inbox_rate: f64,

    /// Emails per month that miss the inbox because of authentication gaps
    pub missed_emails_per_month: u64,

    /// Revenue lost per month
    pub lost_revenue_per_month: f64,

    /// Revenue lost per year
    pub lost_revenue_per_year: f64,
}

/// Inbox placement implied by a report score
#[must_use]
pub fn inbox_rate(score: u8) -> f64 {
    let score = f64::from(score.min(100)) / 100.0;
    (BASELINE_INBOX_RATE - FLOOR_INBOX_RATE).mul_add(score, FLOOR_INBOX_RATE)
}

/// Estimate the revenue lost for a domain with the given score.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn estimate(score: u8, inputs: &ImpactInputs) -> Result<ImpactEstimate> {
    inputs.validate()?;

    let rate = inbox_rate(score);
    let gap = (BASELINE_INBOX_RATE - rate).max(0.0);
    let missed = (inputs.monthly_emails as f64 * gap).round();
    let monthly = missed * (inputs.conversion_rate_pct / 100.0) * inputs.average_order_value;

    Ok(ImpactEstimate {
        inbox_rate: rate,
        baseline_inbox_rate: BASELINE_INBOX_RATE,
        missed_emails_per_month: missed as u64,
        lost_revenue_per_month: monthly,
        lost_revenue_per_year: monthly * 12.0,
    })
}
