//! Analyzer configuration.

use mailcheck_core::ScoreWeights;
use std::time::Duration;

/// DKIM selectors tried when none are configured, in priority order.
///
/// Google Workspace and Microsoft 365 first, then common self-hosted and
/// ESP conventions. The first selector that answers is the one reported.
pub const DEFAULT_SELECTORS: [&str; 10] = [
    "google",
    "default",
    "selector1",
    "selector2",
    "k1",
    "k2",
    "mail",
    "dkim",
    "s1",
    "s2",
];

/// Default per-lookup timeout
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(5);

/// Analyzer configuration
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// DKIM selectors to try, in order
    pub selectors: Vec<String>,
    /// Upper bound on each resolver call
    pub lookup_timeout: Duration,
    /// Report scoring weights
    pub weights: ScoreWeights,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            selectors: DEFAULT_SELECTORS.iter().map(ToString::to_string).collect(),
            lookup_timeout: DEFAULT_LOOKUP_TIMEOUT,
            weights: ScoreWeights::default(),
        }
    }
}

impl AnalyzerConfig {
    /// Create the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the selector list. Blank entries are dropped, order is kept.
    #[must_use]
    pub fn selectors<I, S>(mut self, selectors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.selectors = selectors
            .into_iter()
            .map(|s| s.as_ref().trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();
        self
    }

    /// Set the per-lookup timeout
    #[must_use]
    pub const fn lookup_timeout(mut self, timeout: Duration) -> Self {
        self.lookup_timeout = timeout;
        self
    }

    /// Set the scoring weights
    #[must_use]
    pub const fn weights(mut self, weights: ScoreWeights) -> Self {
        self.weights = weights;
        self
    }
}
