//! Report scoring.
//!
//! One rule for every report: each mechanism carries a fixed number of
//! points, a pass earns all of them, a warning half, anything else none.

use serde::{Deserialize, Serialize};

use crate::types::{CheckStatus, Mechanism};

/// Points available per mechanism. The defaults sum to 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreWeights {
    /// SPF points
    pub spf: u8,
    /// DKIM points
    pub dkim: u8,
    /// DMARC points
    pub dmarc: u8,
    /// MX points
    pub mx: u8,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self::standard()
    }
}

impl ScoreWeights {
    /// 30 / 30 / 25 / 15
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            spf: 30,
            dkim: 30,
            dmarc: 25,
            mx: 15,
        }
    }

    /// True for the 30 / 30 / 25 / 15 split
    #[must_use]
    pub fn is_standard(&self) -> bool {
        *self == Self::standard()
    }

    /// Points available for a mechanism
    #[must_use]
    pub const fn weight(&self, mechanism: Mechanism) -> u8 {
        match mechanism {
            Mechanism::Spf => self.spf,
            Mechanism::Dkim => self.dkim,
            Mechanism::Dmarc => self.dmarc,
            Mechanism::Mx => self.mx,
        }
    }

    /// Sum of all weights
    #[must_use]
    pub fn total(&self) -> u32 {
        Mechanism::ALL
            .iter()
            .map(|m| u32::from(self.weight(*m)))
            .sum()
    }

    /// Points earned by one mechanism
    #[must_use]
    pub const fn points(&self, mechanism: Mechanism, status: CheckStatus) -> u8 {
        let weight = self.weight(mechanism);
        match status {
            CheckStatus::Pass => weight,
            CheckStatus::Warning => weight / 2,
            CheckStatus::Fail | CheckStatus::Error => 0,
        }
    }

    /// Score on a 0-100 scale, normalized by [`Self::total`]
    #[must_use]
    pub fn score<I>(&self, statuses: I) -> u8
    where
        I: IntoIterator<Item = (Mechanism, CheckStatus)>,
    {
        let total = self.total();
        if total == 0 {
            return 0;
        }
        let earned: u32 = statuses
            .into_iter()
            .map(|(m, s)| u32::from(self.points(m, s)))
            .sum();
        u8::try_from((earned.min(total) * 100) / total).unwrap_or(100)
    }
}
