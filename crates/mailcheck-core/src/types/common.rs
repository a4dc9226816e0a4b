use serde::{Deserialize, Serialize};

/// Email authentication mechanism checked by the analyzer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mechanism {
    /// Sender Policy Framework
    Spf,
    /// DomainKeys Identified Mail
    Dkim,
    /// Domain-based Message Authentication, Reporting and Conformance
    Dmarc,
    /// Mail exchanger records
    Mx,
}

impl Mechanism {
    /// Every mechanism, in report order
    pub const ALL: [Self; 4] = [Self::Spf, Self::Dkim, Self::Dmarc, Self::Mx];

    /// Upper-case display name (`SPF`, `DKIM`, ...)
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Spf => "SPF",
            Self::Dkim => "DKIM",
            Self::Dmarc => "DMARC",
            Self::Mx => "MX",
        }
    }
}

impl std::fmt::Display for Mechanism {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome of a single mechanism check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    /// Record found and recognized
    Pass,
    /// No matching record
    Fail,
    /// Record present but weak
    Warning,
    /// Lookup could not be completed
    Error,
}

impl CheckStatus {
    /// Returns true for [`CheckStatus::Pass`]
    #[must_use]
    pub const fn is_pass(self) -> bool {
        matches!(self, Self::Pass)
    }
}

impl std::fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pass => write!(f, "pass"),
            Self::Fail => write!(f, "fail"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// DNS record type requested from the resolver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordType {
    /// Text record
    Txt,
    /// Mail exchanger record
    Mx,
}

impl RecordType {
    /// Mnemonic sent as the `type` query parameter
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Txt => "TXT",
            Self::Mx => "MX",
        }
    }

    /// Numeric RR type code as it appears in DoH answers
    #[must_use]
    pub const fn code(self) -> u16 {
        match self {
            Self::Txt => 16,
            Self::Mx => 15,
        }
    }
}

impl std::fmt::Display for RecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
