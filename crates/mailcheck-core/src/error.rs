use thiserror::Error;

/// Result type alias for mailcheck operations
pub type Result<T> = std::result::Result<T, MailcheckError>;

/// Errors that can occur while analyzing a domain or relaying a lead
#[derive(Error, Debug)]
pub enum MailcheckError {
    /// Input could not be normalized into a domain name
    #[error("invalid domain: {0}")]
    InvalidDomain(String),

    /// Request timed out
    #[error("request timed out after {0} ms")]
    Timeout(u64),

    /// Connection failed
    #[error("connection failed: {0}")]
    Connection(String),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Resolver answered with something that is not a DoH JSON document
    #[error("unexpected resolver response: {0}")]
    UnexpectedResponse(String),

    /// Resolver reported a DNS failure (SERVFAIL, REFUSED, ...)
    #[error("resolver returned rcode {rcode}")]
    Resolver {
        /// DNS response code from the `Status` field
        rcode: u32,
    },

    /// Remote service returned an error response
    #[error("API error ({code}): {message}")]
    Api {
        /// HTTP status code
        code: u16,
        /// Error message from the service
        message: String,
    },

    /// JSON parsing/serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid URL
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Email address failed the shape check
    #[error("invalid email address: {0}")]
    InvalidEmail(String),

    /// A funnel step was attempted out of order
    #[error("funnel step out of order: {0}")]
    Funnel(String),

    /// Lead relay accepted the request but reported failure
    #[error("lead relay rejected submission: {0}")]
    Relay(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

impl MailcheckError {
    /// Returns true if the error is worth retrying
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Timeout(_) | Self::Connection(_) => true,
            Self::Api { code, .. } => *code == 429 || *code >= 500,
            _ => false,
        }
    }

    /// Returns true if the error came from a DNS lookup rather than bad input
    #[must_use]
    pub const fn is_lookup_failure(&self) -> bool {
        matches!(
            self,
            Self::Timeout(_)
                | Self::Connection(_)
                | Self::Http(_)
                | Self::UnexpectedResponse(_)
                | Self::Resolver { .. }
                | Self::Api { .. }
                | Self::Json(_)
        )
    }

    /// Returns the HTTP status code if this is an API error
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api { code, .. } => Some(*code),
            _ => None,
        }
    }
}
