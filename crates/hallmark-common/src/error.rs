//! Common error types for Hallmark components.

use thiserror::Error;

/// Result alias used by issuance paths
pub type Result<T> = std::result::Result<T, HallmarkError>;

/// Errors raised while issuing identifiers.
///
/// Verification never surfaces these; a verifier answers `false` instead.
#[derive(Debug, Clone, Error)]
pub enum HallmarkError {
    /// The operating system random source failed
    #[error("Secure randomness unavailable: {0}")]
    RandomnessUnavailable(String),

    /// Requested payload size was below one byte
    #[error("Invalid payload size: {0} (must be at least 1)")]
    InvalidSize(usize),

    /// Issuance instant could not be serialized
    #[error("Time encoding failed: {0}")]
    TimeEncodingFailure(String),

    /// Embedded issuance time is not a valid encoding
    #[error("Invalid time encoding: {0}")]
    InvalidTimeEncoding(String),

    /// Keyed MAC could not be built from the secret
    #[error("Invalid secret: {0}")]
    InvalidSecret(String),
}

impl HallmarkError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::RandomnessUnavailable(_) => 503,
            Self::InvalidSize(_) => 400,
            Self::TimeEncodingFailure(_) => 400,
            Self::InvalidTimeEncoding(_) => 400,
            Self::InvalidSecret(_) => 500,
        }
    }

    /// Returns true if retrying the same call may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::RandomnessUnavailable(_))
    }
}
