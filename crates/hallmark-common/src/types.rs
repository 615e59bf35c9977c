//! API types shared between the token library and the demo service.

use serde::{Deserialize, Serialize};

/// Identifier flavour
///
/// - Undated: valid for as long as the process secret lives
/// - Timed: carries its issuance time and expires after a validity window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenMode {
    Undated,
    Timed,
}

impl TokenMode {
    pub fn from_timed(timed: bool) -> Self {
        if timed { Self::Timed } else { Self::Undated }
    }

    pub fn is_timed(&self) -> bool {
        matches!(self, Self::Timed)
    }
}

impl Default for TokenMode {
    fn default() -> Self {
        Self::Undated
    }
}

/// A freshly issued captcha, Base64 encoded
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuedCaptcha {
    /// Public identifier, safe to embed in a form
    pub id: String,

    /// Secret payload the human has to reproduce
    pub captcha: String,

    pub mode: TokenMode,

    /// Validity window for timed identifiers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in_secs: Option<u64>,
}

/// A freshly issued data identifier, Base64 encoded
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuedData {
    pub id: String,
    pub mode: TokenMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in_secs: Option<u64>,
}

/// Captcha verification request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyCaptchaRequest {
    pub id: String,
    pub captcha: String,
    #[serde(default)]
    pub mode: TokenMode,
}

/// Data verification request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyDataRequest {
    pub id: String,
    pub data: String,
    #[serde(default)]
    pub mode: TokenMode,
}

/// Verification outcome. A `false` carries no reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyResponse {
    pub valid: bool,
}

/// Error body returned when issuance fails
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
