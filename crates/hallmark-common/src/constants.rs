//! Shared constants for Hallmark components.

/// HMAC-SHA256 output size in bytes (`H`)
pub const HASH_SIZE: usize = 32;

/// Process secret size in bytes (`2 × H`)
pub const SECRET_SIZE: usize = HASH_SIZE * 2;

/// Suggested default size for random captcha payloads
pub const DEFAULT_PAYLOAD_SIZE: usize = 6;

/// Current time encoding version tag
pub const TIME_ENCODING_VERSION: u8 = 1;

/// Encoded issuance time length: version + i64 seconds + u32 nanoseconds
pub const TIME_ENCODING_LEN: usize = 1 + 8 + 4;

/// Total length of a timed identifier
pub const TIMED_IDENTIFIER_LEN: usize = TIME_ENCODING_LEN + HASH_SIZE;

/// Default demo HTTP listen address
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";

/// Default validity window for timed identifiers in the demo (5 minutes)
pub const DEFAULT_VALID_DURATION_SECS: u64 = 300;
