//! # Hallmark
//!
//! Stateless token identifiers backed by HMAC-SHA256.
//!
//! An identifier proves that its holder knows a payload, without the issuer
//! storing anything per token. Payloads are either random bytes drawn by the
//! engine ([`captcha`]) or bytes supplied by the caller ([`data`]).
//!
//! ## Modes
//! - **Undated**: `HMAC(secret, payload)`, valid while the secret lives
//! - **Timed**: `time || HMAC(secret, payload || time)`, valid for a window
//!   after the embedded issuance time
//!
//! ## Modules
//! - `secret` - Random process secret
//! - `store` - Lazily initialized process-wide engine
//! - `engine` - Issuance and verification
//! - `time_encoding` - Versioned fixed-width instant encoding
//! - `captcha` / `data` - Free functions and Base64 string wrappers over the shared engine
//!
//! Restarting the process invalidates every identifier issued before.

pub mod captcha;
pub mod data;
pub mod engine;
pub mod secret;
pub mod store;
pub mod time_encoding;

pub use engine::{TokenEngine, random_payload};
pub use hallmark_common::{HallmarkError, Result};
pub use secret::Secret;
pub use store::{is_initialized, shared_engine};
