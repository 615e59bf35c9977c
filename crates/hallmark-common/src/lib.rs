//! # Hallmark Common
//!
//! Shared types, errors, and constants used across Hallmark components.
//!
//! ## Modules
//! - `types` - Wire types for the demo HTTP API (TokenMode, issued/verify bodies)
//! - `error` - The `HallmarkError` taxonomy
//! - `constants` - Digest sizes, default payload size, demo defaults

pub mod constants;
pub mod error;
pub mod types;

pub use error::{HallmarkError, Result};
pub use types::*;
