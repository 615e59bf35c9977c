//! Captchas: random payloads a human has to reproduce.
//!
//! The identifier can be shown publicly; the payload cannot be derived from
//! it other than by brute force. Verification needs nothing but the
//! identifier, so no per-captcha state is kept.
//!
//! Two caveats apply to every function here:
//! - identifiers die with the process, since the secret is regenerated on restart;
//! - there is no replay protection. An `(id, captcha)` pair stays valid for as
//!   long as the secret lives, or until its window closes for timed captchas.
//!   Undated captchas should be paired with some session management.

use base64::{Engine, engine::general_purpose::STANDARD};
use chrono::{DateTime, TimeDelta, Utc};
use hallmark_common::Result;
use hallmark_common::constants::DEFAULT_PAYLOAD_SIZE;

use crate::store::{shared_engine, verify_shared};

/// One undated `(id, captcha)` pair with a `size`-byte payload.
pub fn get(size: usize) -> Result<(Vec<u8>, Vec<u8>)> {
    shared_engine()?.issue_captcha(size)
}

/// Check an undated pair. `size` must match the size given to [`get`].
pub fn verify(id: &[u8], captcha: &[u8], size: usize) -> bool {
    verify_shared(|engine| engine.verify_captcha(id, captcha, size))
}

/// One timed `(id, captcha)` pair, valid from `start`.
///
/// The start time travels inside the id and cannot be altered without
/// invalidating it.
pub fn get_timed(start: DateTime<Utc>, size: usize) -> Result<(Vec<u8>, Vec<u8>)> {
    shared_engine()?.issue_timed_captcha(start, size)
}

/// Check a timed pair issued no earlier than `valid_for` before `now`.
pub fn verify_timed(
    id: &[u8],
    captcha: &[u8],
    now: DateTime<Utc>,
    valid_for: TimeDelta,
    size: usize,
) -> bool {
    verify_shared(|engine| engine.verify_timed_captcha(id, captcha, now, valid_for, size))
}

/// Base64 `(id, captcha)` with the default payload size.
pub fn get_strings() -> Result<(String, String)> {
    let (id, captcha) = get(DEFAULT_PAYLOAD_SIZE)?;
    Ok((STANDARD.encode(id), STANDARD.encode(captcha)))
}

pub fn verify_strings(id: &str, captcha: &str) -> bool {
    let (Ok(id), Ok(captcha)) = (STANDARD.decode(id), STANDARD.decode(captcha)) else {
        return false;
    };
    verify(&id, &captcha, DEFAULT_PAYLOAD_SIZE)
}

/// Base64 timed `(id, captcha)` with the default payload size.
pub fn get_strings_timed(start: DateTime<Utc>) -> Result<(String, String)> {
    let (id, captcha) = get_timed(start, DEFAULT_PAYLOAD_SIZE)?;
    Ok((STANDARD.encode(id), STANDARD.encode(captcha)))
}

pub fn verify_strings_timed(
    id: &str,
    captcha: &str,
    now: DateTime<Utc>,
    valid_for: TimeDelta,
) -> bool {
    let (Ok(id), Ok(captcha)) = (STANDARD.decode(id), STANDARD.decode(captcha)) else {
        return false;
    };
    verify_timed(&id, &captcha, now, valid_for, DEFAULT_PAYLOAD_SIZE)
}
