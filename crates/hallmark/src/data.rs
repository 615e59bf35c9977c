//! Identifiers over caller-supplied data.
//!
//! Same construction as [`crate::captcha`], but the caller owns the payload
//! and there is no size constraint. Useful for handing out a value and later
//! confirming it came back unmodified.

use base64::{Engine, engine::general_purpose::STANDARD};
use chrono::{DateTime, TimeDelta, Utc};
use hallmark_common::Result;

use crate::store::{shared_engine, verify_shared};

/// Undated identifier for `data`.
pub fn get(data: &[u8]) -> Result<Vec<u8>> {
    Ok(shared_engine()?.sign(data))
}

pub fn verify(id: &[u8], data: &[u8]) -> bool {
    verify_shared(|engine| engine.verify(id, data))
}

/// Timed identifier for `data`, valid from `start`.
pub fn get_timed(start: DateTime<Utc>, data: &[u8]) -> Result<Vec<u8>> {
    shared_engine()?.sign_timed(start, data)
}

pub fn verify_timed(id: &[u8], data: &[u8], now: DateTime<Utc>, valid_for: TimeDelta) -> bool {
    verify_shared(|engine| engine.verify_timed(id, data, now, valid_for))
}

/// Base64 undated identifier for the UTF-8 bytes of `data`.
pub fn get_strings(data: &str) -> Result<String> {
    Ok(STANDARD.encode(get(data.as_bytes())?))
}

pub fn verify_strings(id: &str, data: &str) -> bool {
    match STANDARD.decode(id) {
        Ok(id) => verify(&id, data.as_bytes()),
        Err(_) => false,
    }
}

/// Base64 timed identifier for the UTF-8 bytes of `data`.
pub fn get_strings_timed(start: DateTime<Utc>, data: &str) -> Result<String> {
    Ok(STANDARD.encode(get_timed(start, data.as_bytes())?))
}

pub fn verify_strings_timed(
    id: &str,
    data: &str,
    now: DateTime<Utc>,
    valid_for: TimeDelta,
) -> bool {
    match STANDARD.decode(id) {
        Ok(id) => verify_timed(&id, data.as_bytes(), now, valid_for),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fuzz_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2020, 1, 1, 20, 0, 0).unwrap()
    }

    #[test]
    fn test_get_and_verify() {
        let id = get(b"test").unwrap();
        assert_eq!(id.len(), 32);
        assert!(verify(&id, b"test"));
        assert!(!verify(&id, b"tesT"));
        assert!(!verify(&id[1..], b"test"));
    }

    #[test]
    fn test_empty_data() {
        let id = get(b"").unwrap();
        assert!(verify(&id, b""));
        assert!(!verify(&id, b"\0"));
    }

    #[test]
    fn test_timed_day_window() {
        let id = get_timed(fuzz_time(), b"test").unwrap();
        let day = TimeDelta::hours(24);
        assert!(verify_timed(&id, b"test", fuzz_time(), day));
        assert!(verify_timed(&id, b"test", fuzz_time() + day, day));
        assert!(!verify_timed(&id, b"test", fuzz_time() + day + TimeDelta::seconds(1), day));
        assert!(!verify_timed(&id, b"other", fuzz_time(), day));
    }

    #[test]
    fn test_strings_roundtrip() {
        let id = get_strings("data").unwrap();
        assert!(verify_strings(&id, "data"));
        assert!(!verify_strings(&id, "Data"));
        assert!(!verify_strings("***", "data"));
    }

    #[test]
    fn test_strings_timed() {
        let start = Utc::now();
        let id = get_strings_timed(start, "data").unwrap();
        let window = TimeDelta::minutes(5);
        assert!(verify_strings_timed(&id, "data", start + TimeDelta::minutes(1), window));
        assert!(!verify_strings_timed(&id, "data", start - TimeDelta::minutes(1), window));
        assert!(!verify_strings_timed(&id, "data", start + TimeDelta::minutes(6), window));
        assert!(!verify_strings(&id, "data"));
    }
}
