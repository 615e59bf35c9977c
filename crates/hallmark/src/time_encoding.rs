//! Versioned fixed-width encoding of issuance instants.
//!
//! Layout (13 bytes):
//! ```text
//! +---------+------------------------+-------------------+
//! | version | seconds since epoch    | nanoseconds       |
//! | u8 = 1  | i64, big-endian        | u32, big-endian   |
//! +---------+------------------------+-------------------+
//! ```
//!
//! Timed identifiers are `encoding || mac`, so the decoder learns the
//! encoding length from the identifier length alone.

use chrono::{DateTime, Utc};
use hallmark_common::constants::{TIME_ENCODING_LEN, TIME_ENCODING_VERSION};
use hallmark_common::{HallmarkError, Result};

const NANOS_PER_SEC: u32 = 1_000_000_000;

/// Serialize an instant.
///
/// # Errors
///
/// Returns `TimeEncodingFailure` for leap-second instants, which chrono
/// stores with a nanosecond field of one second or more.
pub fn encode(at: &DateTime<Utc>) -> Result<[u8; TIME_ENCODING_LEN]> {
    let nanos = at.timestamp_subsec_nanos();
    if nanos >= NANOS_PER_SEC {
        return Err(HallmarkError::TimeEncodingFailure(format!(
            "leap second instant {} has no fixed-width encoding",
            at.to_rfc3339()
        )));
    }

    let mut out = [0u8; TIME_ENCODING_LEN];
    out[0] = TIME_ENCODING_VERSION;
    out[1..9].copy_from_slice(&at.timestamp().to_be_bytes());
    out[9..13].copy_from_slice(&nanos.to_be_bytes());
    Ok(out)
}

/// Parse an encoding produced by [`encode`].
///
/// # Errors
///
/// Returns `InvalidTimeEncoding` on a wrong length, unknown version,
/// out-of-range nanoseconds, or seconds chrono cannot represent.
pub fn decode(bytes: &[u8]) -> Result<DateTime<Utc>> {
    if bytes.len() != TIME_ENCODING_LEN {
        return Err(HallmarkError::InvalidTimeEncoding(format!(
            "expected {} bytes, got {}",
            TIME_ENCODING_LEN,
            bytes.len()
        )));
    }
    if bytes[0] != TIME_ENCODING_VERSION {
        return Err(HallmarkError::InvalidTimeEncoding(format!(
            "unsupported version {}",
            bytes[0]
        )));
    }

    let mut secs = [0u8; 8];
    secs.copy_from_slice(&bytes[1..9]);
    let mut nanos = [0u8; 4];
    nanos.copy_from_slice(&bytes[9..13]);

    let secs = i64::from_be_bytes(secs);
    let nanos = u32::from_be_bytes(nanos);
    if nanos >= NANOS_PER_SEC {
        return Err(HallmarkError::InvalidTimeEncoding(format!(
            "nanoseconds out of range: {}",
            nanos
        )));
    }

    DateTime::from_timestamp(secs, nanos).ok_or_else(|| {
        HallmarkError::InvalidTimeEncoding(format!("seconds out of range: {}", secs))
    })
}
