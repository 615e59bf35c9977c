//! Token engine: HMAC-SHA256 identifiers over payloads.
//!
//! Identifier layouts:
//! ```text
//! undated: HMAC(secret, payload)                          32 bytes
//! timed:   time || HMAC(secret, payload || time)          13 + 32 bytes
//! ```
//!
//! Every verifier is a total function over its inputs. Malformed, forged,
//! resized or expired input all produce `false`, and no verifier logs.

use chrono::{DateTime, TimeDelta, Utc};
use hallmark_common::constants::HASH_SIZE;
use hallmark_common::{HallmarkError, Result};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::secret::{Secret, fill_random};
use crate::time_encoding;

type HmacSha256 = Hmac<Sha256>;

/// Issues and verifies identifiers under one secret.
///
/// The keyed MAC state is built once and cloned per operation, so the
/// engine is `Sync` and needs no locking.
#[derive(Clone)]
pub struct TokenEngine {
    mac: HmacSha256,
}

impl TokenEngine {
    /// Build an engine that owns `secret`.
    pub fn new(secret: Secret) -> Result<Self> {
        let mac = HmacSha256::new_from_slice(secret.as_bytes())
            .map_err(|e| HallmarkError::InvalidSecret(e.to_string()))?;
        Ok(Self { mac })
    }

    /// Build an engine around a freshly generated secret.
    pub fn generate() -> Result<Self> {
        Self::new(Secret::generate()?)
    }

    // === Data variant: caller-supplied payload ===

    /// Undated identifier for `payload`.
    pub fn sign(&self, payload: &[u8]) -> Vec<u8> {
        let mut mac = self.mac.clone();
        mac.update(payload);
        mac.finalize().into_bytes().to_vec()
    }

    /// Check an undated identifier against `payload`.
    pub fn verify(&self, identifier: &[u8], payload: &[u8]) -> bool {
        if identifier.len() != HASH_SIZE {
            return false;
        }
        let expected = self.sign(payload);
        expected.ct_eq(identifier).into()
    }

    /// Timed identifier for `payload`, issued at `issued_at`.
    ///
    /// # Errors
    ///
    /// Returns `TimeEncodingFailure` if `issued_at` cannot be encoded.
    pub fn sign_timed(&self, issued_at: DateTime<Utc>, payload: &[u8]) -> Result<Vec<u8>> {
        let encoded = time_encoding::encode(&issued_at)?;
        Ok(self.seal(payload, &encoded))
    }

    /// Check a timed identifier against `payload`.
    ///
    /// Accepts iff the MAC matches and `issued_at <= now <= issued_at + valid_for`.
    pub fn verify_timed(
        &self,
        identifier: &[u8],
        payload: &[u8],
        now: DateTime<Utc>,
        valid_for: TimeDelta,
    ) -> bool {
        if identifier.len() <= HASH_SIZE {
            return false;
        }

        // Own copy: the comparison target must not share memory with `identifier`.
        let encoded = identifier[..identifier.len() - HASH_SIZE].to_vec();
        let expected = self.seal(payload, &encoded);
        if !bool::from(expected.ct_eq(identifier)) {
            return false;
        }

        // Time bytes are authenticated from here on.
        let Ok(issued_at) = time_encoding::decode(&encoded) else {
            return false;
        };
        within_window(issued_at, now, valid_for)
    }

    // === Captcha variant: engine-generated fixed-size payload ===

    /// Draw a `size`-byte random payload and its undated identifier.
    ///
    /// Returns `(identifier, payload)`.
    ///
    /// # Errors
    ///
    /// `InvalidSize` if `size < 1`; `RandomnessUnavailable` if the OS
    /// random source fails.
    pub fn issue_captcha(&self, size: usize) -> Result<(Vec<u8>, Vec<u8>)> {
        let payload = random_payload(size)?;
        let identifier = self.sign(&payload);
        tracing::trace!(size, "Issued captcha identifier");
        Ok((identifier, payload))
    }

    /// Check an undated captcha. `size` must match the size used at issuance.
    pub fn verify_captcha(&self, identifier: &[u8], payload: &[u8], size: usize) -> bool {
        if size < 1 || payload.len() != size {
            return false;
        }
        self.verify(identifier, payload)
    }

    /// Draw a `size`-byte random payload and a timed identifier valid from `start`.
    ///
    /// Returns `(identifier, payload)`.
    ///
    /// # Errors
    ///
    /// As [`issue_captcha`](Self::issue_captcha), plus `TimeEncodingFailure`.
    pub fn issue_timed_captcha(
        &self,
        start: DateTime<Utc>,
        size: usize,
    ) -> Result<(Vec<u8>, Vec<u8>)> {
        let payload = random_payload(size)?;
        let identifier = self.sign_timed(start, &payload)?;
        tracing::trace!(size, start = %start, "Issued timed captcha identifier");
        Ok((identifier, payload))
    }

    /// Check a timed captcha. `size` must match the size used at issuance.
    pub fn verify_timed_captcha(
        &self,
        identifier: &[u8],
        payload: &[u8],
        now: DateTime<Utc>,
        valid_for: TimeDelta,
        size: usize,
    ) -> bool {
        if size < 1 || payload.len() != size {
            return false;
        }
        self.verify_timed(identifier, payload, now, valid_for)
    }

    /// `encoded || HMAC(secret, payload || encoded)`
    fn seal(&self, payload: &[u8], encoded: &[u8]) -> Vec<u8> {
        let mut mac = self.mac.clone();
        mac.update(payload);
        mac.update(encoded);
        let tag = mac.finalize().into_bytes();

        let mut identifier = Vec::with_capacity(encoded.len() + HASH_SIZE);
        identifier.extend_from_slice(encoded);
        identifier.extend_from_slice(&tag);
        identifier
    }
}

impl std::fmt::Debug for TokenEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenEngine").finish_non_exhaustive()
    }
}

/// `size` bytes from the OS random source.
pub fn random_payload(size: usize) -> Result<Vec<u8>> {
    if size < 1 {
        return Err(HallmarkError::InvalidSize(size));
    }
    let mut payload = vec![0u8; size];
    fill_random(&mut payload)?;
    Ok(payload)
}

/// Both bounds inclusive.
fn within_window(issued_at: DateTime<Utc>, now: DateTime<Utc>, valid_for: TimeDelta) -> bool {
    if now < issued_at {
        return false;
    }
    now.signed_duration_since(issued_at) <= valid_for
}
