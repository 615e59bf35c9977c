//! Process secret and the secure random source behind it.

use hallmark_common::constants::SECRET_SIZE;
use hallmark_common::{HallmarkError, Result};
use rand::TryRngCore;
use rand::rngs::OsRng;
use zeroize::ZeroizeOnDrop;

/// Random key material for every identifier issued by one engine.
///
/// Never persisted and never printed. The bytes are wiped on drop.
#[derive(ZeroizeOnDrop)]
pub struct Secret {
    bytes: [u8; SECRET_SIZE],
}

impl Secret {
    /// Draw a fresh secret from the operating system random source.
    ///
    /// # Errors
    ///
    /// Returns `RandomnessUnavailable` if the OS source fails. There is no
    /// fallback to a weaker generator.
    pub fn generate() -> Result<Self> {
        let mut bytes = [0u8; SECRET_SIZE];
        fill_random(&mut bytes)?;
        Ok(Self { bytes })
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[cfg(test)]
    pub(crate) fn from_bytes(bytes: [u8; SECRET_SIZE]) -> Self {
        Self { bytes }
    }
}

impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Secret").finish_non_exhaustive()
    }
}

/// Fill `buf` from the OS random source.
pub(crate) fn fill_random(buf: &mut [u8]) -> Result<()> {
    OsRng
        .try_fill_bytes(buf)
        .map_err(|e| HallmarkError::RandomnessUnavailable(e.to_string()))
}
