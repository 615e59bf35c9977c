//! Process-wide engine, created on first use.
//!
//! The first caller generates the secret while holding the init lock; every
//! other caller either waits on that lock or reads the published engine.
//! Publication goes through `OnceLock`, so no caller sees a half-built secret.
//!
//! A failed attempt publishes nothing. Callers that were already waiting on
//! that attempt receive its error; a caller arriving after it makes a fresh
//! attempt.

use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};

use hallmark_common::{HallmarkError, Result};
use parking_lot::Mutex;

use crate::engine::TokenEngine;

static ENGINE: EngineCell = EngineCell::new();

/// Slot holding at most one generated engine.
pub(crate) struct EngineCell {
    engine: OnceLock<TokenEngine>,
    /// Count of failed attempts, bumped under `init`
    failures: AtomicU64,
    /// Init lock; holds the error of the latest failed attempt
    init: Mutex<Option<HallmarkError>>,
}

impl EngineCell {
    pub(crate) const fn new() -> Self {
        Self {
            engine: OnceLock::new(),
            failures: AtomicU64::new(0),
            init: parking_lot::const_mutex(None),
        }
    }

    pub(crate) fn get(&self) -> Option<&TokenEngine> {
        self.engine.get()
    }

    /// Return the published engine, running `generate` at most once per attempt.
    pub(crate) fn get_or_generate(
        &self,
        generate: impl FnOnce() -> Result<TokenEngine>,
    ) -> Result<&TokenEngine> {
        if let Some(engine) = self.engine.get() {
            return Ok(engine);
        }

        let seen = self.failures.load(Ordering::Acquire);
        let mut last_failure = self.init.lock();
        if let Some(engine) = self.engine.get() {
            return Ok(engine);
        }

        // An attempt failed while we waited on the lock
        if self.failures.load(Ordering::Acquire) != seen {
            if let Some(err) = last_failure.as_ref() {
                return Err(err.clone());
            }
        }

        match generate() {
            Ok(engine) => {
                *last_failure = None;
                tracing::info!("Process secret initialized");
                Ok(self.engine.get_or_init(|| engine))
            }
            Err(e) => {
                tracing::warn!(error = %e, "Process secret generation failed");
                *last_failure = Some(e.clone());
                self.failures.fetch_add(1, Ordering::Release);
                Err(e)
            }
        }
    }
}

/// The process-wide engine, generating its secret on first call.
///
/// # Errors
///
/// Returns `RandomnessUnavailable` if the secret cannot be generated.
pub fn shared_engine() -> Result<&'static TokenEngine> {
    ENGINE.get_or_generate(TokenEngine::generate)
}

/// True once the process secret exists.
pub fn is_initialized() -> bool {
    ENGINE.get().is_some()
}

/// Run a verifier against the shared engine; `false` if it cannot be built.
pub(crate) fn verify_shared(check: impl FnOnce(&TokenEngine) -> bool) -> bool {
    match shared_engine() {
        Ok(engine) => check(engine),
        Err(e) => {
            tracing::error!(error = %e, "Process secret unavailable, rejecting");
            false
        }
    }
}
