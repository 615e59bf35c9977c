//! Application state and shared resources.

use anyhow::{Context, Result};
use chrono::TimeDelta;
use hallmark::TokenEngine;
use std::time::Instant;

use crate::config::AppConfig;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: AppConfig,

    /// Process-wide token engine
    pub engine: &'static TokenEngine,

    /// Service start time, for uptime reporting
    pub started_at: Instant,
}

impl AppState {
    /// Create application state, generating the process secret if needed
    pub fn new(config: AppConfig) -> Result<Self> {
        let engine = hallmark::shared_engine().context("Failed to generate process secret")?;

        Ok(Self {
            config,
            engine,
            started_at: Instant::now(),
        })
    }

    /// Validity window for timed identifiers
    pub fn valid_for(&self) -> TimeDelta {
        i64::try_from(self.config.valid_duration_secs)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .unwrap_or(TimeDelta::MAX)
    }

    pub fn uptime_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
