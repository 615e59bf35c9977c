//! Configuration management for the demo service.

use anyhow::{Context, Result, bail};
use chrono::TimeDelta;
use serde::Deserialize;
use std::path::Path;

use hallmark_common::constants::{
    DEFAULT_LISTEN_ADDR, DEFAULT_PAYLOAD_SIZE, DEFAULT_VALID_DURATION_SECS,
};

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// HTTP listen address
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Random captcha payload size in bytes
    #[serde(default = "default_payload_size")]
    pub payload_size: usize,

    /// How long timed identifiers stay valid
    #[serde(default = "default_valid_duration")]
    pub valid_duration_secs: u64,
}

// Default value functions
fn default_listen_addr() -> String { DEFAULT_LISTEN_ADDR.to_string() }
fn default_payload_size() -> usize { DEFAULT_PAYLOAD_SIZE }
fn default_valid_duration() -> u64 { DEFAULT_VALID_DURATION_SECS }

impl AppConfig {
    /// Load configuration from file and `HALLMARK_*` env vars, with CLI overrides
    pub fn load(config_path: &str, args: &super::Args) -> Result<Self> {
        let mut config = if Path::new(config_path).exists() {
            let settings = config::Config::builder()
                .add_source(config::File::with_name(config_path))
                .add_source(config::Environment::with_prefix("HALLMARK"))
                .build()
                .context("Failed to load config file")?;

            settings
                .try_deserialize()
                .context("Failed to parse config")?
        } else {
            tracing::warn!(path = config_path, "Config file not found, using defaults");
            Self::default()
        };

        // Apply CLI overrides
        if let Some(ref listen) = args.listen {
            config.listen_addr = listen.clone();
        }
        if let Some(size) = args.payload_size {
            config.payload_size = size;
        }
        if let Some(secs) = args.valid_duration_secs {
            config.valid_duration_secs = secs;
        }

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.payload_size < 1 {
            bail!("payload_size must be at least 1, got {}", self.payload_size);
        }
        let window = i64::try_from(self.valid_duration_secs)
            .ok()
            .and_then(TimeDelta::try_seconds);
        if window.is_none() {
            bail!("valid_duration_secs out of range: {}", self.valid_duration_secs);
        }
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            payload_size: default_payload_size(),
            valid_duration_secs: default_valid_duration(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn args(extra: &[&str]) -> crate::Args {
        let mut argv = vec!["hallmark-demo"];
        argv.extend_from_slice(extra);
        crate::Args::parse_from(argv)
    }

    #[test]
    fn test_defaults_when_file_missing() {
        let config = AppConfig::load("does/not/exist.toml", &args(&[])).unwrap();
        assert_eq!(config.listen_addr, DEFAULT_LISTEN_ADDR);
        assert_eq!(config.payload_size, DEFAULT_PAYLOAD_SIZE);
        assert_eq!(config.valid_duration_secs, DEFAULT_VALID_DURATION_SECS);
    }

    #[test]
    fn test_cli_overrides() {
        let config = AppConfig::load(
            "does/not/exist.toml",
            &args(&[
                "--listen",
                "0.0.0.0:9000",
                "--payload-size",
                "8",
                "--valid-duration-secs",
                "60",
            ]),
        )
        .unwrap();
        assert_eq!(config.listen_addr, "0.0.0.0:9000");
        assert_eq!(config.payload_size, 8);
        assert_eq!(config.valid_duration_secs, 60);
    }

    #[test]
    fn test_zero_payload_size_rejected() {
        let result = AppConfig::load("does/not/exist.toml", &args(&["--payload-size", "0"]));
        assert!(result.is_err());
    }

    #[test]
    fn test_file_values() {
        let dir = std::env::temp_dir().join(format!("hallmark-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("hallmark.toml");
        std::fs::write(&path, "payload_size = 10\nvalid_duration_secs = 120\n").unwrap();

        let config = AppConfig::load(path.to_str().unwrap(), &args(&[])).unwrap();
        assert_eq!(config.payload_size, 10);
        assert_eq!(config.valid_duration_secs, 120);
        assert_eq!(config.listen_addr, DEFAULT_LISTEN_ADDR);

        std::fs::remove_dir_all(&dir).ok();
    }
}
