//! # Hallmark Demo
//!
//! Small HTTP service around the Hallmark token library. Issues captcha and
//! data identifiers and verifies them again, with no server-side storage.
//!
//! ## Architecture
//! ```text
//! Client → axum router → hallmark::TokenEngine (process secret)
//! ```
//!
//! Restarting the service invalidates every identifier it handed out.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod config;
mod routes;
mod state;

use config::AppConfig;
use state::AppState;

/// Hallmark Demo - stateless token identifiers over HTTP
#[derive(Parser, Debug)]
#[command(name = "hallmark-demo")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config/hallmark.toml")]
    config: String,

    /// Listen address (overrides config)
    #[arg(short, long, env = "LISTEN_ADDR")]
    listen: Option<String>,

    /// Captcha payload size in bytes (overrides config)
    #[arg(long, env = "PAYLOAD_SIZE")]
    payload_size: Option<usize>,

    /// Timed identifier validity in seconds (overrides config)
    #[arg(long, env = "VALID_DURATION_SECS")]
    valid_duration_secs: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "LOG_LEVEL")]
    log_level: String,

    /// Enable JSON logging output
    #[arg(long, default_value = "false")]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional
    dotenvy::dotenv().ok();

    let args = Args::parse();

    init_logging(&args.log_level, args.json_logs)?;

    info!("Starting Hallmark demo v{}", env!("CARGO_PKG_VERSION"));

    let config = AppConfig::load(&args.config, &args)?;
    info!(
        payload_size = config.payload_size,
        valid_duration_secs = config.valid_duration_secs,
        "Configuration loaded from {}",
        args.config
    );

    // Pay the secret generation cost up front and fail fast without entropy.
    let state = AppState::new(config.clone()).context("Failed to initialize token engine")?;

    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.listen_addr))?;
    info!("Hallmark demo listening on http://{}", config.listen_addr);

    let shutdown_signal = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            return;
        }
        info!("Shutdown signal received");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await
        .context("Server error")?;

    info!("Hallmark demo shutdown complete");
    Ok(())
}

/// Initialize structured logging with tracing
fn init_logging(level: &str, json: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .try_init()
            .context("Failed to initialize logging")?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_thread_ids(true))
            .try_init()
            .context("Failed to initialize logging")?;
    }

    Ok(())
}
