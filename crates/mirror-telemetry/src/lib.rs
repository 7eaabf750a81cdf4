//! # Mirror Telemetry
//!
//! Logging setup shared by the Satoshi Mirror binary and its subsystems.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use mirror_telemetry::{init_telemetry, TelemetryConfig};
//!
//! let _guard = init_telemetry(TelemetryConfig::from_env())?;
//! tracing::info!("ready");
//! # Ok::<(), mirror_telemetry::TelemetryError>(())
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `SM_LOG_LEVEL` | `info` | Log level filter (falls back to `RUST_LOG`) |
//! | `SM_JSON_LOGS` | `false` | Emit JSON lines instead of pretty output |
//! | `SM_CONSOLE_OUTPUT` | `true` | Disable to silence all console logging |

#![warn(missing_docs)]

mod config;
mod logging;
mod tracing_setup;

pub use config::{TelemetryConfig, DEFAULT_LOG_LEVEL};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// The log level string is not a valid filter directive
    #[error("Invalid log filter: {0}")]
    Filter(String),

    /// A global subscriber was already installed
    #[error("Failed to initialize tracing subscriber: {0}")]
    SubscriberInit(String),
}

/// Install the global subscriber.
///
/// Returns a guard to hold for the lifetime of the application.
pub fn init_telemetry(config: TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    tracing_setup::init_tracing(&config)?;
    Ok(TelemetryGuard {
        service_name: config.service_name,
    })
}

/// Guard that keeps telemetry active. Logs a final line on drop.
pub struct TelemetryGuard {
    service_name: String,
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::debug!(service = %self.service_name, "Shutting down telemetry");
    }
}
