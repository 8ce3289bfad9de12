//! # Orbiter Telemetry
//!
//! Subscriber set-up for the router's `tracing` output.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use orbiter_telemetry::{init_tracing, TelemetryConfig};
//!
//! let config = TelemetryConfig::from_env();
//! init_tracing(&config)?;
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `ORBITER_LOG_LEVEL` | `RUST_LOG`, then `info` | Filter directive |
//! | `ORBITER_JSON_LOGS` | `false` | JSON formatted output |
//! | `ORBITER_CONSOLE_OUTPUT` | `true` | Write to stdout at all |
//! | `ORBITER_SERVICE_NAME` | `orbiter` | Reported at start-up |

mod config;
mod tracing_setup;

pub use config::TelemetryConfig;
pub use tracing_setup::{init_test_tracing, init_tracing};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Invalid log filter {directive:?}: {reason}")]
    Filter { directive: String, reason: String },

    #[error("Failed to install tracing subscriber: {0}")]
    SubscriberInit(String),
}
