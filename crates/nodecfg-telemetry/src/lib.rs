//! Logging for the node configuration tools.
//!
//! A thin layer over `tracing-subscriber`: pick a level, a format and a
//! stream, add per-target directives, install once at startup.
//!
//! # Example
//!
//! ```rust,no_run
//! use nodecfg_telemetry::{LogConfig, LogFormat, setup_logging};
//!
//! # fn main() -> Result<(), nodecfg_telemetry::TelemetryError> {
//! let config = LogConfig::new("debug")
//!     .with_format(LogFormat::Compact)
//!     .with_directive("nodecfg_config=trace");
//!
//! setup_logging(&config)?;
//! tracing::info!("logging ready");
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

mod error;
mod logging;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::{LogConfig, LogFormat, LogTarget, setup_default_logging, setup_logging};
