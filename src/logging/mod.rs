//! Structured logging setup using tracing
//!
//! Logs go to stderr so that transformed output and JSON statistics on
//! stdout stay machine-readable. `RUST_LOG` overrides the configured level
//! when set.
//!
//! # Example
//!
//! ```no_run
//! use veil::logging::init_logging;
//!
//! init_logging("info").expect("Failed to initialize logging");
//! tracing::info!("Application started");
//! ```

use crate::domain::{Result, VeilError};
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Initialize the logging system.
///
/// # Arguments
///
/// * `log_level_str` - Log level as a string (trace, debug, info, warn, error)
///
/// # Errors
///
/// Returns an error if the level string is not recognized. A second call is
/// harmless; the first-installed subscriber stays in place.
pub fn init_logging(log_level_str: &str) -> Result<()> {
    let log_level = parse_log_level(log_level_str)?;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("veil={log_level}")));

    // Ignore the error from a repeated init (integration tests call this
    // once per test binary).
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();

    Ok(())
}

/// Parse log level from string
fn parse_log_level(level_str: &str) -> Result<Level> {
    match level_str.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => Err(VeilError::Configuration(format!(
            "Invalid log level '{level_str}'. Must be one of: trace, debug, info, warn, error"
        ))),
    }
}
