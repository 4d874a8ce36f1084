//! Logging and observability
//!
//! Structured logging through `tracing`, with:
//! - configurable log levels (overridable with `RUST_LOG`)
//! - console output on stderr
//! - optional JSON file logging with rotation
//!
//! # Example
//!
//! ```no_run
//! use metascrub::logging::init_logging;
//! use metascrub::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log that a command wrote an output file
///
/// # Example
///
/// ```no_run
/// use metascrub::log_output_written;
///
/// log_output_written!("out/sample_anonymised.json", "anonymised document");
/// ```
#[macro_export]
macro_rules! log_output_written {
    ($path:expr, $kind:expr) => {
        tracing::info!(
            path = %$path,
            kind = $kind,
            "Output written"
        );
    };
}
