//! Configuration management for metascrub.
//!
//! metascrub reads an optional TOML file. Every setting has a default matching
//! the built-in policy tables, so the tool runs without any configuration.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use metascrub::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("metascrub.toml")?;
//! println!("Keeping {} records", config.anonymisation.max_records);
//! # Ok(())
//! # }
//! ```
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [anonymisation]
//! max_records = 5
//! skip_fields = ["location", "id", "uuid"]
//!
//! [anonymisation.audit]
//! enabled = true
//! log_path = "${METASCRUB_AUDIT_DIR}/pseudonyms.jsonl"
//!
//! [analysis]
//! placeholders = ["-", "n/a", "na", "unknown"]
//!
//! [logging]
//! local_enabled = false
//! ```
//!
//! # Environment Variables
//!
//! `${VAR_NAME}` placeholders are substituted before parsing, and
//! `METASCRUB_<SECTION>_<KEY>` variables override parsed values, e.g.
//! `METASCRUB_ANONYMISATION_MAX_RECORDS=10`.

pub mod loader;
pub mod schema;

pub use loader::{load_config, load_or_default};
pub use schema::{AnalysisConfig, ApplicationConfig, LoggingConfig, ScrubConfig};
