//! Domain types shared across metascrub.
//!
//! All fallible operations outside the anonymising transform return
//! [`Result<T, ScrubError>`](Result):
//!
//! ```rust,no_run
//! use metascrub::domain::Result;
//!
//! fn example() -> Result<()> {
//!     let config = metascrub::config::load_config("metascrub.toml")?;
//!     println!("max records: {}", config.anonymisation.max_records);
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod result;

pub use errors::ScrubError;
pub use result::Result;
