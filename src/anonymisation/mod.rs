//! Anonymisation module
//!
//! Pseudonymises sensitive string values in metadata JSON so a representative
//! sample can be shared without exposing commercially sensitive content.
//!
//! # Architecture
//!
//! - **Policy**: case-insensitive field-name tables (force blocks, force
//!   fields, skip fields, truncated lists)
//! - **Classifier**: priority-ordered email / phone / url / text shapes
//! - **Registry**: run-scoped, memoised `<prefix><n>` tokens per category
//! - **Engine**: the depth-first tree transform
//! - **Audit**: optional JSON-lines log of tokens against hashed originals
//!
//! # Usage
//!
//! ```rust,no_run
//! use metascrub::anonymisation::{AnonymisationConfig, Anonymiser};
//!
//! # fn example(document: serde_json::Value) -> anyhow::Result<()> {
//! let mut anonymiser = Anonymiser::from_config(&AnonymisationConfig::default())?;
//! let anonymised = anonymiser.anonymise_document(&document);
//! # Ok(())
//! # }
//! ```

pub mod audit;
pub mod classifier;
pub mod config;
pub mod engine;
pub mod policy;
pub mod registry;
pub mod report;

pub use classifier::{PseudonymCategory, StringClassifier};
pub use config::AnonymisationConfig;
pub use engine::{Anonymiser, TransformStats};
pub use policy::FieldPolicy;
pub use registry::PseudonymRegistry;
pub use report::AnonymisationReport;
