//! Location analysis over a folder of JSON record files
//!
//! Measures how well the `locations[].name` field is populated per file and
//! how many records are located in Scotland, then writes a YAML summary and
//! categorised file lists.
//!
//! ```rust,no_run
//! use metascrub::analysis::{LocationRules, LocationScanner};
//! use std::path::Path;
//!
//! # fn example() -> metascrub::domain::Result<()> {
//! let scanner = LocationScanner::new(LocationRules::default());
//! let (analysis, outputs) = scanner.run(Path::new("data/records"), Path::new("out"))?;
//! println!("{} records, summary at {}", analysis.total_records, outputs.summary_path.display());
//! # Ok(())
//! # }
//! ```

pub mod levels;
pub mod location;
pub mod scanner;
pub mod summary;

pub use levels::{LevelDistribution, PopulationLevel};
pub use location::{is_scotland, FileScan, LocationRules};
pub use scanner::{file_identity, list_json_files, LocationScanner, ScanOutputs};
pub use summary::{LocationAnalysis, LocationReport};
