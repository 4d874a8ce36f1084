// metascrub - Metadata Anonymisation and Location Analysis Tool
// Copyright (c) 2025 Metascrub Contributors
// Licensed under the MIT License

//! # metascrub - Metadata Anonymisation and Location Analysis
//!
//! metascrub prepares shareable samples of dataset-catalogue metadata. It
//! trims a JSON document to its first few records and replaces sensitive
//! string values with stable, category-tagged pseudonyms (`email1`,
//! `phone2`, `url1`, `text7`) while keeping the tree's shape intact.
//!
//! ## Overview
//!
//! This library provides:
//! - **Anonymising** JSON documents with case-insensitive field policies
//! - **Pseudonymising** strings consistently within a run
//! - **Auditing** the pseudonym table with hashed originals
//! - **Analysing** how well location fields are populated across a folder
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`anonymisation`] - Field policy, classifier, registry and tree transform
//! - [`analysis`] - Location population analysis and reports
//! - [`domain`] - Error and result types
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use metascrub::anonymisation::Anonymiser;
//! use serde_json::json;
//!
//! # fn main() -> anyhow::Result<()> {
//! let mut anonymiser = Anonymiser::with_defaults()?;
//! let output = anonymiser.anonymise_document(&json!({
//!     "contacts": {"email": "jo@x.org", "id": "c-1"}
//! }));
//!
//! assert_eq!(output, json!({"contacts": {"email": "email1", "id": "c-1"}}));
//! # Ok(())
//! # }
//! ```
//!
//! ## Field Policy
//!
//! Each mapping key is looked up case-insensitively:
//!
//! - listed **truncate** fields keep only the first element of a list
//! - **skip** fields (`location`, `id`, `uuid`) are copied through, even
//!   inside a forced block
//! - **force** blocks and fields are anonymised in full, including nested
//!   values
//!
//! Strings outside a forced subtree are left as they are.
//!
//! ## Error Handling
//!
//! Library operations return [`domain::Result`], carrying a
//! [`domain::ScrubError`]. Command handlers use `anyhow` for context.
//!
//! ## Logging
//!
//! metascrub uses structured logging with the `tracing` crate:
//!
//! ```rust,no_run
//! use tracing::{info, warn};
//!
//! info!(records = 5, "Records limited");
//! warn!(file = "broken", "Failed to scan file");
//! ```

pub mod analysis;
pub mod anonymisation;
pub mod cli;
pub mod config;
pub mod domain;
pub mod logging;
