//! Location field inspection for a single JSON document
//!
//! A document holds a top-level `records` list; each record may hold a
//! `locations` list of objects with a `name`. Anything off that shape is
//! treated as absent rather than as an error.

use crate::domain::{Result, ScrubError};
use serde_json::Value;
use std::collections::HashSet;
use std::path::Path;

/// Characters stripped from both ends before comparing a region name
const REGION_PUNCTUATION: &[char] = &[
    '.', ',', ';', ':', '!', '?', '\'', '"', '(', ')', '[', ']', '{', '}',
];

/// Region counted separately in the analysis
const TARGET_REGION: &str = "scotland";

/// Location counts for one document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileScan {
    /// Entries in the records list
    pub total_records: usize,
    /// Records with at least one populated location name
    pub records_with_location: usize,
    /// Records with a location named Scotland
    pub records_with_scotland: usize,
}

impl FileScan {
    /// True when any record has a populated location name
    pub fn has_location(&self) -> bool {
        self.records_with_location > 0
    }

    /// True when any record is located in Scotland
    pub fn has_scotland(&self) -> bool {
        self.records_with_scotland > 0
    }
}

/// Rules for deciding whether a location name is populated
#[derive(Debug, Clone)]
pub struct LocationRules {
    placeholders: HashSet<String>,
}

impl LocationRules {
    /// Build rules from placeholder names (compared case-insensitively)
    pub fn new<S: AsRef<str>>(placeholders: &[S]) -> Self {
        Self {
            placeholders: placeholders
                .iter()
                .map(|p| p.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// Trimmed name, or `None` for non-strings, blanks and placeholders
    pub fn clean_location_name(&self, name: &Value) -> Option<String> {
        let name = name.as_str()?.trim();
        if name.is_empty() || self.placeholders.contains(&name.to_lowercase()) {
            return None;
        }
        Some(name.to_string())
    }

    /// Count locations in a parsed document
    pub fn scan_document(&self, document: &Value) -> FileScan {
        let records: &[Value] = match document.get("records") {
            Some(Value::Array(records)) => records,
            _ => &[],
        };

        let mut scan = FileScan {
            total_records: records.len(),
            ..FileScan::default()
        };

        for record in records {
            let locations: &[Value] = match record.get("locations") {
                Some(Value::Array(locations)) => locations,
                _ => &[],
            };
            let names = || {
                locations
                    .iter()
                    .filter(|l| l.is_object())
                    .filter_map(|l| l.get("name"))
            };

            if names().any(|n| self.clean_location_name(n).is_some()) {
                scan.records_with_location += 1;
            }
            if names().any(is_scotland) {
                scan.records_with_scotland += 1;
            }
        }

        scan
    }

    /// Read, parse and count locations in a file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not UTF-8, or is not
    /// valid JSON
    pub fn scan_file(&self, path: &Path) -> Result<FileScan> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            ScrubError::Analysis(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let document: Value = serde_json::from_str(&contents).map_err(|e| {
            ScrubError::Analysis(format!("Failed to parse {}: {}", path.display(), e))
        })?;
        Ok(self.scan_document(&document))
    }
}

impl Default for LocationRules {
    fn default() -> Self {
        Self::new(&["-", "n/a", "na", "unknown"])
    }
}

/// True when the value names Scotland, ignoring case, whitespace and
/// surrounding punctuation
pub fn is_scotland(name: &Value) -> bool {
    name.as_str()
        .map(|s| s.trim().trim_matches(REGION_PUNCTUATION).to_lowercase() == TARGET_REGION)
        .unwrap_or(false)
}
