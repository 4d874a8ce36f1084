//! Field-name policy tables
//!
//! Decides, per mapping key, whether the value is truncated, copied through,
//! or anonymised in full. All lookups are case-insensitive.

use crate::anonymisation::config::AnonymisationConfig;
use std::collections::HashSet;

/// Blocks that are anonymised in full
pub const DEFAULT_FORCE_BLOCKS: &[&str] = &[
    "data_providers",
    "contacts",
    "citations",
    "authors",
    "unique_datasets",
    "dataset_identifiers",
    "datasets",
    "data_files",
    "data_resources",
    "data_collections",
    "data_licences",
    "data_tags",
];

/// Pipeline fields anonymised wherever they appear
pub const DEFAULT_FORCE_FIELDS: &[&str] = &["script", "endpoints"];

/// Keys that are never anonymised
pub const DEFAULT_SKIP_FIELDS: &[&str] = &["location", "id", "uuid"];

/// List fields cut down to their first element
pub const DEFAULT_TRUNCATE_FIELDS: &[&str] = &["data_files", "data_resources"];

/// What happens to the value stored under a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Copy the value through untouched
    Skip,
    /// Anonymise the whole subtree
    Force,
    /// Recurse with the caller's force state
    Inherit,
}

/// Resolved policy for one mapping key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyRule {
    /// Truncate a list value to its first element before anything else
    pub truncate: bool,
    /// Anonymisation action for the (possibly truncated) value
    pub action: KeyAction,
}

/// Case-insensitive field-name policy tables
#[derive(Debug, Clone)]
pub struct FieldPolicy {
    force_blocks: HashSet<String>,
    force_fields: HashSet<String>,
    skip_fields: HashSet<String>,
    truncate_fields: HashSet<String>,
}

impl FieldPolicy {
    /// Build the policy from explicit name lists
    pub fn new<S: AsRef<str>>(
        force_blocks: &[S],
        force_fields: &[S],
        skip_fields: &[S],
        truncate_fields: &[S],
    ) -> Self {
        Self {
            force_blocks: lowered(force_blocks),
            force_fields: lowered(force_fields),
            skip_fields: lowered(skip_fields),
            truncate_fields: lowered(truncate_fields),
        }
    }

    /// Build the policy from configuration
    pub fn from_config(config: &AnonymisationConfig) -> Self {
        Self::new(
            &config.force_blocks,
            &config.force_fields,
            &config.skip_fields,
            &config.truncate_fields,
        )
    }

    /// Resolve the rule for a mapping key
    ///
    /// Skip outranks both force tables. Truncation is independent of the
    /// action and applies even to skipped keys.
    pub fn rule_for(&self, key: &str) -> KeyRule {
        let key = key.to_lowercase();

        let action = if self.skip_fields.contains(&key) {
            KeyAction::Skip
        } else if self.force_fields.contains(&key) || self.force_blocks.contains(&key) {
            KeyAction::Force
        } else {
            KeyAction::Inherit
        };

        KeyRule {
            truncate: self.truncate_fields.contains(&key),
            action,
        }
    }

    /// Distinct names per table after case folding: force blocks, force
    /// fields, skip fields, truncate fields
    pub fn table_sizes(&self) -> [usize; 4] {
        [
            self.force_blocks.len(),
            self.force_fields.len(),
            self.skip_fields.len(),
            self.truncate_fields.len(),
        ]
    }
}

impl Default for FieldPolicy {
    fn default() -> Self {
        Self::new(
            DEFAULT_FORCE_BLOCKS,
            DEFAULT_FORCE_FIELDS,
            DEFAULT_SKIP_FIELDS,
            DEFAULT_TRUNCATE_FIELDS,
        )
    }
}

fn lowered<S: AsRef<str>>(names: &[S]) -> HashSet<String> {
    names.iter().map(|n| n.as_ref().to_lowercase()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_force_block_is_case_insensitive() {
        let policy = FieldPolicy::default();
        assert_eq!(policy.rule_for("Contacts").action, KeyAction::Force);
        assert_eq!(policy.rule_for("AUTHORS").action, KeyAction::Force);
    }

    #[test]
    fn test_force_field() {
        let policy = FieldPolicy::default();
        assert_eq!(policy.rule_for("script").action, KeyAction::Force);
        assert_eq!(policy.rule_for("Endpoints").action, KeyAction::Force);
    }

    #[test]
    fn test_skip_outranks_force() {
        let policy = FieldPolicy::new(&["id"], &[], &["id"], &[]);
        assert_eq!(policy.rule_for("ID").action, KeyAction::Skip);
    }

    #[test]
    fn test_truncated_field_also_forces() {
        let rule = FieldPolicy::default().rule_for("data_files");
        assert!(rule.truncate);
        assert_eq!(rule.action, KeyAction::Force);
    }

    #[test]
    fn test_plain_key_inherits() {
        let rule = FieldPolicy::default().rule_for("notes");
        assert!(!rule.truncate);
        assert_eq!(rule.action, KeyAction::Inherit);
    }

    #[test]
    fn test_table_sizes() {
        assert_eq!(FieldPolicy::default().table_sizes(), [12, 2, 3, 2]);

        let policy = FieldPolicy::new(&["Contacts", "contacts"], &["script"], &["ID", "id"], &[]);
        assert_eq!(policy.table_sizes(), [1, 1, 1, 0]);
    }
}
