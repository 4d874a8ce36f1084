//! Anonymising tree transform
//!
//! [`Anonymiser`] walks a JSON document depth-first and builds a new one in
//! which:
//! - strings inside a forced subtree are replaced by run-scoped pseudonyms,
//! - configured list fields are cut down to their first element,
//! - everything else keeps its shape, key order and values.
//!
//! A subtree is forced when the caller says so, or when it sits under a key
//! from the force-block or force-field tables. A skip-listed key copies its
//! value through untouched even inside a forced subtree; sibling keys are
//! unaffected.
//!
//! # Examples
//!
//! ```
//! use metascrub::anonymisation::Anonymiser;
//! use serde_json::json;
//!
//! # fn example() -> anyhow::Result<()> {
//! let mut anonymiser = Anonymiser::with_defaults()?;
//!
//! let document = json!({
//!     "contacts": [{"name": "Jane Doe", "email": "jane@x.com"}],
//!     "id": "abc-1",
//!     "notes": "see http://x.com"
//! });
//!
//! let anonymised = anonymiser.anonymise(&document, false);
//! assert_eq!(anonymised["contacts"][0]["name"], "text1");
//! assert_eq!(anonymised["contacts"][0]["email"], "email1");
//! assert_eq!(anonymised["notes"], "see http://x.com");
//! # Ok(())
//! # }
//! ```

use crate::anonymisation::{
    classifier::StringClassifier,
    config::AnonymisationConfig,
    policy::{FieldPolicy, KeyAction},
    registry::PseudonymRegistry,
};
use anyhow::{Context, Result};
use serde_json::{Map, Value};

/// Counters gathered while transforming
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransformStats {
    /// Length of the top-level records list before limiting, if present
    pub records_in: Option<usize>,
    /// Records kept after limiting
    pub records_kept: Option<usize>,
    /// List fields that lost elements to truncation
    pub lists_truncated: usize,
    /// String leaves replaced by a pseudonym
    pub strings_replaced: usize,
}

/// Anonymising tree transform with its run-scoped pseudonym registry
pub struct Anonymiser {
    policy: FieldPolicy,
    classifier: StringClassifier,
    registry: PseudonymRegistry,
    records_field: String,
    max_records: usize,
    stats: TransformStats,
}

impl Anonymiser {
    /// Create an anonymiser with an empty registry
    ///
    /// The records limit defaults to the first 5 entries of `records`.
    pub fn new(policy: FieldPolicy, classifier: StringClassifier) -> Self {
        Self {
            policy,
            classifier,
            registry: PseudonymRegistry::new(),
            records_field: "records".to_string(),
            max_records: 5,
            stats: TransformStats::default(),
        }
    }

    /// Create an anonymiser with the built-in policy tables and patterns
    pub fn with_defaults() -> Result<Self> {
        Ok(Self::new(FieldPolicy::default(), StringClassifier::new()?))
    }

    /// Create an anonymiser from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or a classifier
    /// pattern does not compile
    pub fn from_config(config: &AnonymisationConfig) -> Result<Self> {
        config
            .validate()
            .map_err(anyhow::Error::msg)
            .context("Invalid anonymisation configuration")?;

        let classifier =
            StringClassifier::with_patterns(&config.email_pattern, &config.phone_pattern)?;

        Ok(Self::new(FieldPolicy::from_config(config), classifier)
            .with_record_limit(config.records_field.clone(), config.max_records))
    }

    /// Set the top-level records list name and how many entries to keep
    pub fn with_record_limit(
        mut self,
        records_field: impl Into<String>,
        max_records: usize,
    ) -> Self {
        self.records_field = records_field.into();
        self.max_records = max_records;
        self
    }

    /// Anonymise a whole document
    ///
    /// Keeps only the first `max_records` entries of the top-level records
    /// list (when the root is an object holding one), then runs
    /// [`anonymise`](Self::anonymise) with `forced = false`.
    pub fn anonymise_document(&mut self, document: &Value) -> Value {
        match self.limit_records(document) {
            Some(limited) => self.anonymise(&limited, false),
            None => self.anonymise(document, false),
        }
    }

    /// Anonymise a value; `forced` marks the value as inside a forced subtree
    pub fn anonymise(&mut self, value: &Value, forced: bool) -> Value {
        match value {
            Value::Object(map) => self.anonymise_object(map, forced),
            Value::Array(items) => Value::Array(
                items
                    .iter()
                    .map(|item| self.anonymise(item, forced))
                    .collect(),
            ),
            Value::String(s) if forced => Value::String(self.pseudonymise(s)),
            Value::String(_) | Value::Number(_) | Value::Bool(_) | Value::Null => value.clone(),
        }
    }

    fn anonymise_object(&mut self, map: &Map<String, Value>, forced: bool) -> Value {
        let mut anonymised = Map::with_capacity(map.len());

        for (key, child) in map {
            let rule = self.policy.rule_for(key);

            let truncated = if rule.truncate {
                self.truncate_list(child)
            } else {
                None
            };
            let child = truncated.as_ref().unwrap_or(child);

            let value = match rule.action {
                KeyAction::Skip => child.clone(),
                KeyAction::Force => self.anonymise(child, true),
                KeyAction::Inherit => self.anonymise(child, forced),
            };
            anonymised.insert(key.clone(), value);
        }

        Value::Object(anonymised)
    }

    /// First element only; `None` when the value is not a list or is already short
    fn truncate_list(&mut self, value: &Value) -> Option<Value> {
        match value {
            Value::Array(items) if items.len() > 1 => {
                self.stats.lists_truncated += 1;
                Some(Value::Array(items[..1].to_vec()))
            }
            _ => None,
        }
    }

    fn limit_records(&mut self, document: &Value) -> Option<Value> {
        let Value::Object(map) = document else {
            return None;
        };
        let Some(Value::Array(records)) = map.get(&self.records_field) else {
            return None;
        };

        let kept = records.len().min(self.max_records);
        self.stats.records_in = Some(records.len());
        self.stats.records_kept = Some(kept);

        if kept == records.len() {
            return None;
        }

        tracing::debug!(
            field = %self.records_field,
            total = records.len(),
            kept,
            "Limiting records"
        );

        let mut limited = map.clone();
        limited.insert(
            self.records_field.clone(),
            Value::Array(records[..kept].to_vec()),
        );
        Some(Value::Object(limited))
    }

    /// Replace a string with its pseudonym, minting one on first sight
    pub fn pseudonymise(&mut self, value: &str) -> String {
        let category = self.classifier.classify(value);
        self.stats.strings_replaced += 1;
        self.registry.pseudonym(category, value)
    }

    /// Registry built so far
    pub fn registry(&self) -> &PseudonymRegistry {
        &self.registry
    }

    /// Consume the anonymiser, keeping its registry
    pub fn into_registry(self) -> PseudonymRegistry {
        self.registry
    }

    /// Counters gathered so far
    pub fn stats(&self) -> TransformStats {
        self.stats
    }
}
