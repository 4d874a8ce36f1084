//! Anonymisation configuration

use crate::anonymisation::classifier::{DEFAULT_EMAIL_PATTERN, DEFAULT_PHONE_PATTERN};
use crate::anonymisation::policy::{
    DEFAULT_FORCE_BLOCKS, DEFAULT_FORCE_FIELDS, DEFAULT_SKIP_FIELDS, DEFAULT_TRUNCATE_FIELDS,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Policy tables, record limit and classifier patterns for one anonymisation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnonymisationConfig {
    /// Keep only the first N entries of the top-level records list
    #[serde(default = "default_max_records")]
    pub max_records: usize,

    /// Name of the top-level records list
    #[serde(default = "default_records_field")]
    pub records_field: String,

    /// Mapping names whose entire subtree is anonymised
    #[serde(default = "default_force_blocks")]
    pub force_blocks: Vec<String>,

    /// Field names anonymised wherever they appear
    #[serde(default = "default_force_fields")]
    pub force_fields: Vec<String>,

    /// Field names passed through unchanged, even inside a forced block
    #[serde(default = "default_skip_fields")]
    pub skip_fields: Vec<String>,

    /// List fields cut down to their first element
    #[serde(default = "default_truncate_fields")]
    pub truncate_fields: Vec<String>,

    /// Email shape, matched from the start of the string
    #[serde(default = "default_email_pattern")]
    pub email_pattern: String,

    /// Phone number shape, matched from the start of the string
    #[serde(default = "default_phone_pattern")]
    pub phone_pattern: String,

    /// Pseudonym audit log
    #[serde(default)]
    pub audit: AuditConfig,
}

impl Default for AnonymisationConfig {
    fn default() -> Self {
        Self {
            max_records: default_max_records(),
            records_field: default_records_field(),
            force_blocks: default_force_blocks(),
            force_fields: default_force_fields(),
            skip_fields: default_skip_fields(),
            truncate_fields: default_truncate_fields(),
            email_pattern: default_email_pattern(),
            phone_pattern: default_phone_pattern(),
            audit: AuditConfig::default(),
        }
    }
}

impl AnonymisationConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.records_field.trim().is_empty() {
            return Err("anonymisation.records_field cannot be empty".to_string());
        }

        for (name, names) in [
            ("force_blocks", &self.force_blocks),
            ("force_fields", &self.force_fields),
            ("skip_fields", &self.skip_fields),
            ("truncate_fields", &self.truncate_fields),
        ] {
            if names.iter().any(|n| n.trim().is_empty()) {
                return Err(format!("anonymisation.{name} contains an empty field name"));
            }
        }

        Regex::new(&self.email_pattern)
            .map_err(|e| format!("Invalid anonymisation.email_pattern: {e}"))?;
        Regex::new(&self.phone_pattern)
            .map_err(|e| format!("Invalid anonymisation.phone_pattern: {e}"))?;

        self.audit.validate()
    }
}

/// Audit logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Append the run's pseudonym table (hashed originals) to the audit log
    #[serde(default)]
    pub enabled: bool,

    /// Audit log file path (JSON lines)
    #[serde(default = "default_audit_log_path")]
    pub log_path: PathBuf,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            log_path: default_audit_log_path(),
        }
    }
}

impl AuditConfig {
    fn validate(&self) -> Result<(), String> {
        if self.enabled && self.log_path.as_os_str().is_empty() {
            return Err("anonymisation.audit.log_path cannot be empty when enabled".to_string());
        }
        Ok(())
    }
}

fn to_owned_list(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn default_max_records() -> usize {
    5
}

fn default_records_field() -> String {
    "records".to_string()
}

fn default_force_blocks() -> Vec<String> {
    to_owned_list(DEFAULT_FORCE_BLOCKS)
}

fn default_force_fields() -> Vec<String> {
    to_owned_list(DEFAULT_FORCE_FIELDS)
}

fn default_skip_fields() -> Vec<String> {
    to_owned_list(DEFAULT_SKIP_FIELDS)
}

fn default_truncate_fields() -> Vec<String> {
    to_owned_list(DEFAULT_TRUNCATE_FIELDS)
}

fn default_email_pattern() -> String {
    DEFAULT_EMAIL_PATTERN.to_string()
}

fn default_phone_pattern() -> String {
    DEFAULT_PHONE_PATTERN.to_string()
}

fn default_audit_log_path() -> PathBuf {
    PathBuf::from("./audit/pseudonyms.jsonl")
}
