//! Pseudonym audit log
//!
//! Appends a run's pseudonym table as JSON lines. Originals are stored as
//! SHA-256 digests only, so the log links tokens to values without leaking
//! the values themselves.

use crate::anonymisation::registry::{PseudonymEntry, PseudonymRegistry};
use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Audit log line
#[derive(Debug, Serialize)]
struct AuditLogEntry<'a> {
    timestamp: &'a str,
    source: &'a str,
    category: &'static str,
    token: &'a str,
    /// SHA-256 of the original value (never log plaintext)
    value_hash: String,
}

/// Audit logger for pseudonym tables
pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    /// Create a new audit logger, creating the log directory if needed
    pub fn new(log_path: impl Into<PathBuf>) -> Result<Self> {
        let log_path = log_path.into();
        if let Some(parent) = log_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create audit log directory: {}", parent.display())
            })?;
        }

        Ok(Self { log_path })
    }

    /// Path of the audit log
    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    /// Append every registry entry; returns the number of lines written
    pub fn log_registry(&self, source: &str, registry: &PseudonymRegistry) -> Result<usize> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .with_context(|| format!("Failed to open audit log: {}", self.log_path.display()))?;
        let mut writer = BufWriter::new(file);

        let timestamp = Utc::now().to_rfc3339();
        let mut written = 0;

        for entry in registry.entries() {
            let line = Self::audit_entry(&timestamp, source, &entry);
            let json_line =
                serde_json::to_string(&line).context("Failed to serialize audit entry")?;
            writeln!(writer, "{json_line}").context("Failed to write audit entry")?;
            written += 1;
        }

        writer.flush().context("Failed to flush audit log")?;
        Ok(written)
    }

    fn audit_entry<'a>(
        timestamp: &'a str,
        source: &'a str,
        entry: &PseudonymEntry<'a>,
    ) -> AuditLogEntry<'a> {
        AuditLogEntry {
            timestamp,
            source,
            category: entry.category.prefix(),
            token: entry.token,
            value_hash: hash_value(entry.original),
        }
    }
}

/// Hash a value using SHA-256
fn hash_value(value: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    format!("{:x}", hasher.finalize())
}
