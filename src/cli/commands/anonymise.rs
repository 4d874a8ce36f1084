//! Anonymise command implementation
//!
//! Reads one metadata JSON file, keeps the first N records, pseudonymises
//! sensitive strings and writes `<stem>_anonymised.json` into the output folder.

use crate::anonymisation::audit::AuditLogger;
use crate::anonymisation::{AnonymisationReport, Anonymiser};
use crate::config::ScrubConfig;
use crate::log_output_written;
use anyhow::Context;
use clap::Args;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Arguments for the anonymise command
#[derive(Args, Debug)]
pub struct AnonymiseArgs {
    /// Path to the input JSON file
    pub input_file: PathBuf,

    /// Folder to write the anonymised file into (created if missing)
    pub output_folder: PathBuf,

    /// Number of records to keep (overrides configuration)
    #[arg(long)]
    pub max_records: Option<usize>,

    /// Print a summary of the run
    #[arg(long)]
    pub summary: bool,

    /// Append the pseudonym table to the audit log
    #[arg(long)]
    pub audit: bool,
}

impl AnonymiseArgs {
    /// Execute the anonymise command
    pub fn execute(&self, config: &ScrubConfig) -> anyhow::Result<i32> {
        let mut settings = config.anonymisation.clone();
        if let Some(max_records) = self.max_records {
            settings.max_records = max_records;
        }
        if self.audit {
            settings.audit.enabled = true;
        }

        tracing::info!(
            input = %self.input_file.display(),
            output_folder = %self.output_folder.display(),
            max_records = settings.max_records,
            "Anonymising file"
        );

        fs::create_dir_all(&self.output_folder).with_context(|| {
            format!(
                "Failed to create output folder: {}",
                self.output_folder.display()
            )
        })?;

        let contents = fs::read_to_string(&self.input_file)
            .with_context(|| format!("Failed to read input file: {}", self.input_file.display()))?;
        // Numbers keep their source text (arbitrary_precision). Nesting deeper
        // than serde_json's 128-level limit is rejected as invalid JSON.
        let document: Value = serde_json::from_str(&contents)
            .with_context(|| format!("Invalid JSON in {}", self.input_file.display()))?;

        let mut anonymiser = Anonymiser::from_config(&settings)?;
        let anonymised = anonymiser.anonymise_document(&document);

        let outfile = output_path(&self.input_file, &self.output_folder);
        let rendered = serde_json::to_string_pretty(&anonymised)?;
        fs::write(&outfile, rendered)
            .with_context(|| format!("Failed to write {}", outfile.display()))?;
        log_output_written!(outfile.display(), "anonymised document");

        let source = self.input_file.display().to_string();
        let report = AnonymisationReport::new(&source, anonymiser.stats(), anonymiser.registry());
        tracing::info!(
            strings_replaced = report.strings_replaced,
            distinct_values = report.total_distinct(),
            lists_truncated = report.lists_truncated,
            "Anonymisation complete"
        );

        if settings.audit.enabled {
            let logger = AuditLogger::new(&settings.audit.log_path)?;
            let written = logger.log_registry(&source, anonymiser.registry())?;
            tracing::info!(
                path = %logger.log_path().display(),
                entries = written,
                "Audit log updated"
            );
        }

        if self.summary {
            print!("{}", report.format_console());
        }
        println!("Anonymised file written to {}", outfile.display());

        Ok(0)
    }
}

/// `<output_folder>/<input stem>_anonymised.json`
pub fn output_path(input_file: &Path, output_folder: &Path) -> PathBuf {
    let stem = input_file
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    output_folder.join(format!("{stem}_anonymised.json"))
}
