//! Folder scanner for location analysis

use crate::analysis::location::LocationRules;
use crate::analysis::summary::LocationAnalysis;
use crate::domain::{Result, ScrubError};
use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};

/// YAML summary file name
pub const SUMMARY_FILE_NAME: &str = "location_analysis.yaml";

/// Categorised file lists file name
pub const LISTS_FILE_NAME: &str = "location_analysis_lists.txt";

/// Paths written by a scan
#[derive(Debug, Clone)]
pub struct ScanOutputs {
    /// YAML summary
    pub summary_path: PathBuf,
    /// Text file lists
    pub lists_path: PathBuf,
}

/// Scans a folder of JSON documents and writes the location reports
pub struct LocationScanner {
    rules: LocationRules,
}

impl LocationScanner {
    /// Create a scanner with the given location rules
    pub fn new(rules: LocationRules) -> Self {
        Self { rules }
    }

    /// Scan every `.json` file directly inside `input`
    ///
    /// Files that cannot be read or parsed are recorded as failures and do
    /// not stop the scan.
    ///
    /// # Errors
    ///
    /// Returns an error if `input` is not a directory or cannot be listed
    pub fn scan(&self, input: &Path) -> Result<LocationAnalysis> {
        let files = list_json_files(input)?;
        tracing::info!(input = %input.display(), files = files.len(), "Scanning folder");

        let mut analysis = LocationAnalysis::new();
        for path in &files {
            let identity = file_identity(path);
            match self.rules.scan_file(path) {
                Ok(scan) => {
                    tracing::debug!(
                        file = %identity,
                        records = scan.total_records,
                        with_location = scan.records_with_location,
                        "Scanned file"
                    );
                    analysis.add_file(&identity, &scan);
                }
                Err(e) => {
                    tracing::warn!(file = %identity, error = %e, "Failed to scan file");
                    analysis.add_failure(&identity);
                }
            }
        }

        analysis.log_summary();
        Ok(analysis)
    }

    /// Scan `input` and write both reports into `output`, creating it if needed
    ///
    /// # Errors
    ///
    /// Returns an error if the scan fails or a report cannot be written
    pub fn run(&self, input: &Path, output: &Path) -> Result<(LocationAnalysis, ScanOutputs)> {
        let analysis = self.scan(input)?;

        fs::create_dir_all(output).map_err(|e| {
            ScrubError::Io(format!(
                "Failed to create output folder {}: {}",
                output.display(),
                e
            ))
        })?;

        let report = analysis.to_report(&input.display().to_string(), Utc::now());
        let summary_path = output.join(SUMMARY_FILE_NAME);
        fs::write(&summary_path, report.to_yaml()?)?;

        let lists_path = output.join(LISTS_FILE_NAME);
        fs::write(&lists_path, analysis.format_lists())?;

        tracing::info!(
            summary = %summary_path.display(),
            lists = %lists_path.display(),
            "Location reports written"
        );

        Ok((
            analysis,
            ScanOutputs {
                summary_path,
                lists_path,
            },
        ))
    }
}

/// Regular files directly inside `dir` whose name ends in `.json` (any case),
/// sorted by path
pub fn list_json_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(ScrubError::Validation(format!(
            "Input folder does not exist: {}",
            dir.display()
        )));
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_json = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.to_lowercase().ends_with(".json"));
        if is_json && path.is_file() {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// File name without its last extension (`a.b.json` → `a.b`)
pub fn file_identity(path: &Path) -> String {
    let base = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    match base.rsplit_once('.') {
        Some((stem, _)) => stem.to_string(),
        None => base,
    }
}
