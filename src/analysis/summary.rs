//! Aggregated location analysis and its reports
//!
//! Two reports are produced from one [`LocationAnalysis`]:
//! - a YAML summary with counts and per-level file distributions
//! - a plain-text file listing every categorised file identity

use crate::analysis::levels::{LevelDistribution, PopulationLevel};
use crate::analysis::location::FileScan;
use crate::domain::Result;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Running totals across a folder of documents
#[derive(Debug, Clone, Default)]
pub struct LocationAnalysis {
    /// Candidate files found
    pub files_scanned: usize,
    /// Records across parsed files
    pub total_records: usize,
    /// Records with a populated location name
    pub records_with_location: usize,
    /// Records located in Scotland
    pub records_with_scotland: usize,
    /// Files that could not be read or parsed
    pub failed_files: Vec<String>,
    /// Files with any populated location name
    pub files_with_location: Vec<String>,
    /// Files with any Scottish location
    pub files_with_scotland: Vec<String>,
    /// Location population level per file
    pub population_levels: LevelDistribution,
    /// Scottish share level per file
    pub scotland_levels: LevelDistribution,
    population_files: BTreeMap<PopulationLevel, Vec<String>>,
    scotland_files: BTreeMap<PopulationLevel, Vec<String>>,
}

impl LocationAnalysis {
    /// Create an empty analysis
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a successfully scanned file
    pub fn add_file(&mut self, identity: &str, scan: &FileScan) {
        self.files_scanned += 1;
        self.total_records += scan.total_records;
        self.records_with_location += scan.records_with_location;
        self.records_with_scotland += scan.records_with_scotland;

        if scan.has_location() {
            self.files_with_location.push(identity.to_string());
        }
        if scan.has_scotland() {
            self.files_with_scotland.push(identity.to_string());
        }

        let population =
            PopulationLevel::from_counts(scan.records_with_location, scan.total_records);
        self.population_levels.record(population);
        self.population_files
            .entry(population)
            .or_default()
            .push(identity.to_string());

        let scotland = PopulationLevel::from_counts(scan.records_with_scotland, scan.total_records);
        self.scotland_levels.record(scotland);
        self.scotland_files
            .entry(scotland)
            .or_default()
            .push(identity.to_string());
    }

    /// Add a file that could not be read or parsed
    pub fn add_failure(&mut self, identity: &str) {
        self.files_scanned += 1;
        self.failed_files.push(identity.to_string());
    }

    /// Files that parsed successfully
    pub fn files_parsed(&self) -> usize {
        self.files_scanned - self.failed_files.len()
    }

    /// File identities at a population level
    pub fn population_files(&self, level: PopulationLevel) -> &[String] {
        self.population_files
            .get(&level)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// File identities at a Scottish share level
    pub fn scotland_files(&self, level: PopulationLevel) -> &[String] {
        self.scotland_files
            .get(&level)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Build the YAML summary document
    pub fn to_report(&self, input_path: &str, analyzed_at: DateTime<Utc>) -> LocationReport {
        LocationReport {
            metadata: ReportMetadata {
                analyzed_at: analyzed_at.to_rfc3339_opts(SecondsFormat::Micros, false),
                input_path: input_path.to_string(),
                files_scanned: self.files_scanned,
                files_parsed: self.files_parsed(),
            },
            summary: ReportSummary {
                total_files: self.files_parsed(),
                files_with_any_location_name: self.files_with_location.len(),
                files_with_scotland: self.files_with_scotland.len(),
                total_records: self.total_records,
                records_with_any_location_name: self.records_with_location,
                records_with_scotland: self.records_with_scotland,
            },
            location_population_level_distribution: self.population_levels,
            scottish_location_distribution: self.scotland_levels,
        }
    }

    /// Render the categorised file lists
    ///
    /// Sections are `[error]`, `[contains scottish]`, `[populated]`, then one
    /// `[population_<level>]` and one `[scotland_<level>]` per level. Items
    /// are sorted case-insensitively; every section ends with a blank line.
    pub fn format_lists(&self) -> String {
        let mut output = String::new();

        write_section(&mut output, "error", &self.failed_files);
        write_section(&mut output, "contains scottish", &self.files_with_scotland);
        write_section(&mut output, "populated", &self.files_with_location);

        for level in PopulationLevel::ALL {
            write_section(
                &mut output,
                &format!("population_{level}"),
                self.population_files(level),
            );
        }
        for level in PopulationLevel::ALL {
            write_section(
                &mut output,
                &format!("scotland_{level}"),
                self.scotland_files(level),
            );
        }

        output
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            files_scanned = self.files_scanned,
            files_parsed = self.files_parsed(),
            files_failed = self.failed_files.len(),
            total_records = self.total_records,
            records_with_location = self.records_with_location,
            records_with_scotland = self.records_with_scotland,
            "Location analysis completed"
        );

        if !self.failed_files.is_empty() {
            tracing::warn!(
                failed = self.failed_files.len(),
                "Some files could not be parsed"
            );
        }
    }
}

fn write_section(output: &mut String, header: &str, items: &[String]) {
    let mut sorted: Vec<&String> = items.iter().collect();
    sorted.sort_by_key(|item| item.to_lowercase());

    output.push_str(&format!("[{header}]\n"));
    for item in sorted {
        output.push_str(item);
        output.push('\n');
    }
    output.push('\n');
}

/// YAML summary document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationReport {
    pub metadata: ReportMetadata,
    pub summary: ReportSummary,
    pub location_population_level_distribution: LevelDistribution,
    pub scottish_location_distribution: LevelDistribution,
}

/// Run metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// UTC timestamp, ISO-8601
    pub analyzed_at: String,
    pub input_path: String,
    pub files_scanned: usize,
    pub files_parsed: usize,
}

/// Folder-wide counts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total_files: usize,
    pub files_with_any_location_name: usize,
    pub files_with_scotland: usize,
    pub total_records: usize,
    pub records_with_any_location_name: usize,
    pub records_with_scotland: usize,
}

impl LocationReport {
    /// Render as YAML
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn scan(total: usize, located: usize, scottish: usize) -> FileScan {
        FileScan {
            total_records: total,
            records_with_location: located,
            records_with_scotland: scottish,
        }
    }

    fn sample_analysis() -> LocationAnalysis {
        let mut analysis = LocationAnalysis::new();
        analysis.add_file("beta", &scan(4, 4, 1));
        analysis.add_file("Alpha", &scan(10, 3, 0));
        analysis.add_file("empty", &scan(0, 0, 0));
        analysis.add_failure("broken");
        analysis
    }

    #[test]
    fn test_totals() {
        let analysis = sample_analysis();

        assert_eq!(analysis.files_scanned, 4);
        assert_eq!(analysis.files_parsed(), 3);
        assert_eq!(analysis.total_records, 14);
        assert_eq!(analysis.records_with_location, 7);
        assert_eq!(analysis.records_with_scotland, 1);
        assert_eq!(analysis.files_with_location, vec!["beta", "Alpha"]);
        assert_eq!(analysis.files_with_scotland, vec!["beta"]);
    }

    #[test]
    fn test_levels() {
        let analysis = sample_analysis();

        assert_eq!(analysis.population_levels.full, 1);
        assert_eq!(analysis.population_levels.medium, 1);
        assert_eq!(analysis.population_levels.empty, 1);
        assert_eq!(analysis.scotland_levels.low, 1);
        assert_eq!(analysis.scotland_levels.empty, 2);
        assert_eq!(analysis.scotland_files(PopulationLevel::Empty), ["Alpha", "empty"]);
    }

    #[test]
    fn test_report_yaml() {
        let analyzed_at = Utc.with_ymd_and_hms(2025, 9, 1, 12, 0, 0).unwrap();
        let yaml = sample_analysis()
            .to_report("data/in", analyzed_at)
            .to_yaml()
            .unwrap();

        assert!(yaml.contains("2025-09-01T12:00:00.000000+00:00"));
        assert!(yaml.contains("files_parsed: 3"));
        assert!(yaml.contains("total_files: 3"));
        assert!(yaml.contains("records_with_any_location_name: 7"));

        let metadata = yaml.find("metadata:").unwrap();
        let summary = yaml.find("summary:").unwrap();
        let population = yaml.find("location_population_level_distribution:").unwrap();
        let scottish = yaml.find("scottish_location_distribution:").unwrap();
        assert!(metadata < summary && summary < population && population < scottish);
    }

    #[test]
    fn test_format_lists() {
        let lists = sample_analysis().format_lists();

        assert!(lists.starts_with("[error]\nbroken\n\n[contains scottish]\nbeta\n\n"));
        assert!(lists.contains("[populated]\nAlpha\nbeta\n\n"));
        assert!(lists.contains("[population_full]\nbeta\n\n"));
        assert!(lists.contains("[population_trace]\n\n"));
        assert!(lists.contains("[scotland_empty]\nAlpha\nempty\n\n"));
        assert!(lists.ends_with("[scotland_full]\n\n"));
    }
}
