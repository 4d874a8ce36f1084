//! Analyse-locations command implementation
//!
//! Scans a folder of JSON record files and writes the location population
//! summary (YAML) and categorised file lists (text).

use crate::analysis::{LocationRules, LocationScanner, PopulationLevel};
use crate::config::ScrubConfig;
use crate::log_output_written;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the analyse-locations command
#[derive(Args, Debug)]
pub struct AnalyseArgs {
    /// Folder containing the JSON files to analyse
    #[arg(short, long)]
    pub input: PathBuf,

    /// Folder to write the reports into (created if missing)
    #[arg(short, long)]
    pub output: PathBuf,
}

impl AnalyseArgs {
    /// Execute the analyse-locations command
    pub fn execute(&self, config: &ScrubConfig) -> anyhow::Result<i32> {
        if !self.input.is_dir() {
            eprintln!("Input folder does not exist: {}", self.input.display());
            return Ok(1);
        }

        let scanner = LocationScanner::new(LocationRules::new(&config.analysis.placeholders));
        let (analysis, outputs) = scanner.run(&self.input, &self.output)?;
        log_output_written!(outputs.summary_path.display(), "location summary");
        log_output_written!(outputs.lists_path.display(), "location file lists");

        println!("Files analysed:            {}", analysis.files_parsed());
        println!("Files failed:              {}", analysis.failed_files.len());
        println!("Total records:             {}", analysis.total_records);
        println!("Records with location:     {}", analysis.records_with_location);
        println!("Records in Scotland:       {}", analysis.records_with_scotland);
        println!(
            "Files fully populated:     {}",
            analysis.population_levels.count(PopulationLevel::Full)
        );
        println!();
        println!("Summary written to {}", outputs.summary_path.display());
        println!("File lists written to {}", outputs.lists_path.display());

        Ok(0)
    }
}
