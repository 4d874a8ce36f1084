//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::PathBuf;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "metascrub.toml";

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    pub output: PathBuf,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output.display(), "Initializing configuration file");

        println!("📝 Initializing metascrub configuration");
        println!();

        if self.output.exists() && !self.force {
            println!(
                "❌ Configuration file already exists: {}",
                self.output.display()
            );
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        match fs::write(&self.output, Self::generate_config()) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output.display());
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output.display());
                println!("  2. Validate configuration: metascrub validate-config");
                println!("  3. Anonymise a file: metascrub anonymise <input_file> <output_folder>");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(5)
            }
        }
    }

    /// Generate the commented default configuration
    pub fn generate_config() -> String {
        r#"# metascrub configuration
#
# Every setting below shows its built-in default. Field names are compared
# case-insensitively. ${VAR} placeholders are replaced from the environment,
# and METASCRUB_<SECTION>_<KEY> variables override values in this file.

[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

[anonymisation]
# Keep only the first N entries of the top-level records list
max_records = 5
records_field = "records"

# Blocks whose entire subtree is anonymised
force_blocks = [
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
]

# Fields anonymised wherever they appear
force_fields = ["script", "endpoints"]

# Fields never anonymised, even inside a forced block
skip_fields = ["location", "id", "uuid"]

# Lists cut down to their first element
truncate_fields = ["data_files", "data_resources"]

# String shapes, matched from the start of the value
email_pattern = '[^@]+@[^@]+\.[^@]+'
phone_pattern = '\+?\d[\d\s\-()]{6,}\d'

[anonymisation.audit]
# Append each run's pseudonym table (originals stored as SHA-256) to a JSON-lines file
enabled = false
log_path = "./audit/pseudonyms.jsonl"

[analysis]
# Location names treated as unpopulated
placeholders = ["-", "n/a", "na", "unknown"]

[logging]
local_enabled = false
local_path = "./logs"
local_rotation = "daily"  # daily | hourly
"#
        .to_string()
    }
}
