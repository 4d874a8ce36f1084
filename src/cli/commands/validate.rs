//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the metascrub configuration file.

use crate::anonymisation::FieldPolicy;
use crate::config::load_config;
use clap::Args;
use std::path::Path;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub fn execute(&self, config_path: &Path) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path.display(), "Validating configuration");

        println!("🔍 Validating configuration file: {}", config_path.display());
        println!();

        // Loading applies environment overrides and validates
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                println!();
                return Ok(2);
            }
        };

        let anonymisation = &config.anonymisation;
        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!(
            "  Records Kept: {} (from '{}')",
            anonymisation.max_records, anonymisation.records_field
        );
        println!("  Force Blocks: {:?}", anonymisation.force_blocks);
        println!("  Force Fields: {:?}", anonymisation.force_fields);
        println!("  Skip Fields: {:?}", anonymisation.skip_fields);
        println!("  Truncated Lists: {:?}", anonymisation.truncate_fields);
        let [blocks, fields, skips, truncated] =
            FieldPolicy::from_config(anonymisation).table_sizes();
        println!(
            "  Distinct Names (case-insensitive): {blocks} blocks, {fields} fields, {skips} skipped, {truncated} truncated"
        );
        if anonymisation.audit.enabled {
            println!(
                "  Audit Log: {}",
                anonymisation.audit.log_path.display()
            );
        } else {
            println!("  Audit Log: disabled");
        }
        println!("  Location Placeholders: {:?}", config.analysis.placeholders);
        if config.logging.local_enabled {
            println!(
                "  File Logging: {} ({})",
                config.logging.local_path, config.logging.local_rotation
            );
        }
        println!();
        Ok(0)
    }
}
