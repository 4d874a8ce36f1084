//! CLI interface and argument parsing

pub mod commands;

use clap::{Parser, Subcommand};
use commands::init::DEFAULT_CONFIG_FILE;
use std::path::{Path, PathBuf};

/// metascrub - metadata anonymisation and location analysis
#[derive(Parser, Debug)]
#[command(name = "metascrub")]
#[command(version, about, long_about = None)]
#[command(author = "Metascrub Contributors")]
pub struct Cli {
    /// Path to configuration file [default: ./metascrub.toml when present,
    /// otherwise built-in defaults]
    #[arg(short, long, env = "METASCRUB_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "METASCRUB_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Configuration file to load for this invocation
    pub fn config_path(&self) -> Option<PathBuf> {
        resolve_config_path(self.config.as_deref(), Path::new(DEFAULT_CONFIG_FILE))
    }
}

/// An explicit path always wins; otherwise `fallback` is used when it exists
pub fn resolve_config_path(explicit: Option<&Path>, fallback: &Path) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => fallback.is_file().then(|| fallback.to_path_buf()),
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Anonymise a metadata JSON file and trim it to the first N records
    Anonymise(commands::anonymise::AnonymiseArgs),

    /// Analyse location fields across a folder of JSON files
    AnalyseLocations(commands::analyse::AnalyseArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_anonymise() {
        let cli = Cli::parse_from(["metascrub", "anonymise", "in/sample.json", "out"]);
        assert!(cli.config.is_none());
        match cli.command {
            Commands::Anonymise(args) => {
                assert_eq!(args.input_file, PathBuf::from("in/sample.json"));
                assert_eq!(args.output_folder, PathBuf::from("out"));
                assert!(args.max_records.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_anonymise_options() {
        let cli = Cli::parse_from([
            "metascrub",
            "anonymise",
            "in.json",
            "out",
            "--max-records",
            "2",
            "--summary",
        ]);
        match cli.command {
            Commands::Anonymise(args) => {
                assert_eq!(args.max_records, Some(2));
                assert!(args.summary);
                assert!(!args.audit);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_analyse_locations() {
        let cli = Cli::parse_from([
            "metascrub",
            "analyse-locations",
            "--input",
            "records",
            "--output",
            "reports",
        ]);
        assert!(matches!(cli.command, Commands::AnalyseLocations(_)));
    }

    #[test]
    fn test_cli_analyse_requires_input() {
        let result = Cli::try_parse_from(["metascrub", "analyse-locations", "--output", "reports"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parse_with_config_and_log_level() {
        let cli = Cli::parse_from([
            "metascrub",
            "--config",
            "custom.toml",
            "--log-level",
            "debug",
            "validate-config",
        ]);
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
        assert_eq!(cli.log_level, Some("debug".to_string()));
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_resolve_config_path() {
        let dir = tempfile::tempdir().unwrap();
        let fallback = dir.path().join(DEFAULT_CONFIG_FILE);
        let explicit = dir.path().join("custom.toml");

        assert_eq!(resolve_config_path(None, &fallback), None);
        assert_eq!(
            resolve_config_path(Some(&explicit), &fallback),
            Some(explicit.clone())
        );

        std::fs::write(&fallback, "").unwrap();
        assert_eq!(resolve_config_path(None, &fallback), Some(fallback.clone()));
        assert_eq!(resolve_config_path(Some(&explicit), &fallback), Some(explicit));
    }

    #[test]
    fn test_default_config_file_drives_anonymise() {
        let dir = tempfile::tempdir().unwrap();
        let fallback = dir.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(&fallback, "[anonymisation]\nmax_records = 1\n").unwrap();
        let input = dir.path().join("sample.json");
        std::fs::write(&input, r#"{"records": [{"n": 1}, {"n": 2}, {"n": 3}]}"#).unwrap();

        let cli = Cli::parse_from([
            "metascrub",
            "anonymise",
            input.to_str().unwrap(),
            dir.path().to_str().unwrap(),
        ]);
        let path = resolve_config_path(cli.config.as_deref(), &fallback);
        let config = crate::config::load_or_default(path.as_deref()).unwrap();

        let Commands::Anonymise(args) = cli.command else {
            panic!("expected anonymise");
        };
        assert_eq!(args.execute(&config).unwrap(), 0);

        let written = std::fs::read_to_string(dir.path().join("sample_anonymised.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(value, serde_json::json!({"records": [{"n": 1}]}));
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["metascrub", "init"]);
        assert!(matches!(cli.command, Commands::Init(_)));
    }
}
