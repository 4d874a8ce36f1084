//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::ScrubConfig;
use crate::domain::errors::ScrubError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (`${VAR}` syntax)
/// 3. Parses the TOML into [`ScrubConfig`]
/// 4. Applies environment variable overrides (`METASCRUB_*` prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - A referenced environment variable is not set
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use metascrub::config::loader::load_config;
///
/// let config = load_config("metascrub.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<ScrubConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ScrubError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        ScrubError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: ScrubConfig = toml::from_str(&contents)
        .map_err(|e| ScrubError::Configuration(format!("Failed to parse TOML: {e}")))?;

    finish(&mut config)?;
    Ok(config)
}

/// Loads configuration from `path` when given, otherwise starts from the
/// built-in defaults. Environment overrides and validation apply either way.
///
/// # Errors
///
/// Returns an error if the file cannot be loaded or the result is invalid
pub fn load_or_default(path: Option<&Path>) -> Result<ScrubConfig> {
    match path {
        Some(path) => load_config(path),
        None => {
            let mut config = ScrubConfig::default();
            finish(&mut config)?;
            Ok(config)
        }
    }
}

fn finish(config: &mut ScrubConfig) -> Result<()> {
    apply_env_overrides(config)?;

    config.validate().map_err(|e| {
        ScrubError::Configuration(format!("Configuration validation failed: {e}"))
    })
}

/// Substitutes environment variables in the format `${VAR_NAME}`
///
/// Comment lines are copied verbatim. All missing variables are reported
/// together.
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| ScrubError::Other(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{var_name}}}");
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(ScrubError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the `METASCRUB_*` prefix
///
/// Variables follow the pattern `METASCRUB_<SECTION>_<KEY>`. List-valued
/// settings take a comma-separated value.
fn apply_env_overrides(config: &mut ScrubConfig) -> Result<()> {
    if let Ok(val) = std::env::var("METASCRUB_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Anonymisation overrides
    if let Ok(val) = std::env::var("METASCRUB_ANONYMISATION_MAX_RECORDS") {
        config.anonymisation.max_records = val.parse().map_err(|_| {
            ScrubError::Configuration(format!("Invalid METASCRUB_ANONYMISATION_MAX_RECORDS: {val}"))
        })?;
    }
    if let Ok(val) = std::env::var("METASCRUB_ANONYMISATION_RECORDS_FIELD") {
        config.anonymisation.records_field = val;
    }
    if let Ok(val) = std::env::var("METASCRUB_ANONYMISATION_FORCE_BLOCKS") {
        config.anonymisation.force_blocks = split_list(&val);
    }
    if let Ok(val) = std::env::var("METASCRUB_ANONYMISATION_FORCE_FIELDS") {
        config.anonymisation.force_fields = split_list(&val);
    }
    if let Ok(val) = std::env::var("METASCRUB_ANONYMISATION_SKIP_FIELDS") {
        config.anonymisation.skip_fields = split_list(&val);
    }
    if let Ok(val) = std::env::var("METASCRUB_ANONYMISATION_TRUNCATE_FIELDS") {
        config.anonymisation.truncate_fields = split_list(&val);
    }
    if let Ok(val) = std::env::var("METASCRUB_ANONYMISATION_AUDIT_ENABLED") {
        config.anonymisation.audit.enabled =
            parse_bool_override("METASCRUB_ANONYMISATION_AUDIT_ENABLED", &val)?;
    }
    if let Ok(val) = std::env::var("METASCRUB_ANONYMISATION_AUDIT_LOG_PATH") {
        config.anonymisation.audit.log_path = val.into();
    }

    if let Ok(val) = std::env::var("METASCRUB_ANALYSIS_PLACEHOLDERS") {
        config.analysis.placeholders = split_list(&val);
    }

    // Logging overrides
    if let Ok(val) = std::env::var("METASCRUB_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled =
            parse_bool_override("METASCRUB_LOGGING_LOCAL_ENABLED", &val)?;
    }
    if let Ok(val) = std::env::var("METASCRUB_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("METASCRUB_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}

fn parse_bool_override(name: &str, value: &str) -> Result<bool> {
    value
        .parse()
        .map_err(|_| ScrubError::Configuration(format!("Invalid {name}: {value}")))
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bool_override() {
        assert!(parse_bool_override("METASCRUB_LOGGING_LOCAL_ENABLED", "true").unwrap());
        assert!(!parse_bool_override("METASCRUB_LOGGING_LOCAL_ENABLED", "false").unwrap());

        let err = parse_bool_override("METASCRUB_LOGGING_LOCAL_ENABLED", "yes").unwrap_err();
        assert!(matches!(err, ScrubError::Configuration(_)));
        assert!(err.to_string().contains("METASCRUB_LOGGING_LOCAL_ENABLED"));
    }
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("METASCRUB_LOADER_TEST_VAR", "test_value");
        let input = "log_path = \"${METASCRUB_LOADER_TEST_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result.trim_end(), "log_path = \"test_value\"");
        std::env::remove_var("METASCRUB_LOADER_TEST_VAR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("METASCRUB_LOADER_MISSING_VAR");
        let input = "log_path = \"${METASCRUB_LOADER_MISSING_VAR}\"";
        let result = substitute_env_vars(input);
        assert!(result.is_err());
    }

    #[test]
    fn test_substitute_env_vars_skips_comments() {
        let input = "# log_path = \"${METASCRUB_LOADER_COMMENTED_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert!(result.contains("${METASCRUB_LOADER_COMMENTED_VAR}"));
    }

    #[test]
    fn test_split_list() {
        assert_eq!(split_list("id, uuid,,location "), vec!["id", "uuid", "location"]);
        assert!(split_list("").is_empty());
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent.toml");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r#"
[application]
log_level = "debug"

[anonymisation]
max_records = 3
skip_fields = ["id", "doi"]
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.application.log_level, "debug");
        assert_eq!(config.anonymisation.max_records, 3);
        assert_eq!(config.anonymisation.skip_fields, vec!["id", "doi"]);
        assert!(config.anonymisation.force_fields.contains(&"script".to_string()));
    }
}
