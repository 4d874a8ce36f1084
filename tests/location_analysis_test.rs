//! Integration tests for folder-level location analysis

use metascrub::analysis::{LocationReport, LocationRules, LocationScanner, PopulationLevel};
use std::fs;
use std::path::Path;

fn write(dir: &Path, name: &str, contents: &str) {
    fs::write(dir.join(name), contents).expect("Failed to write fixture");
}

/// Four parseable files, one broken file and one non-JSON file
fn create_fixture_folder(dir: &Path) {
    write(
        dir,
        "full.json",
        r#"{"records": [
            {"locations": [{"name": "Scotland."}]},
            {"locations": [{"name": "Wales"}, {"name": "scotland"}]}
        ]}"#,
    );
    write(
        dir,
        "partial.json",
        r#"{"records": [
            {"locations": [{"name": "Glasgow"}]},
            {"locations": [{"name": "N/A"}]},
            {"locations": [{"name": "   "}]},
            {"locations": []}
        ]}"#,
    );
    write(
        dir,
        "placeholders.JSON",
        r#"{"records": [{"locations": [{"name": "unknown"}, {"name": "-"}]}]}"#,
    );
    write(dir, "no_records.json", r#"{"meta": {}}"#);
    write(dir, "broken.json", "{\"records\": [");
    write(dir, "notes.txt", "not json");
}

#[test]
fn test_scan_folder_counts() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    create_fixture_folder(dir.path());

    let scanner = LocationScanner::new(LocationRules::default());
    let analysis = scanner.scan(dir.path()).expect("Scan failed");

    assert_eq!(analysis.files_scanned, 5);
    assert_eq!(analysis.files_parsed(), 4);
    assert_eq!(analysis.failed_files, vec!["broken".to_string()]);

    assert_eq!(analysis.total_records, 7);
    assert_eq!(analysis.records_with_location, 3);
    assert_eq!(analysis.records_with_scotland, 2);

    assert_eq!(analysis.population_files(PopulationLevel::Full), ["full"]);
    assert_eq!(analysis.population_files(PopulationLevel::Low), ["partial"]);
    assert_eq!(
        analysis.population_files(PopulationLevel::Empty),
        ["no_records", "placeholders"]
    );
    assert_eq!(analysis.scotland_files(PopulationLevel::Full), ["full"]);
}

#[test]
fn test_run_writes_reports() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let input = dir.path().join("records");
    let output = dir.path().join("reports/nested");
    fs::create_dir(&input).expect("Failed to create input folder");
    create_fixture_folder(&input);

    let scanner = LocationScanner::new(LocationRules::default());
    let (_, outputs) = scanner.run(&input, &output).expect("Run failed");

    let yaml = fs::read_to_string(&outputs.summary_path).expect("Missing summary");
    let report: LocationReport = serde_yaml::from_str(&yaml).expect("Invalid YAML");
    assert_eq!(report.metadata.files_scanned, 5);
    assert_eq!(report.metadata.files_parsed, 4);
    assert_eq!(report.summary.total_files, 4);
    assert_eq!(report.summary.files_with_any_location_name, 2);
    assert_eq!(report.summary.files_with_scotland, 1);
    assert_eq!(report.summary.records_with_any_location_name, 3);
    assert_eq!(report.location_population_level_distribution.full, 1);
    assert_eq!(report.location_population_level_distribution.empty, 2);
    assert_eq!(report.scottish_location_distribution.empty, 3);

    let lists = fs::read_to_string(&outputs.lists_path).expect("Missing lists");
    assert!(lists.starts_with("[error]\nbroken\n\n[contains scottish]\nfull\n\n"));
    assert!(lists.contains("[populated]\nfull\npartial\n\n"));
    assert!(lists.contains("[population_empty]\nno_records\nplaceholders\n\n"));
    assert!(lists.ends_with("[scotland_full]\nfull\n\n"));
}

#[test]
fn test_custom_placeholders() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    write(
        dir.path(),
        "custom.json",
        r#"{"records": [{"locations": [{"name": "TBC"}]}, {"locations": [{"name": "unknown"}]}]}"#,
    );

    let scanner = LocationScanner::new(LocationRules::new(&["tbc"]));
    let analysis = scanner.scan(dir.path()).expect("Scan failed");

    assert_eq!(analysis.records_with_location, 1);
    assert_eq!(analysis.population_files(PopulationLevel::High), Vec::<String>::new());
    assert_eq!(analysis.population_files(PopulationLevel::Medium), ["custom"]);
}

#[test]
fn test_missing_input_folder() {
    let scanner = LocationScanner::new(LocationRules::default());
    assert!(scanner.scan(Path::new("/nonexistent/metascrub/input")).is_err());
}
