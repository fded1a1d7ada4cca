//! Tests for loading engine configuration from disk.

use bitways::{DEFAULT_CONFIG_FILE, EngineConfig};
use std::io::Write;

#[test]
fn test_load_full_config() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"seed = 99
max_plies = 12
distinct = false
prefer_mates = false
start = "startpos b - 1 moves 4n""#
    )
    .unwrap();

    let config = EngineConfig::from_file(file.path()).unwrap();
    assert_eq!(*config.seed(), 99);
    assert_eq!(*config.max_plies(), 12);
    assert!(!*config.distinct());
    assert!(!*config.prefer_mates());
    assert_eq!(config.start_board().unwrap().history().len(), 1);
}

#[test]
fn test_empty_file_gives_defaults() {
    let file = tempfile::NamedTempFile::new().unwrap();
    let config = EngineConfig::from_file(file.path()).unwrap();
    assert_eq!(config, EngineConfig::default());
}

#[test]
fn test_missing_file_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = EngineConfig::from_file(dir.path().join("bitways.toml")).unwrap_err();
    assert!(err.message.contains("Failed to read config file"));
}

#[test]
fn test_unknown_key_is_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "seed = 1\nsearch_depth = 4").unwrap();
    let err = EngineConfig::from_file(file.path()).unwrap_err();
    assert!(err.message.contains("Failed to parse config"));
}

#[test]
fn test_discover_reads_default_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(DEFAULT_CONFIG_FILE), "seed = 5\nmax_plies = 9\n").unwrap();
    let config = EngineConfig::discover(dir.path()).unwrap();
    assert_eq!(*config.seed(), 5);
    assert_eq!(*config.max_plies(), 9);
}

#[test]
fn test_discover_without_file_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = EngineConfig::discover(dir.path()).unwrap();
    assert_eq!(config, EngineConfig::default());
}

#[test]
fn test_discover_reports_broken_default_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(DEFAULT_CONFIG_FILE), "seed = \"many\"\n").unwrap();
    let err = EngineConfig::discover(dir.path()).unwrap_err();
    assert!(err.message.contains("Failed to parse config"));
}
