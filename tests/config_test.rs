// tests/config_test.rs
use git_log_json::config::{load_config, Config, Order};
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

#[test]
fn test_load_default_config() {
    let config = Config::default();
    assert_eq!(config.dest, PathBuf::from("changelog.json"));
    assert!(!config.short_hash);
    assert!(!config.pretty);
    assert_eq!(config.filter, None);
    assert_eq!(config.order, Order::NewestFirst);
    assert_eq!(config.timeout_secs, 60);
}

#[test]
fn test_load_from_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let toml_content = r#"
short_hash = true
dest = "docs/CHANGELOG.json"
filter = "^v[0-9]+"
pretty = true
order = "oldest-first"
timeout_secs = 5
delimiter = "\u001E"
date_format = "short"
"#;
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path())).unwrap();
    assert!(config.short_hash);
    assert_eq!(config.dest, PathBuf::from("docs/CHANGELOG.json"));
    assert_eq!(config.filter.as_deref(), Some("^v[0-9]+"));
    assert!(config.pretty);
    assert_eq!(config.order, Order::OldestFirst);
    assert_eq!(config.timeout_secs, 5);
    assert_eq!(config.delimiter, '\u{1e}');
    assert_eq!(config.date_format.as_deref(), Some("short"));
    assert!(config.validate().is_ok());
}

#[test]
fn test_partial_file_keeps_defaults() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"pretty = true\n").unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path())).unwrap();
    assert!(config.pretty);
    assert_eq!(config.dest, PathBuf::from("changelog.json"));
    assert_eq!(config.delimiter, '\u{1f}');
}

#[test]
fn test_comma_delimiter_is_rejected() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"delimiter = \",\"\n").unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path())).unwrap();
    let err = config.validate().unwrap_err();
    assert!(err.to_string().starts_with("Configuration error"));
}

#[test]
fn test_malformed_file_is_config_error() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"order = [\n").unwrap();
    temp_file.flush().unwrap();

    let err = load_config(Some(temp_file.path())).unwrap_err();
    assert!(err.to_string().starts_with("Configuration error"));
}

#[test]
fn test_missing_explicit_file_is_error() {
    let result = load_config(Some(std::path::Path::new("does/not/exist.toml")));
    assert!(result.is_err());
}
