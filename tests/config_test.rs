// tests/config_test.rs
use std::io::Write;
use std::path::Path;

use bump_version::config::{ReleaseConfig, DEFAULT_CONFIG_PATH};
use bump_version::domain::MessageVersion;
use tempfile::NamedTempFile;

#[test]
fn test_default_config_path() {
    assert_eq!(DEFAULT_CONFIG_PATH, "pyproject.toml");
}

#[test]
fn test_load_from_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let toml_content = r##"
[project]
name = "demo"
version = "0.4.2"

[tool.bump_version]
version_file = "src/demo/__init__.py"

[tool.bump_version.replace_patterns.docs]
file = "docs/conf.py"
search = "# release"
replace = "release = \"{version}\"\n"
"##;
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = ReleaseConfig::load(temp_file.path()).unwrap();
    assert!(config.has_document());
    assert_eq!(config.current_version(), Some("0.4.2"));
    assert_eq!(
        config.version_file(),
        Some(Path::new("src/demo/__init__.py"))
    );

    let patterns = config.replace_patterns();
    assert_eq!(patterns.len(), 1);
    assert_eq!(patterns[0].name, "docs");
    assert_eq!(patterns[0].render("0.5.0"), "release = \"0.5.0\"\n");
    assert_eq!(config.message_version(), MessageVersion::Raw);
}

#[test]
fn test_missing_document_is_not_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = ReleaseConfig::load(&dir.path().join(DEFAULT_CONFIG_PATH)).unwrap();
    assert!(!config.has_document());
    assert!(config.document().is_none());
    assert_eq!(config.path(), dir.path().join(DEFAULT_CONFIG_PATH));
}

#[test]
fn test_parse_error_is_reported_with_path() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"[tool.bump_version\n").unwrap();
    temp_file.flush().unwrap();

    let err = ReleaseConfig::load(temp_file.path()).unwrap_err();
    assert!(err
        .to_string()
        .contains(&temp_file.path().display().to_string()));
}

#[test]
fn test_version_file_must_be_a_string() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file
        .write_all(b"[tool.bump_version]\nversion_file = 3\n")
        .unwrap();
    temp_file.flush().unwrap();

    let err = ReleaseConfig::load(temp_file.path()).unwrap_err();
    assert!(err.to_string().starts_with("Configuration error"));
}
