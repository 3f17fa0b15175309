//! Integration tests for configuration loading and validation
//!
//! Note: Tests that modify environment variables should be run with
//! --test-threads=1 to avoid interference between tests.

use std::io::Write;
use std::sync::Mutex;
use tempfile::NamedTempFile;
use veil::config::load_config;
use veil::domain::{Locale, TransformationKind};

// Mutex to serialize tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_complete_config() {
    let toml_content = r#"
[application]
log_level = "debug"

[store]
path = "out/mapping_table.enc"

[fpe]
tweak = "payroll-2026"

[pseudonym]
locale = "fr_FR"
date_variance_days = 15

[[rules]]
pattern = "30.001"
kind = "format_preserving_numeric"

[[rules]]
pattern = "30.002-30.004"
kind = "person_name"
locale = "en"

[[rules]]
pattern = "30.006"
kind = "date_with_variance"
date_variance_days = 7
"#;
    let file = write_config(toml_content);
    let config = load_config(file.path()).unwrap();

    assert_eq!(config.application.log_level, "debug");
    assert_eq!(config.store.path, "out/mapping_table.enc");
    assert_eq!(config.fpe.tweak, "payroll-2026");
    assert_eq!(config.pseudonym.date_variance_days, 15);
    assert_eq!(config.rules.len(), 3);
    assert_eq!(
        config.rules[0].kind,
        TransformationKind::FormatPreservingNumeric
    );
    assert_eq!(config.rules[1].locale, Some(Locale::En));
    assert_eq!(config.rules[2].date_variance_days, Some(7));
}

#[test]
fn test_load_config_with_env_substitution() {
    let _guard = ENV_MUTEX.lock().unwrap();
    std::env::set_var("VEIL_IT_STORE_PATH", "env-store.enc");

    let file = write_config("[store]\npath = \"${VEIL_IT_STORE_PATH}\"\n");
    let config = load_config(file.path()).unwrap();
    assert_eq!(config.store.path, "env-store.enc");

    std::env::remove_var("VEIL_IT_STORE_PATH");
}

#[test]
fn test_load_config_missing_env_var_is_an_error() {
    let _guard = ENV_MUTEX.lock().unwrap();
    std::env::remove_var("VEIL_IT_MISSING_VAR");

    let file = write_config("[fpe]\ntweak = \"${VEIL_IT_MISSING_VAR}\"\n");
    let err = load_config(file.path()).unwrap_err();
    assert!(err.to_string().contains("VEIL_IT_MISSING_VAR"));
}

#[test]
fn test_invalid_log_level_fails_validation() {
    let file = write_config("[application]\nlog_level = \"shouting\"\n");
    let err = load_config(file.path()).unwrap_err();
    assert!(err.to_string().contains("log_level"));
}

#[test]
fn test_unknown_transformation_kind_is_rejected() {
    let file = write_config("[[rules]]\npattern = \"30.001\"\nkind = \"rot13\"\n");
    assert!(load_config(file.path()).is_err());
}

#[test]
fn test_malformed_rule_pattern_loads_with_warning_only() {
    // A pattern that can never match is a misconfiguration, not an error.
    let file = write_config("[[rules]]\npattern = \"30.x-30.010\"\nkind = \"city\"\n");
    let config = load_config(file.path()).unwrap();
    assert_eq!(config.rules.len(), 1);
    assert!(!config.rules[0].pattern_is_well_formed());
}

#[test]
fn test_missing_config_file() {
    let err = load_config("/nonexistent/path/veil.toml").unwrap_err();
    assert!(err.to_string().contains("not found"));
}
