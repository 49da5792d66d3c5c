//! Tests for the Warnline configuration system.

use std::sync::Mutex;

use warnline_core::config::{CliOverrides, ThresholdConfig, WarnlineConfig};
use warnline_core::errors::ConfigError;

/// Global mutex to serialize tests that modify environment variables.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn tempdir() -> tempfile::TempDir {
    tempfile::TempDir::new().unwrap()
}

/// Clear all WARNLINE_ env vars to prevent cross-test contamination.
fn clear_warnline_env_vars() {
    for key in [
        "WARNLINE_USE_STABLE_BUILD_AS_REFERENCE",
        "WARNLINE_SHOULD_RATCHET",
        "WARNLINE_MAX_LOOKBACK",
        "WARNLINE_DB_PATH",
        "WARNLINE_PIPELINE",
    ] {
        std::env::remove_var(key);
    }
}

#[test]
fn layered_resolution_cli_over_env_over_project() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_warnline_env_vars();

    let dir = tempdir();
    std::fs::write(
        dir.path().join("warnline.toml"),
        r#"
[gate]
use_stable_build_as_reference = true
should_ratchet = false
max_lookback = 10

[storage]
pipeline = "nightly"
"#,
    )
    .unwrap();

    std::env::set_var("WARNLINE_SHOULD_RATCHET", "true");
    std::env::set_var("WARNLINE_MAX_LOOKBACK", "20");

    let cli = CliOverrides {
        max_lookback: Some(30),
        ..Default::default()
    };
    let config = WarnlineConfig::load(dir.path(), Some(&cli)).unwrap();

    // Project value survives where nothing overrides it
    assert!(config.gate.effective_stable_only());
    assert_eq!(config.storage.effective_pipeline(), "nightly");
    // Env overrides project
    assert!(config.gate.effective_should_ratchet());
    // CLI overrides env
    assert_eq!(config.gate.max_lookback, Some(30));

    clear_warnline_env_vars();
}

#[test]
fn missing_project_file_falls_back_to_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_warnline_env_vars();

    let dir = tempdir();
    let config = WarnlineConfig::load(dir.path(), None).unwrap();

    assert!(!config.gate.effective_stable_only());
    assert!(!config.gate.effective_should_ratchet());
    assert_eq!(config.gate.max_lookback, None);
    assert_eq!(config.thresholds, ThresholdConfig::default());
    assert_eq!(config.storage.effective_pipeline(), "default");
    assert_eq!(
        config.storage.effective_db_path(),
        std::path::PathBuf::from(".warnline/warnline.db")
    );
}

#[test]
fn invalid_toml_is_a_parse_error() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_warnline_env_vars();

    let dir = tempdir();
    std::fs::write(dir.path().join("warnline.toml"), "[gate\nshould_ratchet = ").unwrap();

    match WarnlineConfig::load(dir.path(), None) {
        Err(ConfigError::ParseError { path, .. }) => assert!(path.ends_with("warnline.toml")),
        other => panic!("Expected ParseError, got: {:?}", other),
    }
}

#[test]
fn zero_lookback_is_rejected() {
    let result = WarnlineConfig::from_toml("[gate]\nmax_lookback = 0\n");
    match result {
        Err(ConfigError::ValidationFailed { field, .. }) => {
            assert_eq!(field, "gate.max_lookback")
        }
        other => panic!("Expected ValidationFailed, got: {:?}", other),
    }
}

#[test]
fn unstable_limit_above_failed_limit_is_rejected() {
    let result = WarnlineConfig::from_toml(
        "[thresholds]\nunstable_new = 10\nfailed_new = 5\n",
    );
    match result {
        Err(ConfigError::ValidationFailed { field, .. }) => {
            assert_eq!(field, "thresholds.unstable_new")
        }
        other => panic!("Expected ValidationFailed, got: {:?}", other),
    }
}

#[test]
fn blank_pipeline_is_rejected() {
    assert!(matches!(
        WarnlineConfig::from_toml("[storage]\npipeline = \"  \"\n"),
        Err(ConfigError::ValidationFailed { .. })
    ));
}

#[test]
fn unknown_keys_are_ignored() {
    let config = WarnlineConfig::from_toml(
        "[gate]\nshould_ratchet = true\nfuture_option = 1\n\n[reporting]\nstyle = \"html\"\n",
    )
    .unwrap();
    assert!(config.gate.effective_should_ratchet());
}

#[test]
fn to_toml_preserves_values() {
    let config = WarnlineConfig::from_toml(
        "[thresholds]\nfailed_total = 50\nunstable_total = 10\n",
    )
    .unwrap();
    let text = config.to_toml().unwrap();
    let reparsed = WarnlineConfig::from_toml(&text).unwrap();
    assert_eq!(reparsed.thresholds, config.thresholds);
}
