//! Top-level Warnline configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{GateConfig, StorageConfig, ThresholdConfig};
use crate::errors::ConfigError;

const PROJECT_CONFIG_FILE: &str = "warnline.toml";

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`WARNLINE_*`)
/// 3. Project config (`warnline.toml` in project root)
/// 4. User config (`~/.warnline/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct WarnlineConfig {
    pub gate: GateConfig,
    pub thresholds: ThresholdConfig,
    pub storage: StorageConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub use_stable_build_as_reference: Option<bool>,
    pub should_ratchet: Option<bool>,
    pub max_lookback: Option<usize>,
    pub db_path: Option<String>,
    pub pipeline: Option<String>,
}

impl WarnlineConfig {
    /// Load configuration with layered resolution, see the type docs.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 4 (lowest priority): user config
        if let Some(user_config_path) = user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(e @ ConfigError::ParseError { .. }) => return Err(e),
                    Err(e) => {
                        tracing::warn!(
                            path = %user_config_path.display(),
                            error = %e,
                            "ignoring unreadable user config"
                        );
                    }
                }
            }
        }

        // Layer 3: project config
        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config);

        // Layer 1 (highest priority): CLI flags
        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;
        tracing::debug!(
            stable_only = config.gate.effective_stable_only(),
            should_ratchet = config.gate.effective_should_ratchet(),
            pipeline = config.storage.effective_pipeline(),
            "configuration resolved"
        );
        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &WarnlineConfig) -> Result<(), ConfigError> {
        if config.gate.max_lookback == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "gate.max_lookback".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        let t = &config.thresholds;
        check_pair("total", t.unstable_total, t.failed_total)?;
        check_pair("new", t.unstable_new, t.failed_new)?;
        if let Some(ref pipeline) = config.storage.pipeline {
            if pipeline.trim().is_empty() {
                return Err(ConfigError::ValidationFailed {
                    field: "storage.pipeline".to_string(),
                    message: "must not be empty".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut WarnlineConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: WarnlineConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `other` wins only where it has a value.
    fn merge(base: &mut WarnlineConfig, other: &WarnlineConfig) {
        // Gate
        if other.gate.use_stable_build_as_reference.is_some() {
            base.gate.use_stable_build_as_reference = other.gate.use_stable_build_as_reference;
        }
        if other.gate.should_ratchet.is_some() {
            base.gate.should_ratchet = other.gate.should_ratchet;
        }
        if other.gate.max_lookback.is_some() {
            base.gate.max_lookback = other.gate.max_lookback;
        }

        // Thresholds
        if other.thresholds.unstable_total.is_some() {
            base.thresholds.unstable_total = other.thresholds.unstable_total;
        }
        if other.thresholds.failed_total.is_some() {
            base.thresholds.failed_total = other.thresholds.failed_total;
        }
        if other.thresholds.unstable_new.is_some() {
            base.thresholds.unstable_new = other.thresholds.unstable_new;
        }
        if other.thresholds.failed_new.is_some() {
            base.thresholds.failed_new = other.thresholds.failed_new;
        }

        // Storage
        if other.storage.db_path.is_some() {
            base.storage.db_path = other.storage.db_path.clone();
        }
        if other.storage.pipeline.is_some() {
            base.storage.pipeline = other.storage.pipeline.clone();
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `WARNLINE_SHOULD_RATCHET`, `WARNLINE_MAX_LOOKBACK`, etc.
    fn apply_env_overrides(config: &mut WarnlineConfig) {
        if let Ok(val) = std::env::var("WARNLINE_USE_STABLE_BUILD_AS_REFERENCE") {
            if let Ok(v) = val.parse::<bool>() {
                config.gate.use_stable_build_as_reference = Some(v);
            }
        }
        if let Ok(val) = std::env::var("WARNLINE_SHOULD_RATCHET") {
            if let Ok(v) = val.parse::<bool>() {
                config.gate.should_ratchet = Some(v);
            }
        }
        if let Ok(val) = std::env::var("WARNLINE_MAX_LOOKBACK") {
            if let Ok(v) = val.parse::<usize>() {
                config.gate.max_lookback = Some(v);
            }
        }
        if let Ok(val) = std::env::var("WARNLINE_DB_PATH") {
            config.storage.db_path = Some(val);
        }
        if let Ok(val) = std::env::var("WARNLINE_PIPELINE") {
            config.storage.pipeline = Some(val);
        }
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut WarnlineConfig, cli: &CliOverrides) {
        if let Some(v) = cli.use_stable_build_as_reference {
            config.gate.use_stable_build_as_reference = Some(v);
        }
        if let Some(v) = cli.should_ratchet {
            config.gate.should_ratchet = Some(v);
        }
        if let Some(v) = cli.max_lookback {
            config.gate.max_lookback = Some(v);
        }
        if let Some(ref v) = cli.db_path {
            config.storage.db_path = Some(v.clone());
        }
        if let Some(ref v) = cli.pipeline {
            config.storage.pipeline = Some(v.clone());
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

fn check_pair(
    name: &str,
    unstable: Option<usize>,
    failed: Option<usize>,
) -> Result<(), ConfigError> {
    if let (Some(u), Some(f)) = (unstable, failed) {
        if u > f {
            return Err(ConfigError::ValidationFailed {
                field: format!("thresholds.unstable_{name}"),
                message: format!("must not exceed thresholds.failed_{name} ({f})"),
            });
        }
    }
    Ok(())
}

/// `~/.warnline/config.toml`.
fn user_config_path() -> Option<PathBuf> {
    home_dir().map(|h| h.join(".warnline").join("config.toml"))
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
