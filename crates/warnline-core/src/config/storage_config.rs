//! Persistence configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

const DEFAULT_DB_PATH: &str = ".warnline/warnline.db";
const DEFAULT_PIPELINE: &str = "default";

/// Configuration for the `[storage]` section.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StorageConfig {
    /// Database path, relative to the project root. Default: `.warnline/warnline.db`.
    pub db_path: Option<String>,
    /// History key; each pipeline has its own chain. Default: `default`.
    pub pipeline: Option<String>,
}

impl StorageConfig {
    pub fn effective_db_path(&self) -> PathBuf {
        PathBuf::from(self.db_path.as_deref().unwrap_or(DEFAULT_DB_PATH))
    }

    pub fn effective_pipeline(&self) -> &str {
        self.pipeline.as_deref().unwrap_or(DEFAULT_PIPELINE)
    }
}
