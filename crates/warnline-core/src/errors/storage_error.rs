//! Storage-layer errors for the persistence collaborator.

use super::error_code::{self, WarnlineErrorCode};

/// Errors raised by a `BuildHistory` or `ResultSink` implementation.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    SqliteError { message: String },

    #[error("migration failed at version {version}: {reason}")]
    MigrationFailed { version: u32, reason: String },

    #[error("failed to (de)serialize {what}: {message}")]
    Serialization { what: String, message: String },

    #[error("a result record for build {build_id} already exists")]
    Conflict { build_id: u64 },

    #[error("build id {build_id} exceeds the storable range (max {max})", max = i64::MAX)]
    BuildIdOutOfRange { build_id: u64 },

    #[error("{resource} lock poisoned")]
    LockPoisoned { resource: String },
}

impl WarnlineErrorCode for StorageError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::SqliteError { .. } | Self::LockPoisoned { .. } => error_code::STORAGE_ERROR,
            Self::MigrationFailed { .. } => error_code::MIGRATION_FAILED,
            Self::Serialization { .. } => error_code::SERIALIZATION_ERROR,
            Self::Conflict { .. } => error_code::RECORD_CONFLICT,
            Self::BuildIdOutOfRange { .. } => error_code::BUILD_ID_OUT_OF_RANGE,
        }
    }
}
