//! Stable string codes attached to every error variant.

/// Maps an error to a stable, machine-readable code.
pub trait WarnlineErrorCode {
    fn error_code(&self) -> &'static str;
}

pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
pub const MIGRATION_FAILED: &str = "MIGRATION_FAILED";
pub const SERIALIZATION_ERROR: &str = "SERIALIZATION_ERROR";
pub const RECORD_CONFLICT: &str = "RECORD_CONFLICT";
pub const BUILD_ID_OUT_OF_RANGE: &str = "BUILD_ID_OUT_OF_RANGE";
pub const HISTORY_READ_FAILED: &str = "HISTORY_READ_FAILED";
pub const HISTORY_NON_MONOTONIC: &str = "HISTORY_NON_MONOTONIC";
