//! History walk errors.

use super::error_code::{self, WarnlineErrorCode};
use super::StorageError;

/// Errors that can occur while walking the build history chain.
///
/// A missing reference build is not an error: walks return `Ok(None)`.
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("failed to read history: {0}")]
    Read(#[from] StorageError),

    #[error("history returned build {returned} while walking back from build {cursor}")]
    NonMonotonic { cursor: u64, returned: u64 },
}

impl WarnlineErrorCode for HistoryError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Read(_) => error_code::HISTORY_READ_FAILED,
            Self::NonMonotonic { .. } => error_code::HISTORY_NON_MONOTONIC,
        }
    }
}
