//! Result assembly errors.

use super::error_code::WarnlineErrorCode;
use super::{HistoryError, StorageError};

/// Errors that abort the assembly of a build's result record.
/// Aggregates collaborator errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum AssemblyError {
    #[error("History error: {0}")]
    History(#[from] HistoryError),

    #[error("Persistence error: {0}")]
    Persist(#[from] StorageError),
}

impl WarnlineErrorCode for AssemblyError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::History(e) => e.error_code(),
            Self::Persist(e) => e.error_code(),
        }
    }
}
