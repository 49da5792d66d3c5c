//! Read side of the persistence collaborator.

use crate::errors::StorageError;
use crate::model::{BuildId, HistoryEntry};

/// Source of prior build records for one pipeline.
pub trait BuildHistory {
    /// The entry for the build immediately preceding `build`.
    ///
    /// `Ok(None)` means there is no earlier build (end of chain). Builds that
    /// ran without analysis data are returned as gap entries, not skipped.
    fn previous(&self, build: BuildId) -> Result<Option<HistoryEntry>, StorageError>;
}

impl<T: BuildHistory + ?Sized> BuildHistory for &T {
    fn previous(&self, build: BuildId) -> Result<Option<HistoryEntry>, StorageError> {
        (**self).previous(build)
    }
}
