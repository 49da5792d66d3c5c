//! Write side of the persistence collaborator.

use crate::errors::StorageError;
use crate::model::ResultRecord;

/// Destination for finalized result records.
///
/// Called exactly once per build, after every gate decision is made. A
/// failed `store` must not leave a partial record behind.
pub trait ResultSink {
    fn store(&self, record: &ResultRecord) -> Result<(), StorageError>;
}

impl<T: ResultSink + ?Sized> ResultSink for &T {
    fn store(&self, record: &ResultRecord) -> Result<(), StorageError> {
        (**self).store(record)
    }
}
