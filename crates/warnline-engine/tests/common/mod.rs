//! Shared fixtures for engine tests.
#![allow(dead_code)]

use std::cell::Cell;

use warnline_core::errors::StorageError;
use warnline_core::model::HistoryChain;
use warnline_core::traits::{BuildHistory, ResultSink};
use warnline_core::{AnnotationSet, BuildId, HistoryEntry, Outcome, ResultRecord, Warning};

/// `n` distinct warnings in `file`, one per line.
pub fn warnings_in(file: &str, n: usize) -> Vec<Warning> {
    (0..n)
        .map(|i| {
            let line = i as u32 + 1;
            Warning::new(file, line, line, format!("warning {line}")).with_category("style")
        })
        .collect()
}

pub fn set(warnings: Vec<Warning>) -> AnnotationSet {
    AnnotationSet::new(warnings)
}

/// A finalized record with `n` warnings in `old.rs`.
pub fn rec(build: u64, outcome: Outcome, n: usize) -> ResultRecord {
    let annotations = set(warnings_in("old.rs", n));
    ResultRecord {
        build_id: BuildId(build),
        outcome,
        new_count: 0,
        annotations,
        fixed_count: 0,
        reference_build: None,
        ratchet_failed: false,
        zero_warnings_since: None,
    }
}

pub fn chain(records: Vec<ResultRecord>) -> HistoryChain {
    HistoryChain::from_records(records)
}

/// History whose every read fails.
pub struct FailingHistory;

impl BuildHistory for FailingHistory {
    fn previous(&self, _build: BuildId) -> Result<Option<HistoryEntry>, StorageError> {
        Err(StorageError::SqliteError {
            message: "disk I/O error".to_string(),
        })
    }
}

/// History that always answers with the same entry, whatever the cursor.
pub struct StuckHistory(pub HistoryEntry);

impl BuildHistory for StuckHistory {
    fn previous(&self, _build: BuildId) -> Result<Option<HistoryEntry>, StorageError> {
        Ok(Some(self.0.clone()))
    }
}

/// Sink that counts calls and optionally fails them.
#[derive(Default)]
pub struct CountingSink {
    pub calls: Cell<usize>,
    pub fail: bool,
}

impl ResultSink for CountingSink {
    fn store(&self, _record: &ResultRecord) -> Result<(), StorageError> {
        self.calls.set(self.calls.get() + 1);
        if self.fail {
            return Err(StorageError::SqliteError {
                message: "database is locked".to_string(),
            });
        }
        Ok(())
    }
}
