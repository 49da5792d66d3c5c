//! In-memory history chain.

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

use super::build::BuildId;
use super::record::{HistoryEntry, ResultRecord};
use crate::errors::StorageError;
use crate::traits::{BuildHistory, ResultSink};

/// History kept in memory, keyed by build id.
///
/// Serves as both the history source and the result sink for a single
/// pipeline, which makes it the natural collaborator for tests and for
/// hosts that persist records themselves.
#[derive(Debug, Default)]
pub struct HistoryChain {
    entries: RwLock<BTreeMap<BuildId, Option<ResultRecord>>>,
}

impl HistoryChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a chain from already-finalized records. Later duplicates of a
    /// build id replace earlier ones.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = ResultRecord>,
    {
        let entries = records
            .into_iter()
            .map(|r| (r.build_id, Some(r)))
            .collect();
        Self {
            entries: RwLock::new(entries),
        }
    }

    /// Record a build that produced no analysis data.
    pub fn push_gap(&self, build_id: BuildId) -> Result<(), StorageError> {
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        entries.entry(build_id).or_insert(None);
        Ok(())
    }

    pub fn get(&self, build_id: BuildId) -> Result<Option<ResultRecord>, StorageError> {
        let entries = self.entries.read().map_err(|_| poisoned())?;
        Ok(entries.get(&build_id).cloned().flatten())
    }

    /// Number of entries, gaps included. Reads through a poisoned lock.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl BuildHistory for HistoryChain {
    fn previous(&self, build: BuildId) -> Result<Option<HistoryEntry>, StorageError> {
        let entries = self.entries.read().map_err(|_| poisoned())?;
        Ok(entries
            .range(..build)
            .next_back()
            .map(|(id, record)| HistoryEntry {
                build_id: *id,
                record: record.clone(),
            }))
    }
}

impl ResultSink for HistoryChain {
    fn store(&self, record: &ResultRecord) -> Result<(), StorageError> {
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        if let Some(Some(_)) = entries.get(&record.build_id) {
            return Err(StorageError::Conflict {
                build_id: record.build_id.get(),
            });
        }
        entries.insert(record.build_id, Some(record.clone()));
        Ok(())
    }
}

fn poisoned() -> StorageError {
    StorageError::LockPoisoned {
        resource: "history chain".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Outcome;

    fn record(build: u64) -> ResultRecord {
        ResultRecord {
            build_id: BuildId(build),
            outcome: Outcome::Success,
            annotations: Default::default(),
            new_count: 0,
            fixed_count: 0,
            reference_build: None,
            ratchet_failed: false,
            zero_warnings_since: None,
        }
    }

    #[test]
    fn poisoned_chain_still_counts_but_refuses_access() {
        let chain = HistoryChain::from_records([record(1)]);
        chain.push_gap(BuildId(2)).unwrap();

        std::thread::scope(|s| {
            let writer = s.spawn(|| {
                let _guard = chain.entries.write().unwrap();
                panic!("writer died holding the lock");
            });
            assert!(writer.join().is_err());
        });

        assert_eq!(chain.len(), 2);
        assert!(!chain.is_empty());
        assert!(matches!(
            chain.get(BuildId(1)),
            Err(StorageError::LockPoisoned { .. })
        ));
        assert!(matches!(
            chain.previous(BuildId(3)),
            Err(StorageError::LockPoisoned { .. })
        ));
    }
}
