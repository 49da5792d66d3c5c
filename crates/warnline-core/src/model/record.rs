//! Per-build result records and history chain entries.

use serde::{Deserialize, Serialize};

use super::annotations::AnnotationSet;
use super::build::{BuildId, Outcome};

/// The finalized analysis result of one build. This is what gets persisted
/// and what later builds read back as history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub build_id: BuildId,
    /// Final outcome, after thresholds and the ratchet.
    pub outcome: Outcome,
    pub annotations: AnnotationSet,
    /// Warnings with no match in the reference build.
    pub new_count: usize,
    /// Reference warnings with no match in this build.
    pub fixed_count: usize,
    /// Build the delta was computed against, if any.
    pub reference_build: Option<BuildId>,
    /// True iff the outcome was forced to `Failure` by the ratchet.
    pub ratchet_failed: bool,
    /// First build of the current run of zero-warning builds ending here.
    pub zero_warnings_since: Option<BuildId>,
}

impl ResultRecord {
    pub fn total_warnings(&self) -> usize {
        self.annotations.len()
    }
}

/// One link of the history chain. `record` is `None` for builds that ran
/// without producing analysis data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub build_id: BuildId,
    pub record: Option<ResultRecord>,
}

impl HistoryEntry {
    pub fn analyzed(record: ResultRecord) -> Self {
        Self {
            build_id: record.build_id,
            record: Some(record),
        }
    }

    pub fn gap(build_id: BuildId) -> Self {
        Self {
            build_id,
            record: None,
        }
    }

    pub fn is_gap(&self) -> bool {
        self.record.is_none()
    }
}
