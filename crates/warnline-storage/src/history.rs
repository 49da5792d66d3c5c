//! `SqliteHistory`, the SQLite-backed history source and result sink.

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use warnline_core::config::StorageConfig;
use warnline_core::errors::StorageError;
use warnline_core::model::{BuildId, HistoryEntry, Outcome, ResultRecord, Warning};
use warnline_core::traits::{BuildHistory, ResultSink};

use crate::connection::writer::with_immediate_transaction;
use crate::connection::DatabaseManager;
use crate::queries::build_results::{self, BuildResultRow};
use crate::queries::warnings;

/// History of one pipeline stored in a SQLite database.
///
/// Several pipelines may share a database; every query is scoped to
/// `pipeline`.
pub struct SqliteHistory {
    db: DatabaseManager,
    pipeline: String,
}

impl SqliteHistory {
    pub fn new(db: DatabaseManager, pipeline: impl Into<String>) -> Self {
        Self {
            db,
            pipeline: pipeline.into(),
        }
    }

    pub fn open(path: &Path, pipeline: impl Into<String>) -> Result<Self, StorageError> {
        Ok(Self::new(DatabaseManager::open(path)?, pipeline))
    }

    pub fn open_in_memory(pipeline: impl Into<String>) -> Result<Self, StorageError> {
        Ok(Self::new(DatabaseManager::open_in_memory()?, pipeline))
    }

    /// Open the database named by `[storage]`, relative to `root`, creating
    /// its parent directory if needed.
    pub fn from_config(root: &Path, config: &StorageConfig) -> Result<Self, StorageError> {
        let path = root.join(config.effective_db_path());
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StorageError::SqliteError {
                message: format!("create {}: {e}", parent.display()),
            })?;
        }
        Self::open(&path, config.effective_pipeline())
    }

    pub fn pipeline(&self) -> &str {
        &self.pipeline
    }

    /// Record that `build_id` ran without analysis data.
    pub fn record_gap(&self, build_id: BuildId) -> Result<(), StorageError> {
        let build_id = to_sql_id(build_id)?;
        self.db.with_writer(|conn| {
            build_results::insert_gap(conn, &self.pipeline, build_id, now_secs())
        })
    }

    /// The analyzed record of `build_id`, if any.
    pub fn load(&self, build_id: BuildId) -> Result<Option<ResultRecord>, StorageError> {
        let build_id = to_sql_id(build_id)?;
        self.db.with_reader(|conn| {
            match build_results::query_by_build(conn, &self.pipeline, build_id)? {
                Some(row) if row.has_analysis => {
                    let annotations = warnings::query_warnings(conn, &self.pipeline, row.build_id)?;
                    row_to_record(row, annotations).map(Some)
                }
                _ => Ok(None),
            }
        })
    }

    /// The most recent analyzed record.
    pub fn latest(&self) -> Result<Option<ResultRecord>, StorageError> {
        self.db.with_reader(|conn| {
            match build_results::query_latest_analyzed(conn, &self.pipeline)? {
                Some(row) => {
                    let annotations = warnings::query_warnings(conn, &self.pipeline, row.build_id)?;
                    row_to_record(row, annotations).map(Some)
                }
                None => Ok(None),
            }
        })
    }

    /// Number of history entries, gaps included.
    pub fn count(&self) -> Result<u64, StorageError> {
        self.db
            .with_reader(|conn| build_results::count(conn, &self.pipeline))
            .map(|n| n as u64)
    }

    /// Number of stored warnings in this pipeline sharing the identity of
    /// `warning`, across all builds. Warnings without an identity never
    /// match, so they count as 0.
    pub fn occurrences(&self, warning: &Warning) -> Result<u64, StorageError> {
        let Some(key) = warning.key() else {
            return Ok(0);
        };
        self.db
            .with_reader(|conn| {
                warnings::count_by_fingerprint(conn, &self.pipeline, key.fingerprint())
            })
            .map(|n| n as u64)
    }
}

impl BuildHistory for SqliteHistory {
    fn previous(&self, build: BuildId) -> Result<Option<HistoryEntry>, StorageError> {
        let build = to_sql_id(build)?;
        self.db.with_reader(|conn| {
            let Some(row) = build_results::query_previous(conn, &self.pipeline, build)? else {
                return Ok(None);
            };
            if !row.has_analysis {
                return Ok(Some(HistoryEntry::gap(from_sql_id(row.build_id)?)));
            }
            let annotations = warnings::query_warnings(conn, &self.pipeline, row.build_id)?;
            row_to_record(row, annotations).map(|r| Some(HistoryEntry::analyzed(r)))
        })
    }
}

impl ResultSink for SqliteHistory {
    fn store(&self, record: &ResultRecord) -> Result<(), StorageError> {
        let row = BuildResultRow {
            pipeline: self.pipeline.clone(),
            build_id: to_sql_id(record.build_id)?,
            has_analysis: true,
            outcome: Some(record.outcome.as_str().to_string()),
            total_warnings: record.total_warnings() as i64,
            new_count: record.new_count as i64,
            fixed_count: record.fixed_count as i64,
            reference_build: record.reference_build.map(to_sql_id).transpose()?,
            ratchet_failed: record.ratchet_failed,
            zero_warnings_since: record.zero_warnings_since.map(to_sql_id).transpose()?,
            recorded_at: now_secs(),
        };
        self.db.with_writer(|conn| {
            with_immediate_transaction(conn, |tx| {
                build_results::insert_result(tx, &row)?;
                warnings::insert_warnings(tx, &self.pipeline, row.build_id, &record.annotations)
            })
        })?;
        tracing::debug!(
            pipeline = %self.pipeline,
            build = %record.build_id,
            warnings = record.total_warnings(),
            "stored result record"
        );
        Ok(())
    }
}

fn row_to_record(
    row: BuildResultRow,
    annotations: warnline_core::model::AnnotationSet,
) -> Result<ResultRecord, StorageError> {
    let outcome = row
        .outcome
        .as_deref()
        .and_then(Outcome::parse)
        .ok_or_else(|| StorageError::Serialization {
            what: "outcome".to_string(),
            message: format!(
                "build {} has invalid outcome {:?}",
                row.build_id, row.outcome
            ),
        })?;
    Ok(ResultRecord {
        build_id: from_sql_id(row.build_id)?,
        outcome,
        annotations,
        new_count: row.new_count as usize,
        fixed_count: row.fixed_count as usize,
        reference_build: row.reference_build.map(from_sql_id).transpose()?,
        ratchet_failed: row.ratchet_failed,
        zero_warnings_since: row.zero_warnings_since.map(from_sql_id).transpose()?,
    })
}

// SQLite integers are signed; ids above i64::MAX would wrap and break ordering.
fn to_sql_id(id: BuildId) -> Result<i64, StorageError> {
    i64::try_from(id.get()).map_err(|_| StorageError::BuildIdOutOfRange { build_id: id.get() })
}

fn from_sql_id(id: i64) -> Result<BuildId, StorageError> {
    u64::try_from(id)
        .map(BuildId)
        .map_err(|_| StorageError::Serialization {
            what: "build id".to_string(),
            message: format!("negative build id {id} in storage"),
        })
}

fn now_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
