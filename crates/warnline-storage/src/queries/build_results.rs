//! Queries for the build_results table.

use rusqlite::{params, Connection, OptionalExtension, Row};
use warnline_core::errors::StorageError;

/// A build_results row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildResultRow {
    pub pipeline: String,
    pub build_id: i64,
    pub has_analysis: bool,
    pub outcome: Option<String>,
    pub total_warnings: i64,
    pub new_count: i64,
    pub fixed_count: i64,
    pub reference_build: Option<i64>,
    pub ratchet_failed: bool,
    pub zero_warnings_since: Option<i64>,
    pub recorded_at: i64,
}

const SELECT_COLUMNS: &str = "pipeline, build_id, has_analysis, outcome, total_warnings, new_count,
    fixed_count, reference_build, ratchet_failed, zero_warnings_since, recorded_at";

fn map_row(row: &Row<'_>) -> rusqlite::Result<BuildResultRow> {
    Ok(BuildResultRow {
        pipeline: row.get(0)?,
        build_id: row.get(1)?,
        has_analysis: row.get::<_, i64>(2)? != 0,
        outcome: row.get(3)?,
        total_warnings: row.get(4)?,
        new_count: row.get(5)?,
        fixed_count: row.get(6)?,
        reference_build: row.get(7)?,
        ratchet_failed: row.get::<_, i64>(8)? != 0,
        zero_warnings_since: row.get(9)?,
        recorded_at: row.get(10)?,
    })
}

fn sqlite_err(e: rusqlite::Error) -> StorageError {
    StorageError::SqliteError {
        message: e.to_string(),
    }
}

/// Insert an analyzed result. A gap row for the same build is upgraded in
/// place; an existing analyzed row is a conflict.
pub fn insert_result(conn: &Connection, row: &BuildResultRow) -> Result<(), StorageError> {
    let changed = conn
        .execute(
            "INSERT INTO build_results (pipeline, build_id, has_analysis, outcome, total_warnings,
                new_count, fixed_count, reference_build, ratchet_failed, zero_warnings_since, recorded_at)
             VALUES (?1, ?2, 1, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
             ON CONFLICT(pipeline, build_id) DO UPDATE SET
                has_analysis = 1, outcome = excluded.outcome,
                total_warnings = excluded.total_warnings, new_count = excluded.new_count,
                fixed_count = excluded.fixed_count, reference_build = excluded.reference_build,
                ratchet_failed = excluded.ratchet_failed,
                zero_warnings_since = excluded.zero_warnings_since,
                recorded_at = excluded.recorded_at
             WHERE build_results.has_analysis = 0",
            params![
                row.pipeline,
                row.build_id,
                row.outcome,
                row.total_warnings,
                row.new_count,
                row.fixed_count,
                row.reference_build,
                row.ratchet_failed as i64,
                row.zero_warnings_since,
                row.recorded_at,
            ],
        )
        .map_err(sqlite_err)?;
    if changed == 0 {
        return Err(StorageError::Conflict {
            build_id: row.build_id as u64,
        });
    }
    Ok(())
}

/// Record a build without analysis data. No-op if the build already exists.
pub fn insert_gap(
    conn: &Connection,
    pipeline: &str,
    build_id: i64,
    recorded_at: i64,
) -> Result<(), StorageError> {
    conn.execute(
        "INSERT OR IGNORE INTO build_results (pipeline, build_id, has_analysis, recorded_at)
         VALUES (?1, ?2, 0, ?3)",
        params![pipeline, build_id, recorded_at],
    )
    .map_err(sqlite_err)?;
    Ok(())
}

/// The row with the largest build id strictly below `before`.
pub fn query_previous(
    conn: &Connection,
    pipeline: &str,
    before: i64,
) -> Result<Option<BuildResultRow>, StorageError> {
    let sql = format!(
        "SELECT {SELECT_COLUMNS} FROM build_results
         WHERE pipeline = ?1 AND build_id < ?2 ORDER BY build_id DESC LIMIT 1"
    );
    let mut stmt = conn.prepare_cached(&sql).map_err(sqlite_err)?;
    stmt.query_row(params![pipeline, before], map_row)
        .optional()
        .map_err(sqlite_err)
}

pub fn query_by_build(
    conn: &Connection,
    pipeline: &str,
    build_id: i64,
) -> Result<Option<BuildResultRow>, StorageError> {
    let sql = format!(
        "SELECT {SELECT_COLUMNS} FROM build_results WHERE pipeline = ?1 AND build_id = ?2"
    );
    let mut stmt = conn.prepare_cached(&sql).map_err(sqlite_err)?;
    stmt.query_row(params![pipeline, build_id], map_row)
        .optional()
        .map_err(sqlite_err)
}

/// The most recent analyzed row of a pipeline.
pub fn query_latest_analyzed(
    conn: &Connection,
    pipeline: &str,
) -> Result<Option<BuildResultRow>, StorageError> {
    let sql = format!(
        "SELECT {SELECT_COLUMNS} FROM build_results
         WHERE pipeline = ?1 AND has_analysis = 1 ORDER BY build_id DESC LIMIT 1"
    );
    let mut stmt = conn.prepare_cached(&sql).map_err(sqlite_err)?;
    stmt.query_row(params![pipeline], map_row)
        .optional()
        .map_err(sqlite_err)
}

/// Count rows of a pipeline, gaps included.
pub fn count(conn: &Connection, pipeline: &str) -> Result<i64, StorageError> {
    conn.query_row(
        "SELECT COUNT(*) FROM build_results WHERE pipeline = ?1",
        params![pipeline],
        |row| row.get(0),
    )
    .map_err(sqlite_err)
}
