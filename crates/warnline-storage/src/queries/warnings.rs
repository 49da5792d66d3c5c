//! Queries for the warnings table.

use rusqlite::{params, Connection};
use warnline_core::errors::StorageError;
use warnline_core::model::{AnnotationSet, Severity, Warning};

fn sqlite_err(e: rusqlite::Error) -> StorageError {
    StorageError::SqliteError {
        message: e.to_string(),
    }
}

/// Insert all warnings of one build, preserving their order.
pub fn insert_warnings(
    conn: &Connection,
    pipeline: &str,
    build_id: i64,
    annotations: &AnnotationSet,
) -> Result<(), StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "INSERT INTO warnings (pipeline, build_id, seq, file, start_line, end_line, message,
                category, module, severity, fingerprint)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        )
        .map_err(sqlite_err)?;
    for (seq, w) in annotations.iter().enumerate() {
        // Stored as the same 64 bits, reinterpreted as signed.
        let fingerprint = w.key().map(|k| k.fingerprint() as i64);
        stmt.execute(params![
            pipeline,
            build_id,
            seq as i64,
            w.file,
            w.start_line,
            w.end_line,
            w.message,
            w.category,
            w.module,
            w.severity.as_str(),
            fingerprint,
        ])
        .map_err(sqlite_err)?;
    }
    Ok(())
}

/// Warnings of one build in their original order.
pub fn query_warnings(
    conn: &Connection,
    pipeline: &str,
    build_id: i64,
) -> Result<AnnotationSet, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT file, start_line, end_line, message, category, module, severity
             FROM warnings WHERE pipeline = ?1 AND build_id = ?2 ORDER BY seq",
        )
        .map_err(sqlite_err)?;

    let rows = stmt
        .query_map(params![pipeline, build_id], |row| {
            Ok((
                Warning {
                    file: row.get(0)?,
                    start_line: row.get(1)?,
                    end_line: row.get(2)?,
                    message: row.get(3)?,
                    category: row.get(4)?,
                    module: row.get(5)?,
                    severity: Severity::Normal,
                },
                row.get::<_, String>(6)?,
            ))
        })
        .map_err(sqlite_err)?;

    let mut warnings = Vec::new();
    for row in rows {
        let (mut warning, severity) = row.map_err(sqlite_err)?;
        warning.severity = parse_severity(&severity)?;
        warnings.push(warning);
    }
    Ok(AnnotationSet::new(warnings))
}

/// Number of stored warnings carrying `fingerprint`, across all builds of a
/// pipeline.
pub fn count_by_fingerprint(
    conn: &Connection,
    pipeline: &str,
    fingerprint: u64,
) -> Result<i64, StorageError> {
    conn.query_row(
        "SELECT COUNT(*) FROM warnings WHERE pipeline = ?1 AND fingerprint = ?2",
        params![pipeline, fingerprint as i64],
        |row| row.get(0),
    )
    .map_err(sqlite_err)
}

fn parse_severity(s: &str) -> Result<Severity, StorageError> {
    Severity::parse(s).ok_or_else(|| StorageError::Serialization {
        what: "severity".to_string(),
        message: format!("unknown severity '{s}'"),
    })
}
