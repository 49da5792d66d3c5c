//! V002: identity fingerprints on warnings.
//! NULL for warnings without an identity key.

pub const MIGRATION_SQL: &str = r#"
ALTER TABLE warnings ADD COLUMN fingerprint INTEGER;

CREATE INDEX IF NOT EXISTS idx_warnings_fingerprint
    ON warnings(pipeline, fingerprint) WHERE fingerprint IS NOT NULL;
"#;
