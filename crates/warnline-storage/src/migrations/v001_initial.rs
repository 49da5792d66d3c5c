//! V001: Initial schema (build_results, warnings).

pub const MIGRATION_SQL: &str = r#"
-- One row per build and pipeline. Builds that ran without analysis data
-- are kept as gap rows (has_analysis = 0) so history walks can skip them.
CREATE TABLE IF NOT EXISTS build_results (
    pipeline TEXT NOT NULL,
    build_id INTEGER NOT NULL,
    has_analysis INTEGER NOT NULL DEFAULT 1,
    outcome TEXT,
    total_warnings INTEGER NOT NULL DEFAULT 0,
    new_count INTEGER NOT NULL DEFAULT 0,
    fixed_count INTEGER NOT NULL DEFAULT 0,
    reference_build INTEGER,
    ratchet_failed INTEGER NOT NULL DEFAULT 0,
    zero_warnings_since INTEGER,
    recorded_at INTEGER NOT NULL,
    PRIMARY KEY (pipeline, build_id)
) STRICT;

-- Warnings of analyzed builds, in parser order (seq).
CREATE TABLE IF NOT EXISTS warnings (
    pipeline TEXT NOT NULL,
    build_id INTEGER NOT NULL,
    seq INTEGER NOT NULL,
    file TEXT NOT NULL,
    start_line INTEGER NOT NULL,
    end_line INTEGER NOT NULL,
    message TEXT NOT NULL,
    category TEXT NOT NULL DEFAULT '',
    module TEXT NOT NULL DEFAULT '',
    severity TEXT NOT NULL,
    PRIMARY KEY (pipeline, build_id, seq),
    FOREIGN KEY (pipeline, build_id)
        REFERENCES build_results(pipeline, build_id) ON DELETE CASCADE
) STRICT;
"#;
