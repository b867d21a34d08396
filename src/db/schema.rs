pub(crate) const SCHEMA_V1: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS yearly_goals (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    goal_name    TEXT NOT NULL DEFAULT '',
    is_completed BOOLEAN NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS monthly_finance (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    month      INTEGER NOT NULL CHECK (month BETWEEN 1 AND 12),
    title      TEXT NOT NULL DEFAULT '',
    budget     TEXT,
    actual     TEXT,
    is_checked BOOLEAN NOT NULL DEFAULT 0
);

CREATE INDEX IF NOT EXISTS idx_monthly_finance_month ON monthly_finance(month);

CREATE TABLE IF NOT EXISTS savings_plan (
    id             INTEGER PRIMARY KEY AUTOINCREMENT,
    target_name    TEXT NOT NULL DEFAULT '',
    current_amount TEXT,
    target_amount  TEXT
);
"#;

pub(crate) const CURRENT_VERSION: i32 = 1;

/// Migrations from version N to N+1.
/// Each entry is (from_version, sql).
pub(crate) const MIGRATIONS: &[(i32, &str)] = &[];
