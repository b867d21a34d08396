mod schema;

use anyhow::{Context, Result};
use rusqlite::{params, Connection, Row};
use rust_decimal::Decimal;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::models::*;
use crate::store::{Flag, Store};

/// Local SQLite copy of the three planner tables.
pub(crate) struct Database {
    conn: Connection,
    path: Option<PathBuf>,
}

impl Database {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .context("Failed to set database pragmas")?;
        let mut db = Self {
            conn,
            path: Some(path.to_path_buf()),
        };
        db.migrate().context("Database migration failed")?;
        Ok(db)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let mut db = Self { conn, path: None };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&mut self) -> Result<()> {
        let has_version_table: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        if !has_version_table {
            self.conn.execute_batch(schema::SCHEMA_V1)?;
            self.conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
            tracing::info!(version = schema::CURRENT_VERSION, "created local schema");
            return Ok(());
        }

        let current: i32 = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .unwrap_or(0);

        for &(from_version, sql) in schema::MIGRATIONS {
            if current <= from_version {
                self.conn.execute_batch(sql)?;
            }
        }

        if current < schema::CURRENT_VERSION {
            self.conn.execute(
                "UPDATE schema_version SET version = ?1",
                params![schema::CURRENT_VERSION],
            )?;
        }

        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn schema_version(&self) -> Result<i32> {
        Ok(self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })?)
    }

    // ── Rows created outside the dashboard ───────────────────

    #[cfg(test)]
    pub(crate) fn insert_goal(&self, name: &str, completed: bool) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO yearly_goals (goal_name, is_completed) VALUES (?1, ?2)",
            params![name, completed],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    #[cfg(test)]
    pub(crate) fn insert_savings_plan(
        &self,
        name: &str,
        current: Option<Decimal>,
        target: Option<Decimal>,
    ) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO savings_plan (target_name, current_amount, target_amount) VALUES (?1, ?2, ?3)",
            params![
                name,
                current.map(|d| d.to_string()),
                target.map(|d| d.to_string())
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }
}

fn amount(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<Decimal>> {
    let text: Option<String> = row.get(idx)?;
    Ok(text.and_then(|s| Decimal::from_str(&s).ok()))
}

fn month(row: &Row<'_>, idx: usize) -> rusqlite::Result<Month> {
    let number: u8 = row.get(idx)?;
    Month::new(number).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            rusqlite::types::Type::Integer,
            format!("month out of range: {number}").into(),
        )
    })
}

impl Store for Database {
    fn location(&self) -> String {
        match &self.path {
            Some(path) => path.display().to_string(),
            None => ":memory:".into(),
        }
    }

    fn goals(&self) -> Result<Vec<Goal>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, goal_name, is_completed FROM yearly_goals ORDER BY id")?;
        let rows = stmt.query_map([], |row| {
            Ok(Goal {
                id: row.get(0)?,
                goal_name: row.get(1)?,
                is_completed: row.get(2)?,
            })
        })?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    fn finance_items(&self, m: Month) -> Result<Vec<FinanceItem>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, month, title, budget, actual, is_checked
             FROM monthly_finance WHERE month = ?1 ORDER BY id",
        )?;
        let rows = stmt.query_map(params![m.number()], |row| {
            Ok(FinanceItem {
                id: row.get(0)?,
                month: month(row, 1)?,
                title: row.get(2)?,
                budget: amount(row, 3)?,
                actual: amount(row, 4)?,
                is_checked: row.get(5)?,
            })
        })?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    fn savings_plans(&self) -> Result<Vec<SavingsPlan>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, target_name, current_amount, target_amount FROM savings_plan ORDER BY id",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(SavingsPlan {
                id: row.get(0)?,
                target_name: row.get(1)?,
                current_amount: amount(row, 2)?,
                target_amount: amount(row, 3)?,
            })
        })?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    fn set_flag(&self, flag: Flag, id: i64, value: bool) -> Result<()> {
        // Table and column names come from a closed enum, never from input.
        let sql = format!(
            "UPDATE {} SET {} = ?1 WHERE id = ?2",
            flag.table().name(),
            flag.column()
        );
        self.conn.execute(&sql, params![value, id])?;
        Ok(())
    }

    fn insert_finance_item(&self, item: &NewFinanceItem) -> Result<()> {
        self.conn.execute(
            "INSERT INTO monthly_finance (month, title, budget, actual, is_checked)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                item.month.number(),
                item.title,
                item.budget.to_string(),
                item.actual.to_string(),
                item.is_checked,
            ],
        )?;
        Ok(())
    }
}
