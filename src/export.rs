use anyhow::{Context, Result};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::models::{FinanceItem, Month};

const HEADER: [&str; 6] = ["id", "month", "title", "budget", "actual", "checked"];

/// Write finance items as CSV. Returns the number of data rows written.
pub(crate) fn write_csv<W: Write>(items: &[FinanceItem], out: W) -> Result<usize> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(HEADER)?;
    for item in items {
        writer.write_record([
            item.id.to_string(),
            item.month.number().to_string(),
            item.title.clone(),
            item.budget.map(|d| d.to_string()).unwrap_or_default(),
            item.actual.map(|d| d.to_string()).unwrap_or_default(),
            item.is_checked.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(items.len())
}

pub(crate) fn export_to_csv(items: &[FinanceItem], path: &Path) -> Result<usize> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create export file: {}", path.display()))?;
    write_csv(items, file)
}

/// `~/planner-07.csv` for July, falling back to the working directory.
pub(crate) fn default_path(month: Month) -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
    PathBuf::from(home).join(format!("planner-{:02}.csv", month.number()))
}

/// Expand a leading `~/` to the home directory.
pub(crate) fn expand_home(path: &str) -> PathBuf {
    match path.strip_prefix("~/") {
        Some(rest) => {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(rest)
        }
        None => PathBuf::from(path),
    }
}
