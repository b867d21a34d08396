use anyhow::{Context, Result};
use std::path::PathBuf;

/// Checked in order; the `NEXT_PUBLIC_` names are what hosted web deployments
/// of the same project already export.
const URL_VARS: &[&str] = &["SUPABASE_URL", "NEXT_PUBLIC_SUPABASE_URL"];
const KEY_VARS: &[&str] = &["SUPABASE_ANON_KEY", "NEXT_PUBLIC_SUPABASE_ANON_KEY"];

/// Connection settings for the remote store. Missing values are left empty:
/// the client is still built and fails on first use.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct RemoteConfig {
    pub(crate) url: String,
    pub(crate) api_key: String,
}

impl RemoteConfig {
    pub(crate) fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let first = |names: &[&str]| {
            names
                .iter()
                .filter_map(|name| lookup(*name))
                .map(|v| v.trim().to_string())
                .find(|v| !v.is_empty())
                .unwrap_or_default()
        };
        Self {
            url: first(URL_VARS),
            api_key: first(KEY_VARS),
        }
    }

    pub(crate) fn is_configured(&self) -> bool {
        !self.url.is_empty() && !self.api_key.is_empty()
    }
}

/// Per-user data directory holding the local database and the log file.
pub(crate) fn data_dir() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "planner", "Planner")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    Ok(data_dir.to_path_buf())
}
