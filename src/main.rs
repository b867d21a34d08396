mod config;
mod db;
mod export;
mod logging;
mod models;
mod run;
mod store;
mod ui;

use anyhow::Result;
use clap::Parser;

use config::RemoteConfig;
use run::{Cli, Command};
use store::{RestStore, Store};

const DB_FILE: &str = "planner.db";

fn main() -> Result<()> {
    let cli = Cli::parse();
    let data_dir = config::data_dir()?;
    logging::init(&data_dir)?;

    let store = open_store(&cli, &data_dir)?;
    tracing::info!(location = %store.location(), "store ready");

    let command = cli.command.unwrap_or(Command::Tui { month: None });
    run::as_cli(command, store.as_ref())
}

fn open_store(cli: &Cli, data_dir: &std::path::Path) -> Result<Box<dyn Store>> {
    if cli.use_local() {
        let path = cli.db.clone().unwrap_or_else(|| data_dir.join(DB_FILE));
        return Ok(Box::new(db::Database::open(&path)?));
    }

    let remote = RemoteConfig::from_env();
    if !remote.is_configured() {
        tracing::warn!("remote store URL or key missing; requests will fail");
    }
    Ok(Box::new(RestStore::new(remote.url, remote.api_key)?))
}
