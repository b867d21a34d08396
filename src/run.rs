mod cli;
mod tui;

pub(crate) use cli::{as_cli, Cli, Command};
