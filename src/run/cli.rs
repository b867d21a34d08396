use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::export;
use crate::models::{aggregate, parse_budget, Month, NewFinanceItem};
use crate::store::{Flag, Store};
use crate::ui::util::format_amount;

/// Yearly goals, monthly budget and savings plans in the terminal.
#[derive(Debug, Parser)]
#[command(name = "planner", author, version, about, long_about = None)]
pub(crate) struct Cli {
    /// Use the local SQLite database instead of the remote store
    #[arg(long, global = true)]
    pub(crate) local: bool,

    /// Path of the local database (implies --local)
    #[arg(long, value_name = "PATH", global = true)]
    pub(crate) db: Option<PathBuf>,

    #[command(subcommand)]
    pub(crate) command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Launch the interactive dashboard (default)
    Tui {
        /// Month to open on (1-12 or a name)
        #[arg(long, value_parser = parse_month)]
        month: Option<Month>,
    },
    /// Print a month's items with budget and actual totals
    Summary {
        #[arg(long, value_parser = parse_month)]
        month: Option<Month>,
    },
    /// List yearly goals
    Goals,
    /// List savings plans with progress
    Savings,
    /// Add a finance item to a month
    Add {
        #[arg(value_name = "TITLE")]
        title: String,
        /// Planned amount; text without a leading number counts as 0
        #[arg(value_name = "BUDGET", allow_hyphen_values = true)]
        budget: Option<String>,
        #[arg(long, value_parser = parse_month)]
        month: Option<Month>,
    },
    /// Flip a goal between completed and open
    ToggleGoal {
        #[arg(value_name = "ID")]
        id: i64,
    },
    /// Flip a finance item's checked flag
    ToggleItem {
        #[arg(value_name = "ID")]
        id: i64,
        #[arg(long, value_parser = parse_month)]
        month: Option<Month>,
    },
    /// Write a month's items to CSV
    Export {
        #[arg(value_name = "PATH")]
        path: Option<String>,
        #[arg(long, value_parser = parse_month)]
        month: Option<Month>,
    },
}

impl Cli {
    pub(crate) fn use_local(&self) -> bool {
        self.local || self.db.is_some()
    }
}

fn parse_month(s: &str) -> Result<Month, String> {
    Month::parse(s).ok_or_else(|| format!("invalid month '{s}': use 1-12 or a month name"))
}

pub(crate) fn as_cli(command: Command, store: &dyn Store) -> Result<()> {
    let stdout = std::io::stdout();
    run_command(command, store, &mut stdout.lock())
}

fn run_command(command: Command, store: &dyn Store, out: &mut dyn Write) -> Result<()> {
    let or_current = |m: Option<Month>| m.unwrap_or_else(Month::current);
    match command {
        Command::Tui { month } => super::tui::as_tui(store, or_current(month)),
        Command::Summary { month } => cli_summary(store, or_current(month), out),
        Command::Goals => cli_goals(store, out),
        Command::Savings => cli_savings(store, out),
        Command::Add {
            title,
            budget,
            month,
        } => cli_add(store, or_current(month), &title, budget.as_deref(), out),
        Command::ToggleGoal { id } => cli_toggle_goal(store, id, out),
        Command::ToggleItem { id, month } => cli_toggle_item(store, id, or_current(month), out),
        Command::Export { path, month } => {
            let month = or_current(month);
            let path = path
                .map(|p| export::expand_home(&p))
                .unwrap_or_else(|| export::default_path(month));
            cli_export(store, month, &path, out)
        }
    }
}

fn cli_summary(store: &dyn Store, month: Month, out: &mut dyn Write) -> Result<()> {
    let items = store
        .finance_items(month)
        .with_context(|| format!("Failed to load items for {}", month.name()))?;
    let totals = aggregate(&items);

    writeln!(out, "Planner — {}", month.name())?;
    writeln!(out, "{}", "─".repeat(60))?;
    if items.is_empty() {
        writeln!(out, "  No items planned")?;
    }
    for item in &items {
        writeln!(
            out,
            "  {:<4} {} {:<28} {:>12} {:>12}",
            item.id,
            if item.is_checked { "[x]" } else { "[ ]" },
            item.title,
            format_amount(item.budget_or_zero()),
            format_amount(item.actual_or_zero()),
        )?;
    }
    writeln!(out, "{}", "─".repeat(60))?;
    writeln!(out, "  Budget total: {}", format_amount(totals.budget))?;
    writeln!(out, "  Actual total: {}", format_amount(totals.actual))?;
    writeln!(out, "  Remaining:    {}", format_amount(totals.remaining()))?;
    Ok(())
}

fn cli_goals(store: &dyn Store, out: &mut dyn Write) -> Result<()> {
    let goals = store.goals().context("Failed to load goals")?;
    if goals.is_empty() {
        writeln!(out, "No goals")?;
        return Ok(());
    }
    for goal in &goals {
        writeln!(out, "{:<4} {} {}", goal.id, goal.marker(), goal.goal_name)?;
    }
    Ok(())
}

fn cli_savings(store: &dyn Store, out: &mut dyn Write) -> Result<()> {
    let plans = store.savings_plans().context("Failed to load savings plans")?;
    if plans.is_empty() {
        writeln!(out, "No savings plans")?;
        return Ok(());
    }

    writeln!(out, "{:<4} {:<24} {:>14} {:>14} {:>6}", "ID", "Plan", "Saved", "Target", "Done")?;
    writeln!(out, "{}", "─".repeat(66))?;
    for plan in &plans {
        writeln!(
            out,
            "{:<4} {:<24} {:>14} {:>14} {:>5}%",
            plan.id,
            plan.target_name,
            format_amount(plan.current_or_zero()),
            format_amount(plan.target_or_zero()),
            plan.progress_percent().round(),
        )?;
    }
    Ok(())
}

fn cli_add(
    store: &dyn Store,
    month: Month,
    title: &str,
    budget: Option<&str>,
    out: &mut dyn Write,
) -> Result<()> {
    let title = title.trim();
    if title.is_empty() {
        writeln!(out, "Nothing added: title is empty")?;
        return Ok(());
    }

    let item = NewFinanceItem::new(month, title.to_string(), parse_budget(budget.unwrap_or("")));
    store
        .insert_finance_item(&item)
        .with_context(|| format!("Failed to add '{title}'"))?;
    writeln!(
        out,
        "Added {title} ({}) to {}",
        format_amount(item.budget),
        month.name()
    )?;
    Ok(())
}

fn cli_toggle_goal(store: &dyn Store, id: i64, out: &mut dyn Write) -> Result<()> {
    let goal = store
        .goals()
        .context("Failed to load goals")?
        .into_iter()
        .find(|g| g.id == id)
        .ok_or_else(|| anyhow::anyhow!("No goal with id {id}"))?;

    let completed = !goal.is_completed;
    store.set_flag(Flag::GoalCompleted, id, completed)?;
    writeln!(
        out,
        "{} {}",
        if completed { "✔" } else { "○" },
        goal.goal_name
    )?;
    Ok(())
}

fn cli_toggle_item(store: &dyn Store, id: i64, month: Month, out: &mut dyn Write) -> Result<()> {
    let item = store
        .finance_items(month)
        .with_context(|| format!("Failed to load items for {}", month.name()))?
        .into_iter()
        .find(|i| i.id == id)
        .ok_or_else(|| anyhow::anyhow!("No item with id {id} in {}", month.name()))?;

    let checked = !item.is_checked;
    store.set_flag(Flag::ItemChecked, id, checked)?;
    writeln!(
        out,
        "{} {}",
        if checked { "[x]" } else { "[ ]" },
        item.title
    )?;
    Ok(())
}

fn cli_export(store: &dyn Store, month: Month, path: &Path, out: &mut dyn Write) -> Result<()> {
    let items = store
        .finance_items(month)
        .with_context(|| format!("Failed to load items for {}", month.name()))?;
    if items.is_empty() {
        writeln!(out, "No items for {}", month.name())?;
        return Ok(());
    }
    let count = export::export_to_csv(&items, path)?;
    writeln!(out, "Exported {count} items to {}", path.display())?;
    Ok(())
}
