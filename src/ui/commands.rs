use std::collections::HashMap;
use std::sync::LazyLock;

use super::app::{App, Tab};
use crate::export;
use crate::models::Month;
use crate::store::Store;

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &dyn Store) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit Planner", cmd_quit, r);
    register_command!("quit", "Quit Planner", cmd_quit, r);
    register_command!("g", "Go to Goals", cmd_goals, r);
    register_command!("goals", "Go to Goals", cmd_goals, r);
    register_command!("f", "Go to Finance", cmd_finance, r);
    register_command!("finance", "Go to Finance", cmd_finance, r);
    register_command!("s", "Go to Savings", cmd_savings, r);
    register_command!("savings", "Go to Savings", cmd_savings, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!("month", "Set month (e.g. :month 7 or :month july)", cmd_month, r);
    register_command!("m", "Set month (e.g. :m 7)", cmd_month, r);
    register_command!("next-month", "Go to next month", cmd_next_month, r);
    register_command!("prev-month", "Go to previous month", cmd_prev_month, r);
    register_command!(
        "add",
        "Add a finance item (e.g. :add Rent opens the form with a title)",
        cmd_add,
        r
    );
    register_command!("a", "Add a finance item", cmd_add, r);
    register_command!("reload", "Reload everything from the store", cmd_reload, r);
    register_command!("r", "Reload everything from the store", cmd_reload, r);
    register_command!(
        "export",
        "Export this month's items to CSV (e.g. :export ~/july.csv)",
        cmd_export,
        r
    );

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App, store: &dyn Store) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if cmd_name.is_empty() {
        return Ok(());
    }

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app, store)?;
    } else {
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| levenshtein(input, k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _store: &dyn Store) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_goals(_args: &str, app: &mut App, store: &dyn Store) -> anyhow::Result<()> {
    app.select_tab(store, Tab::Goals);
    Ok(())
}

fn cmd_finance(_args: &str, app: &mut App, store: &dyn Store) -> anyhow::Result<()> {
    app.select_tab(store, Tab::Finance);
    Ok(())
}

fn cmd_savings(_args: &str, app: &mut App, store: &dyn Store) -> anyhow::Result<()> {
    app.select_tab(store, Tab::Savings);
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App, _store: &dyn Store) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_month(args: &str, app: &mut App, store: &dyn Store) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status(format!("Month: {}. Usage: :month <1-12 | name>", app.month));
        return Ok(());
    }

    match Month::parse(args) {
        Some(month) => {
            app.select_month(store, month);
            app.set_status(format!("Month: {month}"));
        }
        None => app.set_status(format!("Invalid month: {args}. Use 1-12 or a month name")),
    }
    Ok(())
}

fn cmd_next_month(_args: &str, app: &mut App, store: &dyn Store) -> anyhow::Result<()> {
    let month = app.month.next();
    app.select_month(store, month);
    app.set_status(format!("Month: {month}"));
    Ok(())
}

fn cmd_prev_month(_args: &str, app: &mut App, store: &dyn Store) -> anyhow::Result<()> {
    let month = app.month.prev();
    app.select_month(store, month);
    app.set_status(format!("Month: {month}"));
    Ok(())
}

fn cmd_add(args: &str, app: &mut App, store: &dyn Store) -> anyhow::Result<()> {
    app.select_tab(store, Tab::Finance);
    app.open_form(args);
    Ok(())
}

fn cmd_reload(_args: &str, app: &mut App, store: &dyn Store) -> anyhow::Result<()> {
    app.reload(store);
    app.set_status("Reloaded");
    Ok(())
}

fn cmd_export(args: &str, app: &mut App, _store: &dyn Store) -> anyhow::Result<()> {
    let path = if args.is_empty() {
        export::default_path(app.month)
    } else {
        export::expand_home(args)
    };

    if app.finance_items.is_empty() {
        app.set_status("No items to export");
        return Ok(());
    }

    let count = export::export_to_csv(&app.finance_items, &path)?;
    app.set_status(format!("Exported {count} items to {}", path.display()));
    Ok(())
}
