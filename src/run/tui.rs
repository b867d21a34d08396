use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

use crate::models::Month;
use crate::store::Store;
use crate::ui::app::{App, InputMode, Tab};
use crate::ui::commands;
use crate::ui::render::CHROME_ROWS;
use crate::ui::screens::finance;
use crate::ui::util::{scroll_down, scroll_to_bottom, scroll_to_top, scroll_up};

pub(crate) fn as_tui(store: &dyn Store, month: Month) -> Result<()> {
    let mut app = App::new(month, store.location());
    app.reload(store);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, store);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        tracing::error!("dashboard exited with error: {e:#}");
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    store: &dyn Store,
) -> Result<()> {
    while app.running {
        terminal.draw(|f| {
            let body = f
                .area()
                .height
                .saturating_sub(CHROME_ROWS + finance::FIXED_ROWS);
            app.visible_rows = (body as usize).max(1);
            crate::ui::render::render(f, app);
        })?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                handle_key(key, app, store)?;
            }
        }
    }
    Ok(())
}

pub(crate) fn handle_key(key: KeyEvent, app: &mut App, store: &dyn Store) -> Result<()> {
    if app.show_help {
        app.show_help = false;
        return Ok(());
    }
    match app.input_mode {
        InputMode::Normal => handle_normal_input(key, app, store),
        InputMode::Command => handle_command_input(key, app, store),
        InputMode::Form => {
            handle_form_input(key, app, store);
            Ok(())
        }
    }
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(key: KeyEvent, app: &mut App, store: &dyn Store) -> Result<()> {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('c')
            if key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            app.running = false;
        }
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('j') | KeyCode::Down => handle_move_down(app),
        KeyCode::Char('k') | KeyCode::Up => handle_move_up(app),
        KeyCode::Char('g') => handle_goto_top(app),
        KeyCode::Char('G') => handle_goto_bottom(app),
        KeyCode::Char('1') => app.select_tab(store, Tab::Goals),
        KeyCode::Char('2') => app.select_tab(store, Tab::Finance),
        KeyCode::Char('3') => app.select_tab(store, Tab::Savings),
        KeyCode::Tab => app.select_tab(store, app.tab.next()),
        KeyCode::BackTab => app.select_tab(store, app.tab.prev()),
        KeyCode::Char('H') | KeyCode::Char('[') => {
            commands::handle_command("prev-month", app, store)?;
        }
        KeyCode::Char('L') | KeyCode::Char(']') => {
            commands::handle_command("next-month", app, store)?;
        }
        KeyCode::Char(' ') | KeyCode::Enter => app.toggle_selected(store),
        KeyCode::Char('a') => {
            commands::handle_command("add", app, store)?;
        }
        KeyCode::Char('r') => {
            commands::handle_command("reload", app, store)?;
        }
        KeyCode::Char('?') => app.show_help = true,
        KeyCode::Esc => app.status_message.clear(),
        _ => {}
    }
    Ok(())
}

fn handle_command_input(key: KeyEvent, app: &mut App, store: &dyn Store) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let input = std::mem::take(&mut app.command_input);
            app.input_mode = InputMode::Normal;
            if let Err(e) = commands::handle_command(&input, app, store) {
                tracing::warn!(command = %input, "command failed: {e:#}");
                app.set_status(format!("Error: {e}"));
            }
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
        }
        KeyCode::Backspace => {
            if app.command_input.pop().is_none() {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.command_input.clear();
        }
        KeyCode::Char(c) => app.command_input.push(c),
        _ => {}
    }
    Ok(())
}

fn handle_form_input(key: KeyEvent, app: &mut App, store: &dyn Store) {
    match key.code {
        KeyCode::Enter => app.submit_form(store),
        KeyCode::Esc => app.cancel_form(),
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            app.form.switch_focus();
        }
        KeyCode::Backspace => app.form.backspace(),
        KeyCode::Char(c) => app.form.push(c),
        _ => {}
    }
}

// ── Cursor movement ──────────────────────────────────────────

fn handle_move_down(app: &mut App) {
    match app.tab {
        Tab::Goals => step(&mut app.goal_index, app.goals.len()),
        Tab::Finance => scroll_down(
            &mut app.item_index,
            &mut app.item_scroll,
            app.finance_items.len(),
            app.visible_rows,
        ),
        Tab::Savings => step(&mut app.plan_index, app.savings.len()),
    }
}

fn handle_move_up(app: &mut App) {
    match app.tab {
        Tab::Goals => app.goal_index = app.goal_index.saturating_sub(1),
        Tab::Finance => scroll_up(&mut app.item_index, &mut app.item_scroll),
        Tab::Savings => app.plan_index = app.plan_index.saturating_sub(1),
    }
}

fn handle_goto_top(app: &mut App) {
    match app.tab {
        Tab::Goals => app.goal_index = 0,
        Tab::Finance => scroll_to_top(&mut app.item_index, &mut app.item_scroll),
        Tab::Savings => app.plan_index = 0,
    }
}

fn handle_goto_bottom(app: &mut App) {
    match app.tab {
        Tab::Goals => app.goal_index = app.goals.len().saturating_sub(1),
        Tab::Finance => scroll_to_bottom(
            &mut app.item_index,
            &mut app.item_scroll,
            app.finance_items.len(),
            app.visible_rows,
        ),
        Tab::Savings => app.plan_index = app.savings.len().saturating_sub(1),
    }
}

fn step(index: &mut usize, len: usize) {
    if *index + 1 < len {
        *index += 1;
    }
}
