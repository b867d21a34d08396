use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs},
    Frame,
};

use super::app::{App, FormField, InputMode, Tab};
use super::commands;
use super::theme;

/// Rows taken by everything except the active screen's list body.
pub(crate) const CHROME_ROWS: u16 = 4;

pub(crate) fn render(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Tab bar
            Constraint::Min(5),    // Main content
            Constraint::Length(1), // Sync footer
            Constraint::Length(1), // Status bar
            Constraint::Length(1), // Command bar
        ])
        .split(f.area());

    render_tab_bar(f, chunks[0], app);
    render_screen(f, chunks[1], app);
    render_footer(f, chunks[2], app);
    render_status_bar(f, chunks[3], app);
    render_command_bar(f, chunks[4], app);

    if app.input_mode == InputMode::Form {
        render_form(f, f.area(), app);
    }
    if app.show_help {
        render_help_overlay(f, f.area());
    }
}

fn render_tab_bar(f: &mut Frame, area: Rect, app: &App) {
    let titles: Vec<Line> = Tab::all()
        .iter()
        .enumerate()
        .map(|(i, t)| {
            let num = format!("{}", i + 1);
            if *t == app.tab {
                Line::from(vec![
                    Span::styled(format!("{num}:"), Style::default().fg(theme::TEXT_DIM)),
                    Span::styled(
                        format!("{t}"),
                        Style::default()
                            .fg(theme::ACCENT)
                            .add_modifier(Modifier::BOLD),
                    ),
                ])
            } else {
                Line::from(Span::styled(
                    format!("{num}:{t}"),
                    Style::default().fg(theme::TEXT_DIM),
                ))
            }
        })
        .collect();

    let tabs = Tabs::new(titles)
        .divider(Span::styled(" | ", Style::default().fg(theme::OVERLAY)))
        .style(Style::default().bg(theme::HEADER_BG));

    f.render_widget(tabs, area);
}

fn render_screen(f: &mut Frame, area: Rect, app: &App) {
    match app.tab {
        Tab::Goals => super::screens::goals::render(f, area, app),
        Tab::Finance => super::screens::finance::render(f, area, app),
        Tab::Savings => super::screens::savings::render(f, area, app),
    }
}

fn render_footer(f: &mut Frame, area: Rect, app: &App) {
    let footer = Paragraph::new(Line::from(vec![
        Span::styled(" Synced with ", theme::dim_style()),
        Span::styled(&app.location, Style::default().fg(theme::ACCENT)),
    ]))
    .right_aligned();
    f.render_widget(footer, area);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let mode_label = format!(" {} ", app.input_mode);
    let mode_bg = match app.input_mode {
        InputMode::Normal => theme::ACCENT,
        InputMode::Command => theme::GREEN,
        InputMode::Form => theme::YELLOW,
    };
    let mode_style = Style::default()
        .fg(theme::HEADER_BG)
        .bg(mode_bg)
        .add_modifier(Modifier::BOLD);

    let info = format!(" {} | {} ", app.tab, app.month);

    let right = match app.input_mode {
        InputMode::Form => " Tab switch field | Enter add | Esc cancel ",
        _ => match app.tab {
            Tab::Goals => " Space toggle | r reload | ? help ",
            Tab::Finance => " H/L month | Space toggle | a add | ? help ",
            Tab::Savings => " r reload | ? help ",
        },
    };

    let available = area.width as usize;
    let used = mode_label.chars().count() + info.chars().count() + right.chars().count();
    let pad = available.saturating_sub(used);

    let bar = Paragraph::new(Line::from(vec![
        Span::styled(&mode_label, mode_style),
        Span::styled(&info, theme::status_bar_style()),
        Span::styled(" ".repeat(pad), theme::status_bar_style()),
        Span::styled(right, theme::status_bar_style()),
    ]));
    f.render_widget(bar, area);
}

fn render_command_bar(f: &mut Frame, area: Rect, app: &App) {
    let (content, cursor_offset) = match app.input_mode {
        InputMode::Command => (
            Line::from(vec![
                Span::styled(":", Style::default().fg(theme::ACCENT)),
                Span::styled(&app.command_input, theme::command_bar_style()),
            ]),
            Some(1 + app.command_input.chars().count() as u16),
        ),
        InputMode::Normal | InputMode::Form => (
            if app.status_message.is_empty() {
                Line::from(Span::styled(
                    " Press : for commands, ? for help",
                    theme::dim_style(),
                ))
            } else {
                Line::from(Span::styled(
                    &app.status_message,
                    theme::command_bar_style(),
                ))
            },
            None,
        ),
    };

    let bar = Paragraph::new(content).style(Style::default().bg(theme::COMMAND_BG));
    f.render_widget(bar, area);

    if let Some(offset) = cursor_offset {
        f.set_cursor_position((area.x + offset, area.y));
    }
}

fn render_form(f: &mut Frame, area: Rect, app: &App) {
    let popup_width = 56.min(area.width.saturating_sub(4));
    let popup_height = 8.min(area.height);
    let popup_area = centered(area, popup_width, popup_height);

    let field = |label: &str, value: &str, focused: bool| {
        let label_style = if focused {
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD)
        } else {
            theme::dim_style()
        };
        Line::from(vec![
            Span::styled(format!(" {label:<8}"), label_style),
            Span::styled(value.to_string(), theme::normal_style()),
        ])
    };

    let lines = vec![
        Line::from(""),
        field("Title", &app.form.title, app.form.focus == FormField::Title),
        field("Budget", &app.form.budget, app.form.focus == FormField::Budget),
        Line::from(""),
        Line::from(Span::styled(
            format!(" Adds to {}. Enter to save, Esc to cancel", app.month.name()),
            theme::dim_style(),
        )),
    ];

    f.render_widget(Clear, popup_area);
    let form = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::YELLOW))
            .title(Span::styled(" Add Item ", theme::section_style()))
            .style(Style::default().bg(theme::HEADER_BG)),
    );
    f.render_widget(form, popup_area);

    let (row, value) = match app.form.focus {
        FormField::Title => (2, &app.form.title),
        FormField::Budget => (3, &app.form.budget),
    };
    f.set_cursor_position((
        popup_area.x + 10 + value.chars().count() as u16,
        popup_area.y + row,
    ));
}

fn render_help_overlay(f: &mut Frame, area: Rect) {
    let key_line = |text: &'static str| Line::from(Span::styled(text, theme::normal_style()));

    let mut help_text = vec![
        Line::from(Span::styled(
            " Planner Help ",
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(" Navigation", theme::section_style())),
        key_line("  j/k or Up/Down   Move cursor           1-3        Switch tabs"),
        key_line("  Tab/Shift-Tab    Cycle tabs            g/G        Top/Bottom"),
        key_line("  H/L or [/]       Prev/Next month       Ctrl-q     Quit"),
        Line::from(""),
        Line::from(Span::styled(" Actions", theme::section_style())),
        key_line("  Space/Enter      Toggle goal or item   a          Add item"),
        key_line("  r                Reload                :          Command mode"),
        Line::from(""),
        Line::from(Span::styled(" Commands", theme::section_style())),
    ];

    let mut seen = std::collections::HashSet::new();
    let mut cmd_lines: Vec<(&str, &str)> = Vec::new();
    for (&name, cmd) in commands::COMMANDS.iter() {
        if name.len() <= 1 {
            continue;
        }
        if seen.insert(cmd.description) {
            cmd_lines.push((name, cmd.description));
        }
    }
    cmd_lines.sort_by_key(|(name, _)| *name);
    for (name, desc) in &cmd_lines {
        help_text.push(Line::from(Span::styled(
            format!("  :{name:<14} {desc}"),
            theme::normal_style(),
        )));
    }

    help_text.push(Line::from(""));
    help_text.push(Line::from(Span::styled(
        " Press any key to close ",
        theme::dim_style(),
    )));

    let popup_height = (help_text.len() as u16 + 2).min(area.height.saturating_sub(2));
    let popup_width = 76.min(area.width.saturating_sub(4));
    let popup_area = centered(area, popup_width, popup_height);

    f.render_widget(Clear, popup_area);
    let help = Paragraph::new(help_text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT))
            .style(Style::default().bg(theme::HEADER_BG)),
    );
    f.render_widget(help, popup_area);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}
