use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table},
    Frame,
};
use rust_decimal::Decimal;

use crate::models::Month;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, format_optional, truncate};

/// Rows of this screen not available to table body rows: selector, cards,
/// table borders and header.
pub(crate) const FIXED_ROWS: u16 = 9;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Month selector
            Constraint::Min(5),    // Items
            Constraint::Length(5), // Total cards
        ])
        .split(area);

    render_month_selector(f, chunks[0], app.month);
    render_items(f, chunks[1], app);
    render_totals(f, chunks[2], app);
}

fn render_month_selector(f: &mut Frame, area: Rect, selected: Month) {
    let mut spans = vec![Span::styled(" H ◀ ", theme::dim_style())];
    for month in Month::all() {
        let label = format!(" {} ", &month.name()[..3]);
        if month == selected {
            spans.push(Span::styled(
                label,
                Style::default()
                    .fg(theme::HEADER_BG)
                    .bg(theme::ACCENT)
                    .add_modifier(Modifier::BOLD),
            ));
        } else {
            spans.push(Span::styled(label, theme::dim_style()));
        }
    }
    spans.push(Span::styled(" ▶ L", theme::dim_style()));
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_items(f: &mut Frame, area: Rect, app: &App) {
    let title = format!("{} ({})", app.month.name(), app.finance_items.len());

    if app.finance_items.is_empty() {
        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("No items planned for {}", app.month.name()),
                theme::dim_style(),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Press a to add one, or :add <title>",
                theme::dim_style(),
            )),
        ])
        .centered()
        .block(theme::panel(title));
        f.render_widget(msg, area);
        return;
    }

    let header = Row::new(
        ["", "Item", "Budget", "Actual"]
            .iter()
            .map(|h| Cell::from(*h).style(theme::header_style())),
    )
    .height(1);

    let rows: Vec<Row> = app
        .finance_items
        .iter()
        .enumerate()
        .skip(app.item_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, item)| {
            let style = if i == app.item_index {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            let check = if item.is_checked {
                Span::styled(" [x]", theme::done_style())
            } else {
                Span::styled(" [ ]", theme::dim_style())
            };

            let actual_style = match (item.actual, item.budget) {
                (Some(actual), Some(budget)) if actual > budget => theme::over_style(),
                _ => Style::default(),
            };

            Row::new(vec![
                Cell::from(check),
                Cell::from(truncate(&item.title, 40)),
                Cell::from(format_optional(item.budget)),
                Cell::from(Span::styled(format_optional(item.actual), actual_style)),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(5),
        Constraint::Min(20),
        Constraint::Length(16),
        Constraint::Length(16),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(theme::panel(title));
    f.render_widget(table, area);
}

fn render_totals(f: &mut Frame, area: Rect, app: &App) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let totals = app.totals();
    let remaining = totals.remaining();
    let remaining_note = if remaining < Decimal::ZERO {
        format!("{} over", format_amount(remaining.abs()))
    } else {
        format!("{} left", format_amount(remaining))
    };

    render_card(f, cards[0], "Budget Total", totals.budget, theme::ACCENT, None);
    render_card(
        f,
        cards[1],
        "Actual Total",
        totals.actual,
        if remaining < Decimal::ZERO {
            theme::RED
        } else {
            theme::GREEN
        },
        Some(remaining_note),
    );
}

fn render_card(
    f: &mut Frame,
    area: Rect,
    title: &str,
    amount: Decimal,
    color: Color,
    subtitle: Option<String>,
) {
    let text = Paragraph::new(vec![
        Line::from(Span::styled(
            format_amount(amount),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(subtitle.unwrap_or_default(), theme::dim_style())),
    ])
    .centered()
    .block(theme::panel(title));

    f.render_widget(text, area);
}
