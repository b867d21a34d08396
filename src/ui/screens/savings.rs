use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
    Frame,
};
use rust_decimal::Decimal;

use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, progress_bar, truncate};

const BAR_WIDTH: usize = 24;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    if app.savings.is_empty() {
        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("No savings plans yet", theme::dim_style())),
        ])
        .centered()
        .block(theme::panel("Savings Plans"));
        f.render_widget(msg, area);
        return;
    }

    let height = area.height.saturating_sub(2) as usize;
    let offset = app.plan_index.saturating_sub(height.saturating_sub(1));

    let items: Vec<ListItem> = app
        .savings
        .iter()
        .enumerate()
        .skip(offset)
        .take(height)
        .map(|(i, plan)| {
            let percent = plan.progress_percent();
            let color = if percent >= Decimal::ONE_HUNDRED {
                theme::GREEN
            } else if percent >= Decimal::from(50) {
                theme::ACCENT
            } else {
                theme::YELLOW
            };

            let name_style = if i == app.plan_index {
                theme::selected_style()
            } else {
                theme::normal_style()
            };

            ListItem::new(Line::from(vec![
                Span::styled(format!("{:<20}", truncate(&plan.target_name, 19)), name_style),
                Span::styled(
                    format!(
                        "{:>14} / {:<14} ",
                        format_amount(plan.current_or_zero()),
                        format_amount(plan.target_or_zero())
                    ),
                    theme::dim_style(),
                ),
                Span::styled(
                    progress_bar(plan.progress_ratio(), BAR_WIDTH),
                    Style::default().fg(color),
                ),
                Span::styled(
                    format!(" {:>3}%", percent.round()),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
            ]))
        })
        .collect();

    f.render_widget(List::new(items).block(theme::panel("Savings Plans")), area);
}
