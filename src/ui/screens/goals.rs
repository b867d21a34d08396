use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
    Frame,
};

use crate::ui::app::App;
use crate::ui::theme;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    if app.goals.is_empty() {
        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("No goals for this year yet", theme::dim_style())),
        ])
        .centered()
        .block(theme::panel("Yearly Goals"));
        f.render_widget(msg, area);
        return;
    }

    let done = app.goals.iter().filter(|g| g.is_completed).count();
    let height = area.height.saturating_sub(2) as usize;
    let offset = app.goal_index.saturating_sub(height.saturating_sub(1));

    let items: Vec<ListItem> = app
        .goals
        .iter()
        .enumerate()
        .skip(offset)
        .take(height)
        .map(|(i, goal)| {
            let marker_style = if goal.is_completed {
                theme::done_style().add_modifier(Modifier::BOLD)
            } else {
                theme::dim_style()
            };
            let text_style = if i == app.goal_index {
                theme::selected_style()
            } else if goal.is_completed {
                theme::dim_style().add_modifier(Modifier::CROSSED_OUT)
            } else {
                theme::normal_style()
            };

            ListItem::new(Line::from(vec![
                Span::styled(format!(" {} ", goal.marker()), marker_style),
                Span::styled(goal.goal_name.clone(), text_style),
            ]))
        })
        .collect();

    let list = List::new(items).block(theme::panel(format!(
        "Yearly Goals ({done}/{})",
        app.goals.len()
    )));
    f.render_widget(list, area);
}
