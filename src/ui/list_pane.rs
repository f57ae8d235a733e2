use crate::app::AppState;
use crate::domain::{format_time, TaskView};
use crate::persistence::KeyValueStore;
use crate::ui::styles::{
    active_border_style, border_style, default_style, dot_style, hint_style, idle_style,
    running_style, selected_style, title_style,
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Build one task row: badge, color dot, name, padding, timer
fn create_task_line(task: &TaskView, always_show_hours: bool, width: usize) -> Line<'static> {
    let badge = if task.active { "▶ " } else { "⏸ " };
    let badge_style = if task.active { running_style() } else { idle_style() };
    let time = format_time(task.elapsed, always_show_hours);

    // badge (2) + dot (2) + name + gap + time
    let fixed = 4 + time.chars().count() + 1;
    let max_name = width.saturating_sub(fixed);
    let mut name: String = task.name.chars().take(max_name).collect();
    if name.chars().count() < task.name.chars().count() && max_name > 0 {
        name.pop();
        name.push('…');
    }
    let padding = width.saturating_sub(fixed + name.chars().count()) + 1;
    let time_style = if task.active { running_style() } else { default_style() };

    Line::from(vec![
        Span::styled(badge, badge_style),
        Span::styled("● ", dot_style(task.color)),
        Span::raw(name),
        Span::raw(" ".repeat(padding)),
        Span::styled(time, time_style),
    ])
}

/// Render the task list pane
pub fn render_list_pane<S: KeyValueStore>(f: &mut Frame, app: &AppState<S>, area: Rect) {
    let snapshot = app.snapshot();
    let running = snapshot.active_id.is_some();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if running { active_border_style() } else { border_style() })
        .title(Span::styled(format!(" Tasks ({}) ", snapshot.tasks.len()), title_style()));

    if snapshot.tasks.is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled(
            "No tasks yet. Press a to add one.",
            hint_style(),
        )))
        .block(block);
        f.render_widget(empty, area);
        return;
    }

    let inner_width = area.width.saturating_sub(2) as usize;
    let items: Vec<ListItem> = snapshot
        .tasks
        .iter()
        .map(|task| {
            let line = create_task_line(task, app.shows_hours_for(task.position), inner_width);
            let style = if task.position == app.selected_index {
                selected_style()
            } else {
                default_style()
            };
            ListItem::new(line).style(style)
        })
        .collect();

    f.render_widget(List::new(items).block(block), area);
}
