use crate::app::AppState;
use crate::domain::format_time;
use crate::persistence::KeyValueStore;
use crate::ui::styles::{border_style, hint_style, running_style, title_style, total_style};
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the aggregate timer across all tasks (hours always shown)
pub fn render_total_pane<S: KeyValueStore>(f: &mut Frame, app: &AppState<S>, area: Rect) {
    let snapshot = app.snapshot();
    let running = snapshot
        .active_id
        .and_then(|id| snapshot.tasks.get(id))
        .map(|task| task.name.as_str());
    // Space resumes this one while paused
    let resume = snapshot
        .tasks
        .get(snapshot.last_active_id)
        .map(|task| task.name.as_str());

    let mut spans = vec![Span::styled(
        format_time(snapshot.total_elapsed, true),
        total_style(),
    )];
    match running {
        Some(name) => {
            spans.push(Span::raw("   "));
            spans.push(Span::styled(format!("▶ {}", name), running_style()));
        }
        None => {
            spans.push(Span::styled("   paused", hint_style()));
            if let Some(name) = resume {
                spans.push(Span::styled(format!(" (space resumes {})", name), hint_style()));
            }
        }
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style())
                .title(Span::styled(" Total ", title_style())),
        );
    f.render_widget(paragraph, area);
}
