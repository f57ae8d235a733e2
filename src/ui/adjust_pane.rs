use crate::app::AppState;
use crate::domain::{adjustment_label, QUICK_ADJUSTMENTS};
use crate::persistence::KeyValueStore;
use crate::ui::styles::{border_style, hint_style, modal_title_style, title_style};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// One row of the panel: `[key] label` cells for four adjustments
fn adjustment_row(offset: usize) -> Line<'static> {
    let mut spans = Vec::new();
    for (i, delta) in QUICK_ADJUSTMENTS.iter().enumerate().skip(offset).take(4) {
        spans.push(Span::styled(format!(" [{}] ", i + 1), hint_style()));
        spans.push(Span::styled(format!("{:>4}m ", adjustment_label(*delta)), modal_title_style()));
    }
    Line::from(spans)
}

/// Render the quick-adjust panel for the selected task
pub fn render_adjust_pane<S: KeyValueStore>(f: &mut Frame, app: &AppState<S>, area: Rect) {
    let name = app
        .store
        .tasks()
        .get(app.selected_index)
        .map(|task| task.name.clone())
        .unwrap_or_default();

    let paragraph = Paragraph::new(vec![adjustment_row(0), adjustment_row(4)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title(Span::styled(format!(" Adjust: {} (Esc closes) ", name), title_style())),
    );
    f.render_widget(paragraph, area);
}
