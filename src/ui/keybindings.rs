use crate::domain::UiMode;
use crate::ui::styles::hint_style;
use ratatui::{layout::Rect, text::{Line, Span}, widgets::Paragraph, Frame};

/// Render the keybindings hint bar
pub fn render_keybindings(f: &mut Frame, mode: UiMode, area: Rect) {
    let hints = match mode {
        UiMode::Normal => Line::from(vec![
            Span::raw(" ↑/↓ select   "),
            Span::raw("Enter start/stop   "),
            Span::raw("Space pause/resume   "),
            Span::raw("a add   "),
            Span::raw("e rename   "),
            Span::raw("x remove   "),
            Span::raw("r reset   "),
            Span::raw("R reset all   "),
            Span::raw("t adjust   "),
            Span::raw("q quit"),
        ]),
        UiMode::Adjusting => Line::from(vec![
            Span::raw(" 1-8 adjust time   "),
            Span::raw("↑/↓ select   "),
            Span::raw("Enter start/stop   "),
            Span::raw("r reset   "),
            Span::raw("Esc/t close"),
        ]),
        UiMode::AddingTask | UiMode::RenamingTask => Line::from(vec![
            Span::raw(" type a name   "),
            Span::raw("Tab color   "),
            Span::raw("Enter submit   "),
            Span::raw("Esc cancel"),
        ]),
    };

    let paragraph = Paragraph::new(hints).style(hint_style());
    f.render_widget(paragraph, area);
}
