use crate::app::AppState;
use crate::domain::TaskColor;
use crate::persistence::KeyValueStore;
use crate::ui::{
    layout::create_modal_area,
    styles::{dot_style, hint_style, modal_bg_style, modal_title_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render the input form for adding or renaming a task
pub fn render_input_form<S: KeyValueStore>(f: &mut Frame, app: &AppState<S>, area: Rect) {
    let Some(form) = &app.input_form else {
        return;
    };
    let modal_area = create_modal_area(area);

    // Clear the area behind the form
    f.render_widget(Clear, modal_area);

    let title_text = if form.editing.is_some() {
        " Rename Task "
    } else {
        " New Task "
    };

    let mut lines = vec![Line::raw("")];
    lines.push(Line::from(vec![
        Span::raw("> "),
        Span::styled(form.name.clone(), modal_title_style()),
        Span::styled("█", modal_title_style()),
    ]));
    lines.push(Line::raw(""));

    // Color picker; the chosen dot is bracketed
    let mut picker = vec![Span::raw("Color: ")];
    for color in TaskColor::all() {
        let marker = if *color == form.color {
            "[●] ".to_string()
        } else {
            " ● ".to_string()
        };
        picker.push(Span::styled(marker, dot_style(*color)));
    }
    picker.push(Span::styled(form.color.name(), hint_style()));
    lines.push(Line::from(picker));
    lines.push(Line::raw(""));

    let help = if form.editing.is_some() {
        "Enter to save  ·  Esc to cancel"
    } else {
        "Tab to change color  ·  Enter to add  ·  Esc to cancel"
    };
    lines.push(Line::from(Span::styled(help, hint_style())));

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(title_text, modal_title_style()))
                .style(modal_bg_style()),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}
