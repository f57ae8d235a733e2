pub mod adjust_pane;
pub mod input_form;
pub mod keybindings;
pub mod layout;
pub mod list_pane;
pub mod styles;
pub mod total_pane;

use crate::app::AppState;
use crate::domain::UiMode;
use crate::persistence::KeyValueStore;
use adjust_pane::render_adjust_pane;
use input_form::render_input_form;
use keybindings::render_keybindings;
use layout::create_layout;
use list_pane::render_list_pane;
use ratatui::Frame;
use total_pane::render_total_pane;

/// Main render function - draws the entire UI
pub fn render<S: KeyValueStore>(f: &mut Frame, app: &AppState<S>) {
    let size = f.size();
    let layout = create_layout(size, app.ui_mode == UiMode::Adjusting);

    render_keybindings(f, app.ui_mode, layout.keybindings_area);
    render_total_pane(f, app, layout.total_area);
    render_list_pane(f, app, layout.list_area);

    if let Some(adjust_area) = layout.adjust_area {
        render_adjust_pane(f, app, adjust_area);
    }

    // Render input form if active
    if app.input_form.is_some() {
        render_input_form(f, app, size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use crate::store::TaskTimerStore;
    use chrono::Utc;
    use ratatui::{backend::TestBackend, Terminal};
    use std::time::Duration;

    /// Render into an in-memory buffer and return plain text
    fn render_to_string(app: &AppState<MemoryStore>, w: u16, h: u16) -> String {
        let backend = TestBackend::new(w, h);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();

        let buf = terminal.backend().buffer().clone();
        buf.content
            .chunks(buf.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn app_with(names: &[&str]) -> AppState<MemoryStore> {
        let mut store = TaskTimerStore::load(MemoryStore::new(), Utc::now());
        for name in names {
            store.create(name, 1);
        }
        AppState::new(store, Duration::from_secs(1))
    }

    #[test]
    fn test_render_empty() {
        let app = app_with(&[]);
        let screen = render_to_string(&app, 80, 20);
        assert!(screen.contains("No tasks yet"));
        assert!(screen.contains("00:00:00"));
    }

    #[test]
    fn test_render_tasks_and_total() {
        let mut app = app_with(&["Write report", "Email"]);
        app.store.add_time(0, 3661.0).unwrap();
        app.store.add_time(1, 59.0).unwrap();

        let screen = render_to_string(&app, 80, 20);
        assert!(screen.contains("Write report"));
        assert!(screen.contains("01:01:01"));
        assert!(screen.contains("00:59"));
        assert!(screen.contains("01:02:00"));
        assert!(screen.contains("▶ Email"));
    }

    #[test]
    fn test_render_paused_names_resume_target() {
        let mut app = app_with(&["Write report", "Email"]);
        app.store.activate(0).unwrap();
        app.store.toggle_last_active();

        let screen = render_to_string(&app, 80, 20);
        assert!(screen.contains("paused (space resumes Write report)"));
        assert!(!screen.contains("▶ "));
    }

    #[test]
    fn test_render_adjust_panel_forces_hours() {
        let mut app = app_with(&["Email"]);
        app.store.add_time(0, 59.0).unwrap();
        app.toggle_adjust_panel();

        let screen = render_to_string(&app, 100, 20);
        assert!(screen.contains("Adjust: Email"));
        assert!(screen.contains("00:00:59"));
    }

    #[test]
    fn test_render_input_form() {
        let mut app = app_with(&[]);
        app.start_add_task();
        app.input_form_add_char('Z');

        let screen = render_to_string(&app, 80, 30);
        assert!(screen.contains("New Task"));
        assert!(screen.contains("> Z"));
        assert!(screen.contains("red"));
    }
}
