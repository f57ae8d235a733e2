use crate::app::AppState;
use crate::domain::UiMode;
use crate::persistence::KeyValueStore;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Handle keyboard input events. Returns `true` when the app should quit.
pub fn handle_key<S: KeyValueStore>(app: &mut AppState<S>, key: KeyEvent) -> bool {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    match app.ui_mode {
        UiMode::Normal => handle_normal_mode(app, key),
        UiMode::Adjusting => handle_adjust_mode(app, key),
        UiMode::AddingTask | UiMode::RenamingTask => handle_input_form_mode(app, key),
    }
}

/// Keys shared by normal and adjust mode
fn handle_common<S: KeyValueStore>(app: &mut AppState<S>, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Up => app.move_selection_up(),
        KeyCode::Down => app.move_selection_down(),

        // Start/stop selected
        KeyCode::Enter => app.toggle_selected(),

        // Pause/resume whatever ran last
        KeyCode::Char(' ') => app.toggle_last_active(),

        KeyCode::Char('r') => app.reset_selected(),
        KeyCode::Char('R') => app.reset_all(),

        KeyCode::Char('t') | KeyCode::Char('T') => app.toggle_adjust_panel(),

        KeyCode::Char('q') | KeyCode::Char('Q') => return true,

        _ => {}
    }
    false
}

/// Handle keys in normal mode
fn handle_normal_mode<S: KeyValueStore>(app: &mut AppState<S>, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('a') | KeyCode::Char('A') => app.start_add_task(),
        KeyCode::Char('e') | KeyCode::Char('E') => app.start_rename_task(),
        KeyCode::Char('x') | KeyCode::Char('X') | KeyCode::Delete => app.remove_selected(),
        _ => return handle_common(app, key),
    }
    false
}

/// Handle keys while the quick-adjust panel is open
fn handle_adjust_mode<S: KeyValueStore>(app: &mut AppState<S>, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char(c @ '1'..='8') => {
            let index = c as usize - '1' as usize;
            app.apply_adjustment(index);
        }
        KeyCode::Esc => app.toggle_adjust_panel(),
        _ => return handle_common(app, key),
    }
    false
}

/// Handle keys in input form mode; every printable key is text
fn handle_input_form_mode<S: KeyValueStore>(app: &mut AppState<S>, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Enter => app.submit_input_form(),
        KeyCode::Esc => app.cancel_input_form(),
        KeyCode::Tab => app.input_form_next_color(),
        KeyCode::Backspace => app.input_form_backspace(),
        KeyCode::Char(c) => app.input_form_add_char(c),
        _ => {}
    }
    false
}
