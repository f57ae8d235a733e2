use crate::domain::{TaskColor, UiMode, QUICK_ADJUSTMENTS};
use crate::persistence::{FileStore, KeyValueStore, PersistError};
use crate::store::{Snapshot, StoreError, TaskTimerStore};
use crate::ticker::Ticker;
use chrono::{DateTime, Utc};
use std::time::{Duration, Instant};

/// Input form state for adding or renaming a task
#[derive(Debug, Clone, PartialEq)]
pub struct InputFormState {
    pub name: String,
    pub color: TaskColor,
    /// Position being renamed; `None` when creating a new task
    pub editing: Option<usize>,
}

/// Main application state
pub struct AppState<S: KeyValueStore = FileStore> {
    pub store: TaskTimerStore<S>,
    pub selected_index: usize,
    pub ui_mode: UiMode,
    pub input_form: Option<InputFormState>,
    pub ticker: Ticker,
}

impl<S: KeyValueStore> AppState<S> {
    pub fn new(store: TaskTimerStore<S>, tick_interval: Duration) -> Self {
        let selected_index = store.active_id().unwrap_or(0);
        Self {
            store,
            selected_index,
            ui_mode: UiMode::Normal,
            input_form: None,
            ticker: Ticker::new(tick_interval),
        }
    }

    /// Start the accrual schedule. Re-attaching while attached changes nothing.
    pub fn attach(&mut self, now: Instant, wall_now: DateTime<Utc>) {
        if self.ticker.subscribe(now) {
            self.store.restart_clock(wall_now);
            tracing::debug!(interval = ?self.ticker.interval(), "Ticker subscribed");
        }
    }

    /// Stop the schedule and write out anything still pending
    pub fn detach(&mut self) -> Result<(), PersistError> {
        if self.ticker.unsubscribe() {
            tracing::debug!("Ticker unsubscribed");
        }
        self.store.flush()
    }

    /// Credit the running task if a tick is due
    pub fn tick(&mut self, now: Instant, wall_now: DateTime<Utc>) {
        if self.ticker.poll_due(now) {
            self.store.accrue(wall_now);
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        self.store.snapshot()
    }

    /// Whether the row at `position` renders its hour field regardless of value
    pub fn shows_hours_for(&self, position: usize) -> bool {
        self.ui_mode == UiMode::Adjusting && self.selected_index == position
    }

    fn selected(&self) -> Option<usize> {
        (self.selected_index < self.store.len()).then_some(self.selected_index)
    }

    fn clamp_selection(&mut self) {
        let len = self.store.len();
        if len == 0 {
            self.selected_index = 0;
        } else if self.selected_index >= len {
            self.selected_index = len - 1;
        }
    }

    fn log_rejected(result: Result<(), StoreError>) {
        if let Err(e) = result {
            tracing::debug!(error = %e, "Ignored operation on missing task");
        }
    }

    /// Move selection up
    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    /// Move selection down
    pub fn move_selection_down(&mut self) {
        if self.selected_index + 1 < self.store.len() {
            self.selected_index += 1;
        }
    }

    /// Start or stop the selected task
    pub fn toggle_selected(&mut self) {
        if let Some(position) = self.selected() {
            Self::log_rejected(self.store.activate(position));
        }
    }

    /// Pause/resume shortcut; ignored while a text field has focus
    pub fn toggle_last_active(&mut self) {
        if self.ui_mode.has_text_focus() {
            return;
        }
        self.store.toggle_last_active();
        if let Some(active) = self.store.active_id() {
            self.selected_index = active;
        }
    }

    pub fn remove_selected(&mut self) {
        if let Some(position) = self.selected() {
            Self::log_rejected(self.store.remove(position));
            self.clamp_selection();
            if self.store.is_empty() && self.ui_mode == UiMode::Adjusting {
                self.ui_mode = UiMode::Normal;
            }
        }
    }

    pub fn reset_selected(&mut self) {
        if let Some(position) = self.selected() {
            Self::log_rejected(self.store.reset_time(position));
        }
    }

    pub fn reset_all(&mut self) {
        self.store.reset_all();
    }

    /// Open or close the quick-adjust panel for the selected task
    pub fn toggle_adjust_panel(&mut self) {
        self.ui_mode = match self.ui_mode {
            UiMode::Adjusting => UiMode::Normal,
            UiMode::Normal if self.selected().is_some() => UiMode::Adjusting,
            other => other,
        };
    }

    /// Apply quick adjustment number `index` (0-based) to the selected task
    pub fn apply_adjustment(&mut self, index: usize) {
        let (Some(position), Some(delta)) = (self.selected(), QUICK_ADJUSTMENTS.get(index)) else {
            return;
        };
        Self::log_rejected(self.store.add_time(position, *delta));
    }

    /// Start adding a new task (opens input form)
    pub fn start_add_task(&mut self) {
        self.input_form = Some(InputFormState {
            name: String::new(),
            color: TaskColor::default(),
            editing: None,
        });
        self.ui_mode = UiMode::AddingTask;
    }

    /// Open the form pre-filled with the selected task
    pub fn start_rename_task(&mut self) {
        let Some(position) = self.selected() else {
            return;
        };
        let task = &self.store.tasks()[position];
        self.input_form = Some(InputFormState {
            name: task.name.clone(),
            color: task.palette(),
            editing: Some(position),
        });
        self.ui_mode = UiMode::RenamingTask;
    }

    pub fn input_form_add_char(&mut self, c: char) {
        if let Some(form) = &mut self.input_form {
            form.name.push(c);
        }
    }

    pub fn input_form_backspace(&mut self) {
        if let Some(form) = &mut self.input_form {
            form.name.pop();
        }
    }

    /// Cycle the color picker (new tasks only)
    pub fn input_form_next_color(&mut self) {
        if let Some(form) = &mut self.input_form {
            if form.editing.is_none() {
                form.color = form.color.next();
            }
        }
    }

    /// Submit the form. A blank name leaves the form open.
    pub fn submit_input_form(&mut self) {
        let Some(form) = self.input_form.take() else {
            return;
        };

        let accepted = match form.editing {
            None => match self.store.create(&form.name, form.color.index()) {
                Some(position) => {
                    self.selected_index = position;
                    true
                }
                None => false,
            },
            Some(position) => match self.store.rename(position, &form.name) {
                Ok(renamed) => renamed,
                Err(e) => {
                    tracing::debug!(error = %e, "Rename target vanished");
                    true
                }
            },
        };

        if accepted {
            self.ui_mode = UiMode::Normal;
        } else {
            self.input_form = Some(form);
        }
    }

    pub fn cancel_input_form(&mut self) {
        self.input_form = None;
        self.ui_mode = UiMode::Normal;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
    }

    fn create_test_app() -> AppState<MemoryStore> {
        let mut store = TaskTimerStore::load(MemoryStore::new(), t0());
        store.create("Task 1", 0);
        store.create("Task 2", 1);
        AppState::new(store, Duration::from_secs(1))
    }

    fn type_text(app: &mut AppState<MemoryStore>, text: &str) {
        for c in text.chars() {
            app.input_form_add_char(c);
        }
    }

    #[test]
    fn test_app_state_new_selects_active() {
        let app = create_test_app();
        assert_eq!(app.selected_index, 1);
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert!(app.input_form.is_none());
        assert!(!app.ticker.is_subscribed());
    }

    #[test]
    fn test_move_selection() {
        let mut app = create_test_app();
        app.move_selection_up();
        assert_eq!(app.selected_index, 0);
        app.move_selection_up();
        assert_eq!(app.selected_index, 0);
        app.move_selection_down();
        app.move_selection_down();
        assert_eq!(app.selected_index, 1);
    }

    #[test]
    fn test_add_task_through_form() {
        let mut app = create_test_app();
        app.start_add_task();
        type_text(&mut app, " Review ");
        app.input_form_next_color();
        app.input_form_next_color();
        app.submit_input_form();

        assert_eq!(app.ui_mode, UiMode::Normal);
        assert_eq!(app.store.len(), 3);
        assert_eq!(app.store.tasks()[2].name, "Review");
        assert_eq!(app.store.tasks()[2].color, 2);
        assert_eq!(app.store.active_id(), Some(2));
        assert_eq!(app.selected_index, 2);
    }

    #[test]
    fn test_blank_submit_keeps_form_open() {
        let mut app = create_test_app();
        app.start_add_task();
        type_text(&mut app, "   ");
        app.submit_input_form();

        assert_eq!(app.ui_mode, UiMode::AddingTask);
        assert!(app.input_form.is_some());
        assert_eq!(app.store.len(), 2);
    }

    #[test]
    fn test_rename_selected() {
        let mut app = create_test_app();
        app.selected_index = 0;
        app.start_rename_task();
        assert_eq!(app.ui_mode, UiMode::RenamingTask);
        app.input_form_backspace();
        type_text(&mut app, "One");
        app.submit_input_form();

        assert_eq!(app.store.tasks()[0].name, "Task One");
        assert_eq!(app.ui_mode, UiMode::Normal);
    }

    #[test]
    fn test_space_is_ignored_while_typing() {
        let mut app = create_test_app();
        app.start_add_task();
        app.toggle_last_active();
        assert_eq!(app.store.active_id(), Some(1));

        app.cancel_input_form();
        app.toggle_last_active();
        assert_eq!(app.store.active_id(), None);
        app.toggle_last_active();
        assert_eq!(app.store.active_id(), Some(1));
    }

    #[test]
    fn test_toggle_selected() {
        let mut app = create_test_app();
        app.selected_index = 0;
        app.toggle_selected();
        assert_eq!(app.store.active_id(), Some(0));
        app.toggle_selected();
        assert_eq!(app.store.active_id(), None);
    }

    #[test]
    fn test_remove_selected_clamps_selection() {
        let mut app = create_test_app();
        app.remove_selected();
        assert_eq!(app.selected_index, 0);
        assert_eq!(app.store.len(), 1);
        app.remove_selected();
        assert!(app.store.is_empty());
        app.remove_selected();
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn test_adjust_panel_forces_hours_for_selected_row() {
        let mut app = create_test_app();
        assert!(!app.shows_hours_for(1));

        app.toggle_adjust_panel();
        assert_eq!(app.ui_mode, UiMode::Adjusting);
        assert!(app.shows_hours_for(1));
        assert!(!app.shows_hours_for(0));

        app.apply_adjustment(7);
        app.apply_adjustment(2);
        assert_eq!(app.store.elapsed(1), Some(1800.0));
        app.apply_adjustment(3);
        assert_eq!(app.store.elapsed(1), Some(0.0));
        app.apply_adjustment(42);

        app.toggle_adjust_panel();
        assert_eq!(app.ui_mode, UiMode::Normal);
    }

    #[test]
    fn test_resets() {
        let mut app = create_test_app();
        app.store.add_time(0, 30.0).unwrap();
        app.store.add_time(1, 30.0).unwrap();
        app.reset_selected();
        assert_eq!(app.store.timers(), &[30.0, 0.0]);
        app.reset_all();
        assert_eq!(app.store.total_elapsed(), 0.0);
    }

    #[test]
    fn test_tick_only_accrues_when_attached_and_due() {
        let mut app = create_test_app();
        let start = Instant::now();

        app.tick(start + Duration::from_secs(5), t0() + chrono::Duration::seconds(5));
        assert_eq!(app.store.elapsed(1), Some(0.0));

        app.attach(start, t0() + chrono::Duration::seconds(10));
        app.attach(start + Duration::from_millis(500), t0() + chrono::Duration::seconds(99));
        app.tick(
            start + Duration::from_secs(1),
            t0() + chrono::Duration::seconds(11),
        );
        assert_eq!(app.store.elapsed(1), Some(1.0));

        app.detach().unwrap();
        app.tick(
            start + Duration::from_secs(2),
            t0() + chrono::Duration::seconds(12),
        );
        assert_eq!(app.store.elapsed(1), Some(1.0));
    }
}
