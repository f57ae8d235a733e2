use crate::domain::{Task, TaskView};
use crate::persistence::{
    load_state, save_key, KeyValueStore, PersistError, PersistedState, ACTIVE_ID_KEY,
    LAST_ACTIVE_ID_KEY, NO_ACTIVE_ID, TASKS_KEY, TIMERS_KEY,
};
use chrono::{DateTime, Utc};

/// Error type for store operations addressing a task by position
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("no task at position {position} (have {len})")]
    NoSuchTask { position: usize, len: usize },
}

/// Fields that changed since they were last written
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Dirty {
    tasks: bool,
    timers: bool,
    active_id: bool,
    last_active_id: bool,
}

impl Dirty {
    fn any(&self) -> bool {
        self.tasks || self.timers || self.active_id || self.last_active_id
    }
}

/// Read-only view of the whole store for rendering
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub tasks: Vec<TaskView>,
    pub active_id: Option<usize>,
    pub last_active_id: usize,
    pub total_elapsed: f64,
}

/// Tasks, their elapsed-time accumulators, and which one (if any) is running.
///
/// `tasks[i]` and `timers[i]` always describe the same task, and `active_id`
/// is either `None` or a valid position. Every mutation writes the fields it
/// touched through to the backend before returning.
pub struct TaskTimerStore<S: KeyValueStore> {
    tasks: Vec<Task>,
    timers: Vec<f64>,
    active_id: Option<usize>,
    last_active_id: usize,
    last_tick: DateTime<Utc>,
    dirty: Dirty,
    backend: S,
}

impl<S: KeyValueStore> TaskTimerStore<S> {
    /// Restore from `backend`, starting the accrual clock at `now`
    pub fn load(backend: S, now: DateTime<Utc>) -> Self {
        let persisted = load_state(&backend);
        let mut store = Self {
            tasks: Vec::new(),
            timers: Vec::new(),
            active_id: None,
            last_active_id: 0,
            last_tick: now,
            dirty: Dirty::default(),
            backend,
        };
        store.reconcile(persisted);
        tracing::debug!(
            tasks = store.tasks.len(),
            active = ?store.active_id,
            "Restored task timers"
        );
        store
    }

    /// Adopt independently-loaded fields, repairing anything that would break
    /// the length or activation invariants.
    ///
    /// A repair is only written back when the repaired key itself loaded and
    /// the task list it is measured against loaded too. A key that failed to
    /// decode never causes a different key to be rewritten.
    fn reconcile(&mut self, persisted: PersistedState) {
        let PersistedState {
            tasks,
            timers,
            active_id,
            last_active_id,
        } = persisted;

        let tasks_loaded = tasks.is_some();
        let timers_loaded = timers.is_some();
        let loaded_tasks = tasks.unwrap_or_default();
        let loaded_timers = timers.unwrap_or_default();
        let loaded_len = loaded_tasks.len();

        let mut timers_changed = loaded_timers.len() != loaded_len;
        // Old position -> new position, `None` for dropped entries
        let mut moved_to = Vec::with_capacity(loaded_len);
        let mut kept_tasks = Vec::with_capacity(loaded_len);
        let mut kept_timers = Vec::with_capacity(loaded_len);

        for (index, task) in loaded_tasks.into_iter().enumerate() {
            let elapsed = match loaded_timers.get(index) {
                Some(Some(value)) if value.is_finite() && *value >= 0.0 => *value,
                Some(_) => {
                    timers_changed = true;
                    0.0
                }
                None => 0.0,
            };
            match task.and_then(|task| Task::new(&task.name, task.color)) {
                Some(task) => {
                    moved_to.push(Some(kept_tasks.len()));
                    kept_tasks.push(task);
                    kept_timers.push(elapsed);
                }
                None => {
                    moved_to.push(None);
                    timers_changed = true;
                }
            }
        }

        if kept_tasks.len() != loaded_len {
            tracing::warn!(
                dropped = loaded_len - kept_tasks.len(),
                "Dropped unreadable or unnamed persisted tasks"
            );
            self.dirty.tasks = tasks_loaded;
        }
        self.dirty.timers = tasks_loaded && timers_loaded && timers_changed;

        self.tasks = kept_tasks;
        self.timers = kept_timers;

        let remap = |raw: i64| {
            usize::try_from(raw)
                .ok()
                .and_then(|old| moved_to.get(old).copied().flatten())
        };

        let active = remap(active_id.unwrap_or(NO_ACTIVE_ID));
        if let Some(raw) = active_id {
            let encoded = active.map_or(NO_ACTIVE_ID, |id| id as i64);
            self.dirty.active_id = tasks_loaded && encoded != raw;
        }
        self.active_id = active;

        let last_active = remap(last_active_id.unwrap_or(0)).unwrap_or(0);
        if let Some(raw) = last_active_id {
            self.dirty.last_active_id = tasks_loaded && last_active as i64 != raw;
        }
        self.last_active_id = last_active;
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn timers(&self) -> &[f64] {
        &self.timers
    }

    pub fn active_id(&self) -> Option<usize> {
        self.active_id
    }

    pub fn last_active_id(&self) -> usize {
        self.last_active_id
    }

    pub fn elapsed(&self, position: usize) -> Option<f64> {
        self.timers.get(position).copied()
    }

    #[cfg(test)]
    pub fn backend(&self) -> &S {
        &self.backend
    }

    fn check_position(&self, position: usize) -> Result<(), StoreError> {
        if position < self.tasks.len() {
            Ok(())
        } else {
            Err(StoreError::NoSuchTask {
                position,
                len: self.tasks.len(),
            })
        }
    }

    fn set_active(&mut self, active_id: Option<usize>) {
        if self.active_id != active_id {
            self.active_id = active_id;
            self.dirty.active_id = true;
        }
    }

    fn set_last_active(&mut self, last_active_id: usize) {
        if self.last_active_id != last_active_id {
            self.last_active_id = last_active_id;
            self.dirty.last_active_id = true;
        }
    }

    /// Make `position` the running task and remember it for resume
    fn start(&mut self, position: usize) {
        self.set_active(Some(position));
        self.set_last_active(position);
    }

    /// Append a task and start it. Blank names are ignored (`None`).
    pub fn create(&mut self, name: &str, color: u8) -> Option<usize> {
        let task = Task::new(name, color)?;
        tracing::info!(name = %task.name, color, "Created task");

        self.tasks.push(task);
        self.timers.push(0.0);
        self.dirty.tasks = true;
        self.dirty.timers = true;

        let position = self.tasks.len() - 1;
        self.start(position);
        self.write_through();
        Some(position)
    }

    /// Change a task's name. Blank names are ignored and return `Ok(false)`.
    pub fn rename(&mut self, position: usize, name: &str) -> Result<bool, StoreError> {
        self.check_position(position)?;
        let name = name.trim();
        if name.is_empty() {
            return Ok(false);
        }
        if self.tasks[position].name != name {
            self.tasks[position].name = name.to_string();
            self.dirty.tasks = true;
            self.write_through();
        }
        Ok(true)
    }

    /// Delete the task at `position`, keeping the order of the others and
    /// shifting activation so it keeps pointing at the same tasks
    pub fn remove(&mut self, position: usize) -> Result<(), StoreError> {
        self.check_position(position)?;

        let removed = self.tasks.remove(position);
        self.timers.remove(position);
        self.dirty.tasks = true;
        self.dirty.timers = true;
        tracing::info!(name = %removed.name, position, "Removed task");

        match self.active_id {
            Some(active) if active == position => self.set_active(None),
            Some(active) if active > position => self.set_active(Some(active - 1)),
            _ => {}
        }

        // Resume falls back to the first task rather than to nothing
        if self.last_active_id == position {
            self.set_last_active(0);
        } else if self.last_active_id > position {
            self.set_last_active(self.last_active_id - 1);
        }

        self.write_through();
        Ok(())
    }

    /// Start `position`, or stop it if it is already the running task
    pub fn activate(&mut self, position: usize) -> Result<(), StoreError> {
        self.check_position(position)?;

        if self.active_id == Some(position) {
            self.set_active(None);
        } else {
            self.start(position);
        }
        self.write_through();
        Ok(())
    }

    /// Pause whatever is running, or resume the last running task.
    /// Does nothing when there are no tasks.
    pub fn toggle_last_active(&mut self) {
        if self.tasks.is_empty() {
            return;
        }

        match self.active_id {
            Some(_) => self.set_active(None),
            None => {
                let resume = self.last_active_id.min(self.tasks.len() - 1);
                self.set_active(Some(resume));
            }
        }
        self.write_through();
    }

    /// Add `delta` seconds (may be negative); the result never drops below zero
    pub fn add_time(&mut self, position: usize, delta: f64) -> Result<(), StoreError> {
        self.check_position(position)?;

        let current = self.timers[position];
        let updated = (current + delta).max(0.0);
        if updated != current {
            self.timers[position] = updated;
            self.dirty.timers = true;
            self.write_through();
        }
        Ok(())
    }

    pub fn reset_time(&mut self, position: usize) -> Result<(), StoreError> {
        self.check_position(position)?;

        self.timers[position] = 0.0;
        self.dirty.timers = true;
        self.write_through();
        Ok(())
    }

    /// Zero every accumulator; activation is left alone
    pub fn reset_all(&mut self) {
        self.timers.iter_mut().for_each(|value| *value = 0.0);
        self.dirty.timers = true;
        self.write_through();
    }

    /// Add the wall-clock time since the previous tick to the running task
    pub fn accrue(&mut self, now: DateTime<Utc>) {
        let delta = seconds_between(self.last_tick, now);
        self.last_tick = now;

        if let Some(active) = self.active_id {
            if delta > 0.0 {
                self.timers[active] += delta;
                self.dirty.timers = true;
                self.write_through();
            }
        }
    }

    /// Move the accrual clock to `now` without crediting anything
    pub fn restart_clock(&mut self, now: DateTime<Utc>) {
        self.last_tick = now;
    }

    pub fn total_elapsed(&self) -> f64 {
        self.timers.iter().sum()
    }

    pub fn snapshot(&self) -> Snapshot {
        let tasks = self
            .tasks
            .iter()
            .zip(&self.timers)
            .enumerate()
            .map(|(position, (task, elapsed))| TaskView {
                position,
                name: task.name.clone(),
                color: task.palette(),
                elapsed: *elapsed,
                active: self.active_id == Some(position),
            })
            .collect();

        Snapshot {
            tasks,
            active_id: self.active_id,
            last_active_id: self.last_active_id,
            total_elapsed: self.total_elapsed(),
        }
    }

    /// Write every dirty field, returning the first failure. Failed fields
    /// stay dirty.
    pub fn flush(&mut self) -> Result<(), PersistError> {
        let mut first_error = None;

        if self.dirty.tasks {
            match save_key(&mut self.backend, TASKS_KEY, &self.tasks) {
                Ok(()) => self.dirty.tasks = false,
                Err(e) => {
                    first_error.get_or_insert(e);
                }
            }
        }
        if self.dirty.timers {
            match save_key(&mut self.backend, TIMERS_KEY, &self.timers) {
                Ok(()) => self.dirty.timers = false,
                Err(e) => {
                    first_error.get_or_insert(e);
                }
            }
        }
        if self.dirty.active_id {
            let encoded = self.active_id.map_or(NO_ACTIVE_ID, |id| id as i64);
            match save_key(&mut self.backend, ACTIVE_ID_KEY, &encoded) {
                Ok(()) => self.dirty.active_id = false,
                Err(e) => {
                    first_error.get_or_insert(e);
                }
            }
        }
        if self.dirty.last_active_id {
            match save_key(&mut self.backend, LAST_ACTIVE_ID_KEY, &self.last_active_id) {
                Ok(()) => self.dirty.last_active_id = false,
                Err(e) => {
                    first_error.get_or_insert(e);
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Best-effort persistence after a mutation
    fn write_through(&mut self) {
        if !self.dirty.any() {
            return;
        }
        if let Err(e) = self.flush() {
            tracing::warn!(error = %e, "Could not persist task timers, will retry");
        }
    }
}

/// Signed seconds from `from` to `to`
fn seconds_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    let span = to.signed_duration_since(from);
    match span.num_microseconds() {
        Some(micros) => micros as f64 / 1_000_000.0,
        None => span.num_milliseconds() as f64 / 1_000.0,
    }
}
