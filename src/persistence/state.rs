use super::kv::{KeyValueStore, PersistError};
use crate::domain::Task;
use serde::de::DeserializeOwned;
use serde::Serialize;

pub const TASKS_KEY: &str = "tasks";
pub const TIMERS_KEY: &str = "timers";
pub const ACTIVE_ID_KEY: &str = "activeId";
pub const LAST_ACTIVE_ID_KEY: &str = "lastActiveId";

/// Sentinel stored under `activeId` when nothing is running
pub const NO_ACTIVE_ID: i64 = -1;

/// Raw persisted fields, each decoded on its own. `None` means the key was
/// missing or unreadable; list entries that fail to decode are `None` in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PersistedState {
    pub tasks: Option<Vec<Option<Task>>>,
    pub timers: Option<Vec<Option<f64>>>,
    pub active_id: Option<i64>,
    pub last_active_id: Option<i64>,
}

/// Load every key independently; a missing or corrupt key only resets itself
pub fn load_state<S: KeyValueStore + ?Sized>(store: &S) -> PersistedState {
    PersistedState {
        tasks: load_list(store, TASKS_KEY),
        timers: load_list(store, TIMERS_KEY),
        active_id: load_key(store, ACTIVE_ID_KEY),
        last_active_id: load_key(store, LAST_ACTIVE_ID_KEY),
    }
}

fn load_key<S, T>(store: &S, key: &str) -> Option<T>
where
    S: KeyValueStore + ?Sized,
    T: DeserializeOwned,
{
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            tracing::warn!(key, error = %e, "Could not read persisted value, using default");
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key, error = %e, "Malformed persisted value, using default");
            None
        }
    }
}

/// Decode a JSON array entry by entry so one bad element keeps its slot
fn load_list<S, T>(store: &S, key: &str) -> Option<Vec<Option<T>>>
where
    S: KeyValueStore + ?Sized,
    T: DeserializeOwned,
{
    let entries: Vec<serde_json::Value> = load_key(store, key)?;
    let decoded: Vec<Option<T>> = entries
        .into_iter()
        .map(|entry| serde_json::from_value(entry).ok())
        .collect();

    let bad = decoded.iter().filter(|entry| entry.is_none()).count();
    if bad > 0 {
        tracing::warn!(key, bad, "Skipped malformed persisted entries");
    }
    Some(decoded)
}

/// Serialize `value` as JSON and write it under `key`
pub fn save_key<S, T>(store: &mut S, key: &str, value: &T) -> Result<(), PersistError>
where
    S: KeyValueStore + ?Sized,
    T: Serialize + ?Sized,
{
    let json = serde_json::to_string(value).map_err(|source| PersistError::Encode {
        key: key.to_string(),
        source,
    })?;
    store.set(key, &json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_load_empty_store_gives_defaults() {
        let store = MemoryStore::new();
        assert_eq!(load_state(&store), PersistedState::default());
    }

    #[test]
    fn test_load_all_keys() {
        let mut store = MemoryStore::new();
        store.insert(TASKS_KEY, r#"[{"name":"A","color":1},{"name":"B","color":3}]"#);
        store.insert(TIMERS_KEY, "[12.5, 0]");
        store.insert(ACTIVE_ID_KEY, "1");
        store.insert(LAST_ACTIVE_ID_KEY, "1");

        let state = load_state(&store);
        assert_eq!(
            state.tasks,
            Some(vec![
                Some(Task { name: "A".into(), color: 1 }),
                Some(Task { name: "B".into(), color: 3 }),
            ])
        );
        assert_eq!(state.timers, Some(vec![Some(12.5), Some(0.0)]));
        assert_eq!(state.active_id, Some(1));
        assert_eq!(state.last_active_id, Some(1));
    }

    #[test]
    fn test_malformed_key_does_not_affect_others() {
        let mut store = MemoryStore::new();
        store.insert(TASKS_KEY, r#"[{"name":"A","color":0}]"#);
        store.insert(TIMERS_KEY, "not json");
        store.insert(ACTIVE_ID_KEY, r#""zero""#);
        store.insert(LAST_ACTIVE_ID_KEY, "0");

        let state = load_state(&store);
        assert_eq!(state.tasks.map(|tasks| tasks.len()), Some(1));
        assert_eq!(state.timers, None);
        assert_eq!(state.active_id, None);
        assert_eq!(state.last_active_id, Some(0));
    }

    #[test]
    fn test_bad_entries_keep_their_slot() {
        let mut store = MemoryStore::new();
        store.insert(TASKS_KEY, r#"[{"name":"A"},{"color":2},{"name":"C","color":1}]"#);
        store.insert(TIMERS_KEY, r#"[1.5, null, "x", 4]"#);

        let state = load_state(&store);
        let tasks = state.tasks.unwrap();
        assert_eq!(tasks.len(), 3);
        assert!(tasks[1].is_none());
        assert_eq!(tasks[2].as_ref().map(|t| t.name.as_str()), Some("C"));
        assert_eq!(state.timers, Some(vec![Some(1.5), None, None, Some(4.0)]));
    }

    #[test]
    fn test_save_key_writes_json() {
        let mut store = MemoryStore::new();
        save_key(&mut store, TIMERS_KEY, &[1.5, 0.0][..]).unwrap();
        save_key(&mut store, ACTIVE_ID_KEY, &NO_ACTIVE_ID).unwrap();

        assert_eq!(store.raw(TIMERS_KEY), Some("[1.5,0.0]"));
        assert_eq!(store.raw(ACTIVE_ID_KEY), Some("-1"));
    }
}
