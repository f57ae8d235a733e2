pub mod files;
pub mod kv;
pub mod state;

pub use files::{ensure_data_dir, init_local_data_dir, LOG_FILE_NAME};
#[cfg(test)]
pub use kv::MemoryStore;
pub use kv::{FileStore, KeyValueStore, PersistError};
pub use state::{
    load_state, save_key, PersistedState, ACTIVE_ID_KEY, LAST_ACTIVE_ID_KEY, NO_ACTIVE_ID,
    TASKS_KEY, TIMERS_KEY,
};
