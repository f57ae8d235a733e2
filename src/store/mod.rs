pub mod timer_store;

pub use timer_store::{Snapshot, StoreError, TaskTimerStore};
