//! Non-interactive subcommands operating on the same store as the TUI

use crate::config::Commands;
use crate::domain::format_time;
use crate::persistence::KeyValueStore;
use crate::store::{Snapshot, TaskTimerStore};
use anyhow::{Context, Result};
use std::fmt::Write as _;

/// Plain-text listing used by `ticktask list`
pub fn format_listing(snapshot: &Snapshot) -> String {
    let mut out = String::new();
    if snapshot.tasks.is_empty() {
        out.push_str("No tasks.\n");
    }
    for task in &snapshot.tasks {
        let marker = if task.active { '▶' } else { ' ' };
        let _ = writeln!(
            out,
            "{} {:>3}  {:>9}  [{}] {}",
            marker,
            task.position,
            format_time(task.elapsed, true),
            task.color.name(),
            task.name
        );
    }
    let _ = writeln!(out, "Total  {}", format_time(snapshot.total_elapsed, true));
    out
}

/// Run one subcommand against `store`, returning what to print
pub fn run_command<S: KeyValueStore>(store: &mut TaskTimerStore<S>, command: &Commands) -> Result<String> {
    let message = match command {
        Commands::Init => anyhow::bail!("init is handled before the store is opened"),
        Commands::List => return Ok(format_listing(&store.snapshot())),
        Commands::Add { name, color } => match store.create(name, *color) {
            Some(position) => format!("Started task {}: {}", position, name.trim()),
            None => anyhow::bail!("Task name must not be empty"),
        },
        Commands::Toggle => {
            if store.is_empty() {
                anyhow::bail!("No tasks to resume");
            }
            store.toggle_last_active();
            match store.active_id() {
                Some(id) => format!("Resumed: {}", store.tasks()[id].name),
                None => "Paused".to_string(),
            }
        }
        Commands::Reset { position: Some(position) } => {
            store.reset_time(*position)?;
            format!("Reset task {}", position)
        }
        Commands::Reset { position: None } => {
            store.reset_all();
            "Reset all tasks".to_string()
        }
    };

    store.flush().context("Failed to save task timers")?;
    Ok(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn store() -> TaskTimerStore<MemoryStore> {
        TaskTimerStore::load(MemoryStore::new(), Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap())
    }

    #[test]
    fn test_add_and_list() {
        let mut store = store();
        let msg = run_command(
            &mut store,
            &Commands::Add {
                name: " Write report ".into(),
                color: 2,
            },
        )
        .unwrap();
        assert_eq!(msg, "Started task 0: Write report");

        store.add_time(0, 3661.0).unwrap();
        let listing = run_command(&mut store, &Commands::List).unwrap();
        assert_eq!(
            listing,
            "▶   0   01:01:01  [emerald] Write report\nTotal  01:01:01\n"
        );
    }

    #[test]
    fn test_add_blank_fails() {
        let mut store = store();
        let result = run_command(
            &mut store,
            &Commands::Add {
                name: "  ".into(),
                color: 0,
            },
        );
        assert!(result.is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn test_toggle_and_reset() {
        let mut store = store();
        assert!(run_command(&mut store, &Commands::Toggle).is_err());

        store.create("A", 0);
        assert_eq!(run_command(&mut store, &Commands::Toggle).unwrap(), "Paused");
        assert_eq!(run_command(&mut store, &Commands::Toggle).unwrap(), "Resumed: A");

        store.add_time(0, 10.0).unwrap();
        run_command(&mut store, &Commands::Reset { position: Some(0) }).unwrap();
        assert_eq!(store.elapsed(0), Some(0.0));
        assert!(run_command(&mut store, &Commands::Reset { position: Some(4) }).is_err());

        store.add_time(0, 10.0).unwrap();
        run_command(&mut store, &Commands::Reset { position: None }).unwrap();
        assert_eq!(store.total_elapsed(), 0.0);
    }

    #[test]
    fn test_empty_listing() {
        let store = store();
        assert_eq!(format_listing(&store.snapshot()), "No tasks.\nTotal  00:00:00\n");
    }
}
