//! Command-line configuration

use crate::ticker::DEFAULT_TICK_MS;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "ticktask")]
#[command(about = "A terminal task timer: color-tagged tasks, one running clock at a time", long_about = None)]
#[command(version)]
pub struct Config {
    /// Data directory. Defaults to a local .ticktask (searched upwards) or ~/.ticktask
    #[arg(long, env = "TICKTASK_DIR", global = true)]
    pub dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Accrual tick interval in milliseconds
    #[arg(long, default_value_t = DEFAULT_TICK_MS)]
    pub tick_ms: u64,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Initialize a local .ticktask directory in the current directory
    Init,
    /// Print all tasks with their elapsed time
    List,
    /// Add a task; it starts running immediately
    Add {
        /// Task name
        name: String,
        /// Color tag 0-3 (red, amber, emerald, sky)
        #[arg(short, long, default_value_t = 0)]
        color: u8,
    },
    /// Pause the running task, or resume the last one
    Toggle,
    /// Reset one task's time (by position), or every task when omitted
    Reset {
        position: Option<usize>,
    },
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Default filter directive for the log subscriber
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "info"
        }
    }
}
