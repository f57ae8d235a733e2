mod app;
mod cli;
mod config;
mod domain;
mod input;
mod persistence;
mod store;
mod ticker;
mod ui;

use anyhow::{Context, Result};
use app::AppState;
use chrono::Utc;
use config::{Commands, Config};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use persistence::{ensure_data_dir, init_local_data_dir, FileStore, LOG_FILE_NAME};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;
use std::time::Instant;
use store::TaskTimerStore;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let config = Config::parse();

    if config.command == Some(Commands::Init) {
        let data_dir = init_local_data_dir()?;
        println!("Initialized ticktask directory: {}", data_dir.display());
        println!();
        println!("ticktask will now use this local directory for its timers.");
        return Ok(());
    }

    let data_dir = ensure_data_dir(config.dir.as_deref())?;
    init_logging(&config, &data_dir)?;
    tracing::info!(dir = %data_dir.display(), "Starting ticktask");

    let mut store = TaskTimerStore::load(FileStore::new(&data_dir), Utc::now());

    match &config.command {
        Some(command) => {
            let output = cli::run_command(&mut store, command)?;
            print!("{}", output);
            if !output.ends_with('\n') {
                println!();
            }
            Ok(())
        }
        None => {
            eprintln!("Using ticktask directory: {}", data_dir.display());
            let app = AppState::new(store, ticker::tick_duration(config.tick_ms));
            run_tui(app)
        }
    }
}

/// Log to a file in the data directory; stderr belongs to the terminal UI
fn init_logging(config: &Config, data_dir: &Path) -> Result<()> {
    let log_path = data_dir.join(LOG_FILE_NAME);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file: {}", log_path.display()))?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("ticktask={}", config.log_level())));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn run_tui(mut app: AppState) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    app.attach(Instant::now(), Utc::now());

    // Run app
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Credit the last partial interval, then stop ticking and save
    app.store.accrue(Utc::now());
    if let Err(e) = app.detach() {
        tracing::error!(error = %e, "Failed to save on exit");
        eprintln!("Error saving state: {}", e);
    }

    // Print any errors
    if let Err(err) = &result {
        eprintln!("Error: {}", err);
    }
    tracing::info!("Stopped ticktask");

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut AppState) -> Result<()> {
    loop {
        // Render
        terminal.draw(|f| ui::render(f, app))?;

        // Handle events with timeout until the next tick
        let timeout = app.ticker.until_next(Instant::now());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press && input::handle_key(app, key) {
                    return Ok(());
                }
            }
        }

        // Tick timers
        app.tick(Instant::now(), Utc::now());
    }
}
