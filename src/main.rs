//! SeasonCalc - Entry Point
//!
//! Loads season data, sets up the terminal and runs the calculator loop.
//!
//! Usage:
//!   seasoncalc                   load from the user data directory
//!   seasoncalc <file-or-dir>     load a season file (.ron/.json) or a data directory
//!   seasoncalc --export [dir]    write the default data files and exit

use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    Terminal,
};

use seasoncalc::data::{data_directory, export_default_data, SeasonData};
use seasoncalc::ui::App;

/// How long to wait for input before redrawing
const POLL_INTERVAL: Duration = Duration::from_millis(250);

fn main() -> Result<()> {
    init_logging();
    log::info!("Starting SeasonCalc v{}", env!("CARGO_PKG_VERSION"));

    let mut args = std::env::args().skip(1);
    let data = match args.next().as_deref() {
        Some("--export") => {
            let dir = args.next().map(PathBuf::from).unwrap_or_else(data_directory);
            export_default_data(&dir)
                .with_context(|| format!("exporting default data to {}", dir.display()))?;
            println!("Wrote default data to {}", dir.display());
            return Ok(());
        }
        Some(path) => SeasonData::from_path(Path::new(path))
            .with_context(|| format!("loading season data from {}", path))?,
        None => SeasonData::new(),
    };

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0);
    let mut app = App::new(data, now);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        log::error!("Calculator exited with error: {}", e);
        eprintln!("Error: {}", e);
    }

    log::info!("SeasonCalc shut down cleanly");
    result
}

/// Log to a file so output does not tear through the terminal UI
fn init_logging() {
    let log_file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open("seasoncalc.log");

    let Ok(log_file) = log_file else {
        return;
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")
    )
    .target(env_logger::Target::Pipe(Box::new(log_file)))
    .init();
}

/// Main input/render loop
fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal.draw(|frame| app.render(frame))?;

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events, not releases
                if key.kind == KeyEventKind::Press && app.handle_input(key) {
                    break;
                }
            }
        }
    }

    Ok(())
}
