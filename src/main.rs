mod app;
mod clock;
mod duration;
mod error;
mod handlers;
mod probe;
mod rate;
mod state;
mod store;
mod tracker;
mod ui;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use directories::ProjectDirs;
use ratatui::prelude::*;
use std::path::PathBuf;
use std::{io, time::Duration};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::app::App;
use crate::clock::SystemClock;
use crate::duration::{FormatOptions, UnitTable};
use crate::handlers::handle_global_input;
use crate::probe::SimulatedProbe;
use crate::rate::Window;
use crate::state::AppState;
use crate::tracker::ExpTracker;
use crate::ui::render;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Sampling interval in seconds
    #[arg(long, env, default_value = "5")]
    interval: u64,

    /// Projection window for displayed rates
    #[arg(long, env, value_enum, default_value = "minute")]
    window: Window,

    /// Maximum number of time units in the time-to-level-up text
    #[arg(long, env, default_value = "2")]
    largest_units: usize,

    /// Decimal precision on the smallest displayed time unit
    #[arg(long, env, default_value = "2")]
    max_decimal_points: usize,

    /// String between magnitudes, unit labels and unit groups
    #[arg(long, env, default_value = "")]
    spacer: String,

    /// Simulated XP gained per sample
    #[arg(long, default_value = "250")]
    sim_gain: i64,

    /// Simulated XP required per level
    #[arg(long, default_value = "100000")]
    sim_exp_per_level: i64,
}

fn initialize_logging() -> Result<(PathBuf, WorkerGuard)> {
    let proj_dirs = ProjectDirs::from("com", "xp-tui", "xp-tui")
        .ok_or_else(|| anyhow::anyhow!("Failed to resolve project directories"))?;
    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)?;

    let log_file = data_dir.join("debug.log");
    let appender = tracing_appender::rolling::never(data_dir, "debug.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_writer(writer)
        .with_ansi(false)
        .init();

    Ok((log_file, guard))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let (log_path, _guard) = initialize_logging()?;
    tracing::info!(?log_path, "Starting application");

    // Configuration errors surface here, before the terminal is touched.
    let unit_table = UnitTable::short_english();
    let format_options =
        FormatOptions::new(cli.largest_units, cli.max_decimal_points, cli.spacer.clone())?;

    let tracker = ExpTracker::new(
        Box::new(SimulatedProbe::new(cli.sim_gain, cli.sim_exp_per_level)),
        Box::new(SystemClock),
    );
    let state = AppState::new(
        tracker,
        cli.window,
        unit_table,
        format_options,
        Duration::from_secs(cli.interval),
    );
    let app = App::new(state);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("Error: {err}");
    }

    Ok(())
}

async fn run_app<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    loop {
        terminal.draw(|f| render(&mut app, f))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                handle_global_input(&mut app, key)?;
            }
        }

        if let Err(e) = app.refresh() {
            app.state.set_error(format!("Error refreshing data: {}", e));
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
