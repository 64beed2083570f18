use clap::Parser;
use crossterm::{
    event::{self, DisableFocusChange, EnableFocusChange, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use focus_garden::{app::App, config::{self, Config}, ui, Result};
use ratatui::prelude::*;
use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::Mutex,
    time::{Duration, Instant},
};
use tracing::info;
use tracing_subscriber::EnvFilter;

const FRAME_RATE: Duration = Duration::from_millis(50);

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser)]
#[command(author, version, about = "🌱 focus-garden - grow a plant while you focus")]
struct Args {
    /// Work period length in minutes
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=60))]
    work: Option<u32>,
    /// Break length in minutes
    #[arg(short, long = "break", value_parser = clap::value_parser!(u32).range(1..=30))]
    break_minutes: Option<u32>,
    /// Config file (defaults to ./focus-garden/config.json)
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(long)]
    no_sound: bool,
    /// Disable desktop notifications
    #[arg(long)]
    no_notify: bool,
    /// Seed for the flower picker
    #[arg(long)]
    seed: Option<u64>,
    /// Write logs to this file (filter with RUST_LOG)
    #[arg(long)]
    log: Option<PathBuf>,
}

fn init_logging(path: &Path) -> Result<()> {
    let file = fs::OpenOptions::new().create(true).append(true).open(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

// ============================================================================
// Main
// ============================================================================

fn main() -> Result<()> {
    let args = Args::parse();
    if let Some(path) = &args.log {
        init_logging(path)?;
    }

    let config_path = args.config.clone().unwrap_or_else(|| config::get_path("config.json"));
    let mut config = Config::load(&config_path)?;

    // CLI overrides
    if let Some(w) = args.work { config.work_minutes = w; }
    if let Some(b) = args.break_minutes { config.break_minutes = b; }
    if args.no_sound { config.sound_enabled = false; }
    if args.no_notify { config.notifications_enabled = false; }

    info!(
        work = config.work_minutes,
        break_minutes = config.break_minutes,
        config = %config_path.display(),
        "starting focus garden"
    );
    let mut app = App::new(&config, args.seed);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableFocusChange)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableFocusChange)?;
    terminal.show_cursor()?;

    let stats = app.session.ledger().stats();
    info!(sessions = stats.total_sessions, minutes = stats.total_minutes, "exiting");
    res
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::render_ui(f, app))?;

        if event::poll(FRAME_RATE)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if app.handle_key(key, Instant::now()) {
                        return Ok(());
                    }
                }
                Event::FocusLost => app.focus_lost(Instant::now()),
                _ => {}
            }
        }

        app.update(Instant::now());
    }
}
