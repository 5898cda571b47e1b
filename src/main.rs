//! artgrid - Browse random artworks in the terminal
//!
//! A terminal UI application that shows random artworks from the Art
//! Institute of Chicago collection, one at a time, with adjustable colors.

use std::fs::OpenOptions;
use std::io;
use std::panic;
use std::process::ExitCode;
use std::sync::Mutex;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;
use tracing_subscriber::EnvFilter;

use artgrid::app::{App, AppState};
use artgrid::cli::{Cli, StartupConfig};
use artgrid::store::FileStore;
use artgrid::ui;

/// Default log filter when `RUST_LOG` is not set
const DEFAULT_LOG_FILTER: &str = "artgrid=info";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Sends logs to `artgrid.log` in the cache directory so they never draw over the UI.
/// Logging stays off if the file cannot be opened.
fn init_file_logging() {
    let Some(dir) = FileStore::new().map(|store| store.dir().to_path_buf()) else {
        return;
    };
    if std::fs::create_dir_all(&dir).is_err() {
        return;
    }
    let Ok(file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("artgrid.log"))
    else {
        return;
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
}

fn init_stderr_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(io::stderr)
        .try_init();
}

/// Sets up a panic hook that restores the terminal before printing the panic message.
fn setup_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));
}

/// Renders the UI based on the current application state
fn render_ui(frame: &mut ratatui::Frame, app: &App) {
    ui::render_artwork_view(frame, app);
    if app.show_help {
        ui::render_help_overlay(frame);
    }
    if let Some(prompt) = &app.color_prompt {
        ui::render_color_prompt(frame, prompt, app.settings.color(prompt.target));
    }
}

/// Prints the current batch to stdout instead of starting the UI
async fn run_list(config: StartupConfig) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let mut app = App::with_startup_config(config);
    app.load_records().await;

    match &app.state {
        AppState::Failed(reason) => {
            eprintln!("error: {}", reason);
            Ok(ExitCode::FAILURE)
        }
        _ => {
            print!("{}", ui::format_listing(&app.records));
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn run_tui(config: StartupConfig) -> Result<ExitCode, Box<dyn std::error::Error>> {
    setup_panic_hook();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::with_startup_config(config);

    // Initial render to show loading state
    terminal.draw(|f| render_ui(f, &app))?;
    app.load_records().await;

    loop {
        terminal.draw(|f| render_ui(f, &app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        if app.should_quit {
            break;
        }

        if app.reload_requested {
            if app.records.is_empty() {
                app.state = AppState::Loading;
            }
            terminal.draw(|f| render_ui(f, &app))?;
            app.load_records().await;
        }
    }

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    Ok(ExitCode::SUCCESS)
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = match StartupConfig::from_cli(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            return Ok(ExitCode::from(2));
        }
    };

    if config.list_only {
        init_stderr_logging();
        info!("listing artworks");
        return run_list(config).await;
    }

    init_file_logging();
    info!("starting artgrid");
    run_tui(config).await
}
