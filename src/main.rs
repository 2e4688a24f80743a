use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use ratatui::DefaultTerminal;
use ratatui::crossterm::event::{self, Event, KeyEventKind};
use std::io::{self, Read};
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc;
use std::time::Duration;

use clipring::app::App;
use clipring::clipboard::{self, BackendKind, ClipboardBridge};
use clipring::config::{self, Config};
use clipring::logging;
use clipring::models::{HistoryChange, HistoryStore, parse_max_size, preview};

/// How often the UI wakes up to pick up history changes without input
const UI_TICK: Duration = Duration::from_millis(100);

#[derive(Parser)]
#[command(name = "clipring")]
#[command(about = "Clipboard history in your terminal", long_about = None)]
struct Cli {
    /// Read settings from this TOML file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Number of entries to keep (overrides the config file)
    #[arg(short = 'n', long, global = true, value_parser = parse_max_size)]
    max_history: Option<NonZeroUsize>,

    /// Clipboard backend (overrides the config file)
    #[arg(short, long, global = true, value_enum)]
    backend: Option<BackendKind>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Watch the clipboard and print each new entry (no TUI)
    Watch,

    /// Copy text to the clipboard (reads stdin when TEXT is omitted)
    Copy {
        /// Text to copy
        text: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load_or_default(cli.config.as_deref())?;
    if let Some(max_history) = cli.max_history {
        config.general.max_history = max_history;
    }
    if let Some(backend) = cli.backend {
        config.general.backend = backend;
    }

    match cli.command {
        Some(Commands::Watch) => cmd_watch(&config),
        Some(Commands::Copy { text }) => cmd_copy(&config, text),
        None => cmd_tui(&config),
    }
}

fn new_history(config: &Config) -> Arc<HistoryStore> {
    Arc::new(HistoryStore::new(config.general.max_history))
}

/// Run the interactive TUI
fn cmd_tui(config: &Config) -> Result<()> {
    let (flash_tx, flash_rx) = mpsc::channel();
    let log_dir = config::log_directory()?;
    logging::init_tui_logger(
        &log_dir,
        Some(flash_tx),
        &config.general.log_level,
        &config.general.flash_level,
    )?;
    log::info!("Starting clipring TUI");

    let bridge = clipboard::connect(config.general.backend, new_history(config));
    clipboard::start_monitoring(&bridge);

    let mut app = App::new(
        bridge,
        Some(flash_rx),
        Duration::from_millis(config.general.flash_message_duration_ms),
    );

    let mut terminal = ratatui::init();
    let result = run_event_loop(&mut terminal, &mut app);
    ratatui::restore();

    log::info!("Exiting clipring TUI");
    result
}

fn run_event_loop(terminal: &mut DefaultTerminal, app: &mut App) -> Result<()> {
    while !app.should_quit {
        app.sync_history();
        app.poll_flash_messages();
        app.prune_flash_messages();

        terminal
            .draw(|frame| app.draw(frame))
            .context("Failed to draw frame")?;

        if event::poll(UI_TICK).context("Failed to poll terminal events")? {
            let event = event::read().context("Failed to read terminal event")?;
            if let Event::Key(key) = event
                && key.kind == KeyEventKind::Press
            {
                app.handle_key(key);
            }
        }
    }
    Ok(())
}

/// Print every newly recorded clipboard entry until interrupted
fn cmd_watch(config: &Config) -> Result<()> {
    logging::init_cli_logger(&config.general.log_level);

    let bridge = clipboard::connect(config.general.backend, new_history(config));
    let changes = bridge.history().subscribe();
    if !clipboard::start_monitoring(&bridge) {
        bail!("Clipboard monitoring is unavailable");
    }

    for change in changes {
        if let HistoryChange::Inserted(text) = change {
            println!(
                "{} {}",
                chrono::Local::now().format("%H:%M:%S"),
                preview(&text, 100)
            );
        }
    }

    Ok(())
}

/// Publish text from the command line or stdin
fn cmd_copy(config: &Config, text: Option<String>) -> Result<()> {
    logging::init_cli_logger(&config.general.log_level);

    let text = match text {
        Some(text) => text,
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read from stdin")?;
            buffer
        }
    };

    let bridge: ClipboardBridge = clipboard::connect(config.general.backend, new_history(config));
    if bridge.copy_text(&text)? {
        log::info!("Copied {} bytes to clipboard", text.trim().len());
    } else {
        log::debug!("Nothing to copy, input was blank");
    }

    Ok(())
}
