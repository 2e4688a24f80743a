use anyhow::{Context, Result};
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::fs;
use std::io::Write;
use std::path::Path;
use std::sync::mpsc::Sender;
use std::sync::{Mutex, PoisonError};
use std::time::Instant;
use tracing_appender::rolling::{RollingFileAppender, Rotation};

/// Log message shown in the TUI status line
#[derive(Debug, Clone)]
pub struct FlashMessage {
    pub level: Level,
    pub message: String,
    pub timestamp: Instant,
}

/// Logger for TUI mode: the terminal belongs to the UI, so records go to a
/// log file and, above `flash_level`, to the status line
struct ClipringLogger {
    file_writer: Mutex<Box<dyn Write + Send>>,
    flash_tx: Option<Mutex<Sender<FlashMessage>>>,
    file_level: LevelFilter,
    flash_level: LevelFilter,
}

impl Log for ClipringLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.file_level || metadata.level() <= self.flash_level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let message = format!("{}", record.args());
        let level = record.level();

        if level <= self.file_level {
            let mut writer = self
                .file_writer
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            let _ = writeln!(
                writer,
                "{} [{}] {}: {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                level,
                record.target(),
                message
            );
        }

        if level <= self.flash_level
            && let Some(tx) = &self.flash_tx
        {
            let tx = tx.lock().unwrap_or_else(PoisonError::into_inner);
            let _ = tx.send(FlashMessage {
                level,
                message,
                timestamp: Instant::now(),
            });
        }
    }

    fn flush(&self) {
        let mut writer = self
            .file_writer
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let _ = writer.flush();
    }
}

/// Parse log level string to LevelFilter
pub fn parse_level(level_str: &str) -> LevelFilter {
    match level_str.trim().to_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" | "warning" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

/// Install the TUI logger writing to a daily rotated file in `log_dir`
pub fn init_tui_logger(
    log_dir: &Path,
    flash_tx: Option<Sender<FlashMessage>>,
    file_level: &str,
    flash_level: &str,
) -> Result<()> {
    fs::create_dir_all(log_dir)
        .with_context(|| format!("Failed to create log directory {:?}", log_dir))?;

    // Size-based rotation isn't available in tracing-appender; daily with 3 files kept
    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .max_log_files(3)
        .filename_prefix("clipring")
        .filename_suffix("log")
        .build(log_dir)
        .context("Failed to create rotating file appender")?;

    let file_level = parse_level(file_level);
    let flash_level = parse_level(flash_level);

    let logger = ClipringLogger {
        file_writer: Mutex::new(Box::new(file_appender)),
        flash_tx: flash_tx.map(Mutex::new),
        file_level,
        flash_level,
    };

    log::set_boxed_logger(Box::new(logger)).context("Failed to set global logger")?;
    log::set_max_level(file_level.max(flash_level));

    Ok(())
}

/// Install a stderr logger for headless commands
/// RUST_LOG takes precedence over `default_level`
pub fn init_cli_logger(default_level: &str) {
    let default_filter = parse_level(default_level).to_string().to_lowercase();
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(default_filter),
    )
    .format_timestamp_millis()
    .try_init();
}
