use anyhow::{Context, Result, anyhow};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use super::backend::ClipboardBackend;
use crate::models::HistoryStore;

/// Delay between clipboard reads
pub const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Reads slower than this are reported; OS clipboard calls normally return in a few ms
const SLOW_READ_THRESHOLD: Duration = Duration::from_millis(250);

/// Result of a single clipboard read
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// New text was seen and handed to the history
    Observed(String),
    /// Clipboard still holds the last observed text
    Unchanged,
    /// Clipboard is empty or holds only whitespace
    Empty,
    /// The clipboard could not be read this cycle
    Failed,
    /// A read is still blocked; no new read is started until it returns
    Stalled,
}

/// Read running on a helper thread
struct PendingRead {
    rx: Receiver<Result<Option<String>>>,
    started: Instant,
    reported: bool,
}

/// Background clipboard monitor
///
/// Owns the last observed clipboard value; nothing else reads or writes it.
pub struct Poller {
    backend: Arc<dyn ClipboardBackend>,
    history: Arc<HistoryStore>,
    last_observed: Option<String>,
    pending: Option<PendingRead>,
    read_timeout: Duration,
    last_error: Option<String>,
}

impl Poller {
    pub fn new(backend: Arc<dyn ClipboardBackend>, history: Arc<HistoryStore>) -> Self {
        Poller {
            backend,
            history,
            last_observed: None,
            pending: None,
            read_timeout: SLOW_READ_THRESHOLD,
            last_error: None,
        }
    }

    /// How long `poll_once` waits for a read before reporting it as stalled
    pub fn with_read_timeout(mut self, read_timeout: Duration) -> Self {
        self.read_timeout = read_timeout;
        self
    }

    fn start_read(&self) -> Result<PendingRead> {
        let (tx, rx) = mpsc::channel();
        let backend = Arc::clone(&self.backend);
        thread::Builder::new()
            .name("clipboard-read".to_string())
            .spawn(move || {
                let _ = tx.send(backend.read_text());
            })
            .context("Failed to spawn clipboard read thread")?;

        Ok(PendingRead {
            rx,
            started: Instant::now(),
            reported: false,
        })
    }

    /// Wait for the current read, starting one if none is in flight
    /// Returns None while the read is still blocked
    fn await_read(&mut self) -> Option<Result<Option<String>>> {
        let mut pending = match self.pending.take() {
            Some(pending) => pending,
            None => match self.start_read() {
                Ok(pending) => pending,
                Err(e) => return Some(Err(e)),
            },
        };

        match pending.rx.recv_timeout(self.read_timeout) {
            Ok(read) => {
                let elapsed = pending.started.elapsed();
                if pending.reported {
                    log::info!(
                        "{} clipboard read returned after {}ms",
                        self.backend.name(),
                        elapsed.as_millis()
                    );
                } else if elapsed > SLOW_READ_THRESHOLD {
                    log::warn!(
                        "{} clipboard read took {}ms",
                        self.backend.name(),
                        elapsed.as_millis()
                    );
                }
                Some(read)
            }
            Err(RecvTimeoutError::Timeout) => {
                if !pending.reported {
                    log::warn!(
                        "{} clipboard read blocked for over {}ms",
                        self.backend.name(),
                        pending.started.elapsed().as_millis()
                    );
                    pending.reported = true;
                }
                self.pending = Some(pending);
                None
            }
            Err(RecvTimeoutError::Disconnected) => Some(Err(anyhow!(
                "Clipboard read thread exited without a result"
            ))),
        }
    }

    /// Log a read error at warn when it first appears or its message changes
    /// Repeats are logged at debug. Returns true if the warning was emitted.
    fn report_read_error(&mut self, error: &anyhow::Error) -> bool {
        let message = format!("{:#}", error);
        if self.last_error.as_deref() == Some(message.as_str()) {
            log::debug!("Clipboard still unreadable: {}", message);
            return false;
        }

        log::warn!("Error accessing clipboard: {}", message);
        self.last_error = Some(message);
        true
    }

    /// Read the clipboard once and record its text if it changed
    /// Read errors are logged and never propagated
    pub fn poll_once(&mut self) -> PollOutcome {
        let Some(read) = self.await_read() else {
            return PollOutcome::Stalled;
        };

        let content = match read {
            Ok(content) => {
                if self.last_error.take().is_some() {
                    log::info!("{} clipboard readable again", self.backend.name());
                }
                match content {
                    Some(text) => text,
                    None => return PollOutcome::Empty,
                }
            }
            Err(e) => {
                self.report_read_error(&e);
                return PollOutcome::Failed;
            }
        };

        let content = content.trim();
        if content.is_empty() {
            return PollOutcome::Empty;
        }

        if self.last_observed.as_deref() == Some(content) {
            return PollOutcome::Unchanged;
        }

        log::debug!("Clipboard changed ({} bytes)", content.len());
        self.last_observed = Some(content.to_string());
        self.history.insert_front(content);
        PollOutcome::Observed(content.to_string())
    }

    /// Run the poll loop on a background thread for the rest of the process
    pub fn spawn(mut self) -> Result<JoinHandle<()>> {
        log::info!(
            "Starting clipboard poller ({} backend, every {}ms)",
            self.backend.name(),
            POLL_INTERVAL.as_millis()
        );

        thread::Builder::new()
            .name("clipboard-poller".to_string())
            .spawn(move || {
                loop {
                    self.poll_once();
                    thread::sleep(POLL_INTERVAL);
                }
            })
            .context("Failed to spawn clipboard poller thread")
    }
}
