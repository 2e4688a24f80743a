use anyhow::{Context, Result};
use arboard::Clipboard;
use std::sync::{Mutex, PoisonError};

use super::backend::ClipboardBackend;

/// Cross-platform clipboard backend built on arboard (X11, macOS, Windows)
///
/// arboard needs `&mut` access, so the handle sits behind a mutex. On X11
/// the handle also owns the selection we publish, so it lives as long as
/// the backend.
pub struct SystemBackend {
    clipboard: Mutex<Clipboard>,
}

impl SystemBackend {
    pub fn new() -> Result<Self> {
        let clipboard = Clipboard::new().context("Failed to open system clipboard")?;
        log::debug!("SystemBackend initialized successfully");
        Ok(SystemBackend {
            clipboard: Mutex::new(clipboard),
        })
    }
}

impl ClipboardBackend for SystemBackend {
    fn read_text(&self) -> Result<Option<String>> {
        let mut clipboard = self.clipboard.lock().unwrap_or_else(PoisonError::into_inner);
        match clipboard.get_text() {
            Ok(text) => Ok(Some(text)),
            Err(arboard::Error::ContentNotAvailable) => Ok(None),
            Err(e) => Err(e).context("Failed to read clipboard text"),
        }
    }

    fn write_text(&self, text: &str) -> Result<()> {
        let mut clipboard = self.clipboard.lock().unwrap_or_else(PoisonError::into_inner);
        clipboard
            .set_text(text)
            .context("Failed to write clipboard text")?;

        log::debug!("Wrote {} bytes text to clipboard", text.len());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "System"
    }
}
