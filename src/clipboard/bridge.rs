use anyhow::{Result, bail};
use std::sync::Arc;

use super::backend::ClipboardBackend;
use super::poller::Poller;
use crate::models::HistoryStore;

/// Connects the platform clipboard to the shared history
///
/// The bridge is the single entry point for "make this the clipboard
/// content" actions. It is cheap to clone; clones share the backend and
/// the history.
#[derive(Clone)]
pub struct ClipboardBridge {
    backend: Option<Arc<dyn ClipboardBackend>>,
    history: Arc<HistoryStore>,
}

impl ClipboardBridge {
    /// Create a bridge backed by a platform clipboard
    pub fn new(backend: Arc<dyn ClipboardBackend>, history: Arc<HistoryStore>) -> Self {
        log::debug!("Clipboard bridge using {} backend", backend.name());
        ClipboardBridge {
            backend: Some(backend),
            history,
        }
    }

    /// Create a bridge with no platform clipboard
    /// Published text is only recorded in history and nothing is monitored
    pub fn detached(history: Arc<HistoryStore>) -> Self {
        ClipboardBridge {
            backend: None,
            history,
        }
    }

    pub fn history(&self) -> &Arc<HistoryStore> {
        &self.history
    }

    /// Whether a platform clipboard is attached
    pub fn is_live(&self) -> bool {
        self.backend.is_some()
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.as_ref().map_or("none", |b| b.name())
    }

    /// Write `text` to the clipboard and record it in history
    ///
    /// Surrounding whitespace is trimmed and blank text is ignored. A failed
    /// clipboard write is logged; the text is still recorded. Returns true
    /// if the text was published.
    pub fn publish(&self, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }

        if let Some(backend) = &self.backend
            && let Err(e) = backend.write_text(text)
        {
            log::warn!("Failed to write to clipboard: {:#}", e);
        }

        self.history.insert_front(text);
        true
    }

    /// Write `text` to the clipboard, failing if the write does not succeed
    ///
    /// Unlike [`ClipboardBridge::publish`], nothing is recorded unless the
    /// clipboard accepted the text, and a detached bridge is an error.
    /// Returns Ok(false) for blank text.
    pub fn copy_text(&self, text: &str) -> Result<bool> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(false);
        }

        let Some(backend) = &self.backend else {
            bail!("No clipboard backend available");
        };
        backend.write_text(text)?;

        self.history.insert_front(text);
        Ok(true)
    }

    /// Build a poller that feeds clipboard changes into this bridge's history
    /// Returns None for a detached bridge
    pub fn poller(&self) -> Option<Poller> {
        self.backend
            .as_ref()
            .map(|backend| Poller::new(Arc::clone(backend), Arc::clone(&self.history)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::testing::MemoryBackend;

    fn bridge_with(backend: &Arc<MemoryBackend>) -> ClipboardBridge {
        let backend: Arc<dyn ClipboardBackend> = backend.clone();
        ClipboardBridge::new(backend, Arc::new(HistoryStore::default()))
    }

    #[test]
    fn test_publish_writes_and_records_trimmed_text() {
        let backend = Arc::new(MemoryBackend::default());
        let bridge = bridge_with(&backend);

        assert!(bridge.publish("  hello world \n"));
        assert_eq!(backend.current().as_deref(), Some("hello world"));
        assert_eq!(bridge.history().snapshot(), vec!["hello world"]);
    }

    #[test]
    fn test_publish_blank_is_noop() {
        let backend = Arc::new(MemoryBackend::default());
        let bridge = bridge_with(&backend);

        assert!(!bridge.publish("   "));
        assert!(backend.writes.lock().unwrap().is_empty());
        assert!(bridge.history().is_empty());
    }

    #[test]
    fn test_publish_same_text_twice_records_once() {
        let backend = Arc::new(MemoryBackend::default());
        let bridge = bridge_with(&backend);

        bridge.publish("same");
        bridge.publish("same");
        assert_eq!(backend.writes.lock().unwrap().len(), 2);
        assert_eq!(bridge.history().snapshot(), vec!["same"]);
    }

    #[test]
    fn test_publish_records_even_if_write_fails() {
        let backend = Arc::new(MemoryBackend::default());
        *backend.fail_writes.lock().unwrap() = true;
        let bridge = bridge_with(&backend);

        assert!(bridge.publish("typed"));
        assert_eq!(backend.current(), None);
        assert_eq!(bridge.history().snapshot(), vec!["typed"]);
    }

    #[test]
    fn test_copy_text_reports_failed_write() {
        let backend = Arc::new(MemoryBackend::default());
        *backend.fail_writes.lock().unwrap() = true;
        let bridge = bridge_with(&backend);

        let err = bridge.copy_text("lost").unwrap_err();
        assert!(err.to_string().contains("clipboard busy"));
        assert!(bridge.history().is_empty());

        *backend.fail_writes.lock().unwrap() = false;
        assert!(bridge.copy_text(" kept ").unwrap());
        assert_eq!(backend.current().as_deref(), Some("kept"));
        assert_eq!(bridge.history().snapshot(), vec!["kept"]);
    }

    #[test]
    fn test_copy_text_blank_and_detached() {
        let backend = Arc::new(MemoryBackend::default());
        assert!(!bridge_with(&backend).copy_text("  ").unwrap());

        let detached = ClipboardBridge::detached(Arc::new(HistoryStore::default()));
        assert!(detached.copy_text("text").is_err());
        assert!(detached.history().is_empty());
    }

    #[test]
    fn test_detached_bridge_records_only() {
        let bridge = ClipboardBridge::detached(Arc::new(HistoryStore::default()));
        assert!(!bridge.is_live());
        assert!(bridge.poller().is_none());

        assert!(bridge.publish("manual"));
        assert_eq!(bridge.history().snapshot(), vec!["manual"]);
    }
}
