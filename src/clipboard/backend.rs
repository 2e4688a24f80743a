use anyhow::Result;

/// Trait for platform clipboard access
/// Implementations must be usable from both the UI thread and the poller
pub trait ClipboardBackend: Send + Sync {
    /// Read the current clipboard text
    /// Returns `Ok(None)` when the clipboard holds no text
    fn read_text(&self) -> Result<Option<String>>;

    /// Write text to clipboard
    fn write_text(&self, text: &str) -> Result<()>;

    /// Get the backend name (for logging/debugging)
    fn name(&self) -> &'static str;
}
