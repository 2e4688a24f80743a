pub mod backend;
pub mod bridge;
pub mod poller;
pub mod system;
pub mod wayland;

use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::env;
use std::sync::Arc;

use crate::models::HistoryStore;

pub use backend::ClipboardBackend;
pub use bridge::ClipboardBridge;
pub use poller::{POLL_INTERVAL, PollOutcome, Poller};
pub use system::SystemBackend;
pub use wayland::WaylandBackend;

/// Which clipboard backend to use
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Wayland when WAYLAND_DISPLAY is set, otherwise the system clipboard
    #[default]
    Auto,
    /// wl-clipboard tools
    Wayland,
    /// Native clipboard via arboard (X11, macOS, Windows)
    System,
}

/// Create a clipboard backend
/// In `Auto` mode Wayland is detected via the WAYLAND_DISPLAY environment variable
/// and falls back to the system clipboard if wl-clipboard is missing
pub fn create_backend(kind: BackendKind) -> Result<Arc<dyn ClipboardBackend>> {
    match kind {
        BackendKind::Wayland => Ok(Arc::new(WaylandBackend::new()?)),
        BackendKind::System => Ok(Arc::new(SystemBackend::new()?)),
        BackendKind::Auto => {
            if env::var("WAYLAND_DISPLAY").is_ok() {
                log::info!("Detected Wayland display server");
                match WaylandBackend::new() {
                    Ok(backend) => return Ok(Arc::new(backend)),
                    Err(e) => log::warn!("Wayland backend unavailable, trying system clipboard: {:#}", e),
                }
            }

            SystemBackend::new()
                .map(|backend| Arc::new(backend) as Arc<dyn ClipboardBackend>)
                .map_err(|e| anyhow!("No usable clipboard backend: {:#}", e))
        }
    }
}

/// Connect the history to the platform clipboard
///
/// If no backend can be opened the error is logged and a detached bridge is
/// returned, so the app keeps working with manual entry only.
pub fn connect(kind: BackendKind, history: Arc<HistoryStore>) -> ClipboardBridge {
    match create_backend(kind) {
        Ok(backend) => ClipboardBridge::new(backend, history),
        Err(e) => {
            log::error!("Clipboard unavailable, live monitoring disabled: {:#}", e);
            ClipboardBridge::detached(history)
        }
    }
}

/// Start the background poller for a live bridge
/// Returns false if the bridge is detached or the thread could not start
pub fn start_monitoring(bridge: &ClipboardBridge) -> bool {
    let Some(poller) = bridge.poller() else {
        return false;
    };

    match poller.spawn() {
        Ok(_handle) => true,
        Err(e) => {
            log::error!("Clipboard monitoring disabled: {:#}", e);
            false
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use testing::MemoryBackend;

    #[test]
    fn test_detached_bridge_does_not_monitor() {
        let bridge = ClipboardBridge::detached(Arc::new(HistoryStore::default()));
        assert!(!start_monitoring(&bridge));
    }

    #[test]
    fn test_live_bridge_starts_monitoring() {
        let backend: Arc<dyn ClipboardBackend> = Arc::new(MemoryBackend::default());
        let bridge = ClipboardBridge::new(backend, Arc::new(HistoryStore::default()));
        assert!(start_monitoring(&bridge));
    }

    #[test]
    fn test_backend_kind_names() {
        use clap::ValueEnum;

        assert_eq!(BackendKind::from_str("wayland", true), Ok(BackendKind::Wayland));
        assert_eq!(BackendKind::from_str("system", true), Ok(BackendKind::System));
        assert!(BackendKind::from_str("x11", true).is_err());
    }
}
