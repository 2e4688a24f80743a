use anyhow::{Context, Result, anyhow};
use std::io::{Read, Write};
use std::process::{Command, Stdio};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use super::backend::ClipboardBackend;

/// Messages wl-paste prints when there is nothing to paste
const EMPTY_CLIPBOARD_MARKERS: &[&str] = &["Nothing is copied", "No selection", "No suitable type"];

/// A wl-paste still running after this is killed
/// It blocks when the selection owner stops answering
const PASTE_TIMEOUT: Duration = Duration::from_secs(2);

/// Wayland clipboard backend using wl-clipboard tools
/// Requires wl-copy and wl-paste to be installed
pub struct WaylandBackend;

impl WaylandBackend {
    /// Create a new Wayland clipboard backend
    pub fn new() -> Result<Self> {
        for tool in ["wl-copy", "wl-paste"] {
            Command::new(tool)
                .arg("--version")
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .status()
                .with_context(|| format!("{} not found. Install wl-clipboard package", tool))?;
        }

        log::debug!("WaylandBackend initialized successfully");
        Ok(WaylandBackend)
    }
}

/// wl-copy invocation for text; the text itself goes through stdin so its
/// size is not bounded by the argument length limit
fn copy_command() -> Command {
    let mut command = Command::new("wl-copy");
    command.arg("--type").arg("text/plain");
    command
}

impl ClipboardBackend for WaylandBackend {
    fn read_text(&self) -> Result<Option<String>> {
        let mut child = Command::new("wl-paste")
            .arg("--no-newline")
            .arg("--type")
            .arg("text")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .context("Failed to spawn wl-paste")?;

        let mut stdout = child
            .stdout
            .take()
            .ok_or_else(|| anyhow!("wl-paste stdout not captured"))?;

        // Drain stdout on a helper thread so a large selection cannot fill the
        // pipe while we wait on the deadline
        let (tx, rx) = mpsc::channel();
        thread::Builder::new()
            .name("wl-paste-reader".to_string())
            .spawn(move || {
                let mut buf = Vec::new();
                let _ = tx.send(stdout.read_to_end(&mut buf).map(|_| buf));
            })
            .context("Failed to spawn wl-paste reader thread")?;

        let stdout = match rx.recv_timeout(PASTE_TIMEOUT) {
            Ok(read) => read.context("Failed to read wl-paste output")?,
            Err(_) => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(anyhow!(
                    "wl-paste did not finish within {}ms and was killed",
                    PASTE_TIMEOUT.as_millis()
                ));
            }
        };

        let status = child.wait().context("Failed to wait for wl-paste")?;

        if !status.success() {
            let mut stderr = String::new();
            if let Some(mut pipe) = child.stderr.take() {
                let _ = pipe.read_to_string(&mut stderr);
            }
            if EMPTY_CLIPBOARD_MARKERS.iter().any(|m| stderr.contains(m)) {
                return Ok(None);
            }
            return Err(anyhow!(
                "wl-paste failed with status {}: {}",
                status,
                stderr.trim()
            ));
        }

        let text = String::from_utf8(stdout).context("Clipboard text is not valid UTF-8")?;
        Ok(Some(text))
    }

    fn write_text(&self, text: &str) -> Result<()> {
        let mut child = copy_command()
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .context("Failed to spawn wl-copy")?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(text.as_bytes())
                .context("Failed to write text to wl-copy stdin")?;
        }

        let status = child.wait().context("Failed to wait for wl-copy")?;

        if !status.success() {
            return Err(anyhow!("wl-copy failed with status: {}", status));
        }

        log::debug!("Wrote {} bytes text to clipboard", text.len());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "Wayland"
    }
}
