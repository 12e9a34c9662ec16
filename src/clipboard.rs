//! Two-tier clipboard: system clipboard first, terminal escape fallback.
//!
//! The primary tier talks to the OS clipboard through `arboard`. When that
//! is unavailable (headless session, SSH, missing display server) the
//! fallback writes an OSC 52 sequence to the terminal, which most modern
//! terminals turn into a clipboard write on the user's side.

use std::io::Write;
use std::sync::Mutex;

use base64::Engine;
use tracing::{debug, warn};

/// Errors from clipboard writes.
#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    #[error("system clipboard unavailable: {0}")]
    System(String),

    #[error("terminal clipboard write failed: {0}")]
    Terminal(#[from] std::io::Error),
}

/// A place text can be copied to.
pub trait ClipboardBackend: Send + Sync {
    fn write(&self, text: &str) -> Result<(), ClipboardError>;
}

/// OS clipboard via `arboard`. A fresh handle per write.
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl ClipboardBackend for SystemClipboard {
    fn write(&self, text: &str) -> Result<(), ClipboardError> {
        let mut clip = arboard::Clipboard::new().map_err(|e| ClipboardError::System(e.to_string()))?;
        clip.set_text(text.to_string())
            .map_err(|e| ClipboardError::System(e.to_string()))
    }
}

/// OSC 52 escape sequence written to a terminal stream.
pub struct Osc52Clipboard<W: Write + Send> {
    out: Mutex<W>,
}

impl Osc52Clipboard<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> Osc52Clipboard<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(|e| e.into_inner())
    }
}

/// `ESC ] 52 ; c ; <base64> BEL`
pub fn osc52_sequence(text: &str) -> String {
    let payload = base64::engine::general_purpose::STANDARD.encode(text.as_bytes());
    format!("\x1b]52;c;{payload}\x07")
}

impl<W: Write + Send> ClipboardBackend for Osc52Clipboard<W> {
    fn write(&self, text: &str) -> Result<(), ClipboardError> {
        let mut out = self.out.lock().unwrap_or_else(|e| e.into_inner());
        out.write_all(osc52_sequence(text).as_bytes())?;
        out.flush()?;
        Ok(())
    }
}

/// Primary backend with a fallback, tried in order.
pub struct TwoTierClipboard {
    primary: Box<dyn ClipboardBackend>,
    fallback: Box<dyn ClipboardBackend>,
}

impl TwoTierClipboard {
    pub fn new(primary: Box<dyn ClipboardBackend>, fallback: Box<dyn ClipboardBackend>) -> Self {
        Self { primary, fallback }
    }

    /// System clipboard, falling back to OSC 52 on stdout.
    pub fn detect() -> Self {
        Self::new(Box::new(SystemClipboard), Box::new(Osc52Clipboard::stdout()))
    }
}

impl ClipboardBackend for TwoTierClipboard {
    fn write(&self, text: &str) -> Result<(), ClipboardError> {
        match self.primary.write(text) {
            Ok(()) => {
                debug!(chars = text.chars().count(), "copied via primary clipboard");
                Ok(())
            }
            Err(e) => {
                warn!("primary clipboard failed, using fallback: {e}");
                self.fallback.write(text)
            }
        }
    }
}
