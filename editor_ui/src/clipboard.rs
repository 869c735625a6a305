//! Clipboard access for paste.
//!
//! Reads the system clipboard via arboard and turns its text into the
//! ordered line segments the buffer's paste command expects.

use arboard::Clipboard;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(#[from] arboard::Error),
}

/// Splits clipboard text on line breaks. `\r\n`, `\n` and a lone `\r` each
/// end a line; a trailing line break yields a trailing empty segment.
///
/// Terminals commonly send bracketed pastes with `\r` line breaks.
pub fn split_clipboard_text(text: &str) -> Vec<String> {
    text.replace("\r\n", "\n")
        .split(['\n', '\r'])
        .map(String::from)
        .collect()
}

/// Lazily connected handle to the system clipboard.
#[derive(Default)]
pub struct ClipboardReader {
    clipboard: Option<Clipboard>,
}

impl ClipboardReader {
    pub fn new() -> Self {
        Self::default()
    }

    fn clipboard(&mut self) -> Result<&mut Clipboard, ClipboardError> {
        let clipboard = match self.clipboard.take() {
            Some(clipboard) => clipboard,
            None => {
                let clipboard = Clipboard::new()?;
                log::debug!("Connected to system clipboard");
                clipboard
            }
        };
        Ok(self.clipboard.insert(clipboard))
    }

    /// Reads the clipboard text as paste segments.
    ///
    /// An empty or non-text clipboard yields no segments.
    pub fn read_lines(&mut self) -> Result<Vec<String>, ClipboardError> {
        let clipboard = self.clipboard()?;

        #[cfg(target_os = "linux")]
        let text = {
            use arboard::{GetExtLinux, LinuxClipboardKind};
            let selected = clipboard.get().clipboard(LinuxClipboardKind::Clipboard).text();
            match selected {
                Ok(text) if !text.is_empty() => Ok(text),
                // Fall back to the PRIMARY selection
                _ => clipboard.get().clipboard(LinuxClipboardKind::Primary).text(),
            }
        };

        #[cfg(not(target_os = "linux"))]
        let text = clipboard.get_text();

        match text {
            Ok(text) => Ok(split_clipboard_text(&text)),
            Err(arboard::Error::ContentNotAvailable) => Ok(Vec::new()),
            Err(err) => Err(err.into()),
        }
    }
}
