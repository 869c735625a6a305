//! Line renderer with a per-line cache.
//!
//! The renderer keeps one rendered string per buffer line (gutter plus
//! display text) and refreshes only what an [`UpdateScope`] says changed.

use sudo_edit_core::{TextBuffer, UpdateScope};

use crate::layout::Layout;

/// Glyph shown in place of control characters.
const CONTROL_GLYPH: char = '\u{00B7}';

/// What the painter has to redraw after an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Repaint {
    /// Only the cursor moved.
    Cursor,
    /// These buffer rows changed.
    Lines(Vec<usize>),
    /// Every visible row must be redrawn.
    Full,
}

/// Cache of rendered lines.
#[derive(Debug, Default)]
pub struct LineRenderer {
    cache: Vec<String>,
    gutter_width: u16,
}

impl LineRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refreshes the cache according to `scope` and returns what to paint.
    ///
    /// A cache that no longer matches the buffer's shape is rebuilt in full
    /// whatever the scope says.
    pub fn update(&mut self, buffer: &TextBuffer, scope: UpdateScope) -> Repaint {
        let gutter_width = Layout::gutter_width(buffer.line_count());
        let stale = self.cache.len() != buffer.line_count() || self.gutter_width != gutter_width;
        if stale || scope == UpdateScope::All {
            self.rebuild(buffer, gutter_width);
            return Repaint::Full;
        }

        match scope {
            UpdateScope::CursorOnly => Repaint::Cursor,
            UpdateScope::Line(row) => {
                if let Some(text) = buffer.line(row) {
                    self.cache[row] = render_line(row, text, gutter_width);
                }
                Repaint::Lines(vec![row])
            }
            UpdateScope::All => Repaint::Full,
        }
    }

    /// Drops the cache so the next update rebuilds everything.
    pub fn invalidate(&mut self) {
        self.cache.clear();
    }

    pub fn rendered_line(&self, row: usize) -> Option<&str> {
        self.cache.get(row).map(String::as_str)
    }

    pub fn gutter_width(&self) -> u16 {
        self.gutter_width
    }

    fn rebuild(&mut self, buffer: &TextBuffer, gutter_width: u16) {
        log::trace!("Rebuilding {} rendered lines", buffer.line_count());
        self.gutter_width = gutter_width;
        self.cache = buffer
            .lines()
            .iter()
            .enumerate()
            .map(|(row, text)| render_line(row, text, gutter_width))
            .collect();
    }
}

/// Renders one line: right-aligned line number, a space, then the text with
/// control characters made visible. Keeps one char per buffer column.
fn render_line(row: usize, text: &str, gutter_width: u16) -> String {
    let number_width = usize::from(gutter_width.saturating_sub(1));
    let mut out = format!("{:>width$} ", row + 1, width = number_width);
    out.extend(
        text.chars()
            .map(|ch| if ch.is_control() { CONTROL_GLYPH } else { ch }),
    );
    out
}
