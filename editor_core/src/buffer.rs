//! The text buffer: lines plus a single cursor.

use crate::command::{self, Command, Direction, UpdateScope};
use crate::cursor::{clamp_signed, Position};
use crate::document::{char_len, Document};
use crate::error::CommandError;

/// An editable buffer of lines with one cursor.
///
/// Every command leaves the buffer with at least one line and the cursor on
/// a valid insertion point, and reports how much of the view it touched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBuffer {
    document: Document,
    cursor: Position,
}

impl TextBuffer {
    /// Creates a buffer with one empty line and the cursor at (0, 0).
    pub fn new() -> Self {
        Self {
            document: Document::new(),
            cursor: Position::zero(),
        }
    }

    /// Creates a buffer from an ordered sequence of lines.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            document: Document::from_lines(lines),
            cursor: Position::zero(),
        }
    }

    /// Creates a buffer from newline-separated text.
    pub fn from_text(text: &str) -> Self {
        Self {
            document: Document::from_text(text),
            cursor: Position::zero(),
        }
    }

    /// Returns the content with lines joined by `\n`.
    pub fn to_text(&self) -> String {
        self.document.to_text()
    }

    pub fn lines(&self) -> &[String] {
        self.document.lines()
    }

    pub fn line(&self, row: usize) -> Option<&str> {
        self.document.line(row)
    }

    pub fn line_count(&self) -> usize {
        self.document.line_count()
    }

    /// Length of a line in characters.
    pub fn line_len(&self, row: usize) -> usize {
        self.document.line_len(row)
    }

    pub fn cursor(&self) -> Position {
        self.cursor
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Applies a command and returns the redraw it requires.
    ///
    /// Invalid payloads are rejected before anything is modified.
    pub fn apply(&mut self, command: Command) -> Result<UpdateScope, CommandError> {
        if let Err(err) = command.validate() {
            log::debug!("Rejected {:?}: {}", command, err);
            return Err(err);
        }
        log::trace!("Applying {:?} at {:?}", command, self.cursor);

        let scope = match command {
            Command::InsertChar(ch) => self.insert_validated(&ch.to_string()),
            Command::Backspace { whole_line } => self.backspace(whole_line),
            Command::Move {
                direction,
                whole_line,
            } => self.move_cursor(direction, whole_line),
            Command::SplitLine => self.split_line(),
            Command::PasteLines(segments) => self.paste_validated(segments.as_slice()),
            Command::PlaceCursorAt { row, column } => self.place_cursor_at(row, column),
        };
        self.check_invariants();
        Ok(scope)
    }

    // ==================== Text Editing ====================

    /// Inserts a printable character at the cursor.
    pub fn insert_char(&mut self, ch: char) -> Result<UpdateScope, CommandError> {
        command::validate_char(ch)?;
        let scope = self.insert_validated(&ch.to_string());
        self.check_invariants();
        Ok(scope)
    }

    fn insert_validated(&mut self, text: &str) -> UpdateScope {
        let Position { row, col } = self.cursor;
        self.document.insert_str(row, col, text);
        self.cursor.col += char_len(text);
        UpdateScope::Line(row)
    }

    /// Deletes left of the cursor.
    ///
    /// Deleting past column 0 removes the current line and moves to the end
    /// of the line above. The removed line's remaining text is discarded,
    /// not appended to the line above. On the first line nothing happens
    /// beyond the cursor staying at column 0.
    pub fn backspace(&mut self, whole_line: bool) -> UpdateScope {
        let Position { row, col } = self.cursor;

        if col > 0 {
            if whole_line {
                self.document.remove_prefix(row, col);
                self.cursor.col = 0;
            } else {
                self.document.remove_char(row, col - 1);
                self.cursor.col = col - 1;
            }
            self.check_invariants();
            return UpdateScope::Line(row);
        }

        if row == 0 {
            self.cursor.col = 0;
            return UpdateScope::Line(0);
        }

        if let Some(discarded) = self.document.remove_line(row) {
            log::debug!(
                "Joined line {} into {} (discarded {} chars)",
                row,
                row - 1,
                char_len(&discarded)
            );
        }
        let row = row - 1;
        self.cursor = Position::new(row, self.document.line_len(row));
        self.check_invariants();
        UpdateScope::All
    }

    /// Inserts an empty line below the cursor and moves to its start.
    ///
    /// The text right of the cursor stays on the current line.
    pub fn split_line(&mut self) -> UpdateScope {
        let row = self.cursor.row + 1;
        self.document.insert_line(row, String::new());
        self.cursor = Position::new(row, 0);
        self.check_invariants();
        UpdateScope::All
    }

    /// Inserts each segment at the cursor, splitting the line between
    /// consecutive segments.
    pub fn paste_lines<S: AsRef<str>>(
        &mut self,
        segments: &[S],
    ) -> Result<UpdateScope, CommandError> {
        for segment in segments {
            command::validate_segment(segment.as_ref())?;
        }
        let scope = self.paste_validated(segments);
        self.check_invariants();
        Ok(scope)
    }

    fn paste_validated<S: AsRef<str>>(&mut self, segments: &[S]) -> UpdateScope {
        let Some((first, rest)) = segments.split_first() else {
            return UpdateScope::CursorOnly;
        };

        let mut scope = self.insert_validated(first.as_ref());
        for segment in rest {
            self.split_line();
            self.insert_validated(segment.as_ref());
            scope = UpdateScope::All;
        }
        scope
    }

    // ==================== Cursor Movement ====================

    /// Moves the cursor. Never changes the text.
    pub fn move_cursor(&mut self, direction: Direction, whole_line: bool) -> UpdateScope {
        self.cursor = self.cursor.moved(&self.document, direction, whole_line);
        self.check_invariants();
        UpdateScope::CursorOnly
    }

    /// Places the cursor at a position from an unclamped source such as a
    /// mouse hit-test. The row is clamped first, then the column against
    /// that row.
    pub fn place_cursor_at(&mut self, row: i64, column: i64) -> UpdateScope {
        let row = clamp_signed(row, self.document.last_row());
        let col = clamp_signed(column, self.document.line_len(row));
        self.cursor = Position::new(row, col);
        self.check_invariants();
        UpdateScope::CursorOnly
    }

    fn check_invariants(&self) {
        debug_assert!(self.document.line_count() >= 1, "document has no lines");
        debug_assert!(
            self.cursor.is_valid_in(&self.document),
            "cursor {:?} outside document with {} lines",
            self.cursor,
            self.document.line_count()
        );
    }
}
