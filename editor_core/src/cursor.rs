//! Cursor position, clamping and motion.

use crate::command::Direction;
use crate::document::Document;

/// Represents a position in the buffer as (row, column).
/// Both are 0-indexed; the column is an insertion point, so a column equal
/// to the line length sits after the last character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub const fn zero() -> Self {
        Self { row: 0, col: 0 }
    }

    /// Returns true if this position is valid for `doc`.
    pub fn is_valid_in(&self, doc: &Document) -> bool {
        self.row < doc.line_count() && self.col <= doc.line_len(self.row)
    }

    /// Clamps the row to the document and then the column to that row.
    pub fn clamp_to(self, doc: &Document) -> Self {
        let row = self.row.min(doc.last_row());
        let col = self.col.min(doc.line_len(row));
        Self { row, col }
    }

    /// Returns the position after moving one step in `direction`.
    ///
    /// `whole_line` turns the step into a jump: to the start or end of the
    /// line for horizontal motion, to the first or last line for vertical.
    pub fn moved(self, doc: &Document, direction: Direction, whole_line: bool) -> Self {
        match direction {
            Direction::Left => self.left(doc, whole_line),
            Direction::Right => self.right(doc, whole_line),
            Direction::Up => self.up(doc, whole_line),
            Direction::Down => self.down(doc, whole_line),
        }
    }

    fn left(self, doc: &Document, whole_line: bool) -> Self {
        if whole_line {
            return Self::new(self.row, 0);
        }
        if self.col > 0 {
            Self::new(self.row, self.col - 1)
        } else if self.row > 0 {
            // Wrap to the end of the previous line.
            let row = self.row - 1;
            Self::new(row, doc.line_len(row))
        } else {
            Self::zero()
        }
    }

    fn right(self, doc: &Document, whole_line: bool) -> Self {
        let len = doc.line_len(self.row);
        let col = if whole_line { len } else { self.col + 1 };
        if col <= len {
            return Self::new(self.row, col);
        }

        let last = doc.last_row();
        if self.row < last {
            Self::new(self.row + 1, 0)
        } else {
            Self::new(last, doc.line_len(last))
        }
    }

    fn up(self, doc: &Document, whole_line: bool) -> Self {
        let row = if whole_line {
            0
        } else if self.row == 0 {
            // Moving up from the first line lands on the document start.
            return Self::zero();
        } else {
            self.row - 1
        };
        Self::new(row, self.col.min(doc.line_len(row)))
    }

    fn down(self, doc: &Document, whole_line: bool) -> Self {
        let last = doc.last_row();
        let row = if whole_line {
            last
        } else if self.row >= last {
            // Moving down from the last line lands on the document end.
            return Self::new(last, doc.line_len(last));
        } else {
            self.row + 1
        };
        Self::new(row, self.col.min(doc.line_len(row)))
    }
}

/// Clamps a signed, possibly out-of-range coordinate into `0..=max`.
pub fn clamp_signed(value: i64, max: usize) -> usize {
    if value <= 0 {
        0
    } else {
        usize::try_from(value).map_or(max, |v| v.min(max))
    }
}
