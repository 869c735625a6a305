//! Line storage for the text buffer.
//!
//! Columns are counted in `char`s, never bytes, so every column that the
//! cursor can hold maps onto a valid character boundary.

/// Returns the number of characters in a line.
pub fn char_len(line: &str) -> usize {
    line.chars().count()
}

/// Converts a character column into a byte offset within `line`.
/// Columns past the end map to the line's byte length.
fn byte_offset(line: &str, col: usize) -> usize {
    line.char_indices()
        .nth(col)
        .map(|(idx, _)| idx)
        .unwrap_or(line.len())
}

/// Splits raw text into lines on `\n`, dropping a `\r` left over from
/// `\r\n` line endings.
pub fn split_lines(text: &str) -> impl Iterator<Item = &str> + '_ {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
}

/// An ordered sequence of lines. Never empty: a blank document is a single
/// empty line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    lines: Vec<String>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Creates a document holding one empty line.
    pub fn new() -> Self {
        Self {
            lines: vec![String::new()],
        }
    }

    /// Creates a document from an ordered sequence of lines.
    ///
    /// Any item that itself contains line breaks is split further, so the
    /// no-embedded-newline rule holds regardless of the input.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut collected = Vec::new();
        for line in lines {
            collected.extend(split_lines(line.as_ref()).map(String::from));
        }
        if collected.is_empty() {
            collected.push(String::new());
        }
        Self { lines: collected }
    }

    /// Creates a document from newline-separated text.
    pub fn from_text(text: &str) -> Self {
        Self::from_lines([text])
    }

    /// Joins all lines with `\n`.
    pub fn to_text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Index of the last line.
    pub fn last_row(&self) -> usize {
        self.lines.len() - 1
    }

    pub fn line(&self, row: usize) -> Option<&str> {
        self.lines.get(row).map(String::as_str)
    }

    /// Returns the length of a line in characters, or 0 for a missing row.
    pub fn line_len(&self, row: usize) -> usize {
        self.lines.get(row).map(|l| char_len(l)).unwrap_or(0)
    }

    /// Inserts `text` into line `row` at character column `col`.
    /// The column is clamped to the line length.
    pub fn insert_str(&mut self, row: usize, col: usize, text: &str) {
        if let Some(line) = self.lines.get_mut(row) {
            let at = byte_offset(line, col);
            line.insert_str(at, text);
        }
    }

    /// Removes the character at column `col` of line `row`.
    pub fn remove_char(&mut self, row: usize, col: usize) -> Option<char> {
        let line = self.lines.get_mut(row)?;
        if col >= char_len(line) {
            return None;
        }
        let at = byte_offset(line, col);
        Some(line.remove(at))
    }

    /// Removes the first `col` characters of line `row`, keeping the rest.
    pub fn remove_prefix(&mut self, row: usize, col: usize) {
        if let Some(line) = self.lines.get_mut(row) {
            let at = byte_offset(line, col);
            line.replace_range(..at, "");
        }
    }

    /// Inserts a new line so that it ends up at index `row`.
    pub fn insert_line(&mut self, row: usize, line: String) {
        let row = row.min(self.lines.len());
        self.lines.insert(row, line);
    }

    /// Removes line `row` and returns its content.
    ///
    /// Refuses to remove the only remaining line.
    pub fn remove_line(&mut self, row: usize) -> Option<String> {
        if self.lines.len() <= 1 || row >= self.lines.len() {
            return None;
        }
        Some(self.lines.remove(row))
    }
}
