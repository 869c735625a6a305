//! Editing commands and their redraw hints.

use crate::error::CommandError;

/// Direction of a cursor motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

/// A single command accepted by [`TextBuffer::apply`](crate::TextBuffer::apply).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Insert a printable character at the cursor.
    InsertChar(char),
    /// Delete left of the cursor. With `whole_line`, everything between the
    /// line start and the cursor goes.
    Backspace { whole_line: bool },
    /// Move the cursor. With `whole_line`, jump to the line or document edge.
    Move { direction: Direction, whole_line: bool },
    /// Insert an empty line below the cursor and move onto it.
    SplitLine,
    /// Insert pre-split clipboard content, one segment per line.
    PasteLines(Vec<String>),
    /// Place the cursor at a possibly out-of-range position (clamped).
    PlaceCursorAt { row: i64, column: i64 },
}

impl Command {
    /// Builds an `InsertChar` from the text a key produced.
    ///
    /// Anything other than exactly one printable character is rejected
    /// rather than truncated.
    pub fn from_key_text(text: &str) -> Result<Self, CommandError> {
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => {
                validate_char(ch)?;
                Ok(Command::InsertChar(ch))
            }
            (None, _) => Err(CommandError::invalid("empty key text")),
            (Some(_), Some(_)) => Err(CommandError::invalid(format!(
                "expected a single character, got {:?}",
                text
            ))),
        }
    }

    /// Checks the command's payload without touching any buffer.
    pub fn validate(&self) -> Result<(), CommandError> {
        match self {
            Command::InsertChar(ch) => validate_char(*ch),
            Command::PasteLines(segments) => segments
                .iter()
                .try_for_each(|segment| validate_segment(segment)),
            Command::Backspace { .. }
            | Command::Move { .. }
            | Command::SplitLine
            | Command::PlaceCursorAt { .. } => Ok(()),
        }
    }
}

pub(crate) fn validate_char(ch: char) -> Result<(), CommandError> {
    if ch.is_control() {
        return Err(CommandError::invalid(format!(
            "control character {:?} cannot be inserted",
            ch
        )));
    }
    Ok(())
}

pub(crate) fn validate_segment(segment: &str) -> Result<(), CommandError> {
    if segment.contains(['\n', '\r']) {
        return Err(CommandError::invalid(
            "paste segment contains a line break",
        ));
    }
    Ok(())
}

/// The minimal redraw a command requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpdateScope {
    /// Only the cursor moved.
    CursorOnly,
    /// The text of one line changed.
    Line(usize),
    /// Lines were inserted or removed.
    All,
}

impl UpdateScope {
    /// Combines two scopes into one that covers both.
    pub fn merge(self, other: UpdateScope) -> UpdateScope {
        match (self, other) {
            (UpdateScope::All, _) | (_, UpdateScope::All) => UpdateScope::All,
            (UpdateScope::Line(a), UpdateScope::Line(b)) if a != b => UpdateScope::All,
            (UpdateScope::Line(row), _) | (_, UpdateScope::Line(row)) => UpdateScope::Line(row),
            (UpdateScope::CursorOnly, UpdateScope::CursorOnly) => UpdateScope::CursorOnly,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_key_text_single_char() {
        assert_eq!(Command::from_key_text("a"), Ok(Command::InsertChar('a')));
        assert_eq!(Command::from_key_text("é"), Ok(Command::InsertChar('é')));
    }

    #[test]
    fn test_from_key_text_rejects_multiple_chars() {
        assert!(matches!(
            Command::from_key_text("Enter"),
            Err(CommandError::InvalidCommandInput { .. })
        ));
        assert!(Command::from_key_text("").is_err());
    }

    #[test]
    fn test_from_key_text_rejects_control() {
        assert!(Command::from_key_text("\n").is_err());
        assert!(Command::from_key_text("\t").is_err());
    }

    #[test]
    fn test_validate_paste() {
        let ok = Command::PasteLines(vec!["a".into(), "b".into()]);
        assert!(ok.validate().is_ok());
        let bad = Command::PasteLines(vec!["a\nb".into()]);
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_merge_scopes() {
        use UpdateScope::*;
        assert_eq!(CursorOnly.merge(CursorOnly), CursorOnly);
        assert_eq!(CursorOnly.merge(Line(2)), Line(2));
        assert_eq!(Line(2).merge(Line(2)), Line(2));
        assert_eq!(Line(1).merge(Line(2)), All);
        assert_eq!(Line(1).merge(All), All);
    }
}
