//! Input handling and key mapping.

use crate::layout::Layout;
use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use sudo_edit_core::{Command, Direction};

/// Represents an editor command.
///
/// Buffer edits go straight to the core; the rest need the host
/// (clipboard, file system, event loop).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorCommand {
    Edit(Command),
    Paste,
    Save,
    Quit,
}

/// Input handler that maps keyboard/mouse events to editor commands.
#[derive(Debug)]
pub struct InputHandler {
    modifiers: KeyModifiers,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            modifiers: KeyModifiers::NONE,
        }
    }

    /// Modifiers of the last key event seen.
    pub fn modifiers(&self) -> KeyModifiers {
        self.modifiers
    }

    /// Windows reports AltGr as Control+Alt.
    fn is_alt_gr(&self) -> bool {
        self.modifiers.contains(KeyModifiers::CONTROL | KeyModifiers::ALT)
    }

    fn is_primary_modifier(&self) -> bool {
        self.modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::SUPER)
            && !self.is_alt_gr()
    }

    /// Handle a key event.
    pub fn handle_key_event(&mut self, event: KeyEvent) -> Option<EditorCommand> {
        if event.kind == KeyEventKind::Release {
            return None;
        }
        self.modifiers = event.modifiers;

        let primary = self.is_primary_modifier();
        let edit = |command| Some(EditorCommand::Edit(command));
        let motion = |direction| {
            Some(EditorCommand::Edit(Command::Move {
                direction,
                whole_line: primary,
            }))
        };

        match event.code {
            KeyCode::Enter => edit(Command::SplitLine),
            KeyCode::Backspace => edit(Command::Backspace {
                whole_line: primary,
            }),
            KeyCode::Left => motion(Direction::Left),
            KeyCode::Right => motion(Direction::Right),
            KeyCode::Up => motion(Direction::Up),
            KeyCode::Down => motion(Direction::Down),
            KeyCode::Home => edit(Command::Move {
                direction: Direction::Left,
                whole_line: true,
            }),
            KeyCode::End => edit(Command::Move {
                direction: Direction::Right,
                whole_line: true,
            }),
            KeyCode::Esc => Some(EditorCommand::Quit),

            // Character shortcuts
            KeyCode::Char(ch) if primary => match ch.to_ascii_lowercase() {
                'v' => Some(EditorCommand::Paste),
                's' => Some(EditorCommand::Save),
                'q' => Some(EditorCommand::Quit),
                _ => None,
            },
            KeyCode::Char(ch) => self.handle_char_input(ch),

            _ => None,
        }
    }

    /// Handle character input (for text entry).
    pub fn handle_char_input(&self, ch: char) -> Option<EditorCommand> {
        if ch.is_control()
            || self.is_primary_modifier()
            || (self.modifiers.contains(KeyModifiers::ALT) && !self.is_alt_gr())
        {
            return None;
        }
        Some(EditorCommand::Edit(Command::InsertChar(ch)))
    }

    /// Maps a left click to a cursor placement. The target is left
    /// unclamped for the buffer to resolve.
    pub fn handle_mouse_event(&self, event: MouseEvent, layout: &Layout) -> Option<EditorCommand> {
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let (row, column) = layout.hit_test(event.column, event.row);
                Some(EditorCommand::Edit(Command::PlaceCursorAt { row, column }))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn press(
        handler: &mut InputHandler,
        code: KeyCode,
        modifiers: KeyModifiers,
    ) -> Option<EditorCommand> {
        handler.handle_key_event(key(code, modifiers))
    }

    #[test]
    fn test_printable_chars_insert() {
        let mut handler = InputHandler::new();
        assert_eq!(
            press(&mut handler, KeyCode::Char('a'), KeyModifiers::NONE),
            Some(EditorCommand::Edit(Command::InsertChar('a')))
        );
        assert_eq!(
            press(&mut handler, KeyCode::Char('A'), KeyModifiers::SHIFT),
            Some(EditorCommand::Edit(Command::InsertChar('A')))
        );
    }

    #[test]
    fn test_modified_chars_do_not_insert() {
        let mut handler = InputHandler::new();
        assert_eq!(press(&mut handler, KeyCode::Char('x'), KeyModifiers::CONTROL), None);
        assert_eq!(press(&mut handler, KeyCode::Char('x'), KeyModifiers::ALT), None);
    }

    #[test]
    fn test_alt_gr_chars_insert() {
        let mut handler = InputHandler::new();
        let alt_gr = KeyModifiers::CONTROL | KeyModifiers::ALT;
        assert_eq!(
            press(&mut handler, KeyCode::Char('@'), alt_gr),
            Some(EditorCommand::Edit(Command::InsertChar('@')))
        );
        assert_eq!(
            press(&mut handler, KeyCode::Char('q'), alt_gr),
            Some(EditorCommand::Edit(Command::InsertChar('q')))
        );
        assert_eq!(
            press(&mut handler, KeyCode::Backspace, alt_gr),
            Some(EditorCommand::Edit(Command::Backspace { whole_line: false }))
        );
    }

    #[test]
    fn test_shortcuts() {
        let mut handler = InputHandler::new();
        assert_eq!(
            press(&mut handler, KeyCode::Char('v'), KeyModifiers::CONTROL),
            Some(EditorCommand::Paste)
        );
        assert_eq!(
            press(&mut handler, KeyCode::Char('s'), KeyModifiers::SUPER),
            Some(EditorCommand::Save)
        );
        assert_eq!(
            press(&mut handler, KeyCode::Char('Q'), KeyModifiers::CONTROL | KeyModifiers::SHIFT),
            Some(EditorCommand::Quit)
        );
        assert_eq!(
            press(&mut handler, KeyCode::Esc, KeyModifiers::NONE),
            Some(EditorCommand::Quit)
        );
    }

    #[test]
    fn test_backspace_variants() {
        let mut handler = InputHandler::new();
        assert_eq!(
            press(&mut handler, KeyCode::Backspace, KeyModifiers::NONE),
            Some(EditorCommand::Edit(Command::Backspace { whole_line: false }))
        );
        assert_eq!(
            press(&mut handler, KeyCode::Backspace, KeyModifiers::CONTROL),
            Some(EditorCommand::Edit(Command::Backspace { whole_line: true }))
        );
    }

    #[test]
    fn test_arrows_with_primary_are_whole_line() {
        let mut handler = InputHandler::new();
        assert_eq!(
            press(&mut handler, KeyCode::Up, KeyModifiers::NONE),
            Some(EditorCommand::Edit(Command::Move {
                direction: Direction::Up,
                whole_line: false
            }))
        );
        assert_eq!(
            press(&mut handler, KeyCode::Right, KeyModifiers::CONTROL),
            Some(EditorCommand::Edit(Command::Move {
                direction: Direction::Right,
                whole_line: true
            }))
        );
    }

    #[test]
    fn test_enter_splits_and_tab_is_ignored() {
        let mut handler = InputHandler::new();
        assert_eq!(
            press(&mut handler, KeyCode::Enter, KeyModifiers::NONE),
            Some(EditorCommand::Edit(Command::SplitLine))
        );
        assert_eq!(press(&mut handler, KeyCode::Tab, KeyModifiers::NONE), None);
    }

    #[test]
    fn test_release_is_ignored() {
        let mut handler = InputHandler::new();
        let mut event = key(KeyCode::Char('a'), KeyModifiers::NONE);
        event.kind = KeyEventKind::Release;
        assert_eq!(handler.handle_key_event(event), None);
    }

    #[test]
    fn test_left_click_places_cursor() {
        let handler = InputHandler::new();
        let layout = Layout::new(4, 0);
        let event = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 7,
            row: 2,
            modifiers: KeyModifiers::NONE,
        };
        assert_eq!(
            handler.handle_mouse_event(event, &layout),
            Some(EditorCommand::Edit(Command::PlaceCursorAt { row: 2, column: 3 }))
        );

        let moved = MouseEvent {
            kind: MouseEventKind::Moved,
            ..event
        };
        assert_eq!(handler.handle_mouse_event(moved, &layout), None);
    }
}
