//! Main editor application running in a terminal.

use crate::clipboard::{split_clipboard_text, ClipboardReader};
use crate::input::{EditorCommand, InputHandler};
use crate::layout::Layout;
use crate::renderer::{LineRenderer, Repaint};
use crossterm::event::{
    self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    Event,
};
use crossterm::style::{Attribute, Print, SetAttribute};
use crossterm::terminal::{
    self, disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::{cursor, execute, queue};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use sudo_edit_core::{Command, TextBuffer, UpdateScope};

/// How long to wait for input before repainting the status line.
const TICK_RATE_MS: u64 = 250;

/// Rows at the bottom reserved for the status line.
const STATUS_ROWS: u16 = 1;

/// The main editor application.
pub struct EditorApp {
    /// The text being edited.
    pub buffer: TextBuffer,
    /// Input handler.
    pub input_handler: InputHandler,
    /// Screen geometry.
    pub layout: Layout,
    renderer: LineRenderer,
    clipboard: ClipboardReader,
    file_path: Option<PathBuf>,
    modified: bool,
    status: String,
    /// Redraw owed to the screen since the last paint.
    pending: Option<UpdateScope>,
    should_quit: bool,
}

impl Default for EditorApp {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorApp {
    /// Creates an application with an empty buffer.
    pub fn new() -> Self {
        Self {
            buffer: TextBuffer::new(),
            input_handler: InputHandler::new(),
            layout: Layout::default(),
            renderer: LineRenderer::new(),
            clipboard: ClipboardReader::new(),
            file_path: None,
            modified: false,
            status: String::from("Ctrl+S save | Ctrl+V paste | Ctrl+Q quit"),
            pending: Some(UpdateScope::All),
            should_quit: false,
        }
    }

    /// Loads a file into the buffer. A missing file starts an empty buffer
    /// that will be saved to `path`.
    pub fn open_file<P: AsRef<Path>>(&mut self, path: P) -> io::Result<()> {
        let path = path.as_ref();
        self.buffer = match fs::read_to_string(path) {
            Ok(text) => {
                self.status = format!("Opened {}", path.display());
                TextBuffer::from_text(&text)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                self.status = format!("New file {}", path.display());
                TextBuffer::new()
            }
            Err(e) => return Err(e),
        };
        self.file_path = Some(path.to_path_buf());
        self.modified = false;
        self.layout.scroll_row = 0;
        self.layout.fit_gutter(self.buffer.line_count());
        self.mark(UpdateScope::All);
        log::info!(
            "Loaded {} lines from {}",
            self.buffer.line_count(),
            path.display()
        );
        Ok(())
    }

    /// Writes the buffer to its file, lines joined with `\n`.
    pub fn save(&mut self) -> io::Result<()> {
        let Some(path) = &self.file_path else {
            return Err(io::Error::new(io::ErrorKind::Other, "No file path set"));
        };
        fs::write(path, self.buffer.to_text())?;
        log::info!("Saved {}", path.display());
        self.status = format!("Saved {}", path.display());
        self.modified = false;
        Ok(())
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Returns whether the buffer has unsaved changes.
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Redraw owed to the screen, if any.
    pub fn pending(&self) -> Option<UpdateScope> {
        self.pending
    }

    fn mark(&mut self, scope: UpdateScope) {
        self.pending = Some(match self.pending {
            Some(pending) => pending.merge(scope),
            None => scope,
        });
    }

    /// Applies a buffer command and schedules the matching redraw.
    pub fn apply(&mut self, command: Command) {
        // Any edit either changes the line count or the cursor's line.
        let line_count = self.buffer.line_count();
        let cursor_line = self.buffer.line(self.buffer.cursor().row).map(String::from);
        match self.buffer.apply(command) {
            Ok(scope) => {
                if scope != UpdateScope::CursorOnly
                    && (self.buffer.line_count() != line_count
                        || self.buffer.line(self.buffer.cursor().row) != cursor_line.as_deref())
                {
                    self.modified = true;
                }
                self.mark(scope);
                let regutter = self.layout.fit_gutter(self.buffer.line_count());
                let scrolled = self.layout.scroll_to(self.buffer.cursor().row);
                if regutter || scrolled {
                    self.mark(UpdateScope::All);
                }
            }
            Err(e) => {
                log::warn!("{}", e);
                self.status = e.to_string();
            }
        }
    }

    /// Executes an editor command.
    pub fn execute(&mut self, command: EditorCommand) {
        match command {
            EditorCommand::Edit(command) => self.apply(command),
            EditorCommand::Paste => match self.clipboard.read_lines() {
                Ok(segments) => self.apply(Command::PasteLines(segments)),
                Err(e) => {
                    log::error!("Failed to paste: {}", e);
                    self.status = format!("Paste failed: {}", e);
                }
            },
            EditorCommand::Save => {
                if let Err(e) = self.save() {
                    log::error!("Failed to save: {}", e);
                    self.status = format!("Save failed: {}", e);
                }
            }
            EditorCommand::Quit => {
                if self.modified {
                    log::warn!("Quitting with unsaved changes");
                }
                self.should_quit = true;
            }
        }
    }

    /// Handles a terminal event.
    pub fn handle_event(&mut self, event: Event) {
        let command = match event {
            Event::Key(key) => self.input_handler.handle_key_event(key),
            Event::Mouse(mouse) => self.input_handler.handle_mouse_event(mouse, &self.layout),
            Event::Paste(text) => Some(EditorCommand::Edit(Command::PasteLines(
                split_clipboard_text(&text),
            ))),
            Event::Resize(width, height) => {
                self.resize(width, height);
                None
            }
            _ => None,
        };
        if let Some(command) = command {
            self.execute(command);
        }
    }

    /// Adapts the layout to a new terminal size.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.layout.resize(width, height, STATUS_ROWS);
        self.layout.scroll_to(self.buffer.cursor().row);
        self.renderer.invalidate();
        self.mark(UpdateScope::All);
    }

    /// Paints whatever is pending, then the status line and the cursor.
    pub fn paint<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        if let Some(scope) = self.pending.take() {
            match self.renderer.update(&self.buffer, scope) {
                Repaint::Full => {
                    for offset in 0..self.layout.visible_rows {
                        self.paint_row(out, self.layout.scroll_row + usize::from(offset))?;
                    }
                }
                Repaint::Lines(rows) => {
                    for row in rows {
                        self.paint_row(out, row)?;
                    }
                }
                Repaint::Cursor => {}
            }
        }
        self.paint_status(out)?;

        if let Some((x, y)) = self.layout.cursor_origin(self.buffer.cursor()) {
            queue!(out, cursor::MoveTo(x, y), cursor::Show)?;
        } else {
            queue!(out, cursor::Hide)?;
        }
        out.flush()
    }

    fn paint_row<W: Write>(&self, out: &mut W, row: usize) -> io::Result<()> {
        let Some(y) = self.layout.screen_row(row) else {
            return Ok(());
        };
        queue!(out, cursor::MoveTo(0, y), Clear(ClearType::UntilNewLine))?;
        let width = usize::from(self.layout.width);
        match self.renderer.rendered_line(row) {
            Some(line) => {
                let visible: String = line.chars().take(width).collect();
                queue!(out, Print(visible))?;
            }
            None => queue!(out, Print("~"))?,
        }
        Ok(())
    }

    fn paint_status<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let y = self.layout.top_margin + self.layout.visible_rows;
        let pos = self.buffer.cursor();
        let name = self
            .file_path
            .as_deref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| String::from("[scratch]"));
        let marker = if self.modified { " *" } else { "" };
        let line = format!(
            "{}{} | {}:{} | {}",
            name,
            marker,
            pos.row + 1,
            pos.col + 1,
            self.status
        );
        let visible: String = line.chars().take(usize::from(self.layout.width)).collect();
        queue!(
            out,
            cursor::MoveTo(0, y),
            Clear(ClearType::UntilNewLine),
            SetAttribute(Attribute::Reverse),
            Print(visible),
            SetAttribute(Attribute::Reset)
        )
    }
}

/// Runs the editor until it quits. The terminal is restored even if the
/// setup or the event loop fails.
pub fn run(mut app: EditorApp) -> io::Result<()> {
    let mut stdout = io::stdout();
    enable_raw_mode()?;
    let result = execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )
    .and_then(|()| event_loop(&mut app, &mut stdout));

    let restored = restore_terminal(&mut stdout);
    if let Err(e) = &restored {
        log::error!("Failed to restore terminal: {}", e);
    }
    result.and(restored)
}

/// Runs every teardown step and reports the first failure.
fn restore_terminal<W: Write>(out: &mut W) -> io::Result<()> {
    let raw_mode = disable_raw_mode();
    let screen = execute!(
        out,
        DisableBracketedPaste,
        DisableMouseCapture,
        LeaveAlternateScreen,
        cursor::Show
    );
    raw_mode.and(screen)
}

fn event_loop<W: Write>(app: &mut EditorApp, out: &mut W) -> io::Result<()> {
    let (width, height) = terminal::size()?;
    app.resize(width, height);
    let tick_rate = Duration::from_millis(TICK_RATE_MS);

    while !app.should_quit() {
        app.paint(out)?;
        if event::poll(tick_rate)? {
            let event = event::read()?;
            log::trace!("Event: {:?}", event);
            app.handle_event(event);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use sudo_edit_core::{Direction, Position};

    fn type_key(app: &mut EditorApp, code: KeyCode, modifiers: KeyModifiers) {
        app.handle_event(Event::Key(KeyEvent::new(code, modifiers)));
    }

    #[test]
    fn test_typing_marks_modified() {
        let mut app = EditorApp::new();
        assert!(!app.is_modified());
        type_key(&mut app, KeyCode::Char('h'), KeyModifiers::NONE);
        type_key(&mut app, KeyCode::Char('i'), KeyModifiers::NONE);
        assert!(app.is_modified());
        assert_eq!(app.buffer.lines(), &["hi"]);
    }

    #[test]
    fn test_motion_does_not_mark_modified() {
        let mut app = EditorApp::new();
        type_key(&mut app, KeyCode::Left, KeyModifiers::NONE);
        assert!(!app.is_modified());
    }

    #[test]
    fn test_pending_scopes_merge() {
        let mut app = EditorApp::new();
        let mut sink = Vec::new();
        app.paint(&mut sink).unwrap();
        assert_eq!(app.pending(), None);

        type_key(&mut app, KeyCode::Char('a'), KeyModifiers::NONE);
        assert_eq!(app.pending(), Some(UpdateScope::Line(0)));
        type_key(&mut app, KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(app.pending(), Some(UpdateScope::All));
    }

    #[test]
    fn test_click_places_cursor() {
        let mut app = EditorApp::new();
        app.buffer = TextBuffer::from_text("hello\nworld");
        let click = crossterm::event::MouseEvent {
            kind: crossterm::event::MouseEventKind::Down(crossterm::event::MouseButton::Left),
            column: app.layout.left_margin + 3,
            row: 1,
            modifiers: KeyModifiers::NONE,
        };
        app.handle_event(Event::Mouse(click));
        assert_eq!(app.buffer.cursor(), Position::new(1, 3));
    }

    #[test]
    fn test_scrolls_to_follow_cursor() {
        let mut app = EditorApp::new();
        app.resize(80, 6);
        assert_eq!(app.layout.visible_rows, 5);
        for _ in 0..7 {
            type_key(&mut app, KeyCode::Enter, KeyModifiers::NONE);
        }
        assert_eq!(app.buffer.cursor().row, 7);
        assert_eq!(app.layout.scroll_row, 3);
    }

    #[test]
    fn test_rejected_command_sets_status() {
        let mut app = EditorApp::new();
        app.apply(Command::InsertChar('\u{1b}'));
        assert!(app.status().contains("invalid command input"));
        assert!(!app.is_modified());
    }

    #[test]
    fn test_terminal_paste_event() {
        let mut app = EditorApp::new();
        app.buffer = TextBuffer::from_text("ab");
        app.handle_event(Event::Paste("X\r\nY".to_string()));
        assert_eq!(app.buffer.lines(), &["Xab", "Y"]);
    }

    #[test]
    fn test_terminal_paste_with_cr_breaks() {
        let mut app = EditorApp::new();
        app.buffer = TextBuffer::from_text("ab");
        app.handle_event(Event::Paste("X\rY".to_string()));
        assert_eq!(app.buffer.lines(), &["Xab", "Y"]);
        assert_eq!(app.buffer.cursor(), Position::new(1, 1));
        assert!(app.is_modified());
    }

    #[test]
    fn test_no_op_edits_do_not_mark_modified() {
        let mut app = EditorApp::new();
        app.apply(Command::Backspace { whole_line: false });
        assert_eq!(app.buffer.lines(), &[""]);
        assert!(!app.is_modified());

        app.apply(Command::PasteLines(vec![String::new()]));
        assert!(!app.is_modified());

        app.apply(Command::Backspace { whole_line: true });
        assert!(!app.is_modified());
    }

    #[test]
    fn test_line_removal_marks_modified() {
        let mut app = EditorApp::new();
        app.buffer = TextBuffer::from_text("a\n");
        app.apply(Command::Move {
            direction: Direction::Down,
            whole_line: false,
        });
        app.apply(Command::Backspace { whole_line: false });
        assert_eq!(app.buffer.lines(), &["a"]);
        assert!(app.is_modified());
    }

    #[cfg(unix)]
    #[test]
    fn test_restore_terminal_leaves_alternate_screen() {
        let mut sink = Vec::new();
        restore_terminal(&mut sink).unwrap();
        let written = String::from_utf8(sink).unwrap();
        assert!(written.contains("\x1b[?2004l"));
        assert!(written.contains("\x1b[?1049l"));
    }

    #[test]
    fn test_quit() {
        let mut app = EditorApp::new();
        type_key(&mut app, KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert!(app.should_quit());
    }

    #[test]
    fn test_open_and_save_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, "first\nsecond").unwrap();

        let mut app = EditorApp::new();
        app.open_file(&path).unwrap();
        assert_eq!(app.buffer.lines(), &["first", "second"]);

        type_key(&mut app, KeyCode::Down, KeyModifiers::CONTROL);
        type_key(&mut app, KeyCode::End, KeyModifiers::NONE);
        type_key(&mut app, KeyCode::Char('!'), KeyModifiers::NONE);
        type_key(&mut app, KeyCode::Char('s'), KeyModifiers::CONTROL);

        assert!(!app.is_modified());
        assert_eq!(fs::read_to_string(&path).unwrap(), "first\nsecond!");
    }

    #[test]
    fn test_open_missing_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("new.txt");

        let mut app = EditorApp::new();
        app.open_file(&path).unwrap();
        assert_eq!(app.buffer.lines(), &[""]);
        assert_eq!(app.file_path(), Some(path.as_path()));
        assert!(app.status().starts_with("New file"));
    }

    #[test]
    fn test_save_without_path_fails() {
        let mut app = EditorApp::new();
        assert!(app.save().is_err());
        app.execute(EditorCommand::Save);
        assert!(app.status().starts_with("Save failed"));
    }
}
