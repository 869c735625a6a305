//! Editor Core - Pure text buffer logic.
//!
//! This crate contains the buffer-and-cursor state machine without any
//! dependencies on terminals, windowing or clipboards. Hosts feed it
//! [`Command`]s and redraw according to the returned [`UpdateScope`].

pub mod buffer;
pub mod command;
pub mod cursor;
pub mod document;
pub mod error;

pub use buffer::TextBuffer;
pub use command::{Command, Direction, UpdateScope};
pub use cursor::Position;
pub use document::Document;
pub use error::CommandError;
