//! Editor UI - Terminal rendering and input handling.
//!
//! This crate hosts the collaborators of the core buffer: key and mouse
//! mapping via crossterm, clipboard access via arboard, screen layout and a
//! line renderer that redraws only what each command touched.

pub mod app;
pub mod clipboard;
pub mod input;
pub mod layout;
pub mod renderer;

pub use app::{run, EditorApp};
pub use clipboard::{split_clipboard_text, ClipboardError, ClipboardReader};
pub use input::{EditorCommand, InputHandler};
pub use layout::Layout;
pub use renderer::{LineRenderer, Repaint};
