//! A small line-driven text editor.
//!
//! Each window holds a text buffer and is driven by a control loop that reads
//! `open`, `save`, `saveas` and `quit` commands, one per line.

#[macro_use]
extern crate crossterm;

pub mod buffer;
pub mod command;
pub mod editor;
pub mod error;
pub mod input;
pub mod pool;
pub mod session;
pub mod window;

pub use command::{Command, CommandError};
pub use editor::{Editor, LoopExit, LoopState};
pub use error::{EditorError, EditorResult};
pub use pool::{Shutdown, WindowPool, WindowRegistry};
pub use session::{SaveOutcome, Session};
pub use window::{BufferWindow, TerminalWindow, Window};
