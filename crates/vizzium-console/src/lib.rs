//! Vizzium Console - vi-like debugger console for Z80 binaries
//!
//! Wires the modal console framework from `vizzium-core` to a debug target
//! and a terminal:
//! - Screen model and the debug view (memory listing + CPU status panel)
//! - Target commands (`load`, `step`, `write`, `pc`, `update`, ...)
//! - The console loop with its post-dispatch policy
//! - A crossterm/ratatui terminal adapter
//! - TOML/env configuration
//!
//! The console is single-threaded: each key is fully handled, including any
//! dispatch and redraw, before the next one is read.

pub mod commands;
pub mod config;
pub mod console;
pub mod context;
pub mod screen;
pub mod terminal;
pub mod view;

pub use config::VizziumConfig;
pub use console::{Console, ConsoleSettings, ConsoleTerminal};
pub use context::DebugContext;
pub use screen::Screen;
pub use terminal::CrosstermTerminal;
pub use view::DebugView;
