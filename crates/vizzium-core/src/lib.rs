//! Vizzium Core - modal console framework
//!
//! Provides the pieces of a vi-like debugger console that do not depend on
//! any particular terminal or target:
//! - Command tokenizer and numeric argument parsing
//! - Command history with a recall cursor
//! - Line editor for the `:` command line
//! - Normal/Command mode state machine with hotkeys
//! - Command registry and dispatcher
//! - The `Target` trait a debuggable processor implements

pub mod constants;
pub mod error;
pub mod history;
pub mod line_editor;
pub mod mode;
pub mod registry;
pub mod target;
pub mod tokenizer;

pub use constants::*;
pub use error::*;
pub use history::CommandHistory;
pub use line_editor::{EditOutcome, LineEditor};
pub use mode::{Key, Mode, ModeMachine, Transition};
pub use registry::{CommandRegistry, ConsoleControl, Handler};
pub use target::{RegisterPair, Target, TargetSnapshot};
pub use tokenizer::{parse_address, parse_byte, tokenize};
