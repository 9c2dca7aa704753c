//! Normal/Command mode state machine.
//!
//! In Normal mode keys are hotkeys; `:` switches to Command mode, where keys
//! edit the command line until Enter submits it or Escape abandons it. The
//! machine only reports what happened; drawing and dispatch belong to the
//! console that drives it.

use std::collections::HashMap;

use crate::constants::COMMAND_PROMPT;
use crate::line_editor::{EditOutcome, LineEditor};

/// One input event as delivered by the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Backspace,
    Up,
    Down,
    Tab,
    /// The terminal was resized.
    Resize,
    /// Ctrl+C.
    Interrupt,
    /// Anything else the terminal reports.
    Other,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Normal,
    Command,
}

/// Result of feeding one key to the machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Key has no meaning in the current mode.
    Ignored,
    /// Normal -> Command; the prompt should be shown.
    EnteredCommand,
    /// The command line changed and must be redrawn.
    LineChanged,
    /// Command -> Normal without dispatch.
    Cancelled,
    /// A line was submitted and should be dispatched.
    Submitted(String),
    /// A Normal-mode hotkey bound to the given command name.
    Hotkey(String),
    /// Tab was pressed in Command mode.
    CompletionRequested,
    /// Terminal geometry changed.
    Resized,
    /// The user asked to leave the console from either mode.
    Interrupted,
}

#[derive(Debug, Default)]
pub struct ModeMachine {
    mode: Mode,
    editor: LineEditor,
    hotkeys: HashMap<char, String>,
}

impl ModeMachine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a Normal-mode key to a command name, replacing any previous
    /// binding. The prompt key cannot be rebound.
    pub fn bind_hotkey(&mut self, key: char, command: impl Into<String>) -> bool {
        if key == COMMAND_PROMPT {
            tracing::warn!(key = %key, "Refusing to bind the command prompt key");
            return false;
        }
        self.hotkeys.insert(key, command.into());
        true
    }

    pub fn handle(&mut self, key: Key) -> Transition {
        match key {
            Key::Resize => return Transition::Resized,
            Key::Interrupt => return Transition::Interrupted,
            _ => {}
        }

        match self.mode {
            Mode::Normal => self.handle_normal(key),
            Mode::Command => self.handle_command(key),
        }
    }

    fn handle_normal(&mut self, key: Key) -> Transition {
        match key {
            Key::Char(COMMAND_PROMPT) => {
                self.mode = Mode::Command;
                self.editor.begin();
                Transition::EnteredCommand
            }
            Key::Char(ch) => match self.hotkeys.get(&ch) {
                Some(command) => Transition::Hotkey(command.clone()),
                None => Transition::Ignored,
            },
            _ => Transition::Ignored,
        }
    }

    fn handle_command(&mut self, key: Key) -> Transition {
        let outcome = match key {
            Key::Enter => return Transition::Submitted(self.editor.submit()),
            Key::Escape => {
                self.mode = Mode::Normal;
                self.editor.cancel();
                return Transition::Cancelled;
            }
            Key::Tab => return Transition::CompletionRequested,
            Key::Char(ch) => self.editor.insert(ch),
            Key::Backspace => self.editor.backspace(),
            Key::Up => self.editor.recall_older(),
            Key::Down => self.editor.recall_newer(),
            Key::Resize | Key::Interrupt | Key::Other => EditOutcome::Unchanged,
        };

        match outcome {
            EditOutcome::Changed => Transition::LineChanged,
            EditOutcome::Unchanged => Transition::Ignored,
        }
    }

    /// Post-dispatch policy: whatever the handler did, go back to Normal.
    pub fn force_normal(&mut self) {
        self.mode = Mode::Normal;
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn line(&self) -> &str {
        self.editor.line()
    }

    pub fn editor(&self) -> &LineEditor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut LineEditor {
        &mut self.editor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_line(machine: &mut ModeMachine, text: &str) {
        for ch in text.chars() {
            machine.handle(Key::Char(ch));
        }
    }

    #[test]
    fn starts_in_normal_mode() {
        assert_eq!(ModeMachine::new().mode(), Mode::Normal);
    }

    #[test]
    fn colon_enters_command_mode_with_empty_line() {
        let mut machine = ModeMachine::new();
        assert_eq!(machine.handle(Key::Char(':')), Transition::EnteredCommand);
        assert_eq!(machine.mode(), Mode::Command);
        assert_eq!(machine.line(), "");
    }

    #[test]
    fn unbound_keys_are_ignored_in_normal_mode() {
        let mut machine = ModeMachine::new();
        for key in [Key::Char('x'), Key::Enter, Key::Escape, Key::Up, Key::Tab] {
            assert_eq!(machine.handle(key), Transition::Ignored);
        }
        assert_eq!(machine.mode(), Mode::Normal);
    }

    #[test]
    fn hotkey_reports_bound_command() {
        let mut machine = ModeMachine::new();
        machine.bind_hotkey('s', "step");
        assert_eq!(
            machine.handle(Key::Char('s')),
            Transition::Hotkey("step".into())
        );
        assert_eq!(machine.mode(), Mode::Normal);
    }

    #[test]
    fn prompt_key_cannot_be_bound() {
        let mut machine = ModeMachine::new();
        assert!(!machine.bind_hotkey(':', "step"));
        assert_eq!(machine.handle(Key::Char(':')), Transition::EnteredCommand);
    }

    #[test]
    fn escape_discards_line_and_returns_to_normal() {
        let mut machine = ModeMachine::new();
        machine.handle(Key::Char(':'));
        type_line(&mut machine, "step");
        assert_eq!(machine.handle(Key::Escape), Transition::Cancelled);
        assert_eq!(machine.mode(), Mode::Normal);
        assert_eq!(machine.line(), "");
        assert!(machine.editor().history().is_empty());
    }

    #[test]
    fn enter_submits_and_waits_for_post_dispatch_policy() {
        let mut machine = ModeMachine::new();
        machine.handle(Key::Char(':'));
        type_line(&mut machine, "pc 4");
        assert_eq!(
            machine.handle(Key::Enter),
            Transition::Submitted("pc 4".into())
        );
        assert_eq!(machine.mode(), Mode::Command);
        machine.force_normal();
        assert_eq!(machine.mode(), Mode::Normal);
    }

    #[test]
    fn hotkeys_are_plain_text_in_command_mode() {
        let mut machine = ModeMachine::new();
        machine.bind_hotkey('s', "step");
        machine.handle(Key::Char(':'));
        assert_eq!(machine.handle(Key::Char('s')), Transition::LineChanged);
        assert_eq!(machine.line(), "s");
    }

    #[test]
    fn up_recalls_min_of_presses_and_oldest() {
        let mut machine = ModeMachine::new();
        for line in ["a", "b", "c"] {
            machine.handle(Key::Char(':'));
            type_line(&mut machine, line);
            machine.handle(Key::Enter);
            machine.force_normal();
        }
        machine.handle(Key::Char(':'));

        for presses in 1..=5usize {
            machine.handle(Key::Up);
            let cursor = machine.editor().history().cursor().unwrap();
            assert_eq!(cursor, presses.min(3) - 1);
            assert_eq!(
                machine.line(),
                machine.editor().history().get(cursor).unwrap()
            );
        }
        assert_eq!(machine.line(), "a");
    }

    #[test]
    fn tab_requests_completion_only_in_command_mode() {
        let mut machine = ModeMachine::new();
        assert_eq!(machine.handle(Key::Tab), Transition::Ignored);
        machine.handle(Key::Char(':'));
        assert_eq!(machine.handle(Key::Tab), Transition::CompletionRequested);
    }

    #[test]
    fn resize_is_reported_in_both_modes() {
        let mut machine = ModeMachine::new();
        assert_eq!(machine.handle(Key::Resize), Transition::Resized);
        machine.handle(Key::Char(':'));
        assert_eq!(machine.handle(Key::Resize), Transition::Resized);
        assert_eq!(machine.mode(), Mode::Command);
    }

    #[test]
    fn interrupt_is_reported_in_both_modes() {
        let mut machine = ModeMachine::new();
        assert_eq!(machine.handle(Key::Interrupt), Transition::Interrupted);
        machine.handle(Key::Char(':'));
        assert_eq!(machine.handle(Key::Interrupt), Transition::Interrupted);
    }
}
