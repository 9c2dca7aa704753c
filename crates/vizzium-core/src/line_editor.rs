//! The `:` command line: an append-only buffer with backspace and history
//! recall.

use crate::history::CommandHistory;

/// Whether an edit changed the visible line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    Changed,
    Unchanged,
}

#[derive(Debug, Default)]
pub struct LineEditor {
    line: String,
    history: CommandHistory,
}

impl LineEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fresh line (entering Command mode).
    pub fn begin(&mut self) {
        self.line.clear();
        self.history.reset_cursor();
    }

    /// Drop the current line without recording it.
    pub fn cancel(&mut self) {
        self.line.clear();
        self.history.reset_cursor();
    }

    /// Append a printable character. Control characters are ignored.
    pub fn insert(&mut self, ch: char) -> EditOutcome {
        if ch.is_control() {
            return EditOutcome::Unchanged;
        }
        self.line.push(ch);
        self.history.reset_cursor();
        EditOutcome::Changed
    }

    /// Remove the last character; a no-op on an empty line.
    pub fn backspace(&mut self) -> EditOutcome {
        match self.line.pop() {
            Some(_) => {
                self.history.reset_cursor();
                EditOutcome::Changed
            }
            None => EditOutcome::Unchanged,
        }
    }

    /// Replace the line with the next older history entry.
    pub fn recall_older(&mut self) -> EditOutcome {
        match self.history.recall_older() {
            Some(entry) => {
                self.line = entry.to_string();
                EditOutcome::Changed
            }
            None => EditOutcome::Unchanged,
        }
    }

    /// Replace the line with the next newer history entry, or clear it when
    /// browsing moves past the newest entry.
    pub fn recall_newer(&mut self) -> EditOutcome {
        match self.history.recall_newer() {
            Some(Some(entry)) => {
                self.line = entry.to_string();
                EditOutcome::Changed
            }
            Some(None) => {
                self.line.clear();
                EditOutcome::Changed
            }
            None => EditOutcome::Unchanged,
        }
    }

    /// Replace the line with a completion, if one is offered.
    pub fn complete<F>(&mut self, completer: F) -> EditOutcome
    where
        F: FnOnce(&str) -> Option<String>,
    {
        match completer(&self.line) {
            Some(completed) if completed != self.line => {
                self.line = completed;
                self.history.reset_cursor();
                EditOutcome::Changed
            }
            _ => EditOutcome::Unchanged,
        }
    }

    /// Record the line in history and hand it back, leaving the editor empty.
    pub fn submit(&mut self) -> String {
        let line = std::mem::take(&mut self.line);
        self.history.push(line.clone());
        line
    }

    pub fn line(&self) -> &str {
        &self.line
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(editor: &mut LineEditor, text: &str) {
        for ch in text.chars() {
            editor.insert(ch);
        }
    }

    #[test]
    fn backspace_on_empty_never_underflows() {
        let mut editor = LineEditor::new();
        for _ in 0..5 {
            assert_eq!(editor.backspace(), EditOutcome::Unchanged);
        }
        assert_eq!(editor.line(), "");
    }

    #[test]
    fn backspace_removes_last_character() {
        let mut editor = LineEditor::new();
        typed(&mut editor, "stepx");
        editor.backspace();
        assert_eq!(editor.line(), "step");
    }

    #[test]
    fn control_characters_are_not_inserted() {
        let mut editor = LineEditor::new();
        assert_eq!(editor.insert('\u{7}'), EditOutcome::Unchanged);
        assert_eq!(editor.line(), "");
    }

    #[test]
    fn submit_records_and_clears() {
        let mut editor = LineEditor::new();
        typed(&mut editor, "pc 4");
        assert_eq!(editor.submit(), "pc 4");
        assert_eq!(editor.line(), "");
        assert_eq!(editor.history().latest(), Some("pc 4"));
    }

    #[test]
    fn submit_records_empty_lines() {
        let mut editor = LineEditor::new();
        editor.submit();
        assert_eq!(editor.history().len(), 1);
        assert_eq!(editor.history().latest(), Some(""));
    }

    #[test]
    fn recall_does_not_modify_history() {
        let mut editor = LineEditor::new();
        typed(&mut editor, "step");
        editor.submit();
        editor.begin();
        editor.recall_older();
        editor.insert('x');
        assert_eq!(editor.line(), "stepx");
        assert_eq!(editor.history().latest(), Some("step"));
        assert_eq!(editor.history().cursor(), None);
    }

    #[test]
    fn recall_newer_past_newest_clears_line() {
        let mut editor = LineEditor::new();
        typed(&mut editor, "step");
        editor.submit();
        editor.recall_older();
        assert_eq!(editor.line(), "step");
        assert_eq!(editor.recall_newer(), EditOutcome::Changed);
        assert_eq!(editor.line(), "");
        assert_eq!(editor.recall_newer(), EditOutcome::Unchanged);
    }

    #[test]
    fn completion_replaces_line() {
        let mut editor = LineEditor::new();
        typed(&mut editor, "sho");
        let outcome = editor.complete(|line| Some(format!("{line}wcpu")));
        assert_eq!(outcome, EditOutcome::Changed);
        assert_eq!(editor.line(), "showcpu");
        assert_eq!(editor.complete(|_| None), EditOutcome::Unchanged);
    }
}
