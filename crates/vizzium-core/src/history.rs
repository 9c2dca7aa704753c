//! Command history with a recall cursor.
//!
//! Entries are stored most-recent-first: index 0 is the last submitted
//! line. The recall cursor is `None` while the user is not browsing and
//! otherwise always a valid index.

use std::collections::VecDeque;

#[derive(Debug, Clone, Default)]
pub struct CommandHistory {
    /// Submitted lines, most recent first.
    entries: VecDeque<String>,
    /// Entry currently shown while browsing (`None` = not recalling).
    cursor: Option<usize>,
}

impl CommandHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a submitted line exactly as typed and stop browsing.
    pub fn push(&mut self, line: impl Into<String>) {
        self.entries.push_front(line.into());
        self.cursor = None;
    }

    /// Move to the next older entry, if there is one.
    pub fn recall_older(&mut self) -> Option<&str> {
        let next = self.cursor.map_or(0, |c| c + 1);
        if next >= self.entries.len() {
            return None;
        }
        self.cursor = Some(next);
        self.entries.get(next).map(String::as_str)
    }

    /// Move to the next newer entry.
    ///
    /// Returns `Some(Some(entry))` when a newer entry is shown, `Some(None)`
    /// when browsing ends at the newest entry, and `None` when not browsing.
    pub fn recall_newer(&mut self) -> Option<Option<&str>> {
        match self.cursor? {
            0 => {
                self.cursor = None;
                Some(None)
            }
            c => {
                self.cursor = Some(c - 1);
                Some(self.entries.get(c - 1).map(String::as_str))
            }
        }
    }

    /// Forget the recall position without touching the entries.
    pub fn reset_cursor(&mut self) {
        self.cursor = None;
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    /// Most recent entry.
    pub fn latest(&self) -> Option<&str> {
        self.get(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history(lines: &[&str]) -> CommandHistory {
        let mut h = CommandHistory::new();
        for line in lines {
            h.push(*line);
        }
        h
    }

    #[test]
    fn push_inserts_most_recent_first() {
        let h = history(&["step", "pc 4"]);
        assert_eq!(h.latest(), Some("pc 4"));
        assert_eq!(h.get(1), Some("step"));
        assert_eq!(h.len(), 2);
    }

    #[test]
    fn older_stops_at_oldest_entry() {
        let mut h = history(&["a", "b"]);
        assert_eq!(h.recall_older(), Some("b"));
        assert_eq!(h.recall_older(), Some("a"));
        assert_eq!(h.recall_older(), None);
        assert_eq!(h.cursor(), Some(1));
    }

    #[test]
    fn older_on_empty_history_is_noop() {
        let mut h = CommandHistory::new();
        assert_eq!(h.recall_older(), None);
        assert_eq!(h.cursor(), None);
    }

    #[test]
    fn newer_walks_back_and_leaves_recall_at_zero() {
        let mut h = history(&["a", "b", "c"]);
        h.recall_older();
        h.recall_older();
        assert_eq!(h.recall_newer(), Some(Some("c")));
        assert_eq!(h.recall_newer(), Some(None));
        assert_eq!(h.cursor(), None);
        assert_eq!(h.recall_newer(), None);
    }

    #[test]
    fn push_resets_cursor() {
        let mut h = history(&["a"]);
        h.recall_older();
        h.push("b");
        assert_eq!(h.cursor(), None);
    }
}
