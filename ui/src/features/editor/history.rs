use super::document::{Document, Selection};

pub const DEFAULT_HISTORY_LIMIT: usize = 100;

#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub document: Document,
    pub selection: Selection,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditKind {
    /// Live typing in the editable region; consecutive edits coalesce
    Typing,
    Command,
}

/// Undo/redo stacks of whole-document snapshots.
#[derive(Clone, Debug)]
pub struct History {
    undo: Vec<Snapshot>,
    redo: Vec<Snapshot>,
    limit: usize,
    last_kind: Option<EditKind>,
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

impl History {
    pub fn new(limit: usize) -> Self {
        Self {
            undo: Vec::new(),
            redo: Vec::new(),
            limit: limit.max(1),
            last_kind: None,
        }
    }

    /// A fresh history with the same limit.
    pub fn emptied(&self) -> Self {
        Self::new(self.limit)
    }

    /// Remember the state before an edit. Any new edit invalidates redo.
    pub fn record(&mut self, before: Snapshot, kind: EditKind) {
        self.redo.clear();
        let coalesce = kind == EditKind::Typing && self.last_kind == Some(EditKind::Typing);
        self.last_kind = Some(kind);
        if coalesce {
            return;
        }

        self.undo.push(before);
        if self.undo.len() > self.limit {
            let excess = self.undo.len() - self.limit;
            self.undo.drain(..excess);
        }
    }

    /// Start a new undo step for the next typing edit (caret moved, etc).
    pub fn break_coalescing(&mut self) {
        self.last_kind = None;
    }

    pub fn undo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let previous = self.undo.pop()?;
        self.redo.push(current);
        self.last_kind = None;
        Some(previous)
    }

    pub fn redo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let next = self.redo.pop()?;
        self.undo.push(current);
        self.last_kind = None;
        Some(next)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(text: &str) -> Snapshot {
        Snapshot {
            document: Document::from_text(text),
            selection: Selection::default(),
        }
    }

    #[test]
    fn test_undo_redo_cycle() {
        let mut history = History::default();
        history.record(snapshot("a"), EditKind::Command);

        let restored = history.undo(snapshot("b")).unwrap();
        assert_eq!(restored, snapshot("a"));
        assert!(history.can_redo());

        let again = history.redo(snapshot("a")).unwrap();
        assert_eq!(again, snapshot("b"));
        assert!(!history.can_redo());
    }

    #[test]
    fn test_typing_coalesces_until_broken() {
        let mut history = History::default();
        history.record(snapshot(""), EditKind::Typing);
        history.record(snapshot("h"), EditKind::Typing);
        history.record(snapshot("he"), EditKind::Typing);
        assert_eq!(history.undo_depth(), 1);

        history.break_coalescing();
        history.record(snapshot("hey"), EditKind::Typing);
        assert_eq!(history.undo_depth(), 2);

        history.record(snapshot("hey!"), EditKind::Command);
        assert_eq!(history.undo_depth(), 3);
    }

    #[test]
    fn test_new_edit_clears_redo() {
        let mut history = History::default();
        history.record(snapshot("a"), EditKind::Command);
        history.undo(snapshot("b"));
        history.record(snapshot("a"), EditKind::Command);
        assert!(!history.can_redo());
    }

    #[test]
    fn test_limit_drops_oldest() {
        let mut history = History::new(3);
        for text in ["1", "2", "3", "4", "5"] {
            history.record(snapshot(text), EditKind::Command);
        }
        assert_eq!(history.undo_depth(), 3);
        assert_eq!(history.undo(snapshot("6")), Some(snapshot("5")));
        history.undo(snapshot("5"));
        assert_eq!(history.undo(snapshot("4")), Some(snapshot("3")));
        assert!(!history.can_undo());
    }
}
