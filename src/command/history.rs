use crate::document::{Document, Snapshot};

/// Number of undo steps kept unless configured otherwise
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Linear undo/redo history made of whole-document snapshots.
///
/// The history only copies from and restores into the document; it never
/// edits text boxes itself.
#[derive(Debug, Clone)]
pub struct History {
    /// Stack of states that can be restored by undo (most recent last)
    undo_stack: Vec<Snapshot>,
    /// Stack of states that can be restored by redo (most recent last)
    redo_stack: Vec<Snapshot>,
    /// Maximum length of the undo stack
    limit: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

impl History {
    /// Creates a new empty history keeping at most `limit` undo steps
    pub fn new(limit: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            limit: limit.max(1),
        }
    }

    /// Record the state of `document` before it is changed.
    ///
    /// Must be called exactly once per logical change, before mutating.
    pub fn snapshot_before_change(&mut self, document: &Document) {
        self.undo_stack.push(document.snapshot());
        // A fresh change forks the timeline; the old future is unreachable
        self.redo_stack.clear();

        if self.undo_stack.len() > self.limit {
            let excess = self.undo_stack.len() - self.limit;
            self.undo_stack.drain(..excess);
            log::debug!("History limit reached, dropped {} oldest step(s)", excess);
        }
    }

    /// Restore the most recent undo snapshot. Returns false if there is none.
    pub fn undo(&mut self, document: &mut Document) -> bool {
        let Some(previous) = self.undo_stack.pop() else {
            return false;
        };
        let current = document.restore(previous);
        self.redo_stack.push(current);
        true
    }

    /// Restore the most recent redo snapshot. Returns false if there is none.
    pub fn redo(&mut self, document: &mut Document) -> bool {
        let Some(next) = self.redo_stack.pop() else {
            return false;
        };
        let current = document.restore(next);
        self.undo_stack.push(current);
        true
    }

    /// Returns true if there are states that can be undone
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Returns true if there are states that can be redone
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn undo_stack(&self) -> &[Snapshot] {
        &self.undo_stack
    }

    pub fn redo_stack(&self) -> &[Snapshot] {
        &self.redo_stack
    }

    /// Clear the history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text_box::TextBoxTemplate;

    #[test]
    fn test_empty_history_is_noop() {
        let mut history = History::default();
        let mut document = Document::new();

        assert!(!history.undo(&mut document));
        assert!(!history.redo(&mut document));
        assert!(document.is_empty());
    }

    #[test]
    fn test_limit_drops_oldest() {
        let mut history = History::new(2);
        let mut document = Document::new();

        for _ in 0..3 {
            history.snapshot_before_change(&document);
            document.add_text_box(&TextBoxTemplate::default());
        }

        assert_eq!(history.undo_len(), 2);
        // Oldest remaining snapshot is the one with a single text box
        assert_eq!(history.undo_stack()[0].len(), 1);
    }

    #[test]
    fn test_snapshot_is_independent_of_live_state() {
        let mut history = History::default();
        let mut document = Document::new();
        let id = document.add_text_box(&TextBoxTemplate::default());

        history.snapshot_before_change(&document);
        document.update(
            id,
            &crate::text_box::TextBoxPatch {
                text: Some("changed".into()),
                ..Default::default()
            },
        );

        assert_eq!(history.undo_stack()[0].text_boxes()[0].text, "New Text");
    }
}
