//! Linear undo/redo history over the page sequence.

use crate::document::WhiteboardPage;
use thiserror::Error;

/// A snapshot of every page at one point in time.
pub type Snapshot = Vec<WhiteboardPage>;

/// History navigation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HistoryError {
    #[error("Nothing to undo")]
    NothingToUndo,
    #[error("Nothing to redo")]
    NothingToRedo,
}

/// Undo/redo stacks.
///
/// `past` holds the state before each committed edit (top = most recent);
/// `future` holds states undone since the last edit (top = next redo).
/// Snapshots are independent of the live document: pages share element lists
/// copy-on-write, so a later edit never reaches back into history.
#[derive(Debug, Clone, Default)]
pub struct HistoryStack {
    past: Vec<Snapshot>,
    future: Vec<Snapshot>,
    /// Maximum number of undo states to keep (`None` = unbounded).
    limit: Option<usize>,
}

impl HistoryStack {
    /// Create an empty, unbounded history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty history that keeps at most `limit` undo states.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }

    /// Record the state immediately before an edit. Clears the redo stack.
    pub fn save_state(&mut self, pages: &[WhiteboardPage]) {
        self.past.push(pages.to_vec());
        self.future.clear();

        if let Some(limit) = self.limit {
            if self.past.len() > limit {
                let excess = self.past.len() - limit;
                self.past.drain(..excess);
            }
        }
    }

    /// Step back one edit. `current` becomes the next redo state; the returned
    /// snapshot is the state to apply.
    pub fn undo(&mut self, current: &[WhiteboardPage]) -> Result<Snapshot, HistoryError> {
        let previous = self.past.pop().ok_or(HistoryError::NothingToUndo)?;
        self.future.push(current.to_vec());
        Ok(previous)
    }

    /// Step forward one undone edit. `current` goes back onto the undo stack.
    pub fn redo(&mut self, current: &[WhiteboardPage]) -> Result<Snapshot, HistoryError> {
        let next = self.future.pop().ok_or(HistoryError::NothingToRedo)?;
        self.past.push(current.to_vec());
        Ok(next)
    }

    /// Drop all history (used when switching documents).
    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub(crate) fn undo_depth(&self) -> usize {
        self.past.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{DrawingElement, ElementStyle};
    use kurbo::Point;

    fn text(s: &str) -> DrawingElement {
        DrawingElement::text(s, Point::new(1.0, 1.0), ElementStyle::default()).unwrap()
    }

    fn pages_with(labels: &[&str]) -> Snapshot {
        vec![WhiteboardPage::with_elements(
            labels.iter().map(|l| text(l)).collect(),
        )]
    }

    #[test]
    fn test_empty_stack() {
        let mut history = HistoryStack::new();
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert_eq!(history.undo(&[]), Err(HistoryError::NothingToUndo));
        assert_eq!(history.redo(&[]), Err(HistoryError::NothingToRedo));
    }

    #[test]
    fn test_undo_returns_prior_state_and_redo_restores() {
        let mut history = HistoryStack::new();
        let before = pages_with(&[]);
        let after = pages_with(&["a"]);

        history.save_state(&before);
        let undone = history.undo(&after).unwrap();
        assert_eq!(undone, before);
        assert!(history.can_redo());

        let redone = history.redo(&undone).unwrap();
        assert_eq!(redone, after);
        assert!(history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_save_state_clears_future() {
        let mut history = HistoryStack::new();
        let s0 = pages_with(&[]);
        let s1 = pages_with(&["a"]);

        history.save_state(&s0);
        let restored = history.undo(&s1).unwrap();
        assert!(history.can_redo());

        history.save_state(&restored);
        assert!(!history.can_redo());
        assert_eq!(history.redo(&restored), Err(HistoryError::NothingToRedo));
    }

    #[test]
    fn test_snapshot_independent_of_live_pages() {
        let mut history = HistoryStack::new();
        let mut live = pages_with(&["a"]);

        history.save_state(&live);
        live[0].push(text("b"));

        let snapshot = history.undo(&live).unwrap();
        assert_eq!(snapshot[0].len(), 1);
        assert_eq!(live[0].len(), 2);
    }

    #[test]
    fn test_limit_drops_oldest() {
        let mut history = HistoryStack::with_limit(2);
        history.save_state(&pages_with(&[]));
        history.save_state(&pages_with(&["a"]));
        history.save_state(&pages_with(&["a", "b"]));
        assert_eq!(history.undo_depth(), 2);

        let current = pages_with(&["a", "b", "c"]);
        let first = history.undo(&current).unwrap();
        assert_eq!(first[0].len(), 2);
        let second = history.undo(&first).unwrap();
        assert_eq!(second[0].len(), 1);
        assert!(!history.can_undo());
    }

    #[test]
    fn test_clear() {
        let mut history = HistoryStack::new();
        history.save_state(&pages_with(&[]));
        let _ = history.undo(&pages_with(&["a"]));
        history.save_state(&pages_with(&[]));
        history.clear();
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }
}
