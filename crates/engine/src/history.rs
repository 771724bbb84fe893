//! Undo/Redo history of whole-table snapshots
//!
//! The top of the undo stack is always the state currently shown. Undo
//! therefore needs two entries: the current one moves to the redo stack
//! and the one beneath it becomes current.

use std::collections::VecDeque;

use crate::snapshot::Snapshot;

#[derive(Debug, Clone)]
pub struct History {
    undo_stack: VecDeque<Snapshot>,
    redo_stack: Vec<Snapshot>,
    max_entries: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(crate::DEFAULT_MAX_UNDO)
    }
}

impl History {
    pub fn new(max_entries: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            max_entries: max_entries.max(1),
        }
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Push a new current state.
    ///
    /// Returns false (and changes nothing) when the snapshot equals the
    /// current top, so retyping the same value doesn't add entries.
    pub fn record(&mut self, snapshot: Snapshot) -> bool {
        if self.undo_stack.back() == Some(&snapshot) {
            return false;
        }

        self.undo_stack.push_back(snapshot);
        self.redo_stack.clear();

        // Limit history size
        while self.undo_stack.len() > self.max_entries {
            self.undo_stack.pop_front();
        }
        true
    }

    /// Step back. Returns the state to restore, or None if there is no
    /// earlier state.
    pub fn undo(&mut self) -> Option<Snapshot> {
        if self.undo_stack.len() < 2 {
            return None;
        }
        let current = self.undo_stack.pop_back()?;
        self.redo_stack.push(current);
        self.undo_stack.back().cloned()
    }

    /// Step forward again. Returns the state to restore, or None.
    pub fn redo(&mut self) -> Option<Snapshot> {
        let next = self.redo_stack.pop()?;
        self.undo_stack.push_back(next.clone());
        Some(next)
    }

    /// Drop all history and start over from `snapshot`
    pub fn reset(&mut self, snapshot: Snapshot) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.undo_stack.push_back(snapshot);
    }

    /// The state the history considers current
    pub fn current(&self) -> Option<&Snapshot> {
        self.undo_stack.back()
    }

    pub fn can_undo(&self) -> bool {
        self.undo_stack.len() >= 2
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }
}
