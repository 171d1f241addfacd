//! # Undo/Redo Stack
//!
//! Tracks whole-schema snapshots so undo always restores a complete
//! document, never a partial patch.
//!
//! ## Design
//!
//! - Before every commit the previous schema is pushed as a snapshot
//! - Undo hands back the latest snapshot and parks the current schema on
//!   the redo stack
//! - Redo is the mirror image
//! - New snapshots clear the redo stack
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut stack = UndoStack::new();
//! stack.push(previous.clone(), "添加一个告警表格");
//!
//! let restored = stack.undo(current).unwrap();
//! let again = stack.redo(restored).unwrap();
//! ```

use refine_schema::Schema;
use std::collections::VecDeque;

pub const DEFAULT_UNDO_LEVELS: usize = 100;

/// A schema snapshot plus the instruction that replaced it
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub schema: Schema,

    pub description: Option<String>,
}

/// Undo/redo stack of schema snapshots
#[derive(Debug)]
pub struct UndoStack {
    /// Snapshots to go back to (most recent last)
    undo_stack: VecDeque<Snapshot>,

    /// Snapshots undone (most recent last)
    redo_stack: Vec<Snapshot>,

    /// 0 keeps everything
    max_levels: usize,
}

impl UndoStack {
    pub fn new() -> Self {
        Self::with_max_levels(DEFAULT_UNDO_LEVELS)
    }

    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            max_levels,
        }
    }

    /// Record the schema being replaced by a new edit
    pub fn push(&mut self, schema: Schema, description: impl Into<String>) {
        self.push_snapshot(Snapshot {
            schema,
            description: Some(description.into()),
        });
        self.redo_stack.clear();
    }

    fn push_snapshot(&mut self, snapshot: Snapshot) {
        self.undo_stack.push_back(snapshot);
        while self.max_levels > 0 && self.undo_stack.len() > self.max_levels {
            self.undo_stack.pop_front();
        }
    }

    /// Step back: returns the previous schema and keeps `current` for redo
    pub fn undo(&mut self, current: Schema) -> Option<Schema> {
        let snapshot = self.undo_stack.pop_back()?;
        self.redo_stack.push(Snapshot {
            schema: current,
            description: snapshot.description.clone(),
        });
        Some(snapshot.schema)
    }

    /// Step forward again after an undo
    pub fn redo(&mut self, current: Schema) -> Option<Schema> {
        let snapshot = self.redo_stack.pop()?;
        self.push_snapshot(Snapshot {
            schema: current,
            description: snapshot.description.clone(),
        });
        Some(snapshot.schema)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_levels(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_levels(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    /// Instruction that the next undo reverts
    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack.back()?.description.as_deref()
    }

    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack.last()?.description.as_deref()
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new()
    }
}
