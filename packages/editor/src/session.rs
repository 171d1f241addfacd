//! # Edit Session Management
//!
//! Per-session version store: the original document, the current one, the
//! undo/redo snapshots and a bounded history of committed edits.
//!
//! All state changes go through `load`, `commit`, `pop_undo`, `redo` and
//! `revert`. Restores re-stamp `version` past the current one so versions
//! only ever increase within a session.

use crate::{EditorError, UndoStack};
use refine_classifier::Mode;
use refine_schema::{IdGenerator, Schema};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::{debug, info};

pub const DEFAULT_MAX_HISTORY: usize = 50;

/// Instruction length shown in history summaries
pub const SUMMARY_INSTRUCTION_CHARS: usize = 100;

/// One committed edit with the schemas on either side of it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: String,
    pub timestamp: String,
    pub instruction: String,
    pub mode: Mode,

    /// Name of the rewriter used for full-mode edits
    #[serde(default)]
    pub rewriter: Option<String>,

    pub before: Schema,
    pub after: Schema,
}

/// History entry without its snapshots
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistorySummary {
    pub id: String,
    pub timestamp: String,
    pub instruction: String,
    pub mode: Mode,
    pub rewriter: Option<String>,
    pub version: u64,
}

impl From<&HistoryEntry> for HistorySummary {
    fn from(entry: &HistoryEntry) -> Self {
        Self {
            id: entry.id.clone(),
            timestamp: entry.timestamp.clone(),
            instruction: truncate(&entry.instruction, SUMMARY_INSTRUCTION_CHARS),
            mode: entry.mode,
            rewriter: entry.rewriter.clone(),
            version: entry.after.version,
        }
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let head: String = text.chars().take(max_chars).collect();
        format!("{}...", head)
    }
}

/// Single-writer edit state for one session
#[derive(Debug)]
pub struct EditSession {
    /// Unique session identifier
    pub id: String,

    pub created_at: String,

    original: Option<Schema>,
    current: Option<Schema>,
    undo: UndoStack,
    history: VecDeque<HistoryEntry>,
    max_history: usize,
    entry_ids: IdGenerator,
}

impl EditSession {
    pub fn new(id: impl Into<String>) -> Self {
        Self::with_limits(id, DEFAULT_MAX_HISTORY, UndoStack::new())
    }

    pub fn with_limits(id: impl Into<String>, max_history: usize, undo: UndoStack) -> Self {
        let id = id.into();
        Self {
            entry_ids: IdGenerator::from_seed(id.clone()),
            id,
            created_at: chrono::Utc::now().to_rfc3339(),
            original: None,
            current: None,
            undo,
            history: VecDeque::new(),
            max_history,
        }
    }

    /// Start over from `schema`, dropping undo state and history
    pub fn load(&mut self, schema: Schema) {
        info!(session_id = %self.id, version = schema.version, "Loaded document");
        self.original = Some(schema.clone());
        self.current = Some(schema);
        self.undo.clear();
        self.history.clear();
    }

    pub fn load_json(&mut self, source: &str) -> Result<(), EditorError> {
        self.load(Schema::from_json(source)?);
        Ok(())
    }

    pub fn is_loaded(&self) -> bool {
        self.current.is_some()
    }

    pub fn current(&self) -> Result<&Schema, EditorError> {
        self.current
            .as_ref()
            .ok_or_else(|| EditorError::NoDocument(self.id.clone()))
    }

    /// The document as first loaded
    pub fn original(&self) -> Option<&Schema> {
        self.original.as_ref()
    }

    pub fn undo_stack(&self) -> &UndoStack {
        &self.undo
    }

    /// Snapshot the current document onto the undo stack
    pub fn push_undo(&mut self, description: impl Into<String>) -> Result<(), EditorError> {
        let snapshot = self.current()?.clone();
        self.undo.push(snapshot, description);
        Ok(())
    }

    /// Replace the current document with `next` and record the edit.
    ///
    /// The previous document becomes undoable.
    pub fn commit(
        &mut self,
        next: Schema,
        instruction: &str,
        mode: Mode,
        rewriter: Option<&str>,
    ) -> Result<&HistoryEntry, EditorError> {
        let before = self.current()?.clone();
        self.undo.push(before.clone(), instruction);

        let entry = HistoryEntry {
            id: self.entry_ids.new_id(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            instruction: instruction.to_string(),
            mode,
            rewriter: rewriter.map(str::to_string),
            before,
            after: next.clone(),
        };
        info!(
            session_id = %self.id,
            entry_id = %entry.id,
            mode = %mode,
            version = next.version,
            "Committed edit"
        );
        self.current = Some(next);

        self.history.push_back(entry);
        while self.history.len() > self.max_history {
            self.history.pop_front();
        }
        self.history
            .back()
            .ok_or_else(|| EditorError::NoDocument(self.id.clone()))
    }

    /// Go back to the document before the latest edit
    pub fn pop_undo(&mut self) -> Result<&Schema, EditorError> {
        let current = self.current()?.clone();
        let next_version = current.version + 1;
        let restored = self.undo.undo(current).ok_or(EditorError::NothingToUndo)?;
        debug!(session_id = %self.id, restored = restored.version, "Undo");
        Ok(self.restore(restored, next_version))
    }

    pub fn redo(&mut self) -> Result<&Schema, EditorError> {
        let current = self.current()?.clone();
        let next_version = current.version + 1;
        let restored = self.undo.redo(current).ok_or(EditorError::NothingToRedo)?;
        debug!(session_id = %self.id, restored = restored.version, "Redo");
        Ok(self.restore(restored, next_version))
    }

    /// Make the result of a history entry current again; undoable like an edit
    pub fn revert(&mut self, entry_id: &str) -> Result<&Schema, EditorError> {
        let target = self
            .history_entry(entry_id)
            .map(|entry| entry.after.clone())
            .ok_or_else(|| EditorError::UnknownHistoryEntry(entry_id.to_string()))?;
        let next_version = self.current()?.version + 1;
        self.push_undo(format!("Revert to {}", entry_id))?;
        info!(session_id = %self.id, entry_id, "Reverted to history entry");
        Ok(self.restore(target, next_version))
    }

    fn restore(&mut self, mut schema: Schema, version: u64) -> &Schema {
        schema.version = version;
        self.current.insert(schema)
    }

    /// Oldest first
    pub fn history(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.history.iter()
    }

    pub fn history_summaries(&self) -> Vec<HistorySummary> {
        self.history.iter().map(HistorySummary::from).collect()
    }

    pub fn history_entry(&self, entry_id: &str) -> Option<&HistoryEntry> {
        self.history.iter().find(|entry| entry.id == entry_id)
    }
}
