//! Error types for the editor

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Session {0} has no document loaded")]
    NoDocument(String),

    #[error("Nothing to undo")]
    NothingToUndo,

    #[error("Nothing to redo")]
    NothingToRedo,

    #[error("Unknown history entry: {0}")]
    UnknownHistoryEntry(String),

    #[error("Schema error: {0}")]
    Schema(#[from] refine_schema::SchemaError),
}
