//! # Refine Editor
//!
//! Fast-mode editing engine: reads a natural-language instruction into a
//! structured [`Diff`], applies diffs to schema snapshots, and keeps each
//! session's versions with undo/redo.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ parser: instruction text → Diff             │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ apply: Diff × Schema → Schema + log         │
//! │  - Never mutates the input snapshot         │
//! │  - Resolves grid overflow after every diff  │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ session: current version, undo, history     │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use refine_editor::{apply_diff, EditSession, InstructionParser};
//!
//! let parser = InstructionParser::default();
//! let parsed = parser.parse("把这个区域缩小一点", session.current()?);
//! let result = apply_diff(session.current()?, &parsed.diff);
//! session.commit(result.schema, "把这个区域缩小一点", Mode::Fast, None)?;
//! ```

mod apply;
mod diff;
mod errors;
mod keywords;
mod parser;
mod session;
mod undo_stack;

pub use apply::{apply_diff, ApplyResult, MIN_RESIZED_SPAN, NO_OPERATION_WARNING};
pub use diff::{Diff, Intent, LayoutChange, Operation, PropChanges, Scope};
pub use errors::EditorError;
pub use parser::{resize_delta, style_changes, InstructionParser, ParseResult, APPENDED_ORDER};
pub use session::{
    EditSession, HistoryEntry, HistorySummary, DEFAULT_MAX_HISTORY, SUMMARY_INSTRUCTION_CHARS,
};
pub use undo_stack::{Snapshot, UndoStack, DEFAULT_UNDO_LEVELS};
