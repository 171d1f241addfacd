//! # Refine Workspace
//!
//! Sessions and instruction routing on top of the editor.
//!
//! ```text
//! instruction ──► classify ──► fast: parse → apply ─┐
//!                     │            │ (nothing to do) │
//!                     │            ▼                 ▼
//!                     └──────► full: rewrite → validate → commit
//! ```
//!
//! Every committed result lands in the session's version store with the
//! previous schema pushed for undo.

pub mod config;
mod error;
pub mod rewrite;
mod router;
pub mod store;

pub use config::{WorkspaceConfig, DEFAULT_CONFIG_NAME};
pub use error::WorkspaceError;
pub use rewrite::{clean_response, RewriteError, Rewriter};
pub use router::{ModifyOutcome, Workspace};
pub use store::{SessionStore, SharedSession};
