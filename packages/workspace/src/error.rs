use crate::rewrite::RewriteError;
use refine_editor::EditorError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WorkspaceError {
    #[error("Unknown session: {0}")]
    UnknownSession(String),

    #[error("Instruction is empty")]
    EmptyInstruction,

    #[error("Rewrite failed: {0}")]
    Rewrite(#[from] RewriteError),

    #[error("Rewrite output rejected: {0}")]
    InvalidRewrite(String),

    #[error("Editor error: {0}")]
    Editor(#[from] EditorError),

    #[error("Config error: {0}")]
    Config(#[from] anyhow::Error),
}
