//! Contract for the full-mode collaborator that rewrites a whole schema.
//!
//! The transport behind a [`Rewriter`] (provider, retries, auth) is not this
//! crate's concern. A rewriter gets the instruction and the current schema
//! and answers with the replacement document as text, usually JSON wrapped
//! in a markdown code fence.

use refine_schema::Schema;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RewriteError {
    #[error("Upstream failure: {0}")]
    Upstream(String),

    #[error("Upstream returned an empty response")]
    EmptyResponse,
}

pub trait Rewriter: Send + Sync {
    /// Recorded in history entries of full-mode edits
    fn name(&self) -> &str;

    fn rewrite(&self, instruction: &str, schema: &Schema) -> Result<String, RewriteError>;
}

/// Strip a surrounding markdown code fence (```` ``` ```` or ```` ```json ````)
pub fn clean_response(raw: &str) -> &str {
    let mut content = raw.trim();

    if let Some(rest) = content.strip_prefix("```") {
        // Drop the language tag, if any
        content = rest
            .trim_start_matches(|c: char| c.is_ascii_alphanumeric())
            .trim_start();
    }
    if let Some(rest) = content.strip_suffix("```") {
        content = rest.trim_end();
    }

    content.trim()
}
