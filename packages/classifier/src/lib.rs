//! # Refine Classifier
//!
//! Decides whether an edit instruction is local and atomic enough for the
//! deterministic diff engine ("fast" mode) or needs a whole-document rewrite
//! by an LLM ("full" mode).
//!
//! Classification is pure keyword and pattern scoring: no I/O, and the same
//! input always yields the same result.

mod classifier;
mod keywords;

pub use classifier::{classify, Classification, ClassificationMetadata, Mode};
pub use keywords::{COMPLEX_KEYWORDS, SIMPLE_KEYWORDS};
