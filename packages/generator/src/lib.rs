//! # Refine Generator
//!
//! Turns a task context into the first version of a schema:
//!
//! ```text
//! task spec ─┬─ plan_stages ──────┐
//!            └─ build_info_queue ─┴─ generate_schema ── Schema v1
//! scenario ──┘                        ↑
//! library ────────────────────────────┘
//! ```
//!
//! Stage descriptions and extra info items are mined from the task text;
//! components are picked from the library by how well they match each
//! section's info items.

mod generator;
mod selection;
mod summary;
mod text;

pub use generator::{Generation, GenerationContext, SchemaGenerator};
pub use selection::rank_components_for_info;
pub use summary::{ComponentStats, ContextSummary, PersonaSummary, ScenarioSummary};
pub use text::{infer_roles_from_sentence, slug, split_sentences};
