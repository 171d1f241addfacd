//! Structural validation of schemas.
//!
//! Every schema accepted from outside the fast path (a full-mode rewrite, a
//! loaded document) is linted before it replaces the current one. An
//! `Error` diagnostic means the document must be rejected; warnings are
//! surfaced but tolerated.

mod diagnostic;
mod linter;
mod rules;

pub use diagnostic::{has_errors, Diagnostic, DiagnosticLevel};
pub use linter::{lint_schema, LintOptions};
pub use rules::{
    DanglingInfoRefsRule, EmptySchemaRule, GridCapacityRule, LintRule, RuleRegistry,
    UniqueComponentIdsRule,
};
