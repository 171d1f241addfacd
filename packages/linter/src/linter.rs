use crate::diagnostic::Diagnostic;
use crate::rules::RuleRegistry;
use refine_schema::visitor::Visitor;
use refine_schema::{Schema, Section};
use tracing::debug;

/// Options for configuring the linter
#[derive(Debug, Default)]
pub struct LintOptions {
    /// Custom rule registry (uses default if None)
    pub registry: Option<RuleRegistry>,
}

/// Lint a schema and return diagnostics, schema-wide rules first
pub fn lint_schema(schema: &Schema, options: LintOptions) -> Vec<Diagnostic> {
    let registry = options.registry.unwrap_or_default();
    let mut diagnostics = Vec::new();

    for rule in registry.rules() {
        diagnostics.extend(rule.check_schema(schema));
    }

    let mut sections = SectionLinter {
        registry: &registry,
        diagnostics: &mut diagnostics,
    };
    sections.visit_schema(schema);

    debug!(diagnostics = diagnostics.len(), "Linted schema");
    diagnostics
}

struct SectionLinter<'a> {
    registry: &'a RuleRegistry,
    diagnostics: &'a mut Vec<Diagnostic>,
}

impl Visitor for SectionLinter<'_> {
    fn visit_section(&mut self, section: &Section) {
        for rule in self.registry.rules() {
            self.diagnostics.extend(rule.check_section(section));
        }
    }
}
