use crate::diagnostic::Diagnostic;
use crate::rules::LintRule;
use refine_schema::Schema;

/// A schema must have at least one page
pub struct EmptySchemaRule;

impl LintRule for EmptySchemaRule {
    fn name(&self) -> &'static str {
        "empty-schema"
    }

    fn description(&self) -> &'static str {
        "Disallow schemas without pages"
    }

    fn check_schema(&self, schema: &Schema) -> Vec<Diagnostic> {
        if !schema.pages.is_empty() {
            return Vec::new();
        }
        vec![Diagnostic::error(self.name(), "Schema has no pages")
            .with_suggestion("Regenerate the document or restore a previous version")]
    }
}
