use crate::diagnostic::Diagnostic;
use crate::rules::LintRule;
use refine_schema::visitor::Visitor;
use refine_schema::{Component, Schema};
use std::collections::HashSet;

/// Component ids must be unique across the whole schema
pub struct UniqueComponentIdsRule;

impl LintRule for UniqueComponentIdsRule {
    fn name(&self) -> &'static str {
        "unique-component-ids"
    }

    fn description(&self) -> &'static str {
        "Disallow two components sharing an id"
    }

    fn check_schema(&self, schema: &Schema) -> Vec<Diagnostic> {
        let mut collector = DuplicateCollector::default();
        collector.visit_schema(schema);

        collector
            .duplicates
            .into_iter()
            .map(|id| {
                Diagnostic::error(self.name(), format!("Component id '{}' is used more than once", id))
                    .with_target(id)
                    .with_suggestion("Give every component its own id")
            })
            .collect()
    }
}

#[derive(Default)]
struct DuplicateCollector {
    seen: HashSet<String>,
    duplicates: Vec<String>,
}

impl Visitor for DuplicateCollector {
    fn visit_component(&mut self, component: &Component) {
        if !self.seen.insert(component.id.clone()) && !self.duplicates.contains(&component.id) {
            self.duplicates.push(component.id.clone());
        }
    }
}
