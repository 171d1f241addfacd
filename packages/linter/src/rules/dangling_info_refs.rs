use crate::diagnostic::Diagnostic;
use crate::rules::LintRule;
use refine_schema::Schema;
use std::collections::HashSet;

/// Every `infoRefs` entry should name an item in the info queue
pub struct DanglingInfoRefsRule;

impl LintRule for DanglingInfoRefsRule {
    fn name(&self) -> &'static str {
        "dangling-info-refs"
    }

    fn description(&self) -> &'static str {
        "Warn about info references missing from the info queue"
    }

    fn check_schema(&self, schema: &Schema) -> Vec<Diagnostic> {
        let known: HashSet<&str> = schema.info_queue.iter().map(|i| i.id.as_str()).collect();

        schema
            .components()
            .flat_map(|component| {
                component
                    .info_refs
                    .iter()
                    .filter(|info_ref| !known.contains(info_ref.as_str()))
                    .map(move |info_ref| {
                        Diagnostic::warning(
                            self.name(),
                            format!(
                                "Component '{}' references unknown info item '{}'",
                                component.id, info_ref
                            ),
                        )
                        .with_target(component.id.clone())
                    })
            })
            .collect()
    }
}
