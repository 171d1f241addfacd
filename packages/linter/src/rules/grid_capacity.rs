use crate::diagnostic::Diagnostic;
use crate::rules::LintRule;
use refine_schema::Section;

/// Children must fit their section's columns unless it scrolls
pub struct GridCapacityRule;

impl LintRule for GridCapacityRule {
    fn name(&self) -> &'static str {
        "grid-capacity"
    }

    fn description(&self) -> &'static str {
        "Warn when a non-scrollable section is over its column capacity"
    }

    fn check_section(&self, section: &Section) -> Vec<Diagnostic> {
        if section.fits() || section.layout.scrollable {
            return Vec::new();
        }
        vec![Diagnostic::warning(
            self.name(),
            format!(
                "Section '{}' holds {} columns but only has {}",
                section.id,
                section.used_span(),
                section.layout.col_span
            ),
        )
        .with_target(section.id.clone())
        .with_suggestion("Narrow its components or mark the section scrollable")]
    }
}
