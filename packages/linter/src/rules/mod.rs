mod dangling_info_refs;
mod empty_schema;
mod grid_capacity;
mod unique_component_ids;

pub use dangling_info_refs::DanglingInfoRefsRule;
pub use empty_schema::EmptySchemaRule;
pub use grid_capacity::GridCapacityRule;
pub use unique_component_ids::UniqueComponentIdsRule;

use crate::diagnostic::Diagnostic;
use refine_schema::{Schema, Section};

/// A structural check over a schema.
///
/// Rules look at the whole schema, at each section, or both. Both hooks
/// default to reporting nothing.
pub trait LintRule: Send + Sync {
    /// Kebab-case id reported in [`Diagnostic::rule`]
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    fn check_schema(&self, _schema: &Schema) -> Vec<Diagnostic> {
        Vec::new()
    }

    fn check_section(&self, _section: &Section) -> Vec<Diagnostic> {
        Vec::new()
    }
}

/// Ordered set of rules; diagnostics come out in registration order
pub struct RuleRegistry {
    rules: Vec<Box<dyn LintRule>>,
}

impl RuleRegistry {
    /// Registry holding every built-in rule
    pub fn new() -> Self {
        Self::empty()
            .with_rule(EmptySchemaRule)
            .with_rule(UniqueComponentIdsRule)
            .with_rule(DanglingInfoRefsRule)
            .with_rule(GridCapacityRule)
    }

    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn with_rule(mut self, rule: impl LintRule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Drop the rule named `name`; returns whether it was registered
    pub fn disable(&mut self, name: &str) -> bool {
        let before = self.rules.len();
        self.rules.retain(|rule| rule.name() != name);
        self.rules.len() != before
    }

    pub fn rules(&self) -> &[Box<dyn LintRule>] {
        &self.rules
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|rule| rule.name()).collect()
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.rule_names()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_rule_order() {
        assert_eq!(
            RuleRegistry::new().rule_names(),
            vec![
                "empty-schema",
                "unique-component-ids",
                "dangling-info-refs",
                "grid-capacity"
            ]
        );
    }

    #[test]
    fn test_disable_rule() {
        let mut registry = RuleRegistry::new();
        assert!(registry.disable("grid-capacity"));
        assert!(!registry.disable("grid-capacity"));
        assert_eq!(registry.rules().len(), 3);
    }
}
