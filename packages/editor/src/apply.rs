//! # Diff Application
//!
//! Applies a [`Diff`] to a copy of a schema. The input schema is never
//! touched. Operations that cannot be resolved are skipped with a warning
//! while the rest still apply. Afterwards every section is brought back
//! within its column capacity and the version is bumped.

use crate::diff::{Diff, Operation, PropChanges, Scope};
use crate::parser::APPENDED_ORDER;
use refine_schema::{resolve_layout_conflicts, IdGenerator, Schema, SectionPath};
use serde_json::Value;
use tracing::{debug, info, warn};

/// Narrowest span a resize can produce
pub const MIN_RESIZED_SPAN: u32 = 2;

pub const NO_OPERATION_WARNING: &str = "No actionable operation in the diff";

#[derive(Debug, Clone, PartialEq)]
pub struct ApplyResult {
    pub schema: Schema,
    pub log: Vec<String>,
    pub warnings: Vec<String>,
}

impl ApplyResult {
    /// Whether the schema was replaced by a new version
    pub fn changed(&self, previous: &Schema) -> bool {
        self.schema.version != previous.version
    }
}

/// Apply `diff` to a copy of `schema`.
///
/// An empty diff returns the schema unchanged, version included, with a
/// single warning.
pub fn apply_diff(schema: &Schema, diff: &Diff) -> ApplyResult {
    if diff.is_empty() {
        return ApplyResult {
            schema: schema.clone(),
            log: Vec::new(),
            warnings: vec![NO_OPERATION_WARNING.to_string()],
        };
    }

    let mut applier = Applier {
        schema: schema.clone(),
        diff,
        now: chrono::Utc::now().to_rfc3339(),
        log: Vec::new(),
        warnings: Vec::new(),
        touched: Vec::new(),
    };

    for operation in &diff.operations {
        debug!(op = operation.name(), "Applying operation");
        applier.apply(operation);
    }

    let Applier {
        mut schema,
        now,
        mut log,
        warnings,
        touched,
        ..
    } = applier;

    log.extend(resolve_layout_conflicts(&mut schema).iter().map(|a| a.to_string()));

    schema.version += 1;
    schema.metadata.last_updated_at = Some(now);
    schema.metadata.last_modified_components = Some(touched);

    info!(
        version = schema.version,
        operations = diff.operations.len(),
        warnings = warnings.len(),
        "Applied diff"
    );

    ApplyResult {
        schema,
        log,
        warnings,
    }
}

struct Applier<'a> {
    schema: Schema,
    diff: &'a Diff,
    now: String,
    log: Vec<String>,
    warnings: Vec<String>,
    touched: Vec<String>,
}

impl Applier<'_> {
    fn apply(&mut self, operation: &Operation) {
        match operation {
            Operation::AddNode {
                target_section_id,
                component,
                page_id,
            } => self.add(target_section_id, component, page_id.as_deref()),
            Operation::RemoveNode { component_id, .. } => self.remove(component_id),
            Operation::UpdateProps {
                component_id,
                changes,
            } => self.update(component_id, changes),
            Operation::ReorderChildren {
                section_id,
                new_order,
            } => self.reorder(section_id, new_order),
        }
    }

    fn warn(&mut self, message: String) {
        warn!("{}", message);
        self.warnings.push(message);
    }

    /// Instruction recorded on touched components
    fn instruction(&self, fallback: &str) -> Value {
        if self.diff.summary.is_empty() {
            Value::from(fallback)
        } else {
            Value::from(self.diff.summary.as_str())
        }
    }

    fn add(&mut self, target: &str, component: &refine_schema::Component, page_id: Option<&str>) {
        let Some(path) = self.schema.locate_section(page_id, target) else {
            self.warn(format!("Target section '{}' not found, add skipped", target));
            return;
        };

        let mut component = component.clone();
        if component.id.is_empty() || self.schema.contains_component(&component.id) {
            let schema = &self.schema;
            let mut ids = IdGenerator::new(&format!("{}:{}", schema.version, self.diff.summary));
            component.id = ids.component_id(&component.role, |c| schema.contains_component(c));
        }
        if component.layout.order == 0 {
            component.layout.order = APPENDED_ORDER;
        }
        component
            .meta
            .insert("lastInstruction".to_string(), self.instruction("add"));

        let section = self.schema.section_at_mut(path);
        let label = if component.role.is_empty() {
            component.kind.clone()
        } else {
            component.role.clone()
        };
        self.log.push(format!("Added {} -> {}", label, section.id));
        self.touched.push(component.id.clone());
        section.components.push(component);
    }

    fn remove(&mut self, component_id: &str) {
        if self.schema.take_component(component_id).is_some() {
            self.log.push(format!("Removed {}", component_id));
            self.touched.push(component_id.to_string());
        } else {
            self.warn(format!("Component '{}' to remove does not exist", component_id));
        }
    }

    fn update(&mut self, component_id: &str, changes: &PropChanges) {
        let Some(base) = self.schema.component(component_id) else {
            self.warn(format!("Component '{}' to update does not exist", component_id));
            return;
        };

        let targets = if self.diff.scope == Scope::SameRoleAcrossPages && !base.role.is_empty() {
            self.schema.component_ids_with_role(&base.role)
        } else {
            vec![base.id.clone()]
        };

        // One destination for every target, first match in page order
        let destination = match &changes.target_section_id {
            Some(destination) => {
                let path = self.schema.locate_section(None, destination);
                if path.is_none() {
                    self.warn(format!(
                        "Destination section '{}' not found, {} left in place",
                        destination,
                        targets.join(", ")
                    ));
                }
                path
            }
            None => None,
        };

        let instruction = self.instruction("update");
        for id in &targets {
            if let Some(to) = destination {
                self.relocate(id, to);
            }

            let Some(component) = self.schema.component_mut(id) else {
                continue;
            };
            if let Some(layout) = changes.layout {
                let next = component.layout.col_span as i64 + layout.col_span_delta as i64;
                component.layout.col_span = next.max(MIN_RESIZED_SPAN as i64) as u32;
            }
            if let Some(style) = &changes.style {
                component
                    .style
                    .extend(style.iter().map(|(k, v)| (k.clone(), v.clone())));
            }
            component
                .meta
                .insert("lastInstruction".to_string(), instruction.clone());
            component
                .meta
                .insert("lastUpdatedAt".to_string(), Value::from(self.now.as_str()));
        }

        self.log.push(format!("Updated {}", targets.join(", ")));
        self.touched.extend(targets);
    }

    fn relocate(&mut self, component_id: &str, to: SectionPath) {
        if let Some(component) = self.schema.take_component(component_id) {
            let SectionPath { page, section } = to;
            debug!(component_id, page, section, "Relocated component");
            self.schema.section_at_mut(to).components.push(component);
        }
    }

    fn reorder(&mut self, section_id: &str, new_order: &[String]) {
        let Some(path) = self.schema.locate_section(None, section_id) else {
            self.warn(format!("Section '{}' not found, reorder skipped", section_id));
            return;
        };

        let section = self.schema.section_at_mut(path);
        let mut remaining = std::mem::take(&mut section.components);
        let mut reordered = Vec::with_capacity(remaining.len());
        for id in new_order {
            if let Some(index) = remaining.iter().position(|c| &c.id == id) {
                reordered.push(remaining.remove(index));
            }
        }
        reordered.append(&mut remaining);
        for (index, component) in reordered.iter_mut().enumerate() {
            component.layout.order = index as u32 + 1;
        }
        section.components = reordered;
        self.log.push(format!("Reordered {}", section_id));
    }
}
