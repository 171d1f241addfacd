//! # Instruction Parser
//!
//! Reads a natural-language instruction against the current schema and
//! produces a [`Diff`]. Reading happens in fixed steps:
//!
//! 1. scope: consistency keywords broadcast to every same-role component
//! 2. target page: stage keywords, then `page a/b/c`, then the first page
//! 3. section and component hints
//! 4. intent, first family to match in the order add, remove, move, resize, update
//! 5. operations for that intent
//!
//! Anything that cannot be resolved becomes a warning. A diff without
//! operations is a valid result.

use crate::diff::{Diff, Intent, LayoutChange, Operation, PropChanges, Scope};
use crate::keywords::*;
use refine_schema::{
    Bindings, Component, ComponentLayout, ComponentLibrary, ComponentTemplate, IdGenerator,
    MetaMap, Schema, SectionRole, StyleMap,
};
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;
use tracing::{debug, warn};

static PAGE_ORDINAL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"page\s*([abc])").unwrap());

/// Role used when an add instruction names nothing the library knows
const FALLBACK_ADD_ROLE: &str = "KPIOverview";

/// Order given to added components so they sort after existing ones
pub const APPENDED_ORDER: u32 = 99;

/// Characters of the instruction kept in an added component's description
const DESCRIPTION_EXCERPT_CHARS: usize = 60;

/// A parsed instruction with the problems met while reading it
#[derive(Debug, Clone, PartialEq)]
pub struct ParseResult {
    pub diff: Diff,
    pub warnings: Vec<String>,
}

/// Hints picked out of one instruction
#[derive(Debug)]
struct Reading<'a> {
    text: &'a str,
    normalized: String,
    page_id: Option<String>,
    section_hint: Option<&'static str>,
    component_hint: Option<&'static str>,
}

#[derive(Debug, Clone, Default)]
pub struct InstructionParser {
    library: ComponentLibrary,
}

impl InstructionParser {
    pub fn new(library: ComponentLibrary) -> Self {
        Self { library }
    }

    pub fn library(&self) -> &ComponentLibrary {
        &self.library
    }

    pub fn parse(&self, instruction: &str, schema: &Schema) -> ParseResult {
        let text = instruction.trim();
        let normalized = text.to_lowercase();

        let scope = if contains_any(&normalized, CONSISTENCY_KEYWORDS) {
            Scope::SameRoleAcrossPages
        } else {
            Scope::CurrentPage
        };

        let reading = Reading {
            page_id: detect_page(&normalized, schema),
            section_hint: first_hit(&normalized, SECTION_HINTS),
            component_hint: first_hit(&normalized, COMPONENT_HINTS),
            text,
            normalized,
        };

        let intent = detect_intent(&reading.normalized);
        let mut warnings = Vec::new();
        let operations = match intent {
            Intent::Add => self.read_add(&reading, schema, &mut warnings),
            Intent::Remove => read_remove(&reading, schema, &mut warnings),
            Intent::Move => read_move(&reading, schema, &mut warnings),
            Intent::Resize => read_resize(&reading, schema, &mut warnings),
            Intent::Update => read_update(&reading, schema, &mut warnings),
        };

        debug!(
            intent = %intent,
            scope = ?scope,
            page_id = ?reading.page_id,
            section_hint = ?reading.section_hint,
            component_hint = ?reading.component_hint,
            operations = operations.len(),
            "Parsed instruction"
        );
        for warning in &warnings {
            warn!(intent = %intent, "{}", warning);
        }

        ParseResult {
            diff: Diff {
                scope,
                intent: Some(intent),
                operations,
                summary: reading.text.to_string(),
                page_id: reading.page_id,
            },
            warnings,
        }
    }

    fn read_add(
        &self,
        reading: &Reading<'_>,
        schema: &Schema,
        warnings: &mut Vec<String>,
    ) -> Vec<Operation> {
        let template = match reading
            .component_hint
            .and_then(|role| self.library.find_role(role))
        {
            Some(template) => template,
            None => {
                let Some(template) = self
                    .library
                    .find_role(FALLBACK_ADD_ROLE)
                    .or_else(|| self.library.first())
                else {
                    warnings.push("Component library is empty, nothing to add".to_string());
                    return Vec::new();
                };
                warnings.push(format!(
                    "No matching component for the instruction, falling back to {}",
                    template.role
                ));
                template
            }
        };

        let Some(target_section_id) = reading
            .section_hint
            .map(str::to_string)
            .or_else(|| fallback_section(schema, reading.page_id.as_deref()))
        else {
            warnings.push("No section to add the component to".to_string());
            return Vec::new();
        };

        vec![Operation::AddNode {
            target_section_id,
            component: new_component(template, reading.text, schema),
            page_id: reading.page_id.clone(),
        }]
    }
}

fn detect_intent(normalized: &str) -> Intent {
    if contains_any(normalized, ADD_KEYWORDS) {
        Intent::Add
    } else if contains_any(normalized, REMOVE_KEYWORDS) {
        Intent::Remove
    } else if contains_any(normalized, MOVE_KEYWORDS) {
        Intent::Move
    } else if contains_any(normalized, RESIZE_KEYWORDS) {
        Intent::Resize
    } else {
        Intent::Update
    }
}

/// Stage hints only count when the schema has the matching page
fn detect_page(normalized: &str, schema: &Schema) -> Option<String> {
    let hinted = PAGE_HINTS.iter().find_map(|(stage, hints)| {
        let page_id = format!("page_{}", stage);
        (contains_any(normalized, hints) && schema.has_page(&page_id)).then_some(page_id)
    });
    if hinted.is_some() {
        return hinted;
    }

    if let Some(captures) = PAGE_ORDINAL.captures(normalized) {
        let index = captures[1].bytes().next().map_or(0, |b| (b - b'a') as usize);
        if let Some(page) = schema.pages.get(index) {
            return Some(page.id.clone());
        }
    }

    schema.pages.first().map(|page| page.id.clone())
}

/// First component on the page with the hinted role, or simply the first
/// component when there is no hint
fn find_component_id(schema: &Schema, hint: Option<&str>, page_id: Option<&str>) -> Option<String> {
    schema
        .pages
        .iter()
        .filter(|page| page_id.map_or(true, |id| page.id == id))
        .flat_map(|page| page.sections.iter())
        .flat_map(|section| section.components.iter())
        .find(|component| hint.map_or(true, |role| component.role == role))
        .map(|component| component.id.clone())
}

/// First main or header section on the page, else the first section of the
/// first page
fn fallback_section(schema: &Schema, page_id: Option<&str>) -> Option<String> {
    schema
        .pages
        .iter()
        .filter(|page| page_id.map_or(true, |id| page.id == id))
        .flat_map(|page| page.sections.iter())
        .find(|section| matches!(section.role, SectionRole::Main | SectionRole::Header))
        .or_else(|| schema.pages.first().and_then(|page| page.sections.first()))
        .map(|section| section.id.clone())
}

fn read_remove(reading: &Reading<'_>, schema: &Schema, warnings: &mut Vec<String>) -> Vec<Operation> {
    match find_component_id(schema, reading.component_hint, reading.page_id.as_deref()) {
        Some(component_id) => vec![Operation::RemoveNode {
            component_id,
            page_id: reading.page_id.clone(),
        }],
        None => {
            warnings.push("No component found to remove, instruction ignored".to_string());
            Vec::new()
        }
    }
}

fn read_move(reading: &Reading<'_>, schema: &Schema, warnings: &mut Vec<String>) -> Vec<Operation> {
    let page_id = reading.page_id.as_deref();
    let component_id = find_component_id(schema, reading.component_hint, page_id);
    let destination = reading
        .section_hint
        .map(str::to_string)
        .or_else(|| fallback_section(schema, page_id));

    match (component_id, destination) {
        (Some(component_id), Some(destination)) => vec![Operation::UpdateProps {
            component_id,
            changes: PropChanges {
                target_section_id: Some(destination),
                ..PropChanges::default()
            },
        }],
        _ => {
            warnings.push("Move failed: component or destination section not found".to_string());
            Vec::new()
        }
    }
}

fn read_resize(reading: &Reading<'_>, schema: &Schema, warnings: &mut Vec<String>) -> Vec<Operation> {
    let component_id = find_component_id(schema, reading.component_hint, reading.page_id.as_deref());
    let delta = resize_delta(&reading.normalized);

    let (Some(component_id), Some(delta)) = (component_id, delta) else {
        warnings.push("No component or size direction recognized for resizing".to_string());
        return Vec::new();
    };

    let emphasis = if delta > 0 { "highlight" } else { "normal" };
    let mut style = StyleMap::new();
    style.insert("emphasis".to_string(), Value::from(emphasis));

    vec![Operation::UpdateProps {
        component_id,
        changes: PropChanges {
            layout: Some(LayoutChange {
                col_span_delta: delta,
            }),
            style: Some(style),
            ..PropChanges::default()
        },
    }]
}

fn read_update(reading: &Reading<'_>, schema: &Schema, warnings: &mut Vec<String>) -> Vec<Operation> {
    let Some(component_id) =
        find_component_id(schema, reading.component_hint, reading.page_id.as_deref())
    else {
        warnings.push("No component to update; try a more specific description".to_string());
        return Vec::new();
    };

    let style = style_changes(&reading.normalized);
    if style.is_empty() {
        warnings.push("No style change recognized in the instruction".to_string());
    }

    vec![Operation::UpdateProps {
        component_id,
        changes: PropChanges {
            style: Some(style),
            ..PropChanges::default()
        },
    }]
}

/// Signed column delta from size-direction words; narrowing wins ties
pub fn resize_delta(normalized: &str) -> Option<i32> {
    if contains_any(normalized, NARROW_KEYWORDS) {
        Some(-RESIZE_STEP)
    } else if contains_any(normalized, WIDEN_KEYWORDS) {
        Some(RESIZE_STEP)
    } else {
        None
    }
}

/// Partial style map read from secondary keywords
pub fn style_changes(normalized: &str) -> StyleMap {
    let mut style = StyleMap::new();

    if contains_any(normalized, CONTRAST_KEYWORDS) {
        style.insert("emphasis".to_string(), Value::from("highlight"));
    }
    if contains_any(normalized, DENSITY_KEYWORDS) {
        let level = if contains_any(normalized, LOW_DENSITY_KEYWORDS) {
            "low"
        } else {
            "high"
        };
        style.insert("density".to_string(), Value::from(level));
    }
    if contains_any(normalized, FONT_KEYWORDS) {
        if contains_any(normalized, LARGER_KEYWORDS) {
            style.insert("fontSize".to_string(), Value::from("large"));
        } else if contains_any(normalized, SMALLER_KEYWORDS) {
            style.insert("fontSize".to_string(), Value::from("small"));
        }
    }
    if contains_any(normalized, COLOR_KEYWORDS) {
        if let Some(color) = first_hit(normalized, COLOR_HINTS) {
            style.insert("color".to_string(), Value::from(color));
        }
    }
    if contains_any(normalized, BOLD_KEYWORDS) {
        style.insert("fontWeight".to_string(), Value::from("bold"));
    }

    style
}

/// Fresh instance of `template` for an add instruction
fn new_component(template: &ComponentTemplate, instruction: &str, schema: &Schema) -> Component {
    let mut ids = IdGenerator::new(&format!("{}:{}", schema.version, instruction));
    let id = ids.component_id(&template.role, |candidate| schema.contains_component(candidate));

    let excerpt: String = instruction.chars().take(DESCRIPTION_EXCERPT_CHARS).collect();
    let mut meta = MetaMap::new();
    meta.insert(
        "description".to_string(),
        Value::from(format!("Created from instruction: {}", excerpt)),
    );

    Component {
        id,
        role: template.role.clone(),
        kind: template.kind.clone(),
        data_role: template.data_role.clone(),
        interaction: template.interaction.clone(),
        layout: ComponentLayout {
            col_span: template.layout_span,
            order: APPENDED_ORDER,
        },
        bindings: Bindings::source("instruction"),
        style: template.style.clone(),
        info_refs: Vec::new(),
        meta,
    }
}
