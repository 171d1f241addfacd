//! # Document Model
//!
//! A schema is a multi-page UI description:
//!
//! ```text
//! Schema ─┬─ pages[] ── sections[] ── components[]
//!         ├─ infoQueue[]   (priority ordered)
//!         └─ metadata      (provenance, last update)
//! ```
//!
//! List order is meaningful everywhere (pages, sections, components, info
//! queue) and is preserved through JSON round trips.

use crate::library::{Persona, ScenarioTemplate};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Free-form style properties (`emphasis`, `density`, `fontSize`, ...)
pub type StyleMap = BTreeMap<String, Value>;

/// Free-form annotations (provenance, last instruction, timestamps)
pub type MetaMap = BTreeMap<String, Value>;

/// Width of the layout grid
pub const GRID_COLUMNS: u32 = 12;

/// Span assumed for components that do not declare one
pub const DEFAULT_COMPONENT_SPAN: u32 = 4;

fn initial_version() -> u64 {
    1
}

fn default_component_span() -> u32 {
    DEFAULT_COMPONENT_SPAN
}

fn default_section_span() -> u32 {
    GRID_COLUMNS
}

fn default_one() -> u32 {
    1
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Root document node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    #[serde(default)]
    pub task_id: Option<String>,

    /// Starts at 1, bumped by every successful diff application
    #[serde(default = "initial_version")]
    pub version: u64,

    #[serde(default)]
    pub generated_at: Option<String>,

    #[serde(default)]
    pub pages: Vec<Page>,

    #[serde(default)]
    pub info_queue: Vec<InfoItem>,

    #[serde(default)]
    pub metadata: SchemaMetadata,
}

/// Provenance carried along with a schema. Not consulted by the diff engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_spec: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persona: Option<Persona>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scenario: Option<ScenarioTemplate>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stage_plan: Vec<StagePlanEntry>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated_at: Option<String>,

    /// Component ids touched by the last diff, in application order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified_components: Option<Vec<String>>,
}

/// One planned stage of the task; each stage becomes a page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StagePlanEntry {
    pub id: String,
    pub name: String,
    pub description: String,
    pub order: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: String,

    #[serde(default)]
    pub name: String,

    /// Stage label this page belongs to
    #[serde(default)]
    pub stage: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub sections: Vec<Section>,
}

/// Semantic placement of a section in the page grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionRole {
    Header,
    #[serde(alias = "body")]
    Main,
    Sidebar,
    Footer,
}

impl SectionRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionRole::Header => "header",
            SectionRole::Main => "main",
            SectionRole::Sidebar => "sidebar",
            SectionRole::Footer => "footer",
        }
    }
}

impl std::fmt::Display for SectionRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: String,
    pub role: SectionRole,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub layout: SectionLayout,

    #[serde(default)]
    pub components: Vec<Component>,
}

impl Section {
    /// Sum of child column spans
    pub fn used_span(&self) -> u32 {
        self.components
            .iter()
            .fold(0u32, |total, c| total.saturating_add(c.layout.col_span))
    }

    /// True when the children fit in the section's declared span
    pub fn fits(&self) -> bool {
        self.used_span() <= self.layout.col_span
    }

    pub fn component_ids(&self) -> Vec<String> {
        self.components.iter().map(|c| c.id.clone()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionLayout {
    #[serde(default = "default_one")]
    pub row: u32,

    #[serde(default = "default_one")]
    pub col_start: u32,

    /// Capacity of the section, at most [`GRID_COLUMNS`]
    #[serde(default = "default_section_span")]
    pub col_span: u32,

    #[serde(default)]
    pub order: u32,

    /// Set when children could not be shrunk enough to fit
    #[serde(default, skip_serializing_if = "is_false")]
    pub scrollable: bool,
}

impl Default for SectionLayout {
    fn default() -> Self {
        Self {
            row: 1,
            col_start: 1,
            col_span: GRID_COLUMNS,
            order: 0,
            scrollable: false,
        }
    }
}

/// Leaf UI element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    pub id: String,

    /// Semantic category, e.g. `AlertTable`
    #[serde(default)]
    pub role: String,

    /// Rendering widget kind
    #[serde(rename = "type", default)]
    pub kind: String,

    #[serde(default)]
    pub data_role: Option<String>,

    #[serde(default)]
    pub interaction: Vec<String>,

    #[serde(default)]
    pub layout: ComponentLayout,

    #[serde(default)]
    pub bindings: Bindings,

    #[serde(default)]
    pub style: StyleMap,

    /// Info item ids visualized by this component
    #[serde(default)]
    pub info_refs: Vec<String>,

    #[serde(default)]
    pub meta: MetaMap,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentLayout {
    #[serde(default = "default_component_span")]
    pub col_span: u32,

    #[serde(default)]
    pub order: u32,
}

impl Default for ComponentLayout {
    fn default() -> Self {
        Self {
            col_span: DEFAULT_COMPONENT_SPAN,
            order: 0,
        }
    }
}

/// Where a component's data comes from
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bindings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl Bindings {
    pub fn source(source: impl Into<String>) -> Self {
        Self {
            source: Some(source.into()),
        }
    }
}

/// A unit of information the UI is meant to surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InfoItem {
    pub id: String,

    #[serde(default)]
    pub description: String,

    /// Stage affinity
    #[serde(default)]
    pub stage: String,

    /// Semantic tags used to match components
    #[serde(default)]
    pub roles: Vec<String>,

    #[serde(default)]
    pub priority: f64,

    /// 1-based position in the priority queue
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage_name: Option<String>,
}

/// Position of a component inside a schema
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComponentPath {
    pub page: usize,
    pub section: usize,
    pub component: usize,
}

/// Position of a section inside a schema
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionPath {
    pub page: usize,
    pub section: usize,
}

impl Schema {
    /// Empty schema at version 1
    pub fn new(task_id: Option<String>) -> Self {
        Self {
            task_id,
            version: initial_version(),
            generated_at: Some(chrono::Utc::now().to_rfc3339()),
            pages: Vec::new(),
            info_queue: Vec::new(),
            metadata: SchemaMetadata::default(),
        }
    }

    pub fn from_json(source: &str) -> Result<Self, crate::SchemaError> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn to_json(&self) -> Result<String, crate::SchemaError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn page(&self, page_id: &str) -> Option<&Page> {
        self.pages.iter().find(|p| p.id == page_id)
    }

    pub fn has_page(&self, page_id: &str) -> bool {
        self.page(page_id).is_some()
    }

    /// Components in page → section → component order
    pub fn components(&self) -> impl Iterator<Item = &Component> {
        self.pages
            .iter()
            .flat_map(|p| p.sections.iter())
            .flat_map(|s| s.components.iter())
    }

    pub fn contains_component(&self, component_id: &str) -> bool {
        self.components().any(|c| c.id == component_id)
    }

    pub fn locate_component(&self, component_id: &str) -> Option<ComponentPath> {
        for (page, p) in self.pages.iter().enumerate() {
            for (section, s) in p.sections.iter().enumerate() {
                if let Some(component) = s.components.iter().position(|c| c.id == component_id) {
                    return Some(ComponentPath {
                        page,
                        section,
                        component,
                    });
                }
            }
        }
        None
    }

    pub fn component(&self, component_id: &str) -> Option<&Component> {
        self.locate_component(component_id)
            .map(|path| self.component_at(path))
    }

    pub fn component_mut(&mut self, component_id: &str) -> Option<&mut Component> {
        let path = self.locate_component(component_id)?;
        Some(self.component_at_mut(path))
    }

    pub fn component_at(&self, path: ComponentPath) -> &Component {
        &self.pages[path.page].sections[path.section].components[path.component]
    }

    pub fn component_at_mut(&mut self, path: ComponentPath) -> &mut Component {
        &mut self.pages[path.page].sections[path.section].components[path.component]
    }

    /// Ids of every component sharing `role`, across all pages
    pub fn component_ids_with_role(&self, role: &str) -> Vec<String> {
        self.components()
            .filter(|c| c.role == role)
            .map(|c| c.id.clone())
            .collect()
    }

    /// Find a section by id or role, optionally restricted to one page.
    ///
    /// The first match in page → section order wins.
    pub fn locate_section(&self, page_id: Option<&str>, id_or_role: &str) -> Option<SectionPath> {
        for (page, p) in self.pages.iter().enumerate() {
            if page_id.is_some_and(|id| id != p.id) {
                continue;
            }
            for (section, s) in p.sections.iter().enumerate() {
                if s.id == id_or_role || s.role.as_str() == id_or_role {
                    return Some(SectionPath { page, section });
                }
            }
        }
        None
    }

    pub fn section_at(&self, path: SectionPath) -> &Section {
        &self.pages[path.page].sections[path.section]
    }

    pub fn section_at_mut(&mut self, path: SectionPath) -> &mut Section {
        &mut self.pages[path.page].sections[path.section]
    }

    pub fn section(&self, section_id: &str) -> Option<&Section> {
        self.pages
            .iter()
            .flat_map(|p| p.sections.iter())
            .find(|s| s.id == section_id)
    }

    /// Detach a component from its section
    pub fn take_component(&mut self, component_id: &str) -> Option<Component> {
        let path = self.locate_component(component_id)?;
        Some(
            self.pages[path.page].sections[path.section]
                .components
                .remove(path.component),
        )
    }

    pub fn info_item(&self, info_id: &str) -> Option<&InfoItem> {
        self.info_queue.iter().find(|i| i.id == info_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Schema {
        serde_json::from_value(json!({
            "taskId": "t1",
            "version": 3,
            "pages": [{
                "id": "page_plan",
                "name": "Plan Page",
                "sections": [
                    {"id": "plan_header_1", "role": "header", "layout": {"colSpan": 12}, "components": [
                        {"id": "kpi_1", "role": "KPIOverview", "type": "MetricCards", "layout": {"colSpan": 6, "order": 1}}
                    ]},
                    {"id": "plan_main_2", "role": "body", "layout": {"colSpan": 8}, "components": [
                        {"id": "trend_1", "role": "TrendChart", "type": "LineChart"},
                        {"id": "kpi_2", "role": "KPIOverview", "type": "MetricCards"}
                    ]}
                ]
            }],
            "infoQueue": [{"id": "plan_goal", "priority": 0.9}]
        }))
        .unwrap()
    }

    #[test]
    fn test_defaults_fill_missing_fields() {
        let schema = sample();
        let trend = schema.component("trend_1").unwrap();
        assert_eq!(trend.layout.col_span, DEFAULT_COMPONENT_SPAN);
        assert_eq!(schema.pages[0].sections[1].role, SectionRole::Main);
        assert!(schema.metadata.last_modified_components.is_none());
    }

    #[test]
    fn test_used_span_saturates_on_huge_spans() {
        let mut schema = sample();
        let section = &mut schema.pages[0].sections[1];
        for component in &mut section.components {
            component.layout.col_span = u32::MAX;
        }
        assert_eq!(section.used_span(), u32::MAX);
        assert!(!section.fits());
    }

    #[test]
    fn test_locate_section_by_id_or_role() {
        let schema = sample();
        let by_role = schema.locate_section(Some("page_plan"), "main").unwrap();
        let by_id = schema.locate_section(None, "plan_main_2").unwrap();
        assert_eq!(by_role, by_id);
        assert!(schema.locate_section(Some("page_other"), "main").is_none());
    }

    #[test]
    fn test_component_ids_with_role_in_traversal_order() {
        let schema = sample();
        assert_eq!(
            schema.component_ids_with_role("KPIOverview"),
            vec!["kpi_1".to_string(), "kpi_2".to_string()]
        );
    }

    #[test]
    fn test_take_component_detaches() {
        let mut schema = sample();
        let taken = schema.take_component("trend_1").unwrap();
        assert_eq!(taken.role, "TrendChart");
        assert!(!schema.contains_component("trend_1"));
        assert_eq!(schema.pages[0].sections[1].components.len(), 1);
    }

    #[test]
    fn test_json_round_trip_preserves_order() {
        let schema = sample();
        let json = schema.to_json().unwrap();
        let restored = Schema::from_json(&json).unwrap();
        assert_eq!(restored, schema);
        assert_eq!(
            restored.pages[0].sections[1].component_ids(),
            vec!["trend_1".to_string(), "kpi_2".to_string()]
        );
        assert!(!json.contains("scrollable"));
    }
}
