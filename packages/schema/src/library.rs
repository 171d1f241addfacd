//! Component library, scenario templates and personas.
//!
//! These are read-only inputs. User-supplied payloads that fail to parse (or
//! parse to nothing) are replaced by the built-in defaults so generation is
//! always possible.

use crate::model::{InfoItem, SectionRole, StyleMap, DEFAULT_COMPONENT_SPAN};
use crate::SchemaError;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use tracing::warn;

fn default_template_span() -> u32 {
    DEFAULT_COMPONENT_SPAN
}

fn default_max_components() -> usize {
    2
}

/// Reusable component definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentTemplate {
    #[serde(default)]
    pub id: String,

    pub role: String,

    #[serde(rename = "type", default)]
    pub kind: String,

    #[serde(default)]
    pub data_role: Option<String>,

    #[serde(default)]
    pub interaction: Vec<String>,

    #[serde(default = "default_template_span")]
    pub layout_span: u32,

    #[serde(default)]
    pub style: StyleMap,

    /// Info roles this component is good at showing
    #[serde(default)]
    pub info_roles: Vec<String>,

    #[serde(default)]
    pub density: Option<String>,

    #[serde(default)]
    pub description: Option<String>,
}

/// Ordered list of component templates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentLibrary {
    templates: Vec<ComponentTemplate>,
}

impl ComponentLibrary {
    pub fn new(templates: Vec<ComponentTemplate>) -> Self {
        Self { templates }
    }

    /// Built-in library
    pub fn defaults() -> Self {
        DEFAULTS.components.clone()
    }

    /// Strict parse of a JSON array of templates
    pub fn from_json(source: &str) -> Result<Self, SchemaError> {
        let templates: Vec<ComponentTemplate> = serde_json::from_str(source)?;
        if templates.is_empty() {
            return Err(SchemaError::EmptyLibrary("component library"));
        }
        Ok(Self { templates })
    }

    /// Parse a JSON payload, falling back to the built-in library
    pub fn from_json_or_default(source: &str) -> Self {
        match Self::from_json(source) {
            Ok(library) => library,
            Err(e) => {
                warn!(error = %e, "Invalid component library payload, using defaults");
                Self::defaults()
            }
        }
    }

    pub fn templates(&self) -> &[ComponentTemplate] {
        &self.templates
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ComponentTemplate> {
        self.templates.iter()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn first(&self) -> Option<&ComponentTemplate> {
        self.templates.first()
    }

    /// First template declaring `role`
    pub fn find_role(&self, role: &str) -> Option<&ComponentTemplate> {
        self.templates.iter().find(|t| t.role == role)
    }
}

impl Default for ComponentLibrary {
    fn default() -> Self {
        Self::defaults()
    }
}

/// Section slot inside a stage template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionTemplate {
    pub role: SectionRole,

    #[serde(default)]
    pub title: Option<String>,

    /// Info items this section should surface
    #[serde(default)]
    pub info_ids: Vec<String>,

    #[serde(default = "default_max_components")]
    pub max_components: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageTemplate {
    pub id: String,
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub sections: Vec<SectionTemplate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioTemplate {
    pub id: String,
    pub name: String,
    pub stages: Vec<StageTemplate>,

    #[serde(default)]
    pub info_items: Vec<InfoItem>,
}

/// Ordered scenario templates. The first entry is the fallback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScenarioLibrary {
    scenarios: Vec<ScenarioTemplate>,
}

impl ScenarioLibrary {
    /// An empty list yields the built-in scenarios
    pub fn new(scenarios: Vec<ScenarioTemplate>) -> Self {
        if scenarios.is_empty() {
            return Self::defaults();
        }
        Self { scenarios }
    }

    pub fn defaults() -> Self {
        DEFAULTS.scenarios.clone()
    }

    pub fn from_json(source: &str) -> Result<Self, SchemaError> {
        let scenarios: Vec<ScenarioTemplate> = serde_json::from_str(source)?;
        if scenarios.is_empty() {
            return Err(SchemaError::EmptyLibrary("scenario library"));
        }
        Ok(Self { scenarios })
    }

    pub fn from_json_or_default(source: &str) -> Self {
        match Self::from_json(source) {
            Ok(library) => library,
            Err(e) => {
                warn!(error = %e, "Invalid scenario library payload, using defaults");
                Self::defaults()
            }
        }
    }

    pub fn get(&self, scenario_id: &str) -> Option<&ScenarioTemplate> {
        self.scenarios.iter().find(|s| s.id == scenario_id)
    }

    /// Scenario by id, or the first scenario when the id is missing or unknown
    pub fn resolve(&self, scenario_id: Option<&str>) -> &ScenarioTemplate {
        if let Some(id) = scenario_id {
            if let Some(scenario) = self.get(id) {
                return scenario;
            }
            warn!(scenario_id = %id, "Unknown scenario, falling back to default");
        }
        self.scenarios
            .first()
            .unwrap_or_else(|| &DEFAULTS.scenarios.scenarios[0])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScenarioTemplate> {
        self.scenarios.iter()
    }
}

impl Default for ScenarioLibrary {
    fn default() -> Self {
        Self::defaults()
    }
}

/// Who the generated UI is for
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Persona {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub role: Option<String>,

    /// What this persona pays attention to, most important first
    #[serde(default)]
    pub attention: Vec<String>,

    #[serde(default)]
    pub tone: Option<String>,
}

impl Persona {
    pub fn defaults() -> Vec<Persona> {
        DEFAULTS.personas.clone()
    }

    pub fn default_persona() -> Persona {
        DEFAULTS.personas.first().cloned().unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
struct Defaults {
    components: ComponentLibrary,
    scenarios: ScenarioLibrary,
    personas: Vec<Persona>,
}

static DEFAULTS: LazyLock<Defaults> = LazyLock::new(|| {
    serde_json::from_str(include_str!("../data/defaults.json"))
        .expect("built-in defaults must be valid JSON")
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_defaults_parse() {
        let library = ComponentLibrary::defaults();
        assert!(library.len() >= 10);
        for role in [
            "KPIOverview",
            "AlertTable",
            "GlobalFilterBar",
            "TrendChart",
            "InsightSummary",
            "RunStatus",
            "BacklogTable",
            "RiskBoard",
            "ActionLog",
            "PersonaFocus",
        ] {
            assert!(library.find_role(role).is_some(), "missing {}", role);
        }

        let scenarios = ScenarioLibrary::defaults();
        assert_eq!(scenarios.resolve(None).id, "agent_ops");
        assert!(!Persona::defaults().is_empty());
    }

    #[test]
    fn test_malformed_library_falls_back() {
        let library = ComponentLibrary::from_json_or_default("{not json");
        assert_eq!(library, ComponentLibrary::defaults());

        let empty = ComponentLibrary::from_json_or_default("[]");
        assert_eq!(empty, ComponentLibrary::defaults());
    }

    #[test]
    fn test_custom_library_parses() {
        let library = ComponentLibrary::from_json(
            r#"[{"id": "c1", "role": "Gauge", "type": "Dial", "info_roles": ["kpi"]}]"#,
        )
        .unwrap();
        assert_eq!(library.len(), 1);
        assert_eq!(library.first().unwrap().layout_span, DEFAULT_COMPONENT_SPAN);
    }

    #[test]
    fn test_unknown_scenario_resolves_to_first() {
        let scenarios = ScenarioLibrary::defaults();
        assert_eq!(scenarios.resolve(Some("nope")).id, "agent_ops");
        assert_eq!(
            scenarios.resolve(Some("infra_monitoring")).id,
            "infra_monitoring"
        );
    }
}
