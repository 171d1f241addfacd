use refine_schema::{ComponentLibrary, Persona, ScenarioTemplate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Attention items surfaced as persona focus
const FOCUS_ITEMS: usize = 3;

/// Task sentences surfaced as highlights
const HIGHLIGHT_SENTENCES: usize = 4;

/// Digest of the generation inputs, shown to the user for confirmation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextSummary {
    pub persona: PersonaSummary,
    pub task_highlights: Vec<String>,
    pub component_stats: ComponentStats,
    pub scenario: ScenarioSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonaSummary {
    pub name: Option<String>,
    pub role: Option<String>,
    pub focus: Vec<String>,
    pub tone: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentStats {
    pub total: usize,
    pub types: BTreeMap<String, usize>,
    pub roles: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioSummary {
    pub id: String,
    pub name: String,
    pub stage_count: usize,
}

impl PersonaSummary {
    pub fn from_persona(persona: &Persona) -> Self {
        Self {
            name: persona.name.clone(),
            role: persona.role.clone(),
            focus: persona.attention.iter().take(FOCUS_ITEMS).cloned().collect(),
            tone: persona.tone.clone(),
        }
    }
}

impl ComponentStats {
    pub fn from_library(library: &ComponentLibrary) -> Self {
        let mut stats = Self {
            total: library.len(),
            ..Self::default()
        };
        for template in library.iter() {
            *stats.types.entry(template.kind.clone()).or_default() += 1;
            if !template.role.is_empty() {
                *stats.roles.entry(template.role.clone()).or_default() += 1;
            }
        }
        stats
    }
}

impl ScenarioSummary {
    pub fn from_scenario(scenario: &ScenarioTemplate) -> Self {
        Self {
            id: scenario.id.clone(),
            name: scenario.name.clone(),
            stage_count: scenario.stages.len(),
        }
    }
}

pub(crate) fn highlights(sentences: Vec<String>) -> Vec<String> {
    sentences.into_iter().take(HIGHLIGHT_SENTENCES).collect()
}
