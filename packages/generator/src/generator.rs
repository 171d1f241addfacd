use crate::selection::{select_components, SectionFill};
use crate::summary::{highlights, ComponentStats, ContextSummary, PersonaSummary, ScenarioSummary};
use crate::text::{infer_roles_from_sentence, slug, split_sentences};
use ordered_float::OrderedFloat;
use refine_schema::{
    resolve_layout_conflicts, seed_hash, ComponentLibrary, IdGenerator, InfoItem, Page, Persona,
    ScenarioLibrary, Schema, SchemaMetadata, Section, SectionLayout, SectionRole, StagePlanEntry,
    StageTemplate, GRID_COLUMNS,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, info};

/// Task sentences shorter than this (in characters) are not turned into info items
const MIN_INFO_SENTENCE_CHARS: usize = 8;

/// Priority given to info items mined from the task text
const SYNTHESIZED_PRIORITY: f64 = 0.55;

/// Stage descriptions taken from the task text are cut to this many characters
const STAGE_HINT_CHARS: usize = 160;

/// Slug characters kept in a synthesized info id
const INFO_SLUG_CHARS: usize = 20;

/// What the schema is generated for
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationContext {
    #[serde(default)]
    pub task_id: Option<String>,

    #[serde(default)]
    pub task_spec: String,

    /// Defaults to the first built-in persona
    #[serde(default)]
    pub persona: Option<Persona>,

    /// Unknown or missing ids fall back to the first scenario
    #[serde(default)]
    pub scenario_id: Option<String>,
}

/// Everything produced by a one-shot generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Generation {
    pub summary: ContextSummary,
    pub stage_plan: Vec<StagePlanEntry>,
    pub info_queue: Vec<InfoItem>,
    pub schema: Schema,
}

/// Builds schemas from a component library and scenario templates
#[derive(Debug, Clone, Default)]
pub struct SchemaGenerator {
    library: ComponentLibrary,
    scenarios: ScenarioLibrary,
}

impl SchemaGenerator {
    pub fn new(library: ComponentLibrary, scenarios: ScenarioLibrary) -> Self {
        Self { library, scenarios }
    }

    pub fn library(&self) -> &ComponentLibrary {
        &self.library
    }

    pub fn scenarios(&self) -> &ScenarioLibrary {
        &self.scenarios
    }

    pub fn summarize_context(
        &self,
        task_spec: &str,
        persona: &Persona,
        scenario_id: Option<&str>,
    ) -> ContextSummary {
        let scenario = self.scenarios.resolve(scenario_id);
        ContextSummary {
            persona: PersonaSummary::from_persona(persona),
            task_highlights: highlights(split_sentences(task_spec)),
            component_stats: ComponentStats::from_library(&self.library),
            scenario: ScenarioSummary::from_scenario(scenario),
        }
    }

    /// One plan entry per scenario stage.
    ///
    /// The description is the first task sentence mentioning the stage's
    /// name or id, else the template's own description.
    pub fn plan_stages(&self, task_spec: &str, scenario_id: Option<&str>) -> Vec<StagePlanEntry> {
        let scenario = self.scenarios.resolve(scenario_id);
        let sentences = split_sentences(&task_spec.to_lowercase());

        scenario
            .stages
            .iter()
            .enumerate()
            .map(|(index, stage)| {
                let tokens = [stage.name.to_lowercase(), stage.id.to_lowercase()];
                let description = sentences
                    .iter()
                    .find(|sentence| {
                        tokens
                            .iter()
                            .any(|token| !token.is_empty() && sentence.contains(token.as_str()))
                    })
                    .map(|sentence| sentence.chars().take(STAGE_HINT_CHARS).collect())
                    .unwrap_or_else(|| stage.description.clone());

                StagePlanEntry {
                    id: stage.id.clone(),
                    name: stage.name.clone(),
                    description,
                    order: index + 1,
                }
            })
            .collect()
    }

    /// Scenario info items plus one item per long-enough task sentence,
    /// deduplicated by id and ranked by descending priority.
    pub fn build_info_queue(
        &self,
        task_spec: &str,
        scenario_id: Option<&str>,
        stage_plan: &[StagePlanEntry],
    ) -> Vec<InfoItem> {
        let scenario = self.scenarios.resolve(scenario_id);
        let mut candidates: Vec<InfoItem> = scenario.info_items.clone();

        for sentence in split_sentences(task_spec) {
            if sentence.chars().count() < MIN_INFO_SENTENCE_CHARS {
                continue;
            }
            candidates.push(InfoItem {
                id: synthesized_info_id(&sentence),
                stage: infer_stage(&sentence, stage_plan),
                roles: infer_roles_from_sentence(&sentence),
                priority: SYNTHESIZED_PRIORITY,
                description: sentence,
                rank: None,
                stage_name: None,
            });
        }

        // First occurrence keeps its slot; a strictly higher priority replaces it
        let mut queue: Vec<InfoItem> = Vec::with_capacity(candidates.len());
        for item in candidates {
            match queue.iter_mut().find(|existing| existing.id == item.id) {
                Some(existing) if existing.priority < item.priority => *existing = item,
                Some(_) => {}
                None => queue.push(item),
            }
        }

        queue.sort_by(|a, b| OrderedFloat(b.priority).cmp(&OrderedFloat(a.priority)));

        for (index, item) in queue.iter_mut().enumerate() {
            item.rank = Some(index + 1);
            item.stage_name = Some(
                stage_plan
                    .iter()
                    .find(|stage| stage.id == item.stage)
                    .map(|stage| stage.name.clone())
                    .unwrap_or_else(|| item.stage.clone()),
            );
        }

        debug!(items = queue.len(), "Built info queue");
        queue
    }

    /// Version 1 schema with one page per scenario stage
    pub fn generate_schema(
        &self,
        context: &GenerationContext,
        stage_plan: &[StagePlanEntry],
        info_queue: &[InfoItem],
    ) -> Schema {
        let scenario = self.scenarios.resolve(context.scenario_id.as_deref());
        let seed = context
            .task_id
            .clone()
            .unwrap_or_else(|| context.task_spec.clone());
        let mut ids = IdGenerator::new(&seed);
        let mut taken: HashSet<String> = HashSet::new();

        let pages = scenario
            .stages
            .iter()
            .map(|stage| {
                let plan = stage_plan.iter().find(|entry| entry.id == stage.id);
                Page {
                    id: format!("page_{}", stage.id),
                    name: format!("{} Page", stage.name),
                    stage: plan.map_or_else(|| stage.name.clone(), |p| p.name.clone()),
                    description: plan
                        .map_or_else(|| stage.description.clone(), |p| p.description.clone()),
                    sections: self.build_sections(stage, info_queue, &mut ids, &mut taken),
                }
            })
            .collect();

        let mut schema = Schema::new(context.task_id.clone());
        schema.pages = pages;
        schema.info_queue = info_queue.to_vec();
        schema.metadata = SchemaMetadata {
            task_spec: Some(context.task_spec.clone()),
            persona: Some(
                context
                    .persona
                    .clone()
                    .unwrap_or_else(Persona::default_persona),
            ),
            scenario: Some(scenario.clone()),
            stage_plan: stage_plan.to_vec(),
            ..SchemaMetadata::default()
        };

        let adjustments = resolve_layout_conflicts(&mut schema);
        info!(
            scenario = %scenario.id,
            pages = schema.pages.len(),
            components = schema.components().count(),
            layout_adjustments = adjustments.len(),
            "Generated schema"
        );
        schema
    }

    /// Stage plan, info queue, schema and summary in one call
    pub fn generate(&self, context: &GenerationContext) -> Generation {
        let scenario_id = context.scenario_id.as_deref();
        let persona = context
            .persona
            .clone()
            .unwrap_or_else(Persona::default_persona);

        let summary = self.summarize_context(&context.task_spec, &persona, scenario_id);
        let stage_plan = self.plan_stages(&context.task_spec, scenario_id);
        let info_queue = self.build_info_queue(&context.task_spec, scenario_id, &stage_plan);
        let schema = self.generate_schema(context, &stage_plan, &info_queue);

        Generation {
            summary,
            stage_plan,
            info_queue,
            schema,
        }
    }

    fn build_sections(
        &self,
        stage: &StageTemplate,
        info_queue: &[InfoItem],
        ids: &mut IdGenerator,
        taken: &mut HashSet<String>,
    ) -> Vec<Section> {
        let mut sections = Vec::with_capacity(stage.sections.len());
        let mut row_pointer = 1;
        let mut pending_row: Option<u32> = None;

        for (index, template) in stage.sections.iter().enumerate() {
            // A sidebar shares the row of the main section before it
            let row = match (template.role, pending_row) {
                (SectionRole::Sidebar, Some(row)) => {
                    pending_row = None;
                    row
                }
                _ => row_pointer,
            };
            if matches!(template.role, SectionRole::Main | SectionRole::Header) {
                row_pointer += 1;
            }
            if template.role == SectionRole::Main {
                pending_row = Some(row);
            }

            let id = format!("{}_{}_{}", stage.id, template.role, index + 1);
            let layout = section_layout(template.role, row);
            let fill = SectionFill {
                section_id: &id,
                role: template.role,
                span: layout.col_span,
                max_components: template.max_components,
                infos: info_queue
                    .iter()
                    .filter(|item| template.info_ids.contains(&item.id))
                    .collect(),
            };
            let components = select_components(&fill, &self.library, ids, taken);

            sections.push(Section {
                id,
                role: template.role,
                title: template.title.clone(),
                layout,
                components,
            });
        }
        sections
    }
}

/// 12-column placement: header and footer span the grid, main takes the
/// left 8 columns and a sidebar the right 4.
fn section_layout(role: SectionRole, row: u32) -> SectionLayout {
    let (col_start, col_span, order) = match role {
        SectionRole::Header => (1, GRID_COLUMNS, row),
        SectionRole::Sidebar => (9, 4, row + 2),
        SectionRole::Footer => (1, GRID_COLUMNS, row + 5),
        SectionRole::Main => (1, 8, row + 1),
    };
    SectionLayout {
        row,
        col_start,
        col_span,
        order,
        scrollable: false,
    }
}

fn infer_stage(sentence: &str, stage_plan: &[StagePlanEntry]) -> String {
    let lower = sentence.to_lowercase();
    stage_plan
        .iter()
        .find(|stage| {
            [stage.name.to_lowercase(), stage.id.to_lowercase()]
                .iter()
                .any(|keyword| !keyword.is_empty() && lower.contains(keyword.as_str()))
        })
        .or_else(|| stage_plan.first())
        .map_or_else(|| "plan".to_string(), |stage| stage.id.clone())
}

/// `spec_<slug>`, or `spec_<hash>` for sentences with no ASCII letters or digits
fn synthesized_info_id(sentence: &str) -> String {
    if sentence.chars().any(|c| c.is_ascii_alphanumeric()) {
        let slug = slug(sentence);
        format!("spec_{}", &slug[..slug.len().min(INFO_SLUG_CHARS)])
    } else {
        format!("spec_{}", seed_hash(sentence))
    }
}
