use ordered_float::OrderedFloat;
use refine_schema::{
    Bindings, Component, ComponentLayout, ComponentLibrary, ComponentTemplate, IdGenerator,
    InfoItem, MetaMap, SectionRole,
};
use serde_json::Value;
use std::collections::HashSet;

const ROLE_OVERLAP_SCORE: f64 = 0.6;
const ROLE_PREFIX_SCORE: f64 = 0.1;
const DATA_ROLE_SCORE: f64 = 0.2;
const LIST_TYPE_SCORE: f64 = 0.1;

/// Library templates matching `info`, best match first.
///
/// Templates scoring zero are left out. Ties keep library order.
pub fn rank_components_for_info<'a>(
    info: &InfoItem,
    library: &'a ComponentLibrary,
) -> Vec<&'a ComponentTemplate> {
    let id_prefix = info.id.split('_').next().unwrap_or_default();
    let wants_list = info.roles.iter().any(|r| r == "list");

    let mut ranked: Vec<(OrderedFloat<f64>, &ComponentTemplate)> = library
        .iter()
        .filter_map(|template| {
            let mut score = 0.0;
            if info.roles.iter().any(|r| template.info_roles.contains(r)) {
                score += ROLE_OVERLAP_SCORE;
            }
            if !template.role.is_empty() && template.role.to_lowercase().starts_with(id_prefix) {
                score += ROLE_PREFIX_SCORE;
            }
            if template
                .data_role
                .as_deref()
                .is_some_and(|data_role| !data_role.is_empty() && info.id.contains(data_role))
            {
                score += DATA_ROLE_SCORE;
            }
            if wants_list && matches!(template.kind.as_str(), "Table" | "Kanban") {
                score += LIST_TYPE_SCORE;
            }
            (score > 0.0).then_some((OrderedFloat(score), template))
        })
        .collect();

    ranked.sort_by(|a, b| b.0.cmp(&a.0));
    ranked.into_iter().map(|(_, template)| template).collect()
}

/// Inputs for filling one section
pub(crate) struct SectionFill<'a> {
    pub section_id: &'a str,
    pub role: SectionRole,
    pub span: u32,
    pub max_components: usize,
    pub infos: Vec<&'a InfoItem>,
}

/// Pick components for a section: ranked matches per info item first, then
/// role-appropriate fallbacks until `max_components` is reached.
pub(crate) fn select_components(
    fill: &SectionFill<'_>,
    library: &ComponentLibrary,
    ids: &mut IdGenerator,
    taken: &mut HashSet<String>,
) -> Vec<Component> {
    let mut components: Vec<Component> = Vec::new();
    let mut used_roles: HashSet<String> = HashSet::new();

    for info in &fill.infos {
        for template in rank_components_for_info(info, library) {
            if components.len() >= fill.max_components {
                break;
            }
            // Dense tables do not belong in a header strip
            if fill.role == SectionRole::Header && template.kind == "Table" {
                continue;
            }
            if fill.role != SectionRole::Main && used_roles.contains(&template.role) {
                continue;
            }
            let order = components.len() as u32 + 1;
            let component = instantiate(template, Some(info), fill.span, order, ids, taken);
            used_roles.insert(component.role.clone());
            components.push(component);
        }
    }

    while components.len() < fill.max_components {
        let Some(template) = fallback_template(fill.role, library) else {
            break;
        };
        let order = components.len() as u32 + 1;
        let info = fill.infos.first().copied();
        let mut component = instantiate(template, info, fill.span, order, ids, taken);
        if info.is_none() {
            component.bindings = Bindings::source(format!("{}_placeholder", fill.section_id));
            component
                .meta
                .insert("createdFrom".to_string(), Value::from("Pending information"));
        }
        components.push(component);
    }

    components
}

fn fallback_template(role: SectionRole, library: &ComponentLibrary) -> Option<&ComponentTemplate> {
    let preferred: &[&str] = match role {
        SectionRole::Header => &["KPIOverview", "InsightSummary"],
        SectionRole::Main => &["TrendChart", "BacklogTable", "RunStatus"],
        SectionRole::Sidebar => &["GlobalFilterBar", "ActionLog", "PersonaFocus"],
        SectionRole::Footer => &[],
    };
    preferred
        .iter()
        .find_map(|role| library.find_role(role))
        .or_else(|| library.first())
}

/// Placeholder-backed components carry no `infoRefs` so every reference
/// points into the info queue.
fn instantiate(
    template: &ComponentTemplate,
    info: Option<&InfoItem>,
    section_span: u32,
    order: u32,
    ids: &mut IdGenerator,
    taken: &mut HashSet<String>,
) -> Component {
    let id = ids.component_id(&template.role, |candidate| taken.contains(candidate));
    taken.insert(id.clone());

    let mut meta = MetaMap::new();
    if let Some(description) = &template.description {
        meta.insert("description".to_string(), Value::from(description.as_str()));
    }
    if let Some(info) = info {
        meta.insert("createdFrom".to_string(), Value::from(info.description.as_str()));
    }
    if let Some(density) = &template.density {
        meta.insert("density".to_string(), Value::from(density.as_str()));
    }

    Component {
        id,
        role: template.role.clone(),
        kind: template.kind.clone(),
        data_role: template.data_role.clone(),
        interaction: template.interaction.clone(),
        layout: ComponentLayout {
            col_span: template.layout_span.min(section_span),
            order,
        },
        bindings: info
            .map(|info| Bindings::source(info.id.as_str()))
            .unwrap_or_default(),
        style: template.style.clone(),
        info_refs: info.map(|info| vec![info.id.clone()]).unwrap_or_default(),
        meta,
    }
}
