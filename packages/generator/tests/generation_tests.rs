use refine_generator::{GenerationContext, SchemaGenerator};
use refine_linter::{has_errors, lint_schema, LintOptions};
use refine_schema::{ComponentLibrary, Persona, ScenarioLibrary, Schema};
use std::collections::HashSet;

const TASK: &str = "Build a console for the agent fleet. \
    Observe alert volume and KPI health in real time. \
    Analyze risk trends after each run; keep a decision log.";

fn context(scenario: &str) -> GenerationContext {
    GenerationContext {
        task_id: Some("task-42".to_string()),
        task_spec: TASK.to_string(),
        persona: None,
        scenario_id: Some(scenario.to_string()),
    }
}

#[test]
fn test_generated_schema_is_version_one_with_a_page_per_stage() {
    let generation = SchemaGenerator::default().generate(&context("agent_ops"));
    let schema = &generation.schema;

    assert_eq!(schema.version, 1);
    assert_eq!(schema.task_id.as_deref(), Some("task-42"));
    let page_ids: Vec<_> = schema.pages.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(page_ids, vec!["page_plan", "page_observe", "page_analyze"]);
    assert_eq!(schema.pages[1].name, "Observe Page");
    assert_eq!(
        schema.pages[1].description,
        "observe alert volume and kpi health in real time"
    );
    assert_eq!(generation.stage_plan.len(), 3);
    assert_eq!(schema.metadata.stage_plan, generation.stage_plan);
}

#[test]
fn test_every_scenario_produces_a_lint_clean_schema() {
    let generator = SchemaGenerator::default();
    for scenario in ["agent_ops", "infra_monitoring", "product_delivery"] {
        let schema = generator.generate(&context(scenario)).schema;
        let diagnostics = lint_schema(&schema, LintOptions::default());
        assert!(
            diagnostics.is_empty(),
            "{} produced diagnostics: {:?}",
            scenario,
            diagnostics
        );
        assert!(!has_errors(&diagnostics));
    }
}

#[test]
fn test_sections_respect_capacity_and_component_limits() {
    let generator = SchemaGenerator::default();
    let scenarios = ScenarioLibrary::defaults();

    for scenario in scenarios.iter() {
        let schema = generator.generate(&context(&scenario.id)).schema;
        for (page, stage) in schema.pages.iter().zip(&scenario.stages) {
            for (section, template) in page.sections.iter().zip(&stage.sections) {
                assert!(
                    section.fits() || section.layout.scrollable,
                    "{} overflows",
                    section.id
                );
                assert!(section.components.len() <= template.max_components);
                assert!(section.components.iter().all(|c| c.layout.col_span >= 1));
            }
        }
    }
}

#[test]
fn test_component_ids_are_unique_and_deterministic() {
    let generator = SchemaGenerator::default();
    let first = generator.generate(&context("agent_ops")).schema;
    let second = generator.generate(&context("agent_ops")).schema;

    let ids: Vec<_> = first.components().map(|c| c.id.clone()).collect();
    let unique: HashSet<_> = ids.iter().collect();
    assert_eq!(ids.len(), unique.len());

    let again: Vec<_> = second.components().map(|c| c.id.clone()).collect();
    assert_eq!(ids, again);
}

#[test]
fn test_components_bind_to_queued_info() {
    let schema = SchemaGenerator::default().generate(&context("agent_ops")).schema;
    let known: HashSet<_> = schema.info_queue.iter().map(|i| i.id.as_str()).collect();

    for component in schema.components() {
        for info_ref in &component.info_refs {
            assert!(known.contains(info_ref.as_str()), "{} -> {}", component.id, info_ref);
        }
    }

    // The observe main section is fed the alert item first
    let observe_main = schema.section("observe_main_2").unwrap();
    assert_eq!(observe_main.components[0].role, "AlertTable");
    assert_eq!(observe_main.components[0].info_refs, vec!["observe_alerts".to_string()]);
}

#[test]
fn test_round_trip_preserves_order_and_ids() {
    let schema = SchemaGenerator::default().generate(&context("infra_monitoring")).schema;
    let restored = Schema::from_json(&schema.to_json().unwrap()).unwrap();

    assert_eq!(restored.pages, schema.pages);
    assert_eq!(restored.info_queue.len(), schema.info_queue.len());
    let ids = |s: &Schema| s.components().map(|c| c.id.clone()).collect::<Vec<_>>();
    assert_eq!(ids(&restored), ids(&schema));
}

#[test]
fn test_summary_reflects_inputs() {
    let generator = SchemaGenerator::default();
    let persona = Persona::defaults()[1].clone();
    let summary = generator.summarize_context(TASK, &persona, Some("product_delivery"));

    assert_eq!(summary.persona.name.as_deref(), Some("Product Manager"));
    assert_eq!(summary.persona.focus.len(), 3);
    assert_eq!(summary.task_highlights.len(), 4);
    assert_eq!(summary.component_stats.total, 10);
    assert_eq!(summary.component_stats.types.get("Table"), Some(&2));
    assert_eq!(summary.scenario.id, "product_delivery");
    assert_eq!(summary.scenario.stage_count, 3);

    let json = serde_json::to_value(&summary).unwrap();
    assert!(json["taskHighlights"].is_array());
    assert!(json["componentStats"]["roles"]["KPIOverview"].is_number());
    assert_eq!(json["scenario"]["stageCount"], 3);
}

#[test]
fn test_malformed_library_falls_back_to_defaults() {
    let generator = SchemaGenerator::new(
        ComponentLibrary::from_json_or_default("{ not json"),
        ScenarioLibrary::from_json_or_default("[]"),
    );
    let schema = generator.generate(&context("unknown_scenario")).schema;
    assert_eq!(schema.pages.len(), 3);
    assert!(schema.components().count() > 0);
}
