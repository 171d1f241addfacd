use refine_editor::{apply_diff, InstructionParser, Intent, Operation, Scope, NO_OPERATION_WARNING};
use refine_generator::{GenerationContext, SchemaGenerator};
use refine_linter::{has_errors, lint_schema, LintOptions};
use refine_schema::Schema;
use serde_json::json;
use std::collections::HashSet;

fn parser() -> InstructionParser {
    InstructionParser::default()
}

fn assert_grid_contract(schema: &Schema) {
    for page in &schema.pages {
        for section in &page.sections {
            assert!(
                section.fits() || section.layout.scrollable,
                "{} overflows: {} > {}",
                section.id,
                section.used_span(),
                section.layout.col_span
            );
        }
    }
}

#[test]
fn test_add_alert_table_to_empty_main_section() {
    let schema: Schema = serde_json::from_value(json!({
        "version": 1,
        "pages": [{"id": "page_plan", "sections": [
            {"id": "plan_main_1", "role": "main", "layout": {"colSpan": 8}}
        ]}]
    }))
    .unwrap();

    let parsed = parser().parse("添加一个告警表格", &schema);
    assert_eq!(parsed.diff.intent, Some(Intent::Add));
    assert_eq!(parsed.diff.operations.len(), 1);
    assert!(parsed.warnings.is_empty());
    match &parsed.diff.operations[0] {
        Operation::AddNode {
            target_section_id,
            component,
            page_id,
        } => {
            assert_eq!(target_section_id, "plan_main_1");
            assert_eq!(page_id.as_deref(), Some("page_plan"));
            assert!(component.role.contains("Alert"));
        }
        other => panic!("expected AddNode, got {:?}", other),
    }

    let result = apply_diff(&schema, &parsed.diff);
    let section = result.schema.section("plan_main_1").unwrap();
    assert_eq!(section.components.len(), 1);
    assert!(section.components[0].layout.col_span <= section.layout.col_span);
    assert_eq!(result.schema.version, 2);
}

#[test]
fn test_remove_missing_chart_is_a_no_op() {
    let schema: Schema = serde_json::from_value(json!({
        "version": 5,
        "pages": [{"id": "page_plan", "sections": [
            {"id": "plan_header_1", "role": "header", "components": [
                {"id": "kpi_1", "role": "KPIOverview", "layout": {"colSpan": 6}}
            ]}
        ]}]
    }))
    .unwrap();

    let parsed = parser().parse("删除这个图表", &schema);
    assert_eq!(parsed.diff.intent, Some(Intent::Remove));
    assert!(parsed.diff.operations.is_empty());
    assert!(!parsed.warnings.is_empty());

    let result = apply_diff(&schema, &parsed.diff);
    assert_eq!(result.schema.version, 5);
    assert_eq!(result.schema, schema);
    assert_eq!(result.warnings, vec![NO_OPERATION_WARNING.to_string()]);
}

#[test]
fn test_resize_narrows_by_two_columns() {
    let schema: Schema = serde_json::from_value(json!({
        "version": 1,
        "pages": [{"id": "page_plan", "sections": [
            {"id": "plan_header_1", "role": "header", "components": [
                {"id": "summary_1", "role": "InsightSummary", "layout": {"colSpan": 6}}
            ]}
        ]}]
    }))
    .unwrap();

    let parsed = parser().parse("把这个区域缩小一点", &schema);
    assert_eq!(parsed.diff.intent, Some(Intent::Resize));

    let result = apply_diff(&schema, &parsed.diff);
    let component = result.schema.component("summary_1").unwrap();
    assert_eq!(component.layout.col_span, 4);
    assert_eq!(component.style["emphasis"], "normal");
    assert_eq!(component.meta["lastInstruction"], "把这个区域缩小一点");
}

#[test]
fn test_consistency_instruction_updates_every_page() {
    let schema: Schema = serde_json::from_value(json!({
        "version": 1,
        "pages": [
            {"id": "page_plan", "sections": [
                {"id": "plan_header_1", "role": "header", "components": [
                    {"id": "kpi_a", "role": "KPIOverview", "layout": {"colSpan": 6}},
                    {"id": "other", "role": "InsightSummary", "layout": {"colSpan": 6}}
                ]}
            ]},
            {"id": "page_observe", "sections": [
                {"id": "observe_header_1", "role": "header", "components": [
                    {"id": "kpi_b", "role": "KPIOverview", "layout": {"colSpan": 6}}
                ]}
            ]}
        ]
    }))
    .unwrap();

    let parsed = parser().parse("让所有页面的KPI卡片保持一致，字体更大", &schema);
    assert_eq!(parsed.diff.scope, Scope::SameRoleAcrossPages);

    let result = apply_diff(&schema, &parsed.diff);
    for id in ["kpi_a", "kpi_b"] {
        assert_eq!(result.schema.component(id).unwrap().style["fontSize"], "large");
    }
    assert!(result.schema.component("other").unwrap().style.is_empty());
}

#[test]
fn test_reorder_with_current_order_keeps_identities() {
    let schema = generated();
    let section = schema
        .pages
        .iter()
        .flat_map(|p| &p.sections)
        .find(|s| s.components.len() > 1)
        .unwrap();
    let ids = section.component_ids();

    let diff = refine_editor::Diff {
        operations: vec![Operation::ReorderChildren {
            section_id: section.id.clone(),
            new_order: ids.clone(),
        }],
        summary: "reorder".to_string(),
        ..Default::default()
    };
    let result = apply_diff(&schema, &diff);
    let reordered = result.schema.section(&section.id).unwrap();
    assert_eq!(reordered.component_ids(), ids);
    let orders: Vec<u32> = reordered.components.iter().map(|c| c.layout.order).collect();
    assert_eq!(orders, (1..=ids.len() as u32).collect::<Vec<_>>());
}

fn generated() -> Schema {
    SchemaGenerator::default()
        .generate(&GenerationContext {
            task_id: Some("editor-tests".to_string()),
            task_spec: "Observe alert volume for the agent fleet. Analyze risk after each run."
                .to_string(),
            persona: None,
            scenario_id: Some("agent_ops".to_string()),
        })
        .schema
}

#[test]
fn test_instruction_sequence_keeps_schema_valid() {
    let parser = parser();
    let mut schema = generated();
    let instructions = [
        "添加一个告警表格",
        "在监控页面添加趋势图表到右侧",
        "把这个区域加宽",
        "把这个区域加宽",
        "把风险看板移到底部",
        "让所有页面的KPI卡片保持一致，字体更大",
        "提高对比度",
        "删除日志",
    ];

    for instruction in instructions {
        let parsed = parser.parse(instruction, &schema);
        let result = apply_diff(&schema, &parsed.diff);
        if parsed.diff.is_empty() {
            assert_eq!(result.schema.version, schema.version);
        } else {
            assert_eq!(result.schema.version, schema.version + 1, "{}", instruction);
        }
        schema = result.schema;

        assert_grid_contract(&schema);
        let ids: Vec<_> = schema.components().map(|c| c.id.clone()).collect();
        let unique: HashSet<_> = ids.iter().collect();
        assert_eq!(ids.len(), unique.len(), "duplicate id after {}", instruction);
        assert!(!has_errors(&lint_schema(&schema, LintOptions::default())));
    }
}

#[test]
fn test_added_components_carry_no_dangling_info_refs() {
    let schema = generated();
    let parsed = parser().parse("添加一个告警表格", &schema);
    let result = apply_diff(&schema, &parsed.diff);

    let known: HashSet<_> = result.schema.info_queue.iter().map(|i| i.id.as_str()).collect();
    for component in result.schema.components() {
        for info_ref in &component.info_refs {
            assert!(known.contains(info_ref.as_str()));
        }
    }
}
