use criterion::{black_box, criterion_group, criterion_main, Criterion};
use refine_editor::{apply_diff, InstructionParser};
use refine_generator::{GenerationContext, SchemaGenerator};

fn fixture() -> refine_schema::Schema {
    SchemaGenerator::default()
        .generate(&GenerationContext {
            task_id: Some("bench".to_string()),
            task_spec: "Observe alert volume and KPI health. Analyze risk trends after each run."
                .to_string(),
            persona: None,
            scenario_id: Some("agent_ops".to_string()),
        })
        .schema
}

fn bench_parse(c: &mut Criterion) {
    let parser = InstructionParser::default();
    let schema = fixture();

    c.bench_function("parse_update", |b| {
        b.iter(|| parser.parse(black_box("让所有页面的KPI卡片保持一致，字体更大"), &schema))
    });
}

fn bench_parse_and_apply(c: &mut Criterion) {
    let parser = InstructionParser::default();
    let schema = fixture();

    c.bench_function("parse_and_apply_add", |b| {
        b.iter(|| {
            let parsed = parser.parse(black_box("添加一个告警表格"), &schema);
            apply_diff(&schema, &parsed.diff)
        })
    });

    let parsed = parser.parse("把这个区域缩小一点", &schema);
    c.bench_function("apply_resize", |b| {
        b.iter(|| apply_diff(black_box(&schema), &parsed.diff))
    });
}

criterion_group!(benches, bench_parse, bench_parse_and_apply);
criterion_main!(benches);
