//! Benchmarks for crisol enumeration and rendering.
//!
//! Run with: cargo bench
//!
//! Results include 95% confidence intervals via Criterion.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use crisol::core::composer::{CartesianComposer, Record};
use crisol::core::generators::{CidrGen, FieldGenerator, RepeatGen};
use crisol::core::types::TargetSpec;
use crisol::core::value::{GenValue, ValueKind};
use crisol::manifest::render;
use indexmap::IndexMap;

fn repeat_fields(count: usize, cycle: u32) -> IndexMap<String, Box<dyn FieldGenerator>> {
    (0..count)
        .map(|i| {
            let gen = RepeatGen::new(GenValue::string("value"), cycle).unwrap();
            (format!("field{}", i), Box::new(gen) as Box<dyn FieldGenerator>)
        })
        .collect()
}

fn bench_composer_enumeration(c: &mut Criterion) {
    let mut group = c.benchmark_group("composer_full_product");
    for field_count in [2, 3, 4] {
        let mut composer = CartesianComposer::new(repeat_fields(field_count, 5));
        group.bench_with_input(
            BenchmarkId::from_parameter(field_count),
            &field_count,
            |b, _| {
                b.iter(|| {
                    composer.reset();
                    let mut emitted = 0u64;
                    while let Some(record) = composer.next_record() {
                        black_box(&record);
                        emitted += 1;
                    }
                    black_box(emitted);
                });
            },
        );
    }
    group.finish();
}

fn bench_cidr_cycle(c: &mut Criterion) {
    let mut gen = CidrGen::new("100.100.100.0/24").unwrap();
    c.bench_function("cidr_slash24_cycle", |b| {
        b.iter(|| {
            gen.reset();
            loop {
                let v = gen.next();
                if v.is_nil() {
                    break;
                }
                black_box(&v);
            }
        });
    });
}

fn bench_render_record(c: &mut Criterion) {
    let target = TargetSpec {
        api_version: "node.example.com/v1".to_string(),
        kind: "Route".to_string(),
        namespace: "default".to_string(),
        schema: None,
        schema_version: None,
    };
    let mut record = Record::new();
    record.insert(
        "metric".to_string(),
        GenValue::new(ValueKind::Integer, "100").unwrap(),
    );
    record.insert(
        "nextHops".to_string(),
        GenValue::new(ValueKind::List, r#"["192.168.1.1"]"#).unwrap(),
    );
    record.insert("prefix".to_string(), GenValue::ip_prefix("100.100.100.1"));

    c.bench_function("render_record", |b| {
        b.iter(|| {
            let manifest = render::render_record(&target, black_box(&record), 1).unwrap();
            black_box(manifest);
        });
    });
}

criterion_group!(
    benches,
    bench_composer_enumeration,
    bench_cidr_cycle,
    bench_render_record
);
criterion_main!(benches);
