//! Benchmark for report rendering over a large synthetic survey
//!
//! Covers the full render (matrices, change logs, range groups) and range
//! compression on its own.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use purity_report::{
    compress_group, render_report, ReportConfig, ResultStore, SurveyResult, SymbolSet, Version,
};
use serde_json::{json, Map, Value};
use std::hint::black_box;

fn create_document(minor: usize, methods: usize) -> Value {
    let mut records = Map::new();
    for i in 0..methods {
        let pure = (i + minor / 7) % 5 != 0;
        let mut record = json!({
            "exists": i % 11 != minor % 11,
            "pure": pure,
            "immutable_return": i % 3 == 0,
            "return_clone": ((i + minor / 10) % 3) as i64,
        });
        if !pure {
            record["impure_mode"] = json!(if i % 2 == 0 { "overwrite" } else { "accumulate" });
        }
        if i % 4 == 0 {
            record["callback_clone"] = json!(((minor / 5) % 3) as i64);
        }
        records.insert(format!("Method{i:03}"), record);
    }
    records.insert("Session".into(), json!({ "exists": true, "pure": true, "return_clone": if minor < 20 { 2 } else { 0 } }));
    records.insert("Begin".into(), json!({ "exists": true, "pure": true, "return_clone": 1 }));

    json!({
        "gorm_version": format!("v1.{minor}.0"),
        "methods": records,
        "summary": { "total_methods": methods + 2, "pure_methods": methods, "impure_methods": 2, "immutable_count": methods / 3 }
    })
}

fn create_store(versions: usize, methods: usize) -> ResultStore {
    let results = (0..versions)
        .map(|minor| {
            let version = Version::parse(&format!("v1.{minor}.0")).unwrap();
            SurveyResult::from_json(version, &create_document(minor, methods))
        })
        .collect();
    ResultStore::from_results(results)
}

fn bench_render_report(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_report");
    let config = ReportConfig::default();

    for &(versions, methods) in &[(10, 50), (30, 150), (60, 300)] {
        let store = create_store(versions, methods);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{versions}x{methods}")),
            &store,
            |b, store| {
                b.iter(|| black_box(render_report(store, &config, SymbolSet::emoji())));
            },
        );
    }

    group.finish();
}

fn bench_compress_group(c: &mut Criterion) {
    let config = ReportConfig::default();
    let store = create_store(60, 300);

    c.bench_function("compress_default_groups", |b| {
        b.iter(|| {
            for range_group in &config.range_groups {
                black_box(compress_group(&store, range_group));
            }
        });
    });
}

criterion_group!(benches, bench_render_report, bench_compress_group);
criterion_main!(benches);
