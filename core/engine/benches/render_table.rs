//! FILENAME: core/engine/benches/render_table.rs
//! PURPOSE: Rendering throughput for a styled result set.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use engine::{render_table_outputs, write_tsv, ResultSet, Row, TableRenderOptions};

const QUERY: &str = "/**
 * @column amount align=right format=number comma=true decimal=2
 * @column created format=datetime pattern=yyyy/MM/dd_HH:mm
 * @cell amount >= 5000 color=#008000 bold=true
 * @cell amount < 100 color=#cc0000
 * @row status == \"error\" bg=#ffe0e0
 */
SELECT id, amount, status, created FROM orders";

fn build_result(rows: usize) -> ResultSet {
    let columns = ["id", "amount", "status", "created"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let rows = (0..rows)
        .map(|i| {
            Row::new()
                .with("id", i as f64)
                .with("amount", (i * 37 % 10_000) as f64 + 0.5)
                .with("status", if i % 7 == 0 { "error" } else { "ok" })
                .with("created", format!("2025-01-{:02}T10:{:02}:00", i % 28 + 1, i % 60))
        })
        .collect();
    ResultSet::new(columns, rows)
}

fn bench_render(c: &mut Criterion) {
    let options = TableRenderOptions::default();
    let mut group = c.benchmark_group("render_table_outputs");
    for size in [100usize, 1_000, 10_000] {
        let result = build_result(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &result, |b, result| {
            b.iter(|| render_table_outputs(black_box(QUERY), black_box(result), &options))
        });
    }
    group.finish();
}

fn bench_tsv(c: &mut Criterion) {
    let result = build_result(1_000);
    c.bench_function("write_tsv_1000", |b| b.iter(|| write_tsv(black_box(&result))));
}

criterion_group!(benches, bench_render, bench_tsv);
criterion_main!(benches);
