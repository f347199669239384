//! Table construction and facet query benchmarks.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use ledgerline::{LineItemTable, RawCell, RowRecord};

const BANKS: &[&str] = &["ADIB", "FAB", "ENBD", "CBD"];
const CATEGORIES: &[&str] = &["P&L", "KPI", "Balance Sheet"];

/// Synthetic master-style rows: cycling banks/categories, shallow level
/// hierarchy, a mix of numeric, sentinel, and malformed period cells.
fn generate_rows(count: usize) -> Vec<RowRecord> {
    (0..count)
        .map(|i| {
            let fy_2024 = match i % 5 {
                0 => RawCell::from("na"),
                1 => RawCell::from("n.m."),
                _ => RawCell::from(format!("{}.5", i)),
            };
            [
                ("id".to_string(), RawCell::from(format!("{i}"))),
                ("Item".to_string(), RawCell::from(format!("Item {i}"))),
                ("bank".to_string(), RawCell::from(BANKS[i % BANKS.len()])),
                (
                    "category".to_string(),
                    RawCell::from(CATEGORIES[i % CATEGORIES.len()]),
                ),
                ("level".to_string(), RawCell::from((i % 3) as i64)),
                ("fy_2024".to_string(), fy_2024),
                ("fy_2023".to_string(), RawCell::from(i as f64)),
                ("q1_t".to_string(), RawCell::from(format!("{}", i % 100))),
            ]
            .into_iter()
            .collect()
        })
        .collect()
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_table");

    for rows in [100usize, 1_000, 10_000] {
        let data = generate_rows(rows);
        group.throughput(Throughput::Elements(rows as u64));
        group.bench_with_input(BenchmarkId::new("rows", rows), &data, |b, data| {
            b.iter(|| black_box(LineItemTable::build_default(data).unwrap()));
        });
    }

    group.finish();
}

fn bench_queries(c: &mut Criterion) {
    let data = generate_rows(10_000);
    let table = LineItemTable::build_default(&data).unwrap();

    c.bench_function("filter_bank_and_category", |b| {
        b.iter(|| {
            black_box(table.filter(|item| item.bank == "ADIB" && item.category == "P&L"))
        });
    });

    c.bench_function("by_level", |b| {
        b.iter(|| black_box(table.by_level()));
    });

    c.bench_function("available_periods", |b| {
        b.iter(|| black_box(table.available_periods(50)));
    });
}

criterion_group!(benches, bench_build, bench_queries);
criterion_main!(benches);
