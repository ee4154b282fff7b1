//! Table Benchmarks
//!
//! Grouped aggregation, merge and CSV encoding on seeded random tables.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use tabrs::{encode, merge, DataFrame, Format, IoOptions, JoinType, TableIndex, Value};

/// Random table with a `key` column cycling through `n_keys` labels
fn create_keyed_table(n_rows: usize, n_keys: usize, seed: u64) -> DataFrame {
    let df = DataFrame::random_normal(TableIndex::range(n_rows), &["a", "b", "c"], seed).unwrap();
    let keys: Vec<Value> = (0..n_rows).map(|i| Value::from(format!("k{}", i % n_keys))).collect();
    df.with_column("key", keys).unwrap()
}

fn bench_group_by(c: &mut Criterion) {
    let mut group = c.benchmark_group("GroupBy");
    for n_rows in [1_000, 10_000] {
        let df = create_keyed_table(n_rows, 50, 7);
        group.bench_with_input(BenchmarkId::new("mean", n_rows), &df, |b, df| {
            b.iter(|| {
                let grouped = std::hint::black_box(df).group_by(&["key"]).unwrap();
                grouped.mean().unwrap()
            })
        });
    }
    group.finish();
}

fn bench_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("Merge");
    group.sample_size(20);
    for n_rows in [1_000, 5_000] {
        let left = create_keyed_table(n_rows, n_rows, 1);
        let right = create_keyed_table(n_rows, n_rows, 2);
        for how in [JoinType::Inner, JoinType::Outer] {
            group.bench_with_input(
                BenchmarkId::new(format!("{:?}", how), n_rows),
                &(&left, &right),
                |b, (left, right)| {
                    b.iter(|| merge(std::hint::black_box(left), right, &["key"], how).unwrap())
                },
            );
        }
    }
    group.finish();
}

fn bench_csv_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("CSV");
    let options = IoOptions::default();
    for n_rows in [1_000, 10_000] {
        let df = create_keyed_table(n_rows, 50, 3);
        group.bench_with_input(BenchmarkId::new("encode", n_rows), &df, |b, df| {
            b.iter(|| encode(std::hint::black_box(df), Format::Csv, &options).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_group_by, bench_merge, bench_csv_encode);
criterion_main!(benches);
