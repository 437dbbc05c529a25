use criterion::{BatchSize, Criterion, criterion_group, criterion_main};

use csv_insight::aggregate::{self, AggregateOptions};
use csv_insight::cli::Reduction;
use csv_insight::dataset::Dataset;

fn synthetic_dataset(rows: usize, groups: usize) -> Dataset {
    let headers = vec!["channel".to_string(), "revenue".to_string()];
    let raw: Vec<Vec<String>> = (0..rows)
        .map(|i| {
            vec![
                format!("channel-{}", i % groups),
                format!("{}", (i * 7) % 1000),
            ]
        })
        .collect();
    Dataset::from_raw(headers, raw).expect("dataset")
}

fn bench_aggregate(c: &mut Criterion) {
    let dataset = synthetic_dataset(50_000, 25);
    let options = AggregateOptions {
        reduction: Reduction::Sum,
        limit: 10,
        key_width: 15,
    };
    c.bench_function("aggregate_sum_50k_rows_25_groups", |b| {
        b.iter_batched(
            || dataset.clone(),
            |dataset| aggregate::aggregate(&dataset, 0, 1, &options),
            BatchSize::LargeInput,
        )
    });
}

fn bench_distribution(c: &mut Criterion) {
    let dataset = synthetic_dataset(50_000, 25);
    c.bench_function("distribution_50k_rows_25_groups", |b| {
        b.iter_batched(
            || dataset.clone(),
            |dataset| aggregate::distribution(&dataset, 0, 6, 12),
            BatchSize::LargeInput,
        )
    });
}

criterion_group!(benches, bench_aggregate, bench_distribution);
criterion_main!(benches);
