use std::hint::black_box;

use criterion::criterion_group;
use criterion::criterion_main;
use criterion::BenchmarkId;
use criterion::Criterion;
use portfolio_optimizer::compute_metrics;
use portfolio_optimizer::optimize;
use portfolio_optimizer::Objective;
use portfolio_optimizer::RiskModel;
use portfolio_optimizer::SelectedAsset;

fn universe(n: usize) -> Vec<SelectedAsset> {
  let model = RiskModel::default();
  let categories = model.categories();
  (0..n)
    .map(|i| SelectedAsset::new(format!("A{i}"), categories[i % categories.len()]))
    .collect()
}

fn bench_optimize(c: &mut Criterion) {
  let model = RiskModel::default();
  let mut group = c.benchmark_group("optimize");

  for n in [2, 8, 32] {
    let assets = universe(n);
    for objective in Objective::ALL {
      group.bench_with_input(
        BenchmarkId::new(format!("{objective:?}"), n),
        &assets,
        |b, assets| b.iter(|| black_box(optimize(&model, assets, objective, Some(4.5)))),
      );
    }
  }

  group.finish();
}

fn bench_metrics(c: &mut Criterion) {
  let model = RiskModel::default();
  let mut group = c.benchmark_group("compute_metrics");

  for n in [2, 8, 32, 128] {
    let assets = universe(n);
    let weights = vec![100.0 / n as f64; n];
    group.bench_with_input(BenchmarkId::from_parameter(n), &assets, |b, assets| {
      b.iter(|| black_box(compute_metrics(&model, assets, Some(&weights), Some(4.5))))
    });
  }

  group.finish();
}

criterion_group!(benches, bench_optimize, bench_metrics);
criterion_main!(benches);
