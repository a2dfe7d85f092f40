use ag_math::{InverseCumulativeNormalRng, StdNormalRng};
use ag_methods::{simulate, simulate_parallel, simulate_substreams, SimulationParameters};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn bench_simulators(c: &mut Criterion) {
    let mut group = c.benchmark_group("gbm_ensemble");
    group.sample_size(20);

    for paths in [1_000usize, 10_000] {
        let params = SimulationParameters::new(0.0004, 0.015, 7500.0, 252, paths).unwrap();

        group.bench_with_input(BenchmarkId::new("shared_source", paths), &params, |b, p| {
            b.iter(|| simulate(black_box(p), &mut StdNormalRng::new(42)).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("substreams", paths), &params, |b, p| {
            b.iter(|| simulate_substreams::<StdNormalRng>(black_box(p), 42).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("parallel", paths), &params, |b, p| {
            b.iter(|| simulate_parallel::<StdNormalRng>(black_box(p), 42).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("parallel_mt", paths), &params, |b, p| {
            b.iter(|| simulate_parallel::<InverseCumulativeNormalRng>(black_box(p), 42).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_simulators);
criterion_main!(benches);
