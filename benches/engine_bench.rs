use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::time::Duration;

use stable_matching::{MatchingEngine, random_configuration, reference_configuration};

fn bench_reference_run(c: &mut Criterion) {
    let configuration = reference_configuration();

    c.bench_function("reference_run_to_completion", |b| {
        b.iter(|| {
            let mut engine = MatchingEngine::new(black_box(&configuration)).unwrap();
            engine.run_to_completion();
            black_box(engine.pairings())
        })
    });
}

fn bench_random_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("random_run_to_completion");
    group.measurement_time(Duration::from_secs(10));

    for size in [5, 10, 25, 50].iter() {
        let mut rng = StdRng::seed_from_u64(*size as u64);
        let configuration = random_configuration(*size, *size, &mut rng);

        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &configuration, |b, configuration| {
            b.iter(|| {
                let mut engine = MatchingEngine::new(configuration).unwrap();
                black_box(engine.run_to_completion())
            })
        });
    }

    group.finish();
}

fn bench_stability_check(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(3);
    let configuration = random_configuration(50, 50, &mut rng);
    let mut engine = MatchingEngine::new(&configuration).unwrap();
    engine.run_to_completion();

    c.bench_function("blocking_pairs_50x50", |b| {
        b.iter(|| black_box(engine.blocking_pairs()))
    });
}

criterion_group!(benches, bench_reference_run, bench_random_run, bench_stability_check);
criterion_main!(benches);
