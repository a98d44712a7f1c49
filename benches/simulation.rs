//! Performance benchmarks for Peppered

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use peppered::environment::EliminationProfile;
use peppered::{Backdrop, Command, Config, Population, Simulation};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn benchmark_spawn(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_offspring");

    for size in [20, 200, 2000].iter() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut population = Population::seed(*size, Backdrop::Light, &mut rng);
        population.eliminate(size / 4, &EliminationProfile::new(0.3, 0.7), &mut rng);

        group.bench_with_input(BenchmarkId::new("size", size), size, |b, _| {
            b.iter(|| population.generate_offspring(black_box(true), &mut rng));
        });
    }

    group.finish();
}

fn benchmark_eliminate(c: &mut Criterion) {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let population = Population::seed(2000, Backdrop::Light, &mut rng);
    let profile = EliminationProfile::new(0.3, 0.7);

    c.bench_function("eliminate_500_of_2000", |b| {
        b.iter(|| {
            let mut p = population.clone();
            p.eliminate(black_box(500), &profile, &mut rng)
        });
    });
}

fn benchmark_mutate(c: &mut Criterion) {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let mut population = Population::seed(2000, Backdrop::Light, &mut rng);

    c.bench_function("mutate_2000", |b| {
        b.iter(|| population.mutate(black_box(0.4), &mut rng));
    });
}

fn benchmark_script(c: &mut Criterion) {
    let script = Command::parse_script("e e s m e s b e e s").unwrap();

    c.bench_function("script_100_rounds", |b| {
        b.iter(|| {
            let mut sim = Simulation::new_with_seed(Config::default(), 42);
            for _ in 0..100 {
                sim.run_script(script.iter().copied());
            }
            sim.generation_count()
        });
    });

    let mut sim = Simulation::new_with_seed(Config::default(), 42);
    for _ in 0..100 {
        sim.run_script(script.iter().copied());
    }

    c.bench_function("snapshot_300_generations", |b| {
        b.iter(|| black_box(&sim).snapshot());
    });
}

criterion_group!(
    benches,
    benchmark_spawn,
    benchmark_eliminate,
    benchmark_mutate,
    benchmark_script,
);

criterion_main!(benches);
