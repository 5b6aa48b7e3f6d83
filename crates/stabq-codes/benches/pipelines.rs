//! Benchmarks for building and simulating the code pipelines
//!
//! Run with: cargo bench -p stabq-codes

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use stabq_adapter_sim::SimulatorBackend;
use stabq_codes::{BitFlipCode, CodeCircuit, CodeKind, Experiment, ShorCode, run_experiment};
use stabq_hal::Backend;

/// Benchmark pipeline construction
fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");

    group.bench_function("bit_flip", |b| {
        let code = BitFlipCode::default();
        b.iter(|| CodeCircuit::build(black_box(&code)).unwrap());
    });

    group.bench_function("shor", |b| {
        let code = ShorCode::default();
        b.iter(|| CodeCircuit::build(black_box(&code)).unwrap());
    });

    group.finish();
}

/// Benchmark a single simulated run of each built circuit
fn bench_simulate(c: &mut Criterion) {
    let mut group = c.benchmark_group("simulate");
    let backend = SimulatorBackend::new().with_seed(0);

    let circuits = [
        ("bit_flip", CodeCircuit::build(&BitFlipCode::default()).unwrap()),
        ("shor", CodeCircuit::build(&ShorCode::default()).unwrap()),
    ];
    for (name, built) in &circuits {
        group.bench_with_input(BenchmarkId::new("run", name), built, |b, built| {
            b.iter(|| backend.run(black_box(built.circuit())).unwrap());
        });
    }

    group.finish();
}

/// Benchmark the full experiment including the reference run
fn bench_experiment(c: &mut Criterion) {
    let backend = SimulatorBackend::new().with_seed(0);
    let experiment = Experiment::demo(CodeKind::Shor);

    c.bench_function("experiment/shor_demo", |b| {
        b.iter(|| run_experiment(black_box(&experiment), &backend).unwrap());
    });
}

criterion_group!(benches, bench_build, bench_simulate, bench_experiment);
criterion_main!(benches);
