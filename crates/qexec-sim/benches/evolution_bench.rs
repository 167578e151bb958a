//! Benchmarks for statevector evolution and counting
//!
//! Run with: cargo bench -p qexec-sim

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use qexec_ir::{Circuit, QubitId};
use qexec_sim::{DeterministicSampler, Executor, Probabilities, SimulatorConfig, Statevector};
use std::f64::consts::PI;

/// Layered rotation + entangler circuit.
fn layered(n: u32, depth: u32) -> Circuit {
    let mut circuit = Circuit::with_size("layered", n, 0);
    for layer in 0..depth {
        for q in 0..n {
            circuit.ry(PI / f64::from(layer + 2), QubitId(q)).unwrap();
        }
        for q in 0..n.saturating_sub(1) {
            circuit.cx(QubitId(q), QubitId(q + 1)).unwrap();
        }
    }
    circuit
}

/// Benchmark GHZ state evolution
fn bench_ghz_evolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("ghz_evolution");

    for num_qubits in &[4_u32, 8, 12, 16] {
        let circuit = Circuit::ghz(*num_qubits).unwrap();
        group.bench_with_input(
            BenchmarkId::new("evolve", num_qubits),
            &circuit,
            |b, circuit| {
                b.iter(|| Statevector::evolve(black_box(circuit)).unwrap());
            },
        );
    }

    group.finish();
}

/// Benchmark layered circuits with dense amplitudes
fn bench_layered_evolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("layered_evolution");
    group.sample_size(20);

    for num_qubits in &[4_u32, 8, 12] {
        let circuit = layered(*num_qubits, 4);
        group.bench_with_input(
            BenchmarkId::new("evolve", num_qubits),
            &circuit,
            |b, circuit| {
                b.iter(|| Statevector::evolve(black_box(circuit)).unwrap());
            },
        );
    }

    group.finish();
}

/// Benchmark deterministic count assignment on uniform distributions
fn bench_deterministic_sampling(c: &mut Criterion) {
    let mut group = c.benchmark_group("deterministic_sampling");

    for num_qubits in &[4_u32, 8, 12] {
        let state = Statevector::evolve(&Circuit::uniform(*num_qubits).unwrap()).unwrap();
        let probs = Probabilities::from_statevector(&state);
        group.bench_with_input(
            BenchmarkId::new("sample", num_qubits),
            &probs,
            |b, probs| {
                b.iter(|| DeterministicSampler.sample(black_box(probs), black_box(10_000)));
            },
        );
    }

    group.finish();
}

/// Benchmark the full execute pipeline
fn bench_execute(c: &mut Criterion) {
    let executor = Executor::deterministic(SimulatorConfig::default());
    let circuit = layered(10, 3);

    c.bench_function("execute_layered_10", |b| {
        b.iter(|| executor.execute(black_box(&circuit), black_box(1000)).unwrap());
    });
}

criterion_group!(
    benches,
    bench_ghz_evolution,
    bench_layered_evolution,
    bench_deterministic_sampling,
    bench_execute,
);
criterion_main!(benches);
