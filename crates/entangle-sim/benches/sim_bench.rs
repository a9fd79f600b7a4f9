//! Benchmarks for the statevector engine and shot sampling
//!
//! Run with: cargo bench -p entangle-sim

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use entangle_ir::{Circuit, QubitId, StandardGate};
use entangle_sim::{Simulator, SimulatorConfig, Statevector, Strategy};

/// Benchmark single gate application across register sizes
fn bench_gate_application(c: &mut Criterion) {
    let mut group = c.benchmark_group("gate_application");

    for num_qubits in &[8usize, 12, 16, 20] {
        let mut state = Statevector::new(*num_qubits);
        let mid = QubitId((*num_qubits / 2) as u32);

        group.bench_with_input(BenchmarkId::new("h", num_qubits), num_qubits, |b, _| {
            b.iter(|| state.apply_gate(black_box(&StandardGate::H), &[mid]));
        });
        group.bench_with_input(BenchmarkId::new("cx_pow", num_qubits), num_qubits, |b, _| {
            b.iter(|| {
                state.apply_gate(black_box(&StandardGate::CXPow(0.5)), &[QubitId(0), mid]);
            });
        });
    }

    group.finish();
}

/// Benchmark terminal sampling against per-shot replay
fn bench_sampling(c: &mut Criterion) {
    let mut group = c.benchmark_group("sampling");
    group.sample_size(20);

    for num_qubits in &[4u32, 10, 16] {
        let circuit = Circuit::ghz(*num_qubits).unwrap();

        for strategy in [Strategy::Auto, Strategy::ForceReplay] {
            let config = SimulatorConfig::default().with_seed(1).with_strategy(strategy);
            let mut sim = Simulator::with_config(config).unwrap();
            group.bench_with_input(
                BenchmarkId::new(format!("{strategy:?}"), num_qubits),
                &circuit,
                |b, circuit| {
                    b.iter(|| black_box(sim.run(circuit, 1024).unwrap()));
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_gate_application, bench_sampling);
criterion_main!(benches);
