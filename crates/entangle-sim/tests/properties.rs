//! Property tests for the statevector engine.

use entangle_ir::{QubitId, StandardGate};
use entangle_sim::Statevector;
use proptest::prelude::*;

const TOLERANCE: f64 = 1e-9;

/// A gate together with the targets it acts on.
#[derive(Debug, Clone)]
struct Op {
    gate: StandardGate,
    qubits: Vec<QubitId>,
}

fn gate_strategy() -> impl Strategy<Value = StandardGate> {
    prop_oneof![
        Just(StandardGate::I),
        Just(StandardGate::X),
        Just(StandardGate::Y),
        Just(StandardGate::Z),
        Just(StandardGate::H),
        (-2.0f64..2.0).prop_map(StandardGate::XPow),
        (-2.0f64..2.0).prop_map(StandardGate::YPow),
        Just(StandardGate::CX),
        Just(StandardGate::CZ),
        (-2.0f64..2.0).prop_map(StandardGate::CXPow),
    ]
}

fn op_strategy(num_qubits: u32) -> impl Strategy<Value = Op> {
    (gate_strategy(), 0..num_qubits, 1..num_qubits).prop_map(move |(gate, a, offset)| {
        let b = (a + offset) % num_qubits;
        let qubits = if gate.num_qubits() == 1 {
            vec![QubitId(a)]
        } else {
            vec![QubitId(a), QubitId(b)]
        };
        Op { gate, qubits }
    })
}

fn circuit_strategy() -> impl Strategy<Value = (u32, Vec<Op>)> {
    (2u32..=5).prop_flat_map(|n| (Just(n), prop::collection::vec(op_strategy(n), 0..40)))
}

fn distance(a: &Statevector, b: &Statevector) -> f64 {
    a.amplitudes()
        .iter()
        .zip(b.amplitudes())
        .map(|(x, y)| (x - y).norm())
        .fold(0.0, f64::max)
}

proptest! {
    #[test]
    fn prop_norm_preserved_after_every_gate((n, ops) in circuit_strategy()) {
        let mut state = Statevector::new(n as usize);
        for op in &ops {
            state.apply_gate(&op.gate, &op.qubits);
            prop_assert!((state.norm_sqr() - 1.0).abs() < TOLERANCE, "after {:?}", op);
        }
    }

    #[test]
    fn prop_self_inverse_gates_restore_state(
        (n, ops) in circuit_strategy(),
        pick in 0usize..6,
        target in any::<prop::sample::Index>(),
    ) {
        let mut state = Statevector::new(n as usize);
        for op in &ops {
            state.apply_gate(&op.gate, &op.qubits);
        }
        let before = state.clone();

        let gate = [
            StandardGate::X,
            StandardGate::Y,
            StandardGate::Z,
            StandardGate::H,
            StandardGate::CX,
            StandardGate::CZ,
        ][pick];
        prop_assert!(gate.is_self_inverse());
        let a = target.index(n as usize) as u32;
        let qubits = if gate.num_qubits() == 1 {
            vec![QubitId(a)]
        } else {
            vec![QubitId(a), QubitId((a + 1) % n)]
        };

        state.apply_gate(&gate, &qubits);
        state.apply_gate(&gate, &qubits);
        prop_assert!(distance(&state, &before) < TOLERANCE);
    }

    #[test]
    fn prop_measurement_keeps_state_normalized((n, ops) in circuit_strategy(), seed in any::<u64>()) {
        use rand::SeedableRng;
        let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
        let mut state = Statevector::new(n as usize);
        for op in &ops {
            state.apply_gate(&op.gate, &op.qubits);
        }
        for q in 0..n as usize {
            let bit = state.measure(q, &mut rng);
            prop_assert!((state.norm_sqr() - 1.0).abs() < TOLERANCE);
            let p1 = state.probability_of_one(q);
            let expected = if bit { 1.0 } else { 0.0 };
            prop_assert!((p1 - expected).abs() < TOLERANCE);
        }
    }

    #[test]
    fn prop_probabilities_sum_to_one((n, ops) in circuit_strategy()) {
        let mut state = Statevector::new(n as usize);
        for op in &ops {
            state.apply_gate(&op.gate, &op.qubits);
        }
        let total: f64 = state.probabilities().iter().sum();
        prop_assert!((total - 1.0).abs() < TOLERANCE);
        for q in 0..n as usize {
            let p1 = state.probability_of_one(q);
            prop_assert!((-TOLERANCE..=1.0 + TOLERANCE).contains(&p1));
        }
    }
}
