//! Statevector simulation engine.

use num_complex::Complex64;
use rand::Rng;

use entangle_ir::{EPSILON, GateMatrix, QubitId, StandardGate, Unitary2x2, Unitary4x4};

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);

/// A statevector representing a quantum state.
///
/// Amplitude `i` belongs to the basis state whose bit `q` is the value of
/// qubit `q`, so qubit 0 is the least-significant bit of the index.
#[derive(Debug, Clone, PartialEq)]
pub struct Statevector {
    /// The state amplitudes (2^n complex numbers).
    amplitudes: Vec<Complex64>,
    /// Number of qubits.
    num_qubits: usize,
}

impl Statevector {
    /// Create a new statevector initialized to |0...0⟩.
    pub fn new(num_qubits: usize) -> Self {
        debug_assert!(
            num_qubits < usize::BITS as usize,
            "{num_qubits} qubits overflow the amplitude index"
        );
        let size = 1 << num_qubits;
        let mut amplitudes = vec![ZERO; size];
        amplitudes[0] = ONE;
        Self {
            amplitudes,
            num_qubits,
        }
    }

    /// Wrap explicit amplitudes.
    ///
    /// Returns `None` unless the length is a nonzero power of two. The
    /// amplitudes are taken as given, without renormalization.
    pub fn from_amplitudes(amplitudes: Vec<Complex64>) -> Option<Self> {
        if !amplitudes.len().is_power_of_two() {
            return None;
        }
        let num_qubits = amplitudes.len().trailing_zeros() as usize;
        Some(Self {
            amplitudes,
            num_qubits,
        })
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Number of amplitudes, `2^n`.
    pub fn dimension(&self) -> usize {
        self.amplitudes.len()
    }

    /// Return to |0...0⟩ without reallocating.
    pub fn reset(&mut self) {
        self.amplitudes.fill(ZERO);
        self.amplitudes[0] = ONE;
    }

    /// All amplitudes in basis-index order.
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Amplitude of one basis state.
    pub fn amplitude(&self, index: usize) -> Option<Complex64> {
        self.amplitudes.get(index).copied()
    }

    // =========================================================================
    // Gate application
    // =========================================================================

    /// Apply a gate to its targets.
    ///
    /// Targets must already be validated against the register, which
    /// [`Circuit`](entangle_ir::Circuit) guarantees.
    pub fn apply_gate(&mut self, gate: &StandardGate, qubits: &[QubitId]) {
        debug_assert_eq!(
            qubits.len(),
            gate.num_qubits() as usize,
            "{gate:?} applied to {} targets",
            qubits.len()
        );
        if gate.is_identity() {
            return;
        }
        let matrix = gate.matrix();
        debug_assert!(matrix.is_unitary(), "{gate:?} is not unitary");
        match matrix {
            GateMatrix::Single(u) => self.apply_matrix_1q(&u, qubits[0].index()),
            GateMatrix::Two(u) => self.apply_matrix_2q(&u, qubits[0].index(), qubits[1].index()),
        }
    }

    /// Apply a 2x2 unitary to `qubit`.
    ///
    /// Visits each pair of indices that differ only in bit `qubit` once.
    pub fn apply_matrix_1q(&mut self, u: &Unitary2x2, qubit: usize) {
        let mask = 1 << qubit;
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 {
                let j = i | mask;
                let (a, b) = u.apply(self.amplitudes[i], self.amplitudes[j]);
                self.amplitudes[i] = a;
                self.amplitudes[j] = b;
            }
        }
    }

    /// Apply a 4x4 unitary to the ordered pair `(first, second)`.
    ///
    /// The matrix's basis index is `2 * bit(first) + bit(second)`.
    pub fn apply_matrix_2q(&mut self, u: &Unitary4x4, first: usize, second: usize) {
        let mask_a = 1 << first;
        let mask_b = 1 << second;
        for i in 0..self.amplitudes.len() {
            if i & (mask_a | mask_b) == 0 {
                let idx = [i, i | mask_b, i | mask_a, i | mask_a | mask_b];
                let out = u.apply(idx.map(|k| self.amplitudes[k]));
                for (k, amp) in idx.into_iter().zip(out) {
                    self.amplitudes[k] = amp;
                }
            }
        }
    }

    // =========================================================================
    // Probabilities and measurement
    // =========================================================================

    /// Probability that measuring `qubit` yields 1, without collapsing.
    pub fn probability_of_one(&self, qubit: usize) -> f64 {
        let mask = 1 << qubit;
        self.amplitudes
            .iter()
            .enumerate()
            .filter(|(i, _)| i & mask != 0)
            .map(|(_, a)| a.norm_sqr())
            .sum()
    }

    /// Born-rule probability of every basis state.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(|a| a.norm_sqr()).collect()
    }

    /// Measure `qubit` in the computational basis and collapse the state.
    pub fn measure<R: Rng + ?Sized>(&mut self, qubit: usize, rng: &mut R) -> bool {
        let p1 = self.probability_of_one(qubit).clamp(0.0, 1.0);
        let outcome = rng.r#gen::<f64>() < p1;
        let p = if outcome { p1 } else { 1.0 - p1 };
        self.collapse(qubit, outcome, p);
        outcome
    }

    /// Zero amplitudes inconsistent with `outcome` and rescale the rest.
    fn collapse(&mut self, qubit: usize, outcome: bool, probability: f64) {
        let mask = 1 << qubit;
        let scale = if probability > 0.0 {
            1.0 / probability.sqrt()
        } else {
            0.0
        };
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if (i & mask != 0) == outcome {
                *amp *= scale;
            } else {
                *amp = ZERO;
            }
        }
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    /// Sum of squared magnitudes.
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.iter().map(|a| a.norm_sqr()).sum()
    }

    /// Whether the norm is 1 within [`EPSILON`].
    pub fn is_normalized(&self) -> bool {
        (self.norm_sqr() - 1.0).abs() < EPSILON
    }

    /// `⟨self|other⟩`, or `None` when the registers differ in size.
    pub fn inner_product(&self, other: &Statevector) -> Option<Complex64> {
        if self.num_qubits != other.num_qubits {
            return None;
        }
        Some(
            self.amplitudes
                .iter()
                .zip(&other.amplitudes)
                .map(|(a, b)| a.conj() * b)
                .sum(),
        )
    }

    /// `|⟨self|other⟩|²`, or `None` when the registers differ in size.
    pub fn fidelity(&self, other: &Statevector) -> Option<f64> {
        self.inner_product(other).map(|c| c.norm_sqr())
    }

    /// Density matrix of `qubit` with every other qubit traced out.
    ///
    /// Returned row-major as `[ρ00, ρ01, ρ10, ρ11]`.
    pub fn reduced_density_matrix(&self, qubit: usize) -> [Complex64; 4] {
        let mask = 1 << qubit;
        let mut rho = [ZERO; 4];
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 {
                let a0 = self.amplitudes[i];
                let a1 = self.amplitudes[i | mask];
                rho[0] += a0 * a0.conj();
                rho[1] += a0 * a1.conj();
                rho[2] += a1 * a0.conj();
                rho[3] += a1 * a1.conj();
            }
        }
        rho
    }

    /// Bloch vector `(⟨X⟩, ⟨Y⟩, ⟨Z⟩)` of `qubit`.
    pub fn bloch_vector(&self, qubit: usize) -> [f64; 3] {
        let [rho00, _, rho10, rho11] = self.reduced_density_matrix(qubit);
        [2.0 * rho10.re, 2.0 * rho10.im, rho00.re - rho11.re]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn approx_eq(a: Complex64, b: Complex64) -> bool {
        (a - b).norm() < 1e-10
    }

    fn apply(sv: &mut Statevector, gate: StandardGate, qubits: &[u32]) {
        let qubits: Vec<_> = qubits.iter().map(|&q| QubitId(q)).collect();
        sv.apply_gate(&gate, &qubits);
    }

    #[test]
    fn test_initial_state() {
        let sv = Statevector::new(2);
        assert_eq!(sv.dimension(), 4);
        assert!(approx_eq(sv.amplitudes[0], ONE));
        assert!(approx_eq(sv.amplitudes[1], ZERO));
        assert!(approx_eq(sv.amplitudes[2], ZERO));
        assert!(approx_eq(sv.amplitudes[3], ZERO));
        assert!(sv.is_normalized());
    }

    #[test]
    fn test_hadamard() {
        let mut sv = Statevector::new(1);
        apply(&mut sv, StandardGate::H, &[0]);

        let sqrt2_inv = 1.0 / 2.0_f64.sqrt();
        assert!(approx_eq(sv.amplitudes[0], Complex64::new(sqrt2_inv, 0.0)));
        assert!(approx_eq(sv.amplitudes[1], Complex64::new(sqrt2_inv, 0.0)));
    }

    #[test]
    fn test_bell_state() {
        let mut sv = Statevector::new(2);
        apply(&mut sv, StandardGate::H, &[0]);
        apply(&mut sv, StandardGate::CX, &[0, 1]);

        let sqrt2_inv = 1.0 / 2.0_f64.sqrt();
        assert!(approx_eq(sv.amplitudes[0], Complex64::new(sqrt2_inv, 0.0)));
        assert!(approx_eq(sv.amplitudes[1], ZERO));
        assert!(approx_eq(sv.amplitudes[2], ZERO));
        assert!(approx_eq(sv.amplitudes[3], Complex64::new(sqrt2_inv, 0.0)));
    }

    #[test]
    fn test_x_gate_bit_order() {
        let mut sv = Statevector::new(3);
        apply(&mut sv, StandardGate::X, &[1]);
        assert!(approx_eq(sv.amplitudes[0b010], ONE));
        assert!((sv.probability_of_one(1) - 1.0).abs() < EPSILON);
        assert!(sv.probability_of_one(0) < EPSILON);
    }

    #[test]
    fn test_cx_control_is_first_target() {
        // Control q1 set, target q0 flips: |010⟩ → |011⟩.
        let mut sv = Statevector::new(3);
        apply(&mut sv, StandardGate::X, &[1]);
        apply(&mut sv, StandardGate::CX, &[1, 0]);
        assert!(approx_eq(sv.amplitudes[0b011], ONE));

        // Control clear: nothing happens.
        let mut sv = Statevector::new(3);
        apply(&mut sv, StandardGate::CX, &[2, 0]);
        assert!(approx_eq(sv.amplitudes[0], ONE));
    }

    #[test]
    fn test_cz_phase() {
        let mut sv = Statevector::new(2);
        apply(&mut sv, StandardGate::X, &[0]);
        apply(&mut sv, StandardGate::X, &[1]);
        apply(&mut sv, StandardGate::CZ, &[1, 0]);
        assert!(approx_eq(sv.amplitudes[3], -ONE));
    }

    #[test]
    fn test_identity_is_skipped() {
        let mut sv = Statevector::new(1);
        apply(&mut sv, StandardGate::H, &[0]);
        let before = sv.clone();
        apply(&mut sv, StandardGate::I, &[0]);
        apply(&mut sv, StandardGate::XPow(2.0), &[0]);
        assert_eq!(sv, before);
    }

    #[test]
    fn test_measure_deterministic() {
        // |1⟩ state should always measure 1
        let mut rng = StdRng::seed_from_u64(1);
        let mut sv = Statevector::new(1);
        apply(&mut sv, StandardGate::X, &[0]);

        for _ in 0..100 {
            assert!(sv.measure(0, &mut rng));
            assert!(sv.is_normalized());
        }
    }

    #[test]
    fn test_measure_collapses_partner() {
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..50 {
            let mut sv = Statevector::new(2);
            apply(&mut sv, StandardGate::H, &[0]);
            apply(&mut sv, StandardGate::CX, &[0, 1]);

            let first = sv.measure(0, &mut rng);
            assert!(sv.is_normalized());
            let p = sv.probability_of_one(1);
            assert!((p - if first { 1.0 } else { 0.0 }).abs() < EPSILON);
            assert_eq!(sv.measure(1, &mut rng), first);
        }
    }

    #[test]
    fn test_from_amplitudes() {
        let h = std::f64::consts::FRAC_1_SQRT_2;
        let sv = Statevector::from_amplitudes(vec![
            Complex64::new(h, 0.0),
            Complex64::new(0.0, h),
        ])
        .unwrap();
        assert_eq!(sv.num_qubits(), 1);
        assert!(sv.is_normalized());

        assert!(Statevector::from_amplitudes(vec![ONE; 3]).is_none());
        assert!(Statevector::from_amplitudes(vec![]).is_none());
        assert_eq!(Statevector::from_amplitudes(vec![ONE]).unwrap().num_qubits(), 0);
    }

    #[test]
    fn test_reset() {
        let mut sv = Statevector::new(2);
        apply(&mut sv, StandardGate::H, &[0]);
        sv.reset();
        assert_eq!(sv, Statevector::new(2));
    }

    #[test]
    fn test_fidelity_and_inner_product() {
        let mut plus = Statevector::new(1);
        apply(&mut plus, StandardGate::H, &[0]);
        let zero = Statevector::new(1);

        assert!((plus.fidelity(&zero).unwrap() - 0.5).abs() < EPSILON);
        assert!((plus.fidelity(&plus).unwrap() - 1.0).abs() < EPSILON);
        assert!(plus.inner_product(&Statevector::new(2)).is_none());
    }

    #[test]
    fn test_bloch_vector() {
        let zero = Statevector::new(1);
        let [x, y, z] = zero.bloch_vector(0);
        assert!(x.abs() < EPSILON && y.abs() < EPSILON && (z - 1.0).abs() < EPSILON);

        let mut plus = Statevector::new(1);
        apply(&mut plus, StandardGate::H, &[0]);
        let [x, _, z] = plus.bloch_vector(0);
        assert!((x - 1.0).abs() < EPSILON && z.abs() < EPSILON);

        // Y^0.5 |0⟩ = |+⟩
        let mut sv = Statevector::new(1);
        apply(&mut sv, StandardGate::YPow(0.5), &[0]);
        let [x, _, z] = sv.bloch_vector(0);
        assert!((x - 1.0).abs() < EPSILON && z.abs() < EPSILON);

        // X^0.5 |0⟩ points along -Y
        let mut sv = Statevector::new(1);
        apply(&mut sv, StandardGate::XPow(0.5), &[0]);
        let [_, y, _] = sv.bloch_vector(0);
        assert!((y + 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_reduced_density_matrix_of_entangled_qubit_is_mixed() {
        let mut sv = Statevector::new(2);
        apply(&mut sv, StandardGate::H, &[0]);
        apply(&mut sv, StandardGate::CX, &[0, 1]);
        let rho = sv.reduced_density_matrix(1);
        assert!(approx_eq(rho[0], Complex64::new(0.5, 0.0)));
        assert!(approx_eq(rho[1], ZERO));
        assert!(approx_eq(rho[3], Complex64::new(0.5, 0.0)));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "applied to 1 targets")]
    fn test_two_qubit_gate_needs_two_targets() {
        let mut sv = Statevector::new(2);
        apply(&mut sv, StandardGate::CX, &[0]);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "overflow the amplitude index")]
    fn test_register_wider_than_index_panics() {
        let _ = Statevector::new(usize::BITS as usize);
    }
}
