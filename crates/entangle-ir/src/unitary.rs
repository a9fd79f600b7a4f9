//! Dense unitary matrices for one- and two-qubit gates.
//!
//! Matrices are stored row-major. For [`Unitary4x4`] the basis index of an
//! entry is `2 * bit(first target) + bit(second target)`, so for a
//! controlled gate the control is the high bit.

use num_complex::Complex64;
use std::f64::consts::PI;

/// Absolute tolerance for unitarity and normalization checks.
pub const EPSILON: f64 = 1e-9;

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);
const I: Complex64 = Complex64::new(0.0, 1.0);

/// Eigen-interpolation coefficients `((1 + e^{iπt}) / 2, (1 - e^{iπt}) / 2)`.
///
/// Both Pauli X and Y have eigenvalues `+1` and `-1`; raising them to the
/// power `t` keeps the `+1` eigenspace fixed and multiplies the `-1`
/// eigenspace by `e^{iπt}`.
fn pow_coefficients(t: f64) -> (Complex64, Complex64) {
    let phase = Complex64::from_polar(1.0, PI * t);
    ((ONE + phase) * 0.5, (ONE - phase) * 0.5)
}

/// A 2x2 unitary matrix in row-major order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Unitary2x2 {
    /// The matrix elements in row-major order: [[a, b], [c, d]].
    pub data: [Complex64; 4],
}

impl Unitary2x2 {
    /// Create a new 2x2 unitary matrix.
    pub fn new(a: Complex64, b: Complex64, c: Complex64, d: Complex64) -> Self {
        Self { data: [a, b, c, d] }
    }

    /// Create the identity matrix.
    pub fn identity() -> Self {
        Self::new(ONE, ZERO, ZERO, ONE)
    }

    /// Create a Hadamard matrix.
    pub fn h() -> Self {
        let s = Complex64::new(std::f64::consts::FRAC_1_SQRT_2, 0.0);
        Self::new(s, s, s, -s)
    }

    /// Create a Pauli-X matrix.
    pub fn x() -> Self {
        Self::new(ZERO, ONE, ONE, ZERO)
    }

    /// Create a Pauli-Y matrix.
    pub fn y() -> Self {
        Self::new(ZERO, -I, I, ZERO)
    }

    /// Create a Pauli-Z matrix.
    pub fn z() -> Self {
        Self::new(ONE, ZERO, ZERO, -ONE)
    }

    /// Fractional power of Pauli-X, `X^t`.
    pub fn x_pow(t: f64) -> Self {
        let (c, s) = pow_coefficients(t);
        Self::new(c, s, s, c)
    }

    /// Fractional power of Pauli-Y, `Y^t`.
    pub fn y_pow(t: f64) -> Self {
        let (c, s) = pow_coefficients(t);
        Self::new(c, -I * s, I * s, c)
    }

    /// Multiply this matrix by another: self * other.
    #[allow(clippy::many_single_char_names)]
    pub fn mul(&self, other: &Self) -> Self {
        let [a, b, c, d] = self.data;
        let [e, f, g, h] = other.data;
        Self::new(a * e + b * g, a * f + b * h, c * e + d * g, c * f + d * h)
    }

    /// Get the conjugate transpose (dagger).
    pub fn dagger(&self) -> Self {
        Self::new(
            self.data[0].conj(),
            self.data[2].conj(),
            self.data[1].conj(),
            self.data[3].conj(),
        )
    }

    /// Apply the matrix to a column vector `[v0, v1]`.
    #[inline]
    pub fn apply(&self, v0: Complex64, v1: Complex64) -> (Complex64, Complex64) {
        let [a, b, c, d] = self.data;
        (a * v0 + b * v1, c * v0 + d * v1)
    }

    /// Check `U†U = I` within [`EPSILON`].
    pub fn is_unitary(&self) -> bool {
        self.dagger().mul(self).approx_eq(&Self::identity())
    }

    /// Element-wise comparison within [`EPSILON`].
    pub fn approx_eq(&self, other: &Self) -> bool {
        self.data
            .iter()
            .zip(other.data.iter())
            .all(|(a, b)| (a - b).norm() < EPSILON)
    }
}

impl Default for Unitary2x2 {
    fn default() -> Self {
        Self::identity()
    }
}

impl std::ops::Mul for Unitary2x2 {
    type Output = Self;

    #[allow(clippy::needless_pass_by_value)]
    fn mul(self, rhs: Self) -> Self::Output {
        Unitary2x2::mul(&self, &rhs)
    }
}

/// A 4x4 unitary matrix in row-major order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Unitary4x4 {
    /// Row-major elements; `data[4 * row + col]`.
    pub data: [Complex64; 16],
}

impl Unitary4x4 {
    /// Create the identity matrix.
    pub fn identity() -> Self {
        let mut data = [ZERO; 16];
        for k in 0..4 {
            data[5 * k] = ONE;
        }
        Self { data }
    }

    /// `diag(I, u)`: apply `u` to the second target when the first is |1⟩.
    pub fn controlled(u: &Unitary2x2) -> Self {
        let mut m = Self::identity();
        m.data[10] = u.data[0];
        m.data[11] = u.data[1];
        m.data[14] = u.data[2];
        m.data[15] = u.data[3];
        m
    }

    /// Controlled-NOT with the first target as control.
    pub fn cx() -> Self {
        Self::controlled(&Unitary2x2::x())
    }

    /// Controlled-Z (symmetric in its targets).
    pub fn cz() -> Self {
        Self::controlled(&Unitary2x2::z())
    }

    /// Controlled `X^t`.
    pub fn cx_pow(t: f64) -> Self {
        Self::controlled(&Unitary2x2::x_pow(t))
    }

    /// Matrix product `self * other`.
    pub fn mul(&self, other: &Self) -> Self {
        let mut data = [ZERO; 16];
        for row in 0..4 {
            for col in 0..4 {
                data[4 * row + col] = (0..4)
                    .map(|k| self.data[4 * row + k] * other.data[4 * k + col])
                    .sum();
            }
        }
        Self { data }
    }

    /// Conjugate transpose.
    pub fn dagger(&self) -> Self {
        let mut data = [ZERO; 16];
        for row in 0..4 {
            for col in 0..4 {
                data[4 * row + col] = self.data[4 * col + row].conj();
            }
        }
        Self { data }
    }

    /// Apply the matrix to a 4-entry column vector.
    #[inline]
    pub fn apply(&self, v: [Complex64; 4]) -> [Complex64; 4] {
        let mut out = [ZERO; 4];
        for (row, slot) in out.iter_mut().enumerate() {
            let r = &self.data[4 * row..4 * row + 4];
            *slot = r[0] * v[0] + r[1] * v[1] + r[2] * v[2] + r[3] * v[3];
        }
        out
    }

    /// Check `U†U = I` within [`EPSILON`].
    pub fn is_unitary(&self) -> bool {
        self.dagger().mul(self).approx_eq(&Self::identity())
    }

    /// Element-wise comparison within [`EPSILON`].
    pub fn approx_eq(&self, other: &Self) -> bool {
        self.data
            .iter()
            .zip(other.data.iter())
            .all(|(a, b)| (a - b).norm() < EPSILON)
    }
}

impl Default for Unitary4x4 {
    fn default() -> Self {
        Self::identity()
    }
}

/// The matrix of a gate, sized by its arity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GateMatrix {
    /// A one-qubit gate.
    Single(Unitary2x2),
    /// A two-qubit gate.
    Two(Unitary4x4),
}

impl GateMatrix {
    /// Check unitarity of the wrapped matrix.
    pub fn is_unitary(&self) -> bool {
        match self {
            GateMatrix::Single(u) => u.is_unitary(),
            GateMatrix::Two(u) => u.is_unitary(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_fixed_gates_are_unitary() {
        for u in [
            Unitary2x2::identity(),
            Unitary2x2::x(),
            Unitary2x2::y(),
            Unitary2x2::z(),
            Unitary2x2::h(),
        ] {
            assert!(u.is_unitary(), "{u:?}");
        }
        assert!(Unitary4x4::cx().is_unitary());
        assert!(Unitary4x4::cz().is_unitary());
    }

    #[test]
    fn test_self_inverse() {
        for u in [
            Unitary2x2::x(),
            Unitary2x2::y(),
            Unitary2x2::z(),
            Unitary2x2::h(),
        ] {
            assert!((u * u).approx_eq(&Unitary2x2::identity()));
        }
        assert!(Unitary4x4::cx().mul(&Unitary4x4::cx()).approx_eq(&Unitary4x4::identity()));
        assert!(Unitary4x4::cz().mul(&Unitary4x4::cz()).approx_eq(&Unitary4x4::identity()));
    }

    #[test]
    fn test_pow_endpoints() {
        assert!(Unitary2x2::x_pow(1.0).approx_eq(&Unitary2x2::x()));
        assert!(Unitary2x2::y_pow(1.0).approx_eq(&Unitary2x2::y()));
        assert!(Unitary2x2::x_pow(0.0).approx_eq(&Unitary2x2::identity()));
        assert!(Unitary2x2::y_pow(0.0).approx_eq(&Unitary2x2::identity()));
        assert!(Unitary4x4::cx_pow(1.0).approx_eq(&Unitary4x4::cx()));
        assert!(Unitary4x4::cx_pow(0.0).approx_eq(&Unitary4x4::identity()));
    }

    #[test]
    fn test_half_powers_compose() {
        let sqrt_x = Unitary2x2::x_pow(0.5);
        assert!((sqrt_x * sqrt_x).approx_eq(&Unitary2x2::x()));

        let sqrt_y = Unitary2x2::y_pow(0.5);
        assert!((sqrt_y * sqrt_y).approx_eq(&Unitary2x2::y()));
    }

    #[test]
    fn test_controlled_layout() {
        // |10⟩ (control set, target clear) maps to |11⟩.
        let out = Unitary4x4::cx().apply([ZERO, ZERO, ONE, ZERO]);
        assert!((out[3] - ONE).norm() < EPSILON);
        assert!(out[2].norm() < EPSILON);

        // Control clear leaves the target alone.
        let out = Unitary4x4::cx().apply([ZERO, ONE, ZERO, ZERO]);
        assert!((out[1] - ONE).norm() < EPSILON);
    }

    proptest! {
        #[test]
        fn prop_pow_gates_are_unitary(t in -4.0f64..4.0) {
            prop_assert!(Unitary2x2::x_pow(t).is_unitary());
            prop_assert!(Unitary2x2::y_pow(t).is_unitary());
            prop_assert!(Unitary4x4::cx_pow(t).is_unitary());
        }

        #[test]
        fn prop_pow_exponents_add(a in -2.0f64..2.0, b in -2.0f64..2.0) {
            let lhs = Unitary2x2::x_pow(a) * Unitary2x2::x_pow(b);
            prop_assert!(lhs.approx_eq(&Unitary2x2::x_pow(a + b)));
        }
    }
}
