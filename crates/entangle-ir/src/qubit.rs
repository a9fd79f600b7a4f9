//! Qubit identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a qubit within a circuit's register.
///
/// Qubits are plain indices: a circuit owns no qubit objects, it only
/// records how many there are. Qubit `n` corresponds to bit `n` of a
/// statevector basis index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct QubitId(pub u32);

impl QubitId {
    /// The index as a `usize`, for bit arithmetic.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Bit mask selecting this qubit in a basis index.
    #[inline]
    pub fn mask(self) -> usize {
        1usize << self.0
    }

    /// A contiguous run of qubit ids `0..n`.
    pub fn range(n: u32) -> impl Iterator<Item = QubitId> {
        (0..n).map(QubitId)
    }
}

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl From<u32> for QubitId {
    fn from(id: u32) -> Self {
        QubitId(id)
    }
}

impl From<usize> for QubitId {
    fn from(id: usize) -> Self {
        QubitId(u32::try_from(id).expect("QubitId overflow: exceeds u32::MAX"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qubit_display() {
        assert_eq!(format!("{}", QubitId(0)), "q0");
        assert_eq!(format!("{}", QubitId(12)), "q12");
    }

    #[test]
    fn test_qubit_mask() {
        assert_eq!(QubitId(0).mask(), 0b1);
        assert_eq!(QubitId(3).mask(), 0b1000);
        assert_eq!(QubitId::from(2usize).index(), 2);
    }

    #[test]
    fn test_qubit_range() {
        let ids: Vec<_> = QubitId::range(3).collect();
        assert_eq!(ids, vec![QubitId(0), QubitId(1), QubitId(2)]);
    }
}
