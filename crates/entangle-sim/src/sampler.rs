//! Repeated-shot sampling.
//!
//! Shots are split into fixed-size chunks before any work starts, and each
//! chunk gets its own `StdRng` seeded from the simulator's master RNG. The
//! chunks then run on the rayon pool in any order; since chunk boundaries
//! and seeds depend only on the shot count and the master RNG, a seeded
//! run produces the same `RunResult` on any number of threads.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use entangle_ir::Circuit;

use crate::result::{MeasurementOutcome, RunResult};
use crate::simulator::execute;
use crate::statevector::Statevector;

/// Cooperative cancellation flag shared between a caller and a run.
///
/// Workers check the flag between shots; a cancelled run returns the
/// shots that finished.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Create an unset token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Produces one shot's outcome.
pub(crate) trait ShotRunner: Sync {
    /// Per-chunk working memory.
    type Scratch;

    fn scratch(&self) -> Self::Scratch;

    fn run_shot(&self, scratch: &mut Self::Scratch, rng: &mut StdRng) -> MeasurementOutcome;
}

/// Draws basis states from a precomputed final distribution.
pub(crate) struct TerminalRunner<'a> {
    circuit: &'a Circuit,
    cumulative: Vec<f64>,
}

impl<'a> TerminalRunner<'a> {
    pub(crate) fn new(circuit: &'a Circuit, final_state: &Statevector) -> Self {
        let cumulative = final_state
            .probabilities()
            .into_iter()
            .scan(0.0, |acc, p| {
                *acc += p.max(0.0);
                Some(*acc)
            })
            .collect();
        Self {
            circuit,
            cumulative,
        }
    }

    /// Inverse-CDF draw of a basis index.
    fn draw(&self, rng: &mut StdRng) -> usize {
        let total = self.cumulative.last().copied().unwrap_or(0.0);
        let r = rng.r#gen::<f64>() * total;
        self.cumulative
            .partition_point(|&c| c <= r)
            .min(self.cumulative.len().saturating_sub(1))
    }
}

impl ShotRunner for TerminalRunner<'_> {
    type Scratch = ();

    fn scratch(&self) {}

    fn run_shot(&self, _: &mut (), rng: &mut StdRng) -> MeasurementOutcome {
        let index = self.draw(rng);
        let mut outcome = MeasurementOutcome::new();
        for (key, qubits) in self.circuit.measurements() {
            outcome.insert(key, qubits.iter().map(|q| index & q.mask() != 0).collect());
        }
        outcome
    }
}

/// Re-executes the whole circuit, collapsing at each measurement.
pub(crate) struct ReplayRunner<'a> {
    circuit: &'a Circuit,
}

impl<'a> ReplayRunner<'a> {
    pub(crate) fn new(circuit: &'a Circuit) -> Self {
        Self { circuit }
    }
}

impl ShotRunner for ReplayRunner<'_> {
    type Scratch = Statevector;

    fn scratch(&self) -> Statevector {
        Statevector::new(self.circuit.num_qubits())
    }

    fn run_shot(&self, state: &mut Statevector, rng: &mut StdRng) -> MeasurementOutcome {
        state.reset();
        execute(self.circuit, state, rng)
    }
}

/// Split `shots` into chunks of at most `chunk_size`, seeding each one
/// from `master`.
pub(crate) fn plan_chunks<R: Rng + ?Sized>(
    shots: usize,
    chunk_size: usize,
    master: &mut R,
) -> Vec<(usize, u64)> {
    let chunk_size = chunk_size.max(1);
    let mut chunks = Vec::with_capacity(shots.div_ceil(chunk_size));
    let mut remaining = shots;
    while remaining > 0 {
        let n = remaining.min(chunk_size);
        chunks.push((n, master.r#gen::<u64>()));
        remaining -= n;
    }
    chunks
}

/// Run every chunk in parallel and stitch the parts in chunk order.
pub(crate) fn sample<S: ShotRunner>(
    runner: &S,
    circuit: &Circuit,
    shots: usize,
    chunks: &[(usize, u64)],
    cancel: &CancelToken,
) -> RunResult {
    let parts: Vec<RunResult> = chunks
        .par_iter()
        .map(|&(n, seed)| {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut scratch = runner.scratch();
            let mut part = RunResult::empty(circuit, n);
            for _ in 0..n {
                if cancel.is_cancelled() {
                    break;
                }
                part.record(runner.run_shot(&mut scratch, &mut rng));
            }
            part
        })
        .collect();

    let mut result = RunResult::empty(circuit, shots);
    for part in parts {
        result.append(part);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use entangle_ir::QubitId;

    #[test]
    fn test_cancel_token_is_shared() {
        let token = CancelToken::new();
        let clone = token.clone();
        assert!(!token.is_cancelled());
        clone.cancel();
        assert!(token.is_cancelled());
    }

    #[test]
    fn test_plan_chunks() {
        let mut master = StdRng::seed_from_u64(3);
        let chunks = plan_chunks(1000, 256, &mut master);
        let sizes: Vec<_> = chunks.iter().map(|c| c.0).collect();
        assert_eq!(sizes, vec![256, 256, 256, 232]);

        let mut again = StdRng::seed_from_u64(3);
        assert_eq!(plan_chunks(1000, 256, &mut again), chunks);

        assert!(plan_chunks(0, 256, &mut master).is_empty());
    }

    #[test]
    fn test_terminal_draw_skips_zero_probability_states() {
        let mut circuit = Circuit::new(2).unwrap();
        circuit.x(QubitId(1)).unwrap();
        circuit.measure("m", [QubitId(0), QubitId(1)]).unwrap();

        let mut state = Statevector::new(2);
        state.apply_gate(&entangle_ir::StandardGate::X, &[QubitId(1)]);
        let runner = TerminalRunner::new(&circuit, &state);

        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..100 {
            let outcome = runner.run_shot(&mut (), &mut rng);
            assert_eq!(outcome.bitstring("m").unwrap(), "01");
        }
    }

    #[test]
    fn test_sample_respects_cancellation() {
        let mut circuit = Circuit::new(1).unwrap();
        circuit.h(QubitId(0)).unwrap();
        circuit.measure("m", [QubitId(0)]).unwrap();

        let cancel = CancelToken::new();
        cancel.cancel();
        let runner = ReplayRunner::new(&circuit);
        let chunks = plan_chunks(100, 10, &mut StdRng::seed_from_u64(0));
        let result = sample(&runner, &circuit, 100, &chunks, &cancel);

        assert_eq!(result.shots(), 0);
        assert_eq!(result.requested(), 100);
        assert!(!result.is_complete());
    }
}
