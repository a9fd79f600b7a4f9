//! Simulator entry points.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, instrument, warn};

use entangle_ir::{Circuit, InstructionKind};

use crate::config::SimulatorConfig;
use crate::error::{SimError, SimResult};
use crate::plan::ExecutionPlan;
use crate::result::{MeasurementOutcome, RunResult};
use crate::sampler::{self, CancelToken, ReplayRunner, TerminalRunner};
use crate::statevector::Statevector;

/// Final state and measurement record of a single execution.
#[derive(Debug, Clone)]
pub struct Simulation {
    /// The state after the last instruction, collapsed by any measurements.
    pub state: Statevector,
    /// Bits recorded by each measurement.
    pub outcome: MeasurementOutcome,
}

/// Apply every instruction in order, collapsing at measurements.
pub(crate) fn execute<R: Rng + ?Sized>(
    circuit: &Circuit,
    state: &mut Statevector,
    rng: &mut R,
) -> MeasurementOutcome {
    let mut outcome = MeasurementOutcome::new();
    for inst in circuit.instructions() {
        match &inst.kind {
            InstructionKind::Gate(gate) => state.apply_gate(gate, &inst.qubits),
            InstructionKind::Measure { key } => {
                let bits = inst
                    .qubits
                    .iter()
                    .map(|q| state.measure(q.index(), rng))
                    .collect();
                outcome.insert(key.clone(), bits);
            }
        }
    }
    outcome
}

/// Apply every gate in order, ignoring measurements.
fn evolve(circuit: &Circuit, state: &mut Statevector) {
    for inst in circuit.instructions() {
        if let InstructionKind::Gate(gate) = &inst.kind {
            state.apply_gate(gate, &inst.qubits);
        }
    }
}

/// Exact statevector simulator.
///
/// Holds the master RNG: every call draws from it in sequence, so a seeded
/// simulator replays the same sequence of results.
pub struct Simulator {
    /// Simulator configuration.
    config: SimulatorConfig,
    /// Master RNG for single runs and chunk seeds.
    rng: StdRng,
    /// Dedicated pool when a worker count is configured.
    pool: Option<Arc<rayon::ThreadPool>>,
}

impl Simulator {
    /// Create a simulator with default settings and an OS-seeded RNG.
    pub fn new() -> Self {
        Self {
            config: SimulatorConfig::default(),
            rng: StdRng::from_entropy(),
            pool: None,
        }
    }

    /// Create a simulator from a validated configuration.
    pub fn with_config(config: SimulatorConfig) -> SimResult<Self> {
        config.validate()?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let pool = match config.workers {
            Some(workers) => Some(Arc::new(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(workers)
                    .thread_name(|i| format!("entangle-shot-{i}"))
                    .build()
                    .map_err(|e| SimError::InvalidConfig(e.to_string()))?,
            )),
            None => None,
        };

        debug!(?config, "Created simulator");
        Ok(Self { config, rng, pool })
    }

    /// Create a simulator with a fixed seed and otherwise default settings.
    pub fn seeded(seed: u64) -> Self {
        Self {
            config: SimulatorConfig::default().with_seed(seed),
            rng: StdRng::seed_from_u64(seed),
            pool: None,
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    fn check_size(&self, circuit: &Circuit) -> SimResult<()> {
        let limit = self.config.max_qubits as usize;
        if circuit.num_qubits() > limit {
            return Err(SimError::ResourceExhausted {
                required: circuit.num_qubits(),
                limit,
            });
        }
        Ok(())
    }

    /// Execute `circuit` once, collapsing at each measurement.
    #[instrument(skip(self, circuit), fields(circuit = circuit.name()))]
    pub fn simulate(&mut self, circuit: &Circuit) -> SimResult<Simulation> {
        self.check_size(circuit)?;

        let mut state = Statevector::new(circuit.num_qubits());
        let outcome = execute(circuit, &mut state, &mut self.rng);
        debug!(
            "Simulated {} instructions on {} qubits",
            circuit.len(),
            circuit.num_qubits()
        );

        Ok(Simulation { state, outcome })
    }

    /// Final state of `circuit` with measurements skipped.
    pub fn final_state(&self, circuit: &Circuit) -> SimResult<Statevector> {
        self.check_size(circuit)?;

        let mut state = Statevector::new(circuit.num_qubits());
        evolve(circuit, &mut state);
        Ok(state)
    }

    /// Run `shots` repetitions of `circuit`.
    pub fn run(&mut self, circuit: &Circuit, shots: usize) -> SimResult<RunResult> {
        self.run_with_cancel(circuit, shots, &CancelToken::new())
    }

    /// Run `shots` repetitions, stopping early once `cancel` is set.
    #[instrument(skip(self, circuit, cancel), fields(circuit = circuit.name()))]
    pub fn run_with_cancel(
        &mut self,
        circuit: &Circuit,
        shots: usize,
        cancel: &CancelToken,
    ) -> SimResult<RunResult> {
        let start = Instant::now();
        self.check_size(circuit)?;

        let plan = ExecutionPlan::select(circuit, self.config.strategy);
        let chunks =
            sampler::plan_chunks(shots, self.config.min_shots_per_worker, &mut self.rng);
        debug!(
            ?plan,
            "Starting run: {} qubits, {} shots in {} chunks",
            circuit.num_qubits(),
            shots,
            chunks.len()
        );

        let result = match plan {
            ExecutionPlan::Terminal => {
                let state = self.final_state(circuit)?;
                let runner = TerminalRunner::new(circuit, &state);
                self.install(|| sampler::sample(&runner, circuit, shots, &chunks, cancel))
            }
            ExecutionPlan::Replay => {
                let runner = ReplayRunner::new(circuit);
                self.install(|| sampler::sample(&runner, circuit, shots, &chunks, cancel))
            }
        };

        if result.is_complete() {
            debug!("Run completed in {:?}", start.elapsed());
        } else {
            warn!(
                "Run cancelled after {} of {} shots",
                result.shots(),
                result.requested()
            );
        }
        Ok(result)
    }

    fn install<T: Send>(&self, op: impl FnOnce() -> T + Send) -> T {
        match &self.pool {
            Some(pool) => pool.install(op),
            None => op(),
        }
    }
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new()
    }
}
