//! Entangle Statevector Simulator
//!
//! This crate provides an exact statevector simulator for circuits built
//! with `entangle-ir`. The full state of `n` qubits is held as `2^n`
//! complex amplitudes, so results carry no approximation error, but memory
//! doubles with every qubit.
//!
//! # Features
//!
//! - **Exact Simulation**: dense `Complex64` amplitudes, norm kept within `1e-9`
//! - **Single Runs**: [`Simulator::simulate`] returns the final state and the
//!   bits recorded by every measurement
//! - **Repeated Shots**: [`Simulator::run`] samples once from the final state
//!   when every measurement is terminal, and replays the circuit per shot
//!   when a measurement feeds a later gate
//! - **Parallel Sampling**: shot chunks run on rayon with per-chunk seeded
//!   RNGs, so a seeded run is reproducible on any thread count
//! - **Cancellation**: [`CancelToken`] stops a run between shots
//!
//! # Performance
//!
//! | Qubits | Memory |
//! |--------|--------|
//! | 10 | ~16 KB |
//! | 15 | ~512 KB |
//! | 20 | ~16 MB |
//! | 24 | ~256 MB |
//!
//! # Example
//!
//! ```rust
//! use entangle_ir::{Circuit, QubitId};
//! use entangle_sim::{Simulator, aggregate};
//!
//! let mut circuit = Circuit::new(2).unwrap();
//! circuit.h(QubitId(0)).unwrap();
//! circuit.cx(QubitId(0), QubitId(1)).unwrap();
//! circuit.measure("z", [QubitId(0), QubitId(1)]).unwrap();
//!
//! let mut sim = Simulator::seeded(42);
//! let result = sim.run(&circuit, 1000).unwrap();
//! let counts = aggregate(&result, "z").unwrap();
//!
//! // Expect ~50% |00⟩ and ~50% |11⟩
//! assert_eq!(counts.get("00") + counts.get("11"), 1000);
//! ```

mod config;
mod error;
mod plan;
mod result;
mod sampler;
mod simulator;
mod statevector;

pub use config::{MAX_SUPPORTED_QUBITS, SimulatorConfig, Strategy};
pub use error::{SimError, SimResult};
pub use plan::ExecutionPlan;
pub use result::{Histogram, KeyRecord, MeasurementOutcome, RunResult, aggregate, bitstring};
pub use sampler::CancelToken;
pub use simulator::{Simulation, Simulator};
pub use statevector::Statevector;
