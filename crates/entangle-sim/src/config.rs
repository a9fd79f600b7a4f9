//! Simulator configuration.

use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};

/// Hard ceiling on `max_qubits`: 2^30 amplitudes is 16 GiB.
pub const MAX_SUPPORTED_QUBITS: u32 = 30;

/// How repeated-shot runs pick an execution plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Sample the final state once when no measurement feeds later gates.
    #[default]
    Auto,
    /// Re-execute the circuit for every shot.
    ForceReplay,
}

/// Configuration for the [`Simulator`](crate::Simulator).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Largest register the simulator will allocate.
    pub max_qubits: u32,

    /// Seed for the master RNG (None = seeded from the OS).
    pub seed: Option<u64>,

    /// Worker threads for shot sampling (None = rayon's global pool).
    pub workers: Option<usize>,

    /// Shots are dealt out to workers in chunks of this size.
    pub min_shots_per_worker: usize,

    /// Execution plan selection.
    pub strategy: Strategy,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            max_qubits: entangle_ir::DEFAULT_MAX_QUBITS,
            seed: None,
            workers: None,
            min_shots_per_worker: 256,
            strategy: Strategy::Auto,
        }
    }
}

impl SimulatorConfig {
    /// Parse a configuration from JSON; missing fields take defaults.
    pub fn from_json(json: &str) -> SimResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| SimError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Fix the master seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the qubit limit.
    #[must_use]
    pub fn with_max_qubits(mut self, max_qubits: u32) -> Self {
        self.max_qubits = max_qubits;
        self
    }

    /// Set the worker thread count.
    #[must_use]
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    /// Set the plan selection strategy.
    #[must_use]
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Check the configuration for values the simulator cannot honour.
    pub fn validate(&self) -> SimResult<()> {
        if self.max_qubits == 0 || self.max_qubits > MAX_SUPPORTED_QUBITS {
            return Err(SimError::InvalidConfig(format!(
                "max_qubits must be between 1 and {MAX_SUPPORTED_QUBITS}, got {}",
                self.max_qubits
            )));
        }
        if self.workers == Some(0) {
            return Err(SimError::InvalidConfig(
                "workers must be at least 1".into(),
            ));
        }
        if self.min_shots_per_worker == 0 {
            return Err(SimError::InvalidConfig(
                "min_shots_per_worker must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
