//! Quantum circuit generators for demos.

pub mod basics;
pub mod bell;
pub mod chsh;
pub mod deutsch_jozsa;
pub mod superdense;
pub mod teleportation;

pub use bell::BellState;
pub use chsh::{ChshGame, ChshScore};
pub use deutsch_jozsa::{FunctionClass, Oracle};
pub use superdense::Message;
pub use teleportation::TeleportationCircuit;
