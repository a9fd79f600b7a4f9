//! CLI command implementations.

pub mod all;
pub mod basics;
pub mod bell;
pub mod chsh;
pub mod common;
pub mod deutsch_jozsa;
pub mod superdense;
pub mod teleport;
pub mod version;
