//! Entangle Demo Suite
//!
//! Small textbook protocols built on [`entangle_sim`]:
//!
//! - **Basics**: NOT and Hadamard on a single qubit
//! - **Bell states**: the four maximally entangled two-qubit states
//! - **CHSH game**: a Bell-inequality game won with probability `cos²(π/8)`
//! - **Teleportation**: moving a qubit state with two classical bits
//! - **Superdense coding**: sending two classical bits with one qubit
//! - **Deutsch-Jozsa**: telling constant from balanced with one query
//!
//! ```
//! use entangle_demos::circuits::bell::{BellState, KEY};
//! use entangle_sim::{Simulator, aggregate};
//!
//! let circuit = BellState::PhiPlus.circuit(true).unwrap();
//! let result = Simulator::seeded(1).run(&circuit, 100).unwrap();
//! let counts = aggregate(&result, KEY).unwrap();
//! assert_eq!(counts.get("00") + counts.get("11"), 100);
//! ```

pub mod circuits;

use console::style;
use thiserror::Error;

use entangle_sim::Histogram;

/// Error returned when a named choice (a Bell state, an oracle, ...) is
/// not recognised.
#[derive(Debug, Clone, Error)]
#[error("unknown {kind} '{value}', expected one of: {expected}")]
pub struct ParseChoiceError {
    kind: &'static str,
    value: String,
    expected: String,
}

impl ParseChoiceError {
    pub(crate) fn new(kind: &'static str, value: &str, expected: &[&str]) -> Self {
        Self {
            kind,
            value: value.to_string(),
            expected: expected.join(", "),
        }
    }
}

/// Print a demo header.
pub fn print_header(title: &str) {
    println!();
    println!("{}", style("═".repeat(60)).cyan());
    println!("{}", style(format!("  {title}")).cyan().bold());
    println!("{}", style("═".repeat(60)).cyan());
    println!();
}

/// Print a demo section.
pub fn print_section(title: &str) {
    println!();
    println!("{}", style(format!("▶ {title}")).green().bold());
    println!("{}", style("─".repeat(40)).dim());
}

/// Print a result line.
pub fn print_result(label: &str, value: impl std::fmt::Display) {
    println!("  {} {}", style(format!("{label}:")).dim(), value);
}

/// Print a success message.
pub fn print_success(message: &str) {
    println!("{} {}", style("✓").green().bold(), message);
}

/// Print a failure message.
pub fn print_failure(message: &str) {
    println!("{} {}", style("✗").red().bold(), message);
}

/// Print an info message.
pub fn print_info(message: &str) {
    println!("{} {}", style("ℹ").blue(), message);
}

/// Print a circuit diagram indented under the current section.
pub fn print_diagram(diagram: impl std::fmt::Display) {
    for line in diagram.to_string().lines() {
        println!("  {line}");
    }
}

/// Number of outcomes shown before the histogram is truncated.
const MAX_ROWS: usize = 16;

/// Print a histogram as a bar chart, sorted by bitstring.
pub fn print_histogram(key: &str, histogram: &Histogram) {
    let total = histogram.total();
    println!(
        "\n{} '{}' ({} shots):",
        style("✓").green().bold(),
        style(key).yellow(),
        total
    );
    if total == 0 {
        println!("  (no samples)");
        return;
    }

    let sorted = histogram.sorted();
    for (bitstring, count) in sorted.iter().take(MAX_ROWS) {
        let prob = *count as f64 / total as f64 * 100.0;
        let bar = "█".repeat((prob / 2.0).round() as usize);
        println!(
            "  {}: {:>6} ({:>5.2}%) {}",
            style(bitstring).cyan(),
            count,
            prob,
            style(bar).green()
        );
    }

    if sorted.len() > MAX_ROWS {
        println!("  ... and {} more outcomes", sorted.len() - MAX_ROWS);
    }
}
