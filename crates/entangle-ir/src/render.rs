//! Text diagrams of circuits for terminal output.
//!
//! Each qubit gets a horizontal wire; instructions are packed greedily into
//! columns, earliest first, so that no two instructions in a column overlap
//! in the span of qubits they touch. Multi-qubit operations are joined by a
//! vertical connector in the row between wires.
//!
//! ```text
//! q0: ───H───@───M('z')───
//!            │   │
//! q1: ───────X───M────────
//! ```

use std::fmt;

use crate::circuit::Circuit;
use crate::gate::StandardGate;
use crate::instruction::{Instruction, InstructionKind};

const WIRE: char = '─';
const LINK: char = '│';
const CROSS: char = '┼';
const SEPARATOR: usize = 3;

/// One vertical slice of the diagram.
#[derive(Debug, Clone)]
struct Column {
    /// Symbol drawn on each qubit wire, if any.
    cells: Vec<Option<String>>,
    /// Whether a connector runs from wire `q` down to wire `q + 1`.
    links: Vec<bool>,
}

impl Column {
    fn new(num_qubits: usize) -> Self {
        Self {
            cells: vec![None; num_qubits],
            links: vec![false; num_qubits.saturating_sub(1)],
        }
    }

    fn width(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .map(|s| s.chars().count())
            .max()
            .unwrap_or(1)
    }

    fn is_crossed(&self, q: usize) -> bool {
        q > 0 && q < self.links.len() && self.links[q - 1] && self.links[q]
    }
}

/// Symbol for the `position`-th target of `inst`.
fn symbol(inst: &Instruction, position: usize) -> String {
    match &inst.kind {
        InstructionKind::Measure { key } if position == 0 => format!("M('{key}')"),
        InstructionKind::Measure { .. } => "M".into(),
        InstructionKind::Gate(StandardGate::CZ) => "@".into(),
        InstructionKind::Gate(gate) if gate.num_qubits() == 2 && position == 0 => "@".into(),
        InstructionKind::Gate(gate) => gate.label(),
    }
}

/// A rendered text diagram of a [`Circuit`].
#[derive(Debug, Clone)]
pub struct TextDiagram {
    labels: Vec<String>,
    columns: Vec<Column>,
}

impl TextDiagram {
    /// Lay out `circuit` into columns.
    pub fn new(circuit: &Circuit) -> Self {
        let n = circuit.num_qubits();
        let mut next_free = vec![0usize; n];
        let mut columns: Vec<Column> = Vec::new();

        for inst in circuit.instructions() {
            let lo = inst.qubits.iter().map(|q| q.index()).min().unwrap_or(0);
            let hi = inst.qubits.iter().map(|q| q.index()).max().unwrap_or(0);

            let col = (lo..=hi).map(|q| next_free[q]).max().unwrap_or(0);
            if col == columns.len() {
                columns.push(Column::new(n));
            }
            for slot in &mut next_free[lo..=hi] {
                *slot = col + 1;
            }

            let column = &mut columns[col];
            for (position, qubit) in inst.qubits.iter().enumerate() {
                column.cells[qubit.index()] = Some(symbol(inst, position));
            }
            for link in &mut column.links[lo..hi] {
                *link = true;
            }
        }

        let width = format!("q{}: ", n.saturating_sub(1)).len();
        let labels = (0..n)
            .map(|q| format!("{:>width$}", format!("q{q}: ")))
            .collect();

        Self { labels, columns }
    }

    /// Number of columns in the layout.
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    fn wire_row(&self, q: usize) -> String {
        let mut line = self.labels[q].clone();
        line.extend(std::iter::repeat_n(WIRE, SEPARATOR));
        for column in &self.columns {
            let content = match &column.cells[q] {
                Some(symbol) => symbol.clone(),
                None if column.is_crossed(q) => CROSS.to_string(),
                None => String::new(),
            };
            let pad = column.width() - content.chars().count();
            line.push_str(&content);
            line.extend(std::iter::repeat_n(WIRE, pad + SEPARATOR));
        }
        line
    }

    fn gap_row(&self, q: usize) -> String {
        let mut line = " ".repeat(self.labels[q].len() + SEPARATOR);
        for column in &self.columns {
            let content = if column.links[q] { LINK } else { ' ' };
            line.push(content);
            line.push_str(&" ".repeat(column.width() - 1 + SEPARATOR));
        }
        line.trim_end().to_string()
    }
}

impl fmt::Display for TextDiagram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for q in 0..self.labels.len() {
            if q > 0 {
                writeln!(f, "{}", self.gap_row(q - 1))?;
            }
            write!(f, "{}", self.wire_row(q))?;
            if q + 1 < self.labels.len() {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qubit::QubitId;

    fn lines(circuit: &Circuit) -> Vec<String> {
        TextDiagram::new(circuit)
            .to_string()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_bell_diagram() {
        let mut circuit = Circuit::new(2).unwrap();
        circuit.h(QubitId(0)).unwrap();
        circuit.cx(QubitId(0), QubitId(1)).unwrap();
        circuit.measure("z", [QubitId(0), QubitId(1)]).unwrap();

        let lines = lines(&circuit);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "q0: ───H───@───M('z')───");
        assert_eq!(lines[1], format!("{}│   │", " ".repeat(11)));
        assert_eq!(lines[2], format!("q1: {}X───M{}", "─".repeat(7), "─".repeat(8)));
    }

    #[test]
    fn test_parallel_gates_share_a_column() {
        let mut circuit = Circuit::new(3).unwrap();
        circuit.h(QubitId(0)).unwrap();
        circuit.x(QubitId(1)).unwrap();
        circuit.x_pow(0.5, QubitId(2)).unwrap();
        assert_eq!(TextDiagram::new(&circuit).num_columns(), 1);

        let lines = lines(&circuit);
        assert_eq!(lines[0], format!("q0: ───H{}", "─".repeat(7)));
        assert_eq!(lines[4], "q2: ───X^0.5───");
    }

    #[test]
    fn test_spanning_gate_crosses_middle_wire() {
        let mut circuit = Circuit::new(3).unwrap();
        circuit.cx_pow(0.5, QubitId(2), QubitId(0)).unwrap();
        circuit.h(QubitId(1)).unwrap();

        let diagram = TextDiagram::new(&circuit);
        assert_eq!(diagram.num_columns(), 2);

        let lines = lines(&circuit);
        assert!(lines[0].contains("X^0.5"));
        assert!(lines[2].starts_with("q1: ───┼"));
        assert!(lines[4].starts_with("q2: ───@"));
    }

    #[test]
    fn test_empty_circuit() {
        let circuit = Circuit::new(2).unwrap();
        assert_eq!(TextDiagram::new(&circuit).to_string(), "q0: ───\n\nq1: ───");
    }

    #[test]
    fn test_wide_register_labels_align() {
        let mut circuit = Circuit::new(11).unwrap();
        circuit.h(QubitId(0)).unwrap();
        let lines = lines(&circuit);
        assert!(lines[0].starts_with(" q0: ───H"));
        assert!(lines[20].starts_with("q10: ────"));
    }
}
