//! Circuit operations.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::condition::Guard;
use crate::gate::StandardGate;
use crate::qubit::{ClbitId, Qubit};

/// A single step of a circuit.
///
/// Operations are immutable once appended to a circuit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation {
    /// A unitary gate on one or more qubits.
    Gate {
        /// The gate to apply.
        gate: StandardGate,
        /// Target qubits, in gate order (control first for controlled gates).
        qubits: Vec<Qubit>,
    },
    /// Projective Z-basis measurement of a qubit into a classical bit.
    Measure {
        /// The measured qubit.
        qubit: Qubit,
        /// The bit receiving the outcome.
        clbit: ClbitId,
    },
    /// A nested block executed only if its guard holds at run time.
    Conditional {
        /// Classical pattern that must hold.
        guard: Guard,
        /// Operations executed when the guard holds.
        body: Vec<Operation>,
    },
}

impl Operation {
    /// Create a gate operation.
    pub fn gate(gate: StandardGate, qubits: impl IntoIterator<Item = Qubit>) -> Self {
        Operation::Gate {
            gate,
            qubits: qubits.into_iter().collect(),
        }
    }

    /// Create a single-qubit gate operation.
    pub fn single_qubit_gate(gate: StandardGate, qubit: Qubit) -> Self {
        Self::gate(gate, [qubit])
    }

    /// Create a two-qubit gate operation.
    pub fn two_qubit_gate(gate: StandardGate, q1: Qubit, q2: Qubit) -> Self {
        Self::gate(gate, [q1, q2])
    }

    /// Create a measurement operation.
    pub fn measure(qubit: Qubit, clbit: ClbitId) -> Self {
        Operation::Measure { qubit, clbit }
    }

    /// Create a conditional block.
    pub fn conditional(guard: Guard, body: Vec<Operation>) -> Self {
        Operation::Conditional { guard, body }
    }

    /// Check if this is a conditional block.
    pub fn is_conditional(&self) -> bool {
        matches!(self, Operation::Conditional { .. })
    }

    /// Get the gate and its qubits if this is a gate operation.
    pub fn as_gate(&self) -> Option<(StandardGate, &[Qubit])> {
        match self {
            Operation::Gate { gate, qubits } => Some((*gate, qubits)),
            _ => None,
        }
    }

    /// Number of gate operations, counting nested blocks.
    pub fn gate_count(&self) -> usize {
        match self {
            Operation::Gate { .. } => 1,
            Operation::Measure { .. } => 0,
            Operation::Conditional { body, .. } => body.iter().map(Operation::gate_count).sum(),
        }
    }

    /// Get the name of the operation.
    pub fn name(&self) -> &str {
        match self {
            Operation::Gate { gate, .. } => gate.name(),
            Operation::Measure { .. } => "measure",
            Operation::Conditional { .. } => "if",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Gate { gate, qubits } => {
                write!(f, "{gate}")?;
                for (i, q) in qubits.iter().enumerate() {
                    let sep = if i == 0 { " " } else { ", " };
                    write!(f, "{sep}{q}")?;
                }
                Ok(())
            }
            Operation::Measure { qubit, clbit } => write!(f, "measure {qubit} -> {clbit}"),
            Operation::Conditional { guard, body } => {
                write!(f, "if ({guard}) {{ ")?;
                for (i, op) in body.iter().enumerate() {
                    if i > 0 {
                        f.write_str("; ")?;
                    }
                    write!(f, "{op}")?;
                }
                f.write_str(" }")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_operation() {
        let op = Operation::single_qubit_gate(StandardGate::H, Qubit::data(0));
        assert!(op.as_gate().is_some());
        assert_eq!(op.name(), "h");
        assert_eq!(op.to_string(), "h q[0]");
    }

    #[test]
    fn test_measure_operation() {
        let op = Operation::measure(Qubit::ancilla(1), ClbitId(1));
        assert!(op.as_gate().is_none());
        assert_eq!(op.gate_count(), 0);
        assert_eq!(op.to_string(), "measure a[1] -> c[1]");
    }

    #[test]
    fn test_conditional_counts_nested_gates() {
        let op = Operation::conditional(
            Guard::bit(ClbitId(0), true),
            vec![
                Operation::single_qubit_gate(StandardGate::X, Qubit::data(1)),
                Operation::conditional(
                    Guard::bit(ClbitId(1), false),
                    vec![Operation::single_qubit_gate(StandardGate::Z, Qubit::data(2))],
                ),
            ],
        );
        assert!(op.is_conditional());
        assert_eq!(op.gate_count(), 2);
        assert_eq!(
            op.to_string(),
            "if (c[0]==1) { x q[1]; if (c[1]==0) { z q[2] } }"
        );
    }

    #[test]
    fn test_two_qubit_display() {
        let op = Operation::two_qubit_gate(StandardGate::CX, Qubit::data(0), Qubit::ancilla(0));
        assert_eq!(op.to_string(), "cx q[0], a[0]");
        assert_eq!(op.as_gate().map(|(g, q)| (g, q.len())), Some((StandardGate::CX, 2)));
    }
}
