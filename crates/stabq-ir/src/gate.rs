//! Quantum gate types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Standard gates with known semantics.
///
/// The set is the vocabulary the stabilizer pipelines emit: Paulis for
/// errors and corrections, Hadamard for the phase-flip layer, and CNOT for
/// encoding and parity checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StandardGate {
    /// Pauli-X gate.
    X,
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z gate.
    Z,
    /// Hadamard gate.
    H,
    /// Controlled-X (CNOT) gate.
    CX,
}

impl StandardGate {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::X => "x",
            StandardGate::Y => "y",
            StandardGate::Z => "z",
            StandardGate::H => "h",
            StandardGate::CX => "cx",
        }
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            StandardGate::X | StandardGate::Y | StandardGate::Z | StandardGate::H => 1,
            StandardGate::CX => 2,
        }
    }

    /// Every supported gate.
    pub const ALL: [StandardGate; 5] = [
        StandardGate::X,
        StandardGate::Y,
        StandardGate::Z,
        StandardGate::H,
        StandardGate::CX,
    ];
}

impl fmt::Display for StandardGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single-qubit Pauli operator.
///
/// Used both for injected faults and for corrections. `Y` is a combined
/// bit and phase flip (up to a global phase).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pauli {
    /// Bit flip.
    X,
    /// Bit and phase flip.
    Y,
    /// Phase flip.
    Z,
}

impl Pauli {
    /// All three Paulis.
    pub const ALL: [Pauli; 3] = [Pauli::X, Pauli::Y, Pauli::Z];

    /// The gate that applies this Pauli.
    #[inline]
    pub fn gate(self) -> StandardGate {
        match self {
            Pauli::X => StandardGate::X,
            Pauli::Y => StandardGate::Y,
            Pauli::Z => StandardGate::Z,
        }
    }
}

impl fmt::Display for Pauli {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.gate().name())
    }
}

impl FromStr for Pauli {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "x" => Ok(Pauli::X),
            "y" => Ok(Pauli::Y),
            "z" => Ok(Pauli::Z),
            other => Err(format!("Unknown Pauli '{other}', expected x, y or z")),
        }
    }
}
