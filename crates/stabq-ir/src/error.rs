//! Error types for the IR crate.

use crate::qubit::{ClbitId, Operand, Qubit, RegisterKind};
use thiserror::Error;

/// Errors raised while declaring or building a circuit.
///
/// All of these are build-time contract violations: they abort the build
/// and are never retried.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// A register size violates the circuit's size contract.
    #[error("Invalid size {size} for {register} register: {reason}")]
    InvalidSize {
        /// The register being declared.
        register: RegisterKind,
        /// The requested size.
        size: usize,
        /// Why the size was rejected.
        reason: String,
    },

    /// An operation references a qubit or bit outside its register.
    #[error("{operand} is out of range for a register of size {size}{}", format_gate_context(.gate_name))]
    OutOfRange {
        /// The offending operand.
        operand: Operand,
        /// Size of the register the operand addresses.
        size: u32,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// Measurement source and destination lists differ in length.
    #[error("Measurement maps {qubits} qubits onto {clbits} classical bits")]
    LengthMismatch {
        /// Number of source qubits.
        qubits: usize,
        /// Number of destination bits.
        clbits: usize,
    },

    /// Gate requires a different number of qubits.
    #[error("Gate '{gate_name}' requires {expected} qubits, got {got}")]
    QubitCountMismatch {
        /// Name of the gate.
        gate_name: String,
        /// Expected number of qubits.
        expected: u32,
        /// Actual number of qubits provided.
        got: u32,
    },

    /// Duplicate qubit in operation.
    #[error("Duplicate qubit {qubit} in operation{}", format_gate_context(.gate_name))]
    DuplicateQubit {
        /// The duplicate qubit.
        qubit: Qubit,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// A serialized register sits in the wrong slot of a circuit.
    #[error("Expected a {expected} register, found a {got} register")]
    RegisterKindMismatch {
        /// Kind the slot requires.
        expected: RegisterKind,
        /// Kind that was found.
        got: RegisterKind,
    },

    /// A guard requires one bit to hold both values.
    #[error("Guard requires {clbit} to be both 0 and 1")]
    ConflictingGuard {
        /// The contested bit.
        clbit: ClbitId,
    },

    /// Circuit could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Helper function to format optional gate context.
#[allow(clippy::ref_option)]
fn format_gate_context(gate_name: &Option<String>) -> String {
    match gate_name {
        Some(name) => format!(" (gate: {name})"),
        None => String::new(),
    }
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
