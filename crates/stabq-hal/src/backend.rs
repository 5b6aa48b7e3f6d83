//! Backend trait.
//!
//! A [`Backend`] executes a finished [`Circuit`] once and reports the final
//! quantum state together with the classical register:
//!
//! ```text
//!   capabilities() ──→ validate() ──→ run()
//!    (infallible)       (checks)      (executes)
//! ```
//!
//! Execution is synchronous. Stabilizer-code circuits are small and a run
//! finishes in well under a second on the local simulator.

use std::collections::BTreeSet;

use stabq_ir::Circuit;

use crate::capability::{Capabilities, DYNAMIC_CIRCUITS};
use crate::error::HalResult;
use crate::result::ExecutionResult;

/// Trait for circuit execution backends.
///
/// # Contract
///
/// - `capabilities()` is infallible and cached at construction time.
/// - `validate()` has a provided implementation checking operand ranges,
///   qubit count, gate support (including gates nested in conditional
///   blocks) and support for conditional blocks themselves.
/// - `run()` must execute operations in insertion order and evaluate every
///   conditional block against the classical values at that point.
pub trait Backend: Send + Sync {
    /// Get the name of this backend.
    fn name(&self) -> &str;

    /// Get the capabilities of this backend.
    fn capabilities(&self) -> &Capabilities;

    /// Validate a circuit against backend constraints.
    fn validate(&self, circuit: &Circuit) -> ValidationResult {
        let caps = self.capabilities();
        let mut reasons = Vec::new();

        if let Err(e) = circuit.check_operations() {
            reasons.push(e.to_string());
        }

        if circuit.num_qubits() > caps.num_qubits as usize {
            reasons.push(format!(
                "Circuit has {} qubits but {} supports at most {}",
                circuit.num_qubits(),
                self.name(),
                caps.num_qubits
            ));
        }

        let unsupported: BTreeSet<&str> = circuit
            .guarded_operations()
            .into_iter()
            .filter_map(|(_, op)| op.as_gate())
            .map(|(gate, _)| gate.name())
            .filter(|name| !caps.supports_gate(name))
            .collect();
        reasons.extend(
            unsupported
                .into_iter()
                .map(|name| format!("Unsupported gate '{name}'")),
        );

        if !caps.has_feature(DYNAMIC_CIRCUITS)
            && circuit.operations().iter().any(|op| op.is_conditional())
        {
            reasons.push(format!(
                "{} cannot execute classically conditioned blocks",
                self.name()
            ));
        }

        if reasons.is_empty() {
            ValidationResult::Valid
        } else {
            ValidationResult::Invalid { reasons }
        }
    }

    /// Execute the circuit once.
    fn run(&self, circuit: &Circuit) -> HalResult<ExecutionResult>;
}

/// Result of checking a circuit against backend constraints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    /// The circuit can be executed as-is.
    Valid,
    /// The circuit cannot run on this backend.
    Invalid {
        /// Human-readable reasons.
        reasons: Vec<String>,
    },
}

impl ValidationResult {
    /// Check whether the circuit passed validation.
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }
}
