//! Backend capability introspection.

use serde::{Deserialize, Serialize};
use stabq_ir::StandardGate;

/// Feature flag for executing classically conditioned blocks.
pub const DYNAMIC_CIRCUITS: &str = "dynamic_circuits";

/// What a backend can execute.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Capabilities {
    /// Name of the backend.
    pub name: String,
    /// Maximum number of qubits (data + ancilla) per circuit.
    pub num_qubits: u32,
    /// Supported gate names (`x`, `cx`, …).
    pub gate_set: Vec<String>,
    /// Whether this is a simulator (`true`) or real hardware (`false`).
    pub is_simulator: bool,
    /// Additional capability flags, e.g. `"statevector"` or
    /// [`DYNAMIC_CIRCUITS`].
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<String>,
}

impl Capabilities {
    /// Capabilities of a local statevector simulator.
    pub fn simulator(num_qubits: u32) -> Self {
        Self {
            name: "simulator".into(),
            num_qubits,
            gate_set: StandardGate::ALL
                .iter()
                .map(|g| g.name().to_string())
                .collect(),
            is_simulator: true,
            features: vec!["statevector".into(), DYNAMIC_CIRCUITS.into()],
        }
    }

    /// Check if a gate is in the supported set.
    pub fn supports_gate(&self, name: &str) -> bool {
        self.gate_set.iter().any(|g| g == name)
    }

    /// Check if a capability flag is present.
    pub fn has_feature(&self, feature: &str) -> bool {
        self.features.iter().any(|f| f == feature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulator_capabilities() {
        let caps = Capabilities::simulator(20);
        assert!(caps.is_simulator);
        assert_eq!(caps.num_qubits, 20);
        assert!(caps.supports_gate("cx"));
        assert!(!caps.supports_gate("ccx"));
        assert_eq!(caps.gate_set.len(), StandardGate::ALL.len());
        assert!(caps.has_feature(DYNAMIC_CIRCUITS));
    }
}
