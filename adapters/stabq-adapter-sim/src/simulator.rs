//! Simulator backend implementation.

use rand::SeedableRng;
use rand::rngs::StdRng;
use std::time::Instant;
use tracing::{debug, instrument, trace};

use stabq_hal::{
    Backend, Capabilities, ExecutionResult, HalError, HalResult, StateVector, ValidationResult,
};
use stabq_ir::{Circuit, Operation};

use crate::statevector::QuantumState;

/// Default qubit limit; 2^20 amplitudes take 16 MiB.
const DEFAULT_MAX_QUBITS: u32 = 20;

/// Local statevector simulator.
///
/// Executes a circuit once, sampling each measurement from the Born rule
/// and collapsing the state, so later conditional blocks see the outcome.
/// A fixed seed makes every run reproducible.
pub struct SimulatorBackend {
    capabilities: Capabilities,
    seed: Option<u64>,
}

impl SimulatorBackend {
    /// Create a new simulator backend with default settings.
    pub fn new() -> Self {
        Self {
            capabilities: Capabilities::simulator(DEFAULT_MAX_QUBITS),
            seed: None,
        }
    }

    /// Create a simulator with custom max qubits.
    pub fn with_max_qubits(max_qubits: u32) -> Self {
        Self {
            capabilities: Capabilities::simulator(max_qubits),
            seed: None,
        }
    }

    /// Seed the measurement RNG. Each run restarts from this seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

impl Default for SimulatorBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Mutable state of a single run.
struct Run<'c> {
    circuit: &'c Circuit,
    state: QuantumState,
    clbits: Vec<bool>,
    fired: Vec<Operation>,
    rng: StdRng,
}

impl Run<'_> {
    fn execute(&mut self, ops: &[Operation], guarded: bool) -> HalResult<()> {
        for op in ops {
            match op {
                Operation::Gate { gate, qubits } => {
                    let flat: Vec<usize> =
                        qubits.iter().map(|&q| self.circuit.flat_index(q)).collect();
                    self.state.apply_gate(*gate, &flat)?;
                    if guarded {
                        trace!("fired {}", op);
                        self.fired.push(op.clone());
                    }
                }
                Operation::Measure { qubit, clbit } => {
                    let flat = self.circuit.flat_index(*qubit);
                    let outcome = self.state.measure(flat, &mut self.rng)?;
                    let slot = self.clbits.get_mut(clbit.0 as usize).ok_or_else(|| {
                        HalError::Simulation(format!("{clbit} is outside the classical register"))
                    })?;
                    *slot = outcome;
                    trace!("{} -> {} = {}", qubit, clbit, u8::from(outcome));
                }
                Operation::Conditional { guard, body } => {
                    if guard.is_satisfied_by(&self.clbits) {
                        debug!("condition {} satisfied", guard);
                        self.execute(body, true)?;
                    }
                }
            }
        }
        Ok(())
    }
}

impl Backend for SimulatorBackend {
    fn name(&self) -> &str {
        &self.capabilities.name
    }

    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    #[instrument(skip(self, circuit), fields(circuit = circuit.name()))]
    fn run(&self, circuit: &Circuit) -> HalResult<ExecutionResult> {
        if circuit.num_qubits() > self.capabilities.num_qubits as usize {
            return Err(HalError::CircuitTooLarge(format!(
                "Circuit has {} qubits but simulator only supports {}",
                circuit.num_qubits(),
                self.capabilities.num_qubits
            )));
        }
        if let ValidationResult::Invalid { reasons } = self.validate(circuit) {
            return Err(HalError::Unsupported(reasons.join("; ")));
        }

        let start = Instant::now();
        debug!(
            "Starting simulation: {} qubits, {} clbits, {} operations",
            circuit.num_qubits(),
            circuit.num_clbits(),
            circuit.len()
        );

        let mut run = Run {
            circuit,
            state: QuantumState::new(circuit.num_qubits()),
            clbits: vec![false; circuit.num_clbits()],
            fired: Vec::new(),
            rng: self.rng(),
        };
        run.execute(circuit.operations(), false)?;

        let elapsed = start.elapsed();
        debug!(
            "Simulation completed in {:?}, {} conditional gate(s) fired",
            elapsed,
            run.fired.len()
        );

        let state = StateVector::new(run.state.into_amplitudes(), circuit.qubit_labels());
        Ok(
            ExecutionResult::new(self.name(), state, run.clbits, run.fired)
                .with_execution_time(elapsed.as_millis() as u64),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stabq_ir::{ClbitId, Guard, Qubit};

    #[test]
    fn test_simulator_capabilities() {
        let backend = SimulatorBackend::new();
        let caps = backend.capabilities();

        assert!(caps.is_simulator);
        assert_eq!(caps.num_qubits, 20);
        assert_eq!(backend.name(), "simulator");
    }

    #[test]
    fn test_simulator_too_many_qubits() {
        let backend = SimulatorBackend::with_max_qubits(5);
        let circuit = Circuit::declare_registers("big", 4, 2, 0).unwrap();

        let result = backend.run(&circuit);
        assert!(matches!(result, Err(HalError::CircuitTooLarge(_))));
    }

    #[test]
    fn test_measurement_drives_condition() {
        let backend = SimulatorBackend::new().with_seed(1);
        let mut circuit = Circuit::declare_registers("feedback", 1, 1, 1).unwrap();
        circuit.x(Qubit::ancilla(0)).unwrap();
        circuit.measure(&[Qubit::ancilla(0)], &[ClbitId(0)]).unwrap();
        circuit
            .with_condition(Guard::bit(ClbitId(0), true), |c| {
                c.x(Qubit::data(0))?;
                Ok(())
            })
            .unwrap();

        let result = backend.run(&circuit).unwrap();
        assert_eq!(result.clbits, vec![true]);
        assert_eq!(result.fired.len(), 1);
        // q0 = 1, a0 = 1
        assert!((result.state.probability(0b11) - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_unsatisfied_condition_fires_nothing() {
        let backend = SimulatorBackend::new();
        let mut circuit = Circuit::declare_registers("idle", 1, 1, 1).unwrap();
        circuit.measure(&[Qubit::ancilla(0)], &[ClbitId(0)]).unwrap();
        circuit
            .with_condition(Guard::bit(ClbitId(0), true), |c| {
                c.x(Qubit::data(0))?;
                Ok(())
            })
            .unwrap();

        let result = backend.run(&circuit).unwrap();
        assert!(result.fired.is_empty());
        assert!((result.state.probability(0) - 1.0).abs() < 1e-10);
    }
}
