//! Execution results.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::f64::consts::FRAC_1_SQRT_2;
use std::fmt;

use stabq_ir::Operation;

/// Amplitudes below this magnitude are treated as zero.
pub const AMPLITUDE_EPSILON: f64 = 1e-12;

/// Tolerance used when comparing simulated states.
pub const STATE_TOLERANCE: f64 = 1e-9;

/// Final state of every qubit of a circuit.
///
/// Basis index bit `k` is the value of flattened qubit `k` (data qubits
/// first, then ancillas). Labels are written most-significant qubit first,
/// so the last character of a label is data qubit 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateVector {
    amplitudes: Vec<Complex64>,
    qubit_labels: Vec<String>,
}

impl StateVector {
    /// Wrap raw amplitudes. `qubit_labels` are in flattened qubit order.
    pub fn new(amplitudes: Vec<Complex64>, qubit_labels: Vec<String>) -> Self {
        Self {
            amplitudes,
            qubit_labels,
        }
    }

    /// Number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.qubit_labels.len()
    }

    /// Amplitude of one basis state.
    pub fn amplitude(&self, index: usize) -> Complex64 {
        self.amplitudes
            .get(index)
            .copied()
            .unwrap_or_else(|| Complex64::new(0.0, 0.0))
    }

    /// Probability of one basis state.
    pub fn probability(&self, index: usize) -> f64 {
        self.amplitude(index).norm_sqr()
    }

    /// Squared norm of the state (1 for a valid state).
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.iter().map(Complex64::norm_sqr).sum()
    }

    /// Qubit labels in flattened order.
    pub fn qubit_labels(&self) -> &[String] {
        &self.qubit_labels
    }

    /// Header naming the qubit of each label position, e.g. `|a1 a0 q2 q1 q0⟩`.
    pub fn label_header(&self) -> String {
        let names: Vec<_> = self.qubit_labels.iter().rev().map(String::as_str).collect();
        format!("|{}⟩", names.join(" "))
    }

    /// Bit-string label of a basis state.
    pub fn label(&self, index: usize) -> String {
        format!("{:0width$b}", index, width = self.num_qubits())
    }

    /// Non-negligible amplitudes keyed by basis-state label.
    pub fn amplitudes(&self) -> BTreeMap<String, Complex64> {
        self.amplitudes
            .iter()
            .enumerate()
            .filter(|(_, a)| a.norm() > AMPLITUDE_EPSILON)
            .map(|(i, &a)| (self.label(i), a))
            .collect()
    }

    /// Extract the state of one qubit when the register is a product of that
    /// qubit and a computational basis state of all other qubits.
    ///
    /// Returns `None` if the qubit is entangled with, or the rest is in a
    /// superposition of, other basis states.
    pub fn factor_qubit(&self, qubit: usize) -> Option<QubitState> {
        if qubit >= self.num_qubits() {
            return None;
        }
        let mask = 1usize << qubit;
        let (peak, _) = self
            .amplitudes
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.norm_sqr().total_cmp(&b.norm_sqr()))?;
        let rest = peak & !mask;
        let a0 = self.amplitude(rest);
        let a1 = self.amplitude(rest | mask);

        let weight = a0.norm_sqr() + a1.norm_sqr();
        if (weight - self.norm_sqr()).abs() > STATE_TOLERANCE {
            return None;
        }
        let norm = weight.sqrt();
        Some(QubitState::new(a0 / norm, a1 / norm))
    }

    /// Whether two states over the same qubits differ at most by a global
    /// phase.
    pub fn same_up_to_global_phase(&self, other: &StateVector) -> bool {
        if self.amplitudes.len() != other.amplitudes.len() {
            return false;
        }
        let overlap: Complex64 = self
            .amplitudes
            .iter()
            .zip(&other.amplitudes)
            .map(|(a, b)| a.conj() * b)
            .sum();
        let fidelity = overlap.norm_sqr() / (self.norm_sqr() * other.norm_sqr());
        (1.0 - fidelity).abs() < STATE_TOLERANCE
    }
}

impl fmt::Display for StateVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.label_header())?;
        for (label, amp) in self.amplitudes() {
            writeln!(f, "  |{label}⟩  {:+.6} {:+.6}i", amp.re, amp.im)?;
        }
        Ok(())
    }
}

/// A normalized single-qubit state `a0|0⟩ + a1|1⟩`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QubitState {
    /// Amplitude of `|0⟩`.
    pub a0: Complex64,
    /// Amplitude of `|1⟩`.
    pub a1: Complex64,
}

impl QubitState {
    /// Create a state from its amplitudes.
    pub fn new(a0: Complex64, a1: Complex64) -> Self {
        Self { a0, a1 }
    }

    /// `|0⟩`.
    pub fn zero() -> Self {
        Self::new(Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0))
    }

    /// `|1⟩`.
    pub fn one() -> Self {
        Self::new(Complex64::new(0.0, 0.0), Complex64::new(1.0, 0.0))
    }

    /// `|+⟩`.
    pub fn plus() -> Self {
        Self::new(
            Complex64::new(FRAC_1_SQRT_2, 0.0),
            Complex64::new(FRAC_1_SQRT_2, 0.0),
        )
    }

    /// `|−⟩`.
    pub fn minus() -> Self {
        Self::new(
            Complex64::new(FRAC_1_SQRT_2, 0.0),
            Complex64::new(-FRAC_1_SQRT_2, 0.0),
        )
    }

    /// `|⟨self|other⟩|²`.
    pub fn fidelity(&self, other: &QubitState) -> f64 {
        (self.a0.conj() * other.a0 + self.a1.conj() * other.a1).norm_sqr()
    }

    /// Whether two states are equal up to a global phase.
    pub fn is_equivalent(&self, other: &QubitState) -> bool {
        (1.0 - self.fidelity(other)).abs() < STATE_TOLERANCE
    }
}

impl fmt::Display for QubitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({:+.4}{:+.4}i)|0⟩ + ({:+.4}{:+.4}i)|1⟩",
            self.a0.re, self.a0.im, self.a1.re, self.a1.im
        )
    }
}

/// Result of executing one circuit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Name of the backend that produced the result.
    pub backend: String,
    /// Final state of all qubits.
    pub state: StateVector,
    /// Final value of every classical bit, indexed by bit id.
    pub clbits: Vec<bool>,
    /// Gate operations that ran inside a satisfied conditional block, in
    /// execution order.
    pub fired: Vec<Operation>,
    /// Wall-clock execution time in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_time_ms: Option<u64>,
}

impl ExecutionResult {
    /// Create a result.
    pub fn new(
        backend: impl Into<String>,
        state: StateVector,
        clbits: Vec<bool>,
        fired: Vec<Operation>,
    ) -> Self {
        Self {
            backend: backend.into(),
            state,
            clbits,
            fired,
            execution_time_ms: None,
        }
    }

    /// Attach the execution time.
    #[must_use]
    pub fn with_execution_time(mut self, ms: u64) -> Self {
        self.execution_time_ms = Some(ms);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(re: f64) -> Complex64 {
        Complex64::new(re, 0.0)
    }

    #[test]
    fn test_labels_are_msb_first() {
        let sv = StateVector::new(
            vec![c(0.0), c(0.0), c(1.0), c(0.0)],
            vec!["q0".into(), "q1".into()],
        );
        assert_eq!(sv.label(2), "10");
        assert_eq!(sv.label_header(), "|q1 q0⟩");
        let amps = sv.amplitudes();
        assert_eq!(amps.len(), 1);
        assert_eq!(amps["10"], c(1.0));
    }

    #[test]
    fn test_factor_qubit_product_state() {
        // |+⟩ on q0, q1 = |1⟩: amplitudes at indices 2 and 3.
        let h = FRAC_1_SQRT_2;
        let sv = StateVector::new(
            vec![c(0.0), c(0.0), c(h), c(h)],
            vec!["q0".into(), "q1".into()],
        );
        let q0 = sv.factor_qubit(0).unwrap();
        assert!(q0.is_equivalent(&QubitState::plus()));
    }

    #[test]
    fn test_factor_qubit_rejects_entanglement() {
        let h = FRAC_1_SQRT_2;
        let bell = StateVector::new(
            vec![c(h), c(0.0), c(0.0), c(h)],
            vec!["q0".into(), "q1".into()],
        );
        assert!(bell.factor_qubit(0).is_none());
        assert!(bell.factor_qubit(5).is_none());
    }

    #[test]
    fn test_global_phase_comparison() {
        let labels = vec!["q0".to_string()];
        let a = StateVector::new(vec![c(0.0), c(1.0)], labels.clone());
        let b = StateVector::new(vec![c(0.0), Complex64::new(0.0, -1.0)], labels.clone());
        let other = StateVector::new(vec![c(1.0), c(0.0)], labels);
        assert!(a.same_up_to_global_phase(&b));
        assert!(!a.same_up_to_global_phase(&other));
    }

    #[test]
    fn test_fidelity_ignores_global_phase() {
        let i = Complex64::new(0.0, 1.0);
        let plus = QubitState::plus();
        let rotated = QubitState::new(plus.a0 * i, plus.a1 * i);
        assert!(plus.is_equivalent(&rotated));
        assert!(!plus.is_equivalent(&QubitState::minus()));
        assert!(QubitState::zero().fidelity(&QubitState::one()) < 1e-12);
    }

    #[test]
    fn test_result_serializes() {
        let sv = StateVector::new(vec![c(1.0), c(0.0)], vec!["q0".into()]);
        let result = ExecutionResult::new("simulator", sv, vec![true, false], vec![]);
        assert!(result.execution_time_ms.is_none());
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"backend\":\"simulator\""));
    }
}
