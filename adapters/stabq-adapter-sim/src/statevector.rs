//! Statevector simulation engine.

use num_complex::Complex64;
use rand::Rng;

use stabq_hal::{HalError, HalResult};
use stabq_ir::StandardGate;

/// Projections with less weight than this are treated as impossible.
const MIN_NORM_SQR: f64 = 1e-12;

/// Amplitudes of an `n`-qubit register. Bit `k` of a basis index is qubit `k`.
#[derive(Debug, Clone)]
pub(crate) struct QuantumState {
    amplitudes: Vec<Complex64>,
    num_qubits: usize,
}

impl QuantumState {
    /// Create a register initialized to |0...0⟩.
    pub(crate) fn new(num_qubits: usize) -> Self {
        let size = 1 << num_qubits;
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); size];
        amplitudes[0] = Complex64::new(1.0, 0.0);
        Self {
            amplitudes,
            num_qubits,
        }
    }

    pub(crate) fn into_amplitudes(self) -> Vec<Complex64> {
        self.amplitudes
    }

    /// Apply a standard gate to flattened qubit indices.
    pub(crate) fn apply_gate(&mut self, gate: StandardGate, qubits: &[usize]) -> HalResult<()> {
        let expected = gate.num_qubits() as usize;
        if qubits.len() != expected {
            return Err(HalError::Simulation(format!(
                "gate '{}' expects {} qubit(s), got {}",
                gate.name(),
                expected,
                qubits.len()
            )));
        }
        if let Some(&q) = qubits.iter().find(|&&q| q >= self.num_qubits) {
            return Err(HalError::Simulation(format!(
                "qubit {q} outside a {}-qubit register",
                self.num_qubits
            )));
        }

        match gate {
            StandardGate::X => self.apply_x(qubits[0]),
            StandardGate::Y => self.apply_y(qubits[0]),
            StandardGate::Z => self.apply_z(qubits[0]),
            StandardGate::H => self.apply_h(qubits[0]),
            StandardGate::CX => self.apply_cx(qubits[0], qubits[1]),
        }
        Ok(())
    }

    /// Measure one qubit in the computational basis.
    ///
    /// The outcome is sampled with the Born rule, the state is projected onto
    /// it and renormalized.
    pub(crate) fn measure<R: Rng + ?Sized>(
        &mut self,
        qubit: usize,
        rng: &mut R,
    ) -> HalResult<bool> {
        let mask = 1 << qubit;
        let p1: f64 = self
            .amplitudes
            .iter()
            .enumerate()
            .filter(|(i, _)| i & mask != 0)
            .map(|(_, a)| a.norm_sqr())
            .sum();

        let r: f64 = rng.r#gen();
        let outcome = r < p1;
        let kept = if outcome { p1 } else { self.norm_sqr() - p1 };
        if kept < MIN_NORM_SQR {
            return Err(HalError::Simulation(format!(
                "measurement of qubit {qubit} projected onto a zero-weight branch"
            )));
        }

        let scale = 1.0 / kept.sqrt();
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if (i & mask != 0) == outcome {
                *amp *= scale;
            } else {
                *amp = Complex64::new(0.0, 0.0);
            }
        }
        Ok(outcome)
    }

    fn norm_sqr(&self) -> f64 {
        self.amplitudes.iter().map(Complex64::norm_sqr).sum()
    }

    // =========================================================================
    // Single-qubit gates
    // =========================================================================

    fn apply_x(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        for i in 0..(1 << self.num_qubits) {
            if i & mask == 0 {
                self.amplitudes.swap(i, i | mask);
            }
        }
    }

    fn apply_y(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        let i_val = Complex64::new(0.0, 1.0);
        for i in 0..(1 << self.num_qubits) {
            if i & mask == 0 {
                let j = i | mask;
                let tmp = self.amplitudes[i];
                self.amplitudes[i] = -i_val * self.amplitudes[j];
                self.amplitudes[j] = i_val * tmp;
            }
        }
    }

    fn apply_z(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if i & mask != 0 {
                *amp = -*amp;
            }
        }
    }

    fn apply_h(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        let sqrt2_inv = std::f64::consts::FRAC_1_SQRT_2;
        for i in 0..(1 << self.num_qubits) {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = sqrt2_inv * (a + b);
                self.amplitudes[j] = sqrt2_inv * (a - b);
            }
        }
    }

    // =========================================================================
    // Two-qubit gates
    // =========================================================================

    fn apply_cx(&mut self, control: usize, target: usize) {
        let ctrl_mask = 1 << control;
        let tgt_mask = 1 << target;
        for i in 0..(1 << self.num_qubits) {
            if (i & ctrl_mask != 0) && (i & tgt_mask == 0) {
                self.amplitudes.swap(i, i | tgt_mask);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn approx_eq(a: Complex64, b: Complex64) -> bool {
        (a - b).norm() < 1e-10
    }

    #[test]
    fn test_initial_state() {
        let sv = QuantumState::new(2);
        assert!(approx_eq(sv.amplitudes[0], Complex64::new(1.0, 0.0)));
        assert!(sv.amplitudes[1..].iter().all(|a| a.norm() < 1e-12));
    }

    #[test]
    fn test_bell_state() {
        let mut sv = QuantumState::new(2);
        sv.apply_gate(StandardGate::H, &[0]).unwrap();
        sv.apply_gate(StandardGate::CX, &[0, 1]).unwrap();

        let h = std::f64::consts::FRAC_1_SQRT_2;
        assert!(approx_eq(sv.amplitudes[0], Complex64::new(h, 0.0)));
        assert!(approx_eq(sv.amplitudes[1], Complex64::new(0.0, 0.0)));
        assert!(approx_eq(sv.amplitudes[2], Complex64::new(0.0, 0.0)));
        assert!(approx_eq(sv.amplitudes[3], Complex64::new(h, 0.0)));
    }

    #[test]
    fn test_y_is_i_x_z() {
        let mut sv = QuantumState::new(1);
        sv.apply_gate(StandardGate::Y, &[0]).unwrap();
        assert!(approx_eq(sv.amplitudes[1], Complex64::new(0.0, 1.0)));
    }

    #[test]
    fn test_h_z_h_is_x() {
        let mut sv = QuantumState::new(1);
        sv.apply_gate(StandardGate::H, &[0]).unwrap();
        sv.apply_gate(StandardGate::Z, &[0]).unwrap();
        sv.apply_gate(StandardGate::H, &[0]).unwrap();
        assert!(approx_eq(sv.amplitudes[1], Complex64::new(1.0, 0.0)));
    }

    #[test]
    fn test_cx_reversed_control() {
        let mut sv = QuantumState::new(2);
        sv.apply_gate(StandardGate::X, &[1]).unwrap();
        sv.apply_gate(StandardGate::CX, &[1, 0]).unwrap();
        assert!(approx_eq(sv.amplitudes[3], Complex64::new(1.0, 0.0)));
    }

    #[test]
    fn test_measure_deterministic_and_collapse() {
        let mut rng = StdRng::seed_from_u64(7);

        let mut one = QuantumState::new(1);
        one.apply_gate(StandardGate::X, &[0]).unwrap();
        for _ in 0..20 {
            assert!(one.measure(0, &mut rng).unwrap());
        }

        let mut bell = QuantumState::new(2);
        bell.apply_gate(StandardGate::H, &[0]).unwrap();
        bell.apply_gate(StandardGate::CX, &[0, 1]).unwrap();
        let first = bell.measure(0, &mut rng).unwrap();
        let second = bell.measure(1, &mut rng).unwrap();
        assert_eq!(first, second);
        assert!((bell.norm_sqr() - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_rejects_bad_operands() {
        let mut sv = QuantumState::new(2);
        assert!(sv.apply_gate(StandardGate::CX, &[0]).is_err());
        assert!(sv.apply_gate(StandardGate::X, &[2]).is_err());
    }
}
