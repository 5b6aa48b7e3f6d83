//! Three-qubit bit-flip code.
//!
//! Protects against a single X error by repeating the logical qubit across
//! three data qubits and comparing the parities of (q0, q1) and (q0, q2).

use stabq_ir::{Circuit, ClbitId, Pauli, Qubit, RegisterLayout};

use crate::code::StabilizerCode;
use crate::config::{InitialState, InjectedError};
use crate::error::CodeResult;
use crate::syndrome::{DecodeTable, SyndromePair};

const Q0: Qubit = Qubit::data(0);
const Q1: Qubit = Qubit::data(1);
const Q2: Qubit = Qubit::data(2);
const A0: Qubit = Qubit::ancilla(0);
const A1: Qubit = Qubit::ancilla(1);

/// The bit-flip code on 3 data qubits, 2 ancillas and 2 classical bits.
///
/// The default configuration protects `|+⟩` against an X error on q1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitFlipCode {
    initial_state: InitialState,
    error: Option<InjectedError>,
}

impl BitFlipCode {
    /// Register sizes of the code.
    pub const LAYOUT: RegisterLayout = RegisterLayout::new(3, 2, 2);

    /// Syndrome bits: parity(q0, q1) and parity(q0, q2).
    pub const SYNDROME: SyndromePair = SyndromePair::new(0, 1);

    /// The default configuration.
    pub fn new() -> Self {
        Self {
            initial_state: InitialState::Plus,
            error: Some(InjectedError::new(Pauli::X, 1)),
        }
    }

    /// Set the logical state to protect.
    #[must_use]
    pub fn with_initial_state(mut self, state: InitialState) -> Self {
        self.initial_state = state;
        self
    }

    /// Set the fault; `None` for a clean run.
    #[must_use]
    pub fn with_error(mut self, error: Option<InjectedError>) -> Self {
        self.error = error;
        self
    }
}

impl Default for BitFlipCode {
    fn default() -> Self {
        Self::new()
    }
}

impl StabilizerCode for BitFlipCode {
    fn name(&self) -> &str {
        "bit-flip"
    }

    fn layout(&self) -> RegisterLayout {
        Self::LAYOUT
    }

    fn initial_state(&self) -> InitialState {
        self.initial_state
    }

    fn injected_error(&self) -> Option<InjectedError> {
        self.error
    }

    fn encode(&self, circuit: &mut Circuit) -> CodeResult<()> {
        circuit.cx(Q0, Q1)?.cx(Q0, Q2)?;
        Ok(())
    }

    fn measure_syndrome(&self, circuit: &mut Circuit) -> CodeResult<()> {
        circuit
            .cx(Q0, A0)?
            .cx(Q1, A0)?
            .cx(Q0, A1)?
            .cx(Q2, A1)?
            .measure(&[A0, A1], &[ClbitId(0), ClbitId(1)])?;
        Ok(())
    }

    fn decode_tables(&self) -> Vec<DecodeTable> {
        // q1 alone breaks the first parity, q2 alone the second, q0 both.
        vec![DecodeTable::new(Self::SYNDROME, Pauli::X, [Q1, Q0, Q2])]
    }

    fn decode(&self, circuit: &mut Circuit) -> CodeResult<()> {
        circuit.cx(Q0, Q2)?.cx(Q0, Q1)?;
        Ok(())
    }
}
