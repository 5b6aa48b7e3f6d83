//! Nine-qubit Shor code.
//!
//! The logical qubit is spread over three blocks of three data qubits,
//! `{q0,q1,q2}`, `{q3,q4,q5}` and `{q6,q7,q8}`. Within a block the qubits
//! repeat the block's value (bit-flip protection); across blocks the
//! leaders `q0, q3, q6` repeat it in the Hadamard basis (phase-flip
//! protection). Any single X, Y or Z fault on one data qubit is corrected.
//!
//! Syndrome bits:
//!
//! | bits   | check |
//! |--------|-------|
//! | c0, c1 | X-parity of blocks 1+2 and blocks 2+3 |
//! | c2, c3 | Z-parity of (q0,q1), (q1,q2) |
//! | c4, c5 | Z-parity of (q3,q4), (q4,q5) |
//! | c6, c7 | Z-parity of (q6,q7), (q7,q8) |

use stabq_ir::{Circuit, ClbitId, Pauli, Qubit, RegisterLayout};

use crate::code::StabilizerCode;
use crate::config::{InitialState, InjectedError};
use crate::error::CodeResult;
use crate::syndrome::{DecodeTable, SyndromePair};

const LEADERS: [u32; 3] = [0, 3, 6];

fn q(index: u32) -> Qubit {
    Qubit::data(index)
}

fn a(index: u32) -> Qubit {
    Qubit::ancilla(index)
}

/// The Shor code on 9 data qubits, 8 ancillas and 8 classical bits.
///
/// The default configuration protects `|1⟩` against a Z error on q0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShorCode {
    initial_state: InitialState,
    error: Option<InjectedError>,
}

impl ShorCode {
    /// Register sizes of the code.
    pub const LAYOUT: RegisterLayout = RegisterLayout::new(9, 8, 8);

    /// The default configuration.
    pub fn new() -> Self {
        Self {
            initial_state: InitialState::One,
            error: Some(InjectedError::new(Pauli::Z, 0)),
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

    fn all_data() -> impl Iterator<Item = Qubit> {
        (0..9).map(q)
    }
}

impl Default for ShorCode {
    fn default() -> Self {
        Self::new()
    }
}

impl StabilizerCode for ShorCode {
    fn name(&self) -> &str {
        "shor"
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
        circuit.cx(q(0), q(3))?.cx(q(0), q(6))?;
        circuit.h_each(LEADERS.map(q))?;
        for leader in LEADERS {
            circuit
                .cx(q(leader), q(leader + 1))?
                .cx(q(leader), q(leader + 2))?;
        }
        Ok(())
    }

    fn measure_syndrome(&self, circuit: &mut Circuit) -> CodeResult<()> {
        // Phase flips: X-parity across pairs of blocks.
        circuit.h_each(Self::all_data())?;
        for i in 0..6 {
            circuit.cx(q(i), a(0))?;
        }
        for i in 3..9 {
            circuit.cx(q(i), a(1))?;
        }
        circuit.h_each(Self::all_data())?;

        // Bit flips: neighbouring Z-parities within each block.
        for (block, &leader) in LEADERS.iter().enumerate() {
            let first = a(2 + 2 * block as u32);
            let second = a(3 + 2 * block as u32);
            circuit
                .cx(q(leader), first)?
                .cx(q(leader + 1), first)?
                .cx(q(leader + 1), second)?
                .cx(q(leader + 2), second)?;
        }

        let ancillas: Vec<_> = (0..8).map(a).collect();
        let clbits: Vec<_> = (0..8).map(ClbitId).collect();
        circuit.measure(&ancillas, &clbits)?;
        Ok(())
    }

    fn decode_tables(&self) -> Vec<DecodeTable> {
        let mut tables = vec![DecodeTable::new(
            SyndromePair::new(0, 1),
            Pauli::Z,
            LEADERS.map(q),
        )];
        // Within a block: the first qubit breaks only the first parity, the
        // middle one both, the last only the second.
        for (block, &leader) in LEADERS.iter().enumerate() {
            let bit = 2 + 2 * block as u32;
            tables.push(DecodeTable::new(
                SyndromePair::new(bit, bit + 1),
                Pauli::X,
                [q(leader), q(leader + 1), q(leader + 2)],
            ));
        }
        tables
    }

    fn decode(&self, circuit: &mut Circuit) -> CodeResult<()> {
        for leader in LEADERS.into_iter().rev() {
            circuit
                .cx(q(leader), q(leader + 2))?
                .cx(q(leader), q(leader + 1))?;
        }
        circuit.h_each(LEADERS.into_iter().rev().map(q))?;
        circuit.cx(q(0), q(6))?.cx(q(0), q(3))?;
        Ok(())
    }
}
