//! Syndrome decode tables.
//!
//! Every correction in the bundled codes reads a pair of classical bits and
//! maps the three non-zero patterns onto three qubits. A [`DecodeTable`]
//! captures one such lookup so it can be both emitted into a circuit as
//! guarded corrections and evaluated classically against a measured
//! [`Syndrome`].

use serde::{Deserialize, Serialize};
use std::fmt;

use stabq_ir::{Circuit, ClbitId, Guard, IrResult, Pauli, Qubit};

/// Two classical bits forming one sub-syndrome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SyndromePair {
    /// First bit of the pair.
    pub first: ClbitId,
    /// Second bit of the pair.
    pub second: ClbitId,
}

impl SyndromePair {
    /// Pair two bits.
    pub const fn new(first: u32, second: u32) -> Self {
        Self {
            first: ClbitId(first),
            second: ClbitId(second),
        }
    }
}

impl fmt::Display for SyndromePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.first, self.second)
    }
}

/// A single Pauli applied to undo an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Correction {
    /// Pauli to apply.
    pub pauli: Pauli,
    /// Data qubit it acts on.
    pub qubit: Qubit,
}

impl fmt::Display for Correction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.pauli, self.qubit)
    }
}

/// A three-case correction lookup over one [`SyndromePair`].
///
/// | pattern | correction |
/// |---------|------------|
/// | (1, 0)  | `targets[0]` |
/// | (1, 1)  | `targets[1]` |
/// | (0, 1)  | `targets[2]` |
/// | (0, 0)  | none |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeTable {
    /// Bits the table reads.
    pub pair: SyndromePair,
    /// Pauli applied on a match.
    pub pauli: Pauli,
    /// Qubits corrected for patterns (1,0), (1,1) and (0,1).
    pub targets: [Qubit; 3],
}

impl DecodeTable {
    /// The non-trivial patterns, in `targets` order.
    pub const PATTERNS: [(bool, bool); 3] = [(true, false), (true, true), (false, true)];

    /// Create a table.
    pub fn new(pair: SyndromePair, pauli: Pauli, targets: [Qubit; 3]) -> Self {
        Self {
            pair,
            pauli,
            targets,
        }
    }

    /// Classical decode of one sub-syndrome.
    pub fn lookup(&self, first: bool, second: bool) -> Option<Correction> {
        Self::PATTERNS
            .iter()
            .position(|&p| p == (first, second))
            .map(|i| Correction {
                pauli: self.pauli,
                qubit: self.targets[i],
            })
    }

    /// Append one guarded correction per non-trivial pattern.
    pub fn append_to(&self, circuit: &mut Circuit) -> IrResult<()> {
        for (&(first, second), &target) in Self::PATTERNS.iter().zip(&self.targets) {
            let guard = Guard::pattern([(self.pair.first, first), (self.pair.second, second)]);
            circuit.with_condition(guard, |c| {
                c.pauli(self.pauli, target)?;
                Ok(())
            })?;
        }
        Ok(())
    }
}

impl fmt::Display for DecodeTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [t0, t1, t2] = self.targets;
        write!(
            f,
            "{} on {}: 10 -> {t0}, 11 -> {t1}, 01 -> {t2}",
            self.pauli, self.pair
        )
    }
}

/// The classical bits produced by syndrome measurement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Syndrome {
    bits: Vec<bool>,
}

impl Syndrome {
    /// Wrap measured bits, indexed by classical bit id.
    pub fn from_bits(bits: impl Into<Vec<bool>>) -> Self {
        Self { bits: bits.into() }
    }

    /// Value of one bit; bits outside the register read as 0.
    pub fn bit(&self, clbit: ClbitId) -> bool {
        self.bits.get(clbit.0 as usize).copied().unwrap_or(false)
    }

    /// Values of a sub-syndrome.
    pub fn pair(&self, pair: SyndromePair) -> (bool, bool) {
        (self.bit(pair.first), self.bit(pair.second))
    }

    /// Whether every bit is 0.
    pub fn is_trivial(&self) -> bool {
        self.bits.iter().all(|&b| !b)
    }

    /// The raw bits.
    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    /// Number of bits.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Check if there are no bits.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }
}

impl fmt::Display for Syndrome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.bits {
            f.write_str(if b { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Decode a measured syndrome with every table, in table order.
pub fn decode_syndrome(tables: &[DecodeTable], syndrome: &Syndrome) -> Vec<Correction> {
    tables
        .iter()
        .filter_map(|table| {
            let (first, second) = syndrome.pair(table.pair);
            table.lookup(first, second)
        })
        .collect()
}
