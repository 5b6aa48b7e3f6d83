//! Qubit, classical bit and register types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The quantum register a qubit belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuantumRegisterKind {
    /// Data qubits carrying the encoded logical state.
    Data,
    /// Ancilla qubits used only for syndrome extraction.
    Ancilla,
}

/// The kind of slots a register holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegisterKind {
    /// Data qubits.
    Data,
    /// Ancilla qubits.
    Ancilla,
    /// Classical bits.
    Classical,
}

impl RegisterKind {
    /// Short register name used in labels (`q`, `a`, `c`).
    #[inline]
    pub fn label(self) -> &'static str {
        match self {
            RegisterKind::Data => "q",
            RegisterKind::Ancilla => "a",
            RegisterKind::Classical => "c",
        }
    }
}

impl fmt::Display for RegisterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RegisterKind::Data => "data",
            RegisterKind::Ancilla => "ancilla",
            RegisterKind::Classical => "classical",
        };
        f.write_str(name)
    }
}

impl From<QuantumRegisterKind> for RegisterKind {
    fn from(kind: QuantumRegisterKind) -> Self {
        match kind {
            QuantumRegisterKind::Data => RegisterKind::Data,
            QuantumRegisterKind::Ancilla => RegisterKind::Ancilla,
        }
    }
}

/// A qubit, identified by its register and its index within that register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Qubit {
    /// The register this qubit lives in.
    pub kind: QuantumRegisterKind,
    /// Index within the register.
    pub index: u32,
}

impl Qubit {
    /// Address a data qubit.
    pub const fn data(index: u32) -> Self {
        Self {
            kind: QuantumRegisterKind::Data,
            index,
        }
    }

    /// Address an ancilla qubit.
    pub const fn ancilla(index: u32) -> Self {
        Self {
            kind: QuantumRegisterKind::Ancilla,
            index,
        }
    }
}

impl fmt::Display for Qubit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reg = RegisterKind::from(self.kind).label();
        write!(f, "{reg}[{}]", self.index)
    }
}

/// Identifier for a classical bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClbitId(pub u32);

impl fmt::Display for ClbitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c[{}]", self.0)
    }
}

impl From<u32> for ClbitId {
    fn from(id: u32) -> Self {
        ClbitId(id)
    }
}

/// Anything an operation can reference: a qubit or a classical bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operand {
    /// A data or ancilla qubit.
    Qubit(Qubit),
    /// A classical bit.
    Clbit(ClbitId),
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Qubit(q) => write!(f, "{q}"),
            Operand::Clbit(c) => write!(f, "{c}"),
        }
    }
}

/// A named, fixed-size register of one kind of slot.
///
/// Registers never change size after the circuit that owns them is declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Register {
    kind: RegisterKind,
    size: u32,
}

impl Register {
    pub(crate) fn new(kind: RegisterKind, size: u32) -> Self {
        Self { kind, size }
    }

    /// The kind of slots in this register.
    pub fn kind(&self) -> RegisterKind {
        self.kind
    }

    /// The register name (`q`, `a` or `c`).
    pub fn name(&self) -> &'static str {
        self.kind.label()
    }

    /// Number of slots.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Check whether `index` addresses a slot of this register.
    #[inline]
    pub fn contains(&self, index: u32) -> bool {
        index < self.size
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.name(), self.size)
    }
}
