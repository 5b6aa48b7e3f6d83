//! High-level circuit builder API.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::condition::Guard;
use crate::error::{IrError, IrResult};
use crate::gate::{Pauli, StandardGate};
use crate::operation::Operation;
use crate::qubit::{ClbitId, Operand, QuantumRegisterKind, Qubit, Register, RegisterKind};

/// Maximum number of qubits (data + ancilla) a circuit may declare.
///
/// Basis-state indices of the flattened register must fit in a `u32`.
pub const MAX_QUBITS: usize = 32;

/// Sizes of the three registers of a circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegisterLayout {
    /// Number of data qubits.
    pub num_data: usize,
    /// Number of ancilla qubits.
    pub num_ancilla: usize,
    /// Number of classical bits.
    pub num_clbits: usize,
}

impl RegisterLayout {
    /// Create a layout.
    pub const fn new(num_data: usize, num_ancilla: usize, num_clbits: usize) -> Self {
        Self {
            num_data,
            num_ancilla,
            num_clbits,
        }
    }

    /// Total number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_data + self.num_ancilla
    }
}

impl fmt::Display for RegisterLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "q[{}] a[{}] c[{}]",
            self.num_data, self.num_ancilla, self.num_clbits
        )
    }
}

/// A quantum circuit over a data register, an ancilla register and a
/// classical register.
///
/// Operations form a single timeline: insertion order is execution order.
/// Every appended operation is validated against the registers, so a
/// circuit never references a qubit or bit it did not declare. Deserialized
/// circuits are rebuilt through the same checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CircuitDef")]
pub struct Circuit {
    /// Name of the circuit.
    name: String,
    /// Data qubits.
    data: Register,
    /// Ancilla qubits.
    ancilla: Register,
    /// Classical bits.
    clbits: Register,
    /// Operations in execution order.
    operations: Vec<Operation>,
}

/// Wire form of a [`Circuit`] before validation.
#[derive(Deserialize)]
struct CircuitDef {
    name: String,
    data: Register,
    ancilla: Register,
    clbits: Register,
    operations: Vec<Operation>,
}

impl TryFrom<CircuitDef> for Circuit {
    type Error = IrError;

    fn try_from(def: CircuitDef) -> IrResult<Self> {
        let slots = [
            (RegisterKind::Data, &def.data),
            (RegisterKind::Ancilla, &def.ancilla),
            (RegisterKind::Classical, &def.clbits),
        ];
        for (expected, register) in slots {
            if register.kind() != expected {
                return Err(IrError::RegisterKindMismatch {
                    expected,
                    got: register.kind(),
                });
            }
        }

        let mut circuit = Self::declare_registers(
            def.name,
            def.data.size() as usize,
            def.ancilla.size() as usize,
            def.clbits.size() as usize,
        )?;
        for op in def.operations {
            circuit.push(op)?;
        }
        Ok(circuit)
    }
}

impl Circuit {
    /// Declare a circuit with the three registers.
    ///
    /// Fails with [`IrError::InvalidSize`] when the qubit registers together
    /// exceed [`MAX_QUBITS`] or the classical register exceeds `u32::MAX`.
    pub fn declare_registers(
        name: impl Into<String>,
        num_data: usize,
        num_ancilla: usize,
        num_clbits: usize,
    ) -> IrResult<Self> {
        if num_data > MAX_QUBITS {
            return Err(IrError::InvalidSize {
                register: RegisterKind::Data,
                size: num_data,
                reason: format!("at most {MAX_QUBITS} qubits are addressable"),
            });
        }
        if num_data + num_ancilla > MAX_QUBITS {
            return Err(IrError::InvalidSize {
                register: RegisterKind::Ancilla,
                size: num_ancilla,
                reason: format!(
                    "{num_data} data + {num_ancilla} ancilla qubits exceed the {MAX_QUBITS}-qubit limit"
                ),
            });
        }
        let clbit_size = u32::try_from(num_clbits).map_err(|_| IrError::InvalidSize {
            register: RegisterKind::Classical,
            size: num_clbits,
            reason: "classical register index overflows u32".into(),
        })?;

        // Both qubit sizes are bounded by MAX_QUBITS here.
        Ok(Self {
            name: name.into(),
            data: Register::new(RegisterKind::Data, num_data as u32),
            ancilla: Register::new(RegisterKind::Ancilla, num_ancilla as u32),
            clbits: Register::new(RegisterKind::Classical, clbit_size),
            operations: vec![],
        })
    }

    /// Declare a circuit from a [`RegisterLayout`].
    pub fn with_layout(name: impl Into<String>, layout: RegisterLayout) -> IrResult<Self> {
        Self::declare_registers(name, layout.num_data, layout.num_ancilla, layout.num_clbits)
    }

    // =========================================================================
    // Gates
    // =========================================================================

    /// Append a gate on the given qubits.
    pub fn apply_gate(
        &mut self,
        gate: StandardGate,
        qubits: impl IntoIterator<Item = Qubit>,
    ) -> IrResult<&mut Self> {
        self.push(Operation::gate(gate, qubits))
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: Qubit) -> IrResult<&mut Self> {
        self.push(Operation::single_qubit_gate(StandardGate::X, qubit))
    }

    /// Apply Pauli-Y gate.
    pub fn y(&mut self, qubit: Qubit) -> IrResult<&mut Self> {
        self.push(Operation::single_qubit_gate(StandardGate::Y, qubit))
    }

    /// Apply Pauli-Z gate.
    pub fn z(&mut self, qubit: Qubit) -> IrResult<&mut Self> {
        self.push(Operation::single_qubit_gate(StandardGate::Z, qubit))
    }

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: Qubit) -> IrResult<&mut Self> {
        self.push(Operation::single_qubit_gate(StandardGate::H, qubit))
    }

    /// Apply a Hadamard to each of the given qubits.
    pub fn h_each(&mut self, qubits: impl IntoIterator<Item = Qubit>) -> IrResult<&mut Self> {
        for qubit in qubits {
            self.h(qubit)?;
        }
        Ok(self)
    }

    /// Apply a Pauli gate.
    pub fn pauli(&mut self, pauli: Pauli, qubit: Qubit) -> IrResult<&mut Self> {
        self.push(Operation::single_qubit_gate(pauli.gate(), qubit))
    }

    /// Apply CNOT (CX) gate.
    pub fn cx(&mut self, control: Qubit, target: Qubit) -> IrResult<&mut Self> {
        self.push(Operation::two_qubit_gate(StandardGate::CX, control, target))
    }

    // =========================================================================
    // Measurement and classical control
    // =========================================================================

    /// Measure each qubit into the classical bit at the same position.
    ///
    /// Nothing is appended unless every pair is valid.
    pub fn measure(&mut self, qubits: &[Qubit], clbits: &[ClbitId]) -> IrResult<&mut Self> {
        if qubits.len() != clbits.len() {
            return Err(IrError::LengthMismatch {
                qubits: qubits.len(),
                clbits: clbits.len(),
            });
        }
        let ops: Vec<_> = qubits
            .iter()
            .zip(clbits)
            .map(|(&q, &c)| Operation::measure(q, c))
            .collect();
        for op in &ops {
            self.validate(op)?;
        }
        self.operations.extend(ops);
        Ok(self)
    }

    /// Append a block that runs only when `guard` holds at execution time.
    ///
    /// `body` appends the block's operations to this circuit; they are
    /// captured as the nested sequence of one [`Operation::Conditional`].
    /// Calls nest, and a nested block requires all enclosing guards. If
    /// `body` fails, the circuit is left as it was before the call.
    pub fn with_condition<F>(&mut self, guard: Guard, body: F) -> IrResult<&mut Self>
    where
        F: FnOnce(&mut Self) -> IrResult<()>,
    {
        self.check_guard(&guard)?;

        let outer = std::mem::take(&mut self.operations);
        let result = body(&mut *self);
        let nested = std::mem::replace(&mut self.operations, outer);
        result?;

        self.operations.push(Operation::conditional(guard, nested));
        Ok(self)
    }

    /// Append a pre-built operation after validating it.
    pub fn push(&mut self, operation: Operation) -> IrResult<&mut Self> {
        self.validate(&operation)?;
        self.operations.push(operation);
        Ok(self)
    }

    /// Re-check every operation against the registers.
    pub fn check_operations(&self) -> IrResult<()> {
        self.operations.iter().try_for_each(|op| self.validate(op))
    }

    fn validate(&self, operation: &Operation) -> IrResult<()> {
        match operation {
            Operation::Gate { gate, qubits } => {
                let gate_name = Some(gate.name().to_string());

                // Validate gate arity matches qubit count
                let expected = gate.num_qubits() as usize;
                if qubits.len() != expected {
                    return Err(IrError::QubitCountMismatch {
                        gate_name: gate.name().to_string(),
                        expected: expected as u32,
                        got: qubits.len() as u32,
                    });
                }

                for &qubit in qubits {
                    self.check_qubit(qubit, &gate_name)?;
                }

                let mut seen = FxHashSet::default();
                for &qubit in qubits {
                    if !seen.insert(qubit) {
                        return Err(IrError::DuplicateQubit { qubit, gate_name });
                    }
                }
                Ok(())
            }
            Operation::Measure { qubit, clbit } => {
                let gate_name = Some("measure".to_string());
                self.check_qubit(*qubit, &gate_name)?;
                self.check_clbit(*clbit, &gate_name)
            }
            Operation::Conditional { guard, body } => {
                self.check_guard(guard)?;
                body.iter().try_for_each(|op| self.validate(op))
            }
        }
    }

    #[allow(clippy::ref_option)]
    fn check_qubit(&self, qubit: Qubit, gate_name: &Option<String>) -> IrResult<()> {
        let register = self.register_of(qubit);
        if register.contains(qubit.index) {
            Ok(())
        } else {
            Err(IrError::OutOfRange {
                operand: Operand::Qubit(qubit),
                size: register.size(),
                gate_name: gate_name.clone(),
            })
        }
    }

    #[allow(clippy::ref_option)]
    fn check_clbit(&self, clbit: ClbitId, gate_name: &Option<String>) -> IrResult<()> {
        if self.clbits.contains(clbit.0) {
            Ok(())
        } else {
            Err(IrError::OutOfRange {
                operand: Operand::Clbit(clbit),
                size: self.clbits.size(),
                gate_name: gate_name.clone(),
            })
        }
    }

    fn check_guard(&self, guard: &Guard) -> IrResult<()> {
        let context = Some("if".to_string());
        guard
            .clbits()
            .try_for_each(|clbit| self.check_clbit(clbit, &context))
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The data register.
    pub fn data(&self) -> &Register {
        &self.data
    }

    /// The ancilla register.
    pub fn ancilla(&self) -> &Register {
        &self.ancilla
    }

    /// The classical register.
    pub fn clbits(&self) -> &Register {
        &self.clbits
    }

    /// Register sizes of this circuit.
    pub fn layout(&self) -> RegisterLayout {
        RegisterLayout::new(
            self.data.size() as usize,
            self.ancilla.size() as usize,
            self.clbits.size() as usize,
        )
    }

    /// Get the number of qubits (data + ancilla).
    pub fn num_qubits(&self) -> usize {
        (self.data.size() + self.ancilla.size()) as usize
    }

    /// Get the number of classical bits.
    pub fn num_clbits(&self) -> usize {
        self.clbits.size() as usize
    }

    /// Top-level operations in execution order.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Number of top-level operations.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Check if no operation has been appended.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Number of gate operations, including those inside conditional blocks.
    pub fn gate_count(&self) -> usize {
        self.operations.iter().map(Operation::gate_count).sum()
    }

    /// Position of a qubit in the flattened register: data qubits first,
    /// then ancillas.
    pub fn flat_index(&self, qubit: Qubit) -> usize {
        match qubit.kind {
            QuantumRegisterKind::Data => qubit.index as usize,
            QuantumRegisterKind::Ancilla => (self.data.size() + qubit.index) as usize,
        }
    }

    /// Qubit labels in flattened order (`q0`, `q1`, …, `a0`, …).
    pub fn qubit_labels(&self) -> Vec<String> {
        let data = (0..self.data.size()).map(|i| format!("q{i}"));
        let ancilla = (0..self.ancilla.size()).map(|i| format!("a{i}"));
        data.chain(ancilla).collect()
    }

    /// Every non-conditional operation paired with the conjunction of the
    /// guards enclosing it.
    ///
    /// Operations whose enclosing guards contradict each other can never
    /// run and are skipped.
    pub fn guarded_operations(&self) -> Vec<(Guard, &Operation)> {
        let mut out = vec![];
        collect_guarded(&self.operations, &Guard::always(), &mut out);
        out
    }

    /// Serialize the circuit as pretty-printed JSON.
    pub fn to_json(&self) -> IrResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn register_of(&self, qubit: Qubit) -> &Register {
        match qubit.kind {
            QuantumRegisterKind::Data => &self.data,
            QuantumRegisterKind::Ancilla => &self.ancilla,
        }
    }
}

fn collect_guarded<'a>(ops: &'a [Operation], guard: &Guard, out: &mut Vec<(Guard, &'a Operation)>) {
    for op in ops {
        match op {
            Operation::Conditional {
                guard: inner,
                body,
            } => {
                if let Some(combined) = guard.and(inner) {
                    collect_guarded(body, &combined, out);
                }
            }
            _ => out.push((guard.clone(), op)),
        }
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "circuit {}: {} {} {}",
            self.name, self.data, self.ancilla, self.clbits
        )?;
        for op in &self.operations {
            writeln!(f, "  {op}")?;
        }
        Ok(())
    }
}
