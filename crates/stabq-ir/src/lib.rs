//! Stabq Circuit Model
//!
//! This crate provides the circuit description that stabilizer-code
//! pipelines are built on: three fixed-size registers (data qubits, ancilla
//! qubits, classical bits) and a single ordered timeline of operations.
//!
//! # Core Components
//!
//! - **Addressing**: [`Qubit`] (register kind + index) and [`ClbitId`]
//! - **Gates**: [`StandardGate`] and the [`Pauli`] error/correction vocabulary
//! - **Guards**: [`Guard`], an exact classical bit pattern
//! - **Operations**: [`Operation`] — gate, measurement or guarded block
//! - **Circuit**: [`Circuit`], the validating builder
//!
//! # Example: A Guarded Correction
//!
//! ```rust
//! use stabq_ir::{Circuit, ClbitId, Guard, Qubit};
//!
//! let mut circuit = Circuit::declare_registers("parity", 2, 1, 1).unwrap();
//!
//! circuit
//!     .cx(Qubit::data(0), Qubit::ancilla(0)).unwrap()
//!     .cx(Qubit::data(1), Qubit::ancilla(0)).unwrap()
//!     .measure(&[Qubit::ancilla(0)], &[ClbitId(0)]).unwrap();
//!
//! // Flip q[1] back if the parity check fired.
//! circuit
//!     .with_condition(Guard::bit(ClbitId(0), true), |c| {
//!         c.x(Qubit::data(1))?;
//!         Ok(())
//!     })
//!     .unwrap();
//!
//! assert_eq!(circuit.gate_count(), 3);
//! ```

pub mod circuit;
pub mod condition;
pub mod error;
pub mod gate;
pub mod operation;
pub mod qubit;

pub use circuit::{Circuit, MAX_QUBITS, RegisterLayout};
pub use condition::{Guard, Requirement};
pub use error::{IrError, IrResult};
pub use gate::{Pauli, StandardGate};
pub use operation::Operation;
pub use qubit::{ClbitId, Operand, QuantumRegisterKind, Qubit, Register, RegisterKind};
