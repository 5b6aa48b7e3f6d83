//! Stabq Local Statevector Simulator
//!
//! Exact single-run simulation of stabq circuits: gates act on the full
//! statevector, measurements sample one outcome and collapse the state, and
//! conditional blocks read the classical register as it stands when they
//! are reached.
//!
//! # Performance
//!
//! | Qubits | Memory |
//! |--------|--------|
//! | 5 (bit-flip code) | 512 B |
//! | 17 (Shor code) | 2 MiB |
//! | 20 (default limit) | 16 MiB |
//!
//! # Example
//!
//! ```rust
//! use stabq_adapter_sim::SimulatorBackend;
//! use stabq_hal::Backend;
//! use stabq_ir::{Circuit, ClbitId, Qubit};
//!
//! let backend = SimulatorBackend::new().with_seed(42);
//!
//! let mut circuit = Circuit::declare_registers("bell", 2, 0, 2).unwrap();
//! circuit.h(Qubit::data(0)).unwrap();
//! circuit.cx(Qubit::data(0), Qubit::data(1)).unwrap();
//! circuit
//!     .measure(&[Qubit::data(0), Qubit::data(1)], &[ClbitId(0), ClbitId(1)])
//!     .unwrap();
//!
//! let result = backend.run(&circuit).unwrap();
//! assert_eq!(result.clbits[0], result.clbits[1]);
//! ```

mod simulator;
mod statevector;

pub use simulator::SimulatorBackend;
