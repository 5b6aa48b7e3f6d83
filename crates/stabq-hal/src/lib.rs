//! Stabq Hardware Abstraction Layer
//!
//! Defines the [`Backend`] trait that executes a finished circuit and the
//! result types every backend reports:
//!
//! - [`StateVector`]: final amplitudes of all qubits, labelled by basis state
//! - [`ExecutionResult`]: state, classical register and the gates that fired
//!   inside satisfied conditional blocks
//! - [`Capabilities`]: qubit limit, gate set and feature flags

pub mod backend;
pub mod capability;
pub mod error;
pub mod result;

pub use backend::{Backend, ValidationResult};
pub use capability::{Capabilities, DYNAMIC_CIRCUITS};
pub use error::{HalError, HalResult};
pub use result::{AMPLITUDE_EPSILON, ExecutionResult, QubitState, STATE_TOLERANCE, StateVector};
