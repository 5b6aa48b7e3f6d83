//! Error types for the HAL crate.

use thiserror::Error;

/// Errors that can occur while executing a circuit on a backend.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HalError {
    /// The backend could not execute the circuit.
    #[error("Simulation failed: {0}")]
    Simulation(String),

    /// Circuit exceeds backend capabilities.
    #[error("Circuit exceeds backend capabilities: {0}")]
    CircuitTooLarge(String),

    /// The circuit uses an operation the backend does not support.
    #[error("Unsupported operation: {0}")]
    Unsupported(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Result type for HAL operations.
pub type HalResult<T> = Result<T, HalError>;
