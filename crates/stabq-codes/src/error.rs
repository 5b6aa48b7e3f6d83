//! Error types for code pipelines.

use stabq_hal::HalError;
use stabq_ir::{IrError, RegisterKind};
use thiserror::Error;

/// Errors raised while building or running a code pipeline.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CodeError {
    /// The registers supplied do not match what the code requires.
    #[error("{code} requires a {register} register of size {expected}, got {got}")]
    InvalidSize {
        /// Name of the code.
        code: String,
        /// Register whose size is wrong.
        register: RegisterKind,
        /// Required size.
        expected: usize,
        /// Supplied size.
        got: usize,
    },

    /// A circuit construction error.
    #[error(transparent)]
    Ir(#[from] IrError),

    /// A backend error.
    #[error(transparent)]
    Hal(#[from] HalError),

    /// An experiment configuration could not be read or parsed.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for code operations.
pub type CodeResult<T> = Result<T, CodeError>;
