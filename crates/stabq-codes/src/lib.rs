//! Stabq Error-Correction Codes
//!
//! Stabilizer codes built as a fixed five-stage pipeline over one circuit:
//!
//! ```text
//!   prepare → encode → inject_error → measure_syndrome → correct → decode
//! ```
//!
//! - [`StabilizerCode`]: what each stage appends
//! - [`CodeCircuit`]: runs the stages in order and freezes the result
//! - [`DecodeTable`]: the two-bit syndrome lookup shared by every correction
//! - [`BitFlipCode`] (3 data / 2 ancilla / 2 bits) and [`ShorCode`]
//!   (9 / 8 / 8)
//! - [`Experiment`] and [`run_experiment`]: configure, simulate and check
//!   recovery against an error-free run
//!
//! # Example
//!
//! ```rust
//! use stabq_adapter_sim::SimulatorBackend;
//! use stabq_codes::{CodeKind, Experiment, run_experiment};
//!
//! let backend = SimulatorBackend::new().with_seed(1);
//! let report = run_experiment(&Experiment::demo(CodeKind::Shor), &backend).unwrap();
//! assert!(report.recovered);
//! ```

pub mod bit_flip;
pub mod code;
pub mod config;
pub mod error;
pub mod experiment;
pub mod shor;
pub mod syndrome;

pub use bit_flip::BitFlipCode;
pub use code::{CodeCircuit, Stage, StabilizerCode};
pub use config::{CodeKind, Experiment, InitialState, InjectedError};
pub use error::{CodeError, CodeResult};
pub use experiment::{ExperimentReport, run_experiment};
pub use shor::ShorCode;
pub use syndrome::{Correction, DecodeTable, Syndrome, SyndromePair, decode_syndrome};
