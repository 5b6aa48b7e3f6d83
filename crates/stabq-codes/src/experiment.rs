//! Running an experiment end to end.

use serde::Serialize;
use std::fmt;
use tracing::{debug, info, instrument, warn};

use stabq_hal::{Backend, ExecutionResult, QubitState, STATE_TOLERANCE};
use stabq_ir::Operation;

use crate::code::CodeCircuit;
use crate::config::{Experiment, InitialState, InjectedError};
use crate::error::CodeResult;
use crate::syndrome::{Correction, Syndrome, decode_syndrome};

/// Outcome of one experiment.
#[derive(Debug, Clone, Serialize)]
pub struct ExperimentReport {
    /// Name of the code.
    pub code: String,
    /// Protected logical state.
    pub initial_state: InitialState,
    /// Injected fault, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<InjectedError>,
    /// Measured syndrome bits.
    pub syndrome: Syndrome,
    /// Corrections the decode tables select for the syndrome.
    pub corrections: Vec<Correction>,
    /// Gates that fired inside satisfied conditional blocks during the run.
    pub fired: Vec<Operation>,
    /// Logical qubit after decoding, if it factors out of the register.
    pub logical: Option<QubitState>,
    /// Logical qubit of the error-free run.
    pub expected: Option<QubitState>,
    /// Overlap of `logical` with `expected`.
    pub fidelity: f64,
    /// Whether the logical qubit matches the error-free run.
    pub recovered: bool,
    /// Whether the whole register, ancillas included, ends in the state of
    /// the error-free run up to a global phase. Any syndrome other than
    /// all-zero leaves the ancillas marked, so this is stricter than
    /// `recovered`.
    pub matches_reference: bool,
    /// Simulation time of the faulty run, in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_time_ms: Option<u64>,
}

impl fmt::Display for ExperimentReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "code:        {}", self.code)?;
        writeln!(f, "initial:     {}", self.initial_state)?;
        match &self.error {
            Some(e) => writeln!(f, "error:       {e}")?,
            None => writeln!(f, "error:       none")?,
        }
        writeln!(f, "syndrome:    {}", self.syndrome)?;
        if self.corrections.is_empty() {
            writeln!(f, "corrections: none")?;
        } else {
            let list: Vec<_> = self.corrections.iter().map(ToString::to_string).collect();
            writeln!(f, "corrections: {}", list.join(", "))?;
        }
        if let Some(logical) = &self.logical {
            writeln!(f, "logical:     {logical}")?;
        }
        writeln!(f, "fidelity:    {:.6}", self.fidelity)?;
        writeln!(
            f,
            "register:    {}",
            if self.matches_reference {
                "identical to error-free run"
            } else {
                "differs from error-free run"
            }
        )?;
        write!(
            f,
            "recovered:   {}",
            if self.recovered { "yes" } else { "no" }
        )
    }
}

/// Build, run and decode `experiment`, then compare the decoded logical
/// qubit with an error-free run of the same code and initial state.
#[instrument(skip_all, fields(code = %experiment.code))]
pub fn run_experiment(
    experiment: &Experiment,
    backend: &dyn Backend,
) -> CodeResult<ExperimentReport> {
    let code = experiment.code();
    let built = CodeCircuit::build(code.as_ref())?;
    let result = backend.run(built.circuit())?;

    let syndrome = Syndrome::from_bits(result.clbits.clone());
    let corrections = decode_syndrome(built.decode_tables(), &syndrome);
    debug!(
        "syndrome {} decodes to {} correction(s)",
        syndrome,
        corrections.len()
    );

    let reference = experiment.reference().code();
    let reference_result = backend.run(CodeCircuit::build(reference.as_ref())?.circuit())?;

    let logical = logical_qubit(&result);
    let expected = logical_qubit(&reference_result);
    let fidelity = match (&logical, &expected) {
        (Some(l), Some(e)) => l.fidelity(e),
        _ => {
            warn!("logical qubit is entangled with the rest of the register");
            0.0
        }
    };
    let recovered = (1.0 - fidelity).abs() < STATE_TOLERANCE;
    let matches_reference = result
        .state
        .same_up_to_global_phase(&reference_result.state);

    info!(
        "{} with {}: syndrome {}, recovered = {}",
        code.name(),
        experiment
            .error
            .map_or_else(|| "no error".to_string(), |e| e.to_string()),
        syndrome,
        recovered
    );

    Ok(ExperimentReport {
        code: code.name().to_string(),
        initial_state: code.initial_state(),
        error: code.injected_error(),
        syndrome,
        corrections,
        fired: result.fired,
        logical,
        expected,
        fidelity,
        recovered,
        matches_reference,
        execution_time_ms: result.execution_time_ms,
    })
}

/// State of data qubit 0 after decoding.
fn logical_qubit(result: &ExecutionResult) -> Option<QubitState> {
    result.state.factor_qubit(0)
}
