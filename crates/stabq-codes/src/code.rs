//! The stabilizer-code contract and the pipeline orchestrator.
//!
//! A [`StabilizerCode`] supplies the content of each pipeline stage;
//! [`CodeCircuit`] owns the circuit, runs the stages in the fixed order of
//! [`Stage::PIPELINE`] and hands out a read-only view once it is done.

use serde::Serialize;
use std::fmt;
use std::ops::Range;
use tracing::{debug, info};

use stabq_ir::{Circuit, Operation, Qubit, RegisterKind, RegisterLayout};

use crate::config::{InitialState, InjectedError};
use crate::error::{CodeError, CodeResult};
use crate::syndrome::DecodeTable;

/// One stage of the error-correction pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Prepare the logical state on data qubit 0.
    Prepare,
    /// Spread the logical state across the data register.
    Encode,
    /// Apply the configured fault.
    InjectError,
    /// Extract parities into ancillas and measure them.
    MeasureSyndrome,
    /// Apply guarded corrections.
    Correct,
    /// Undo the encoding.
    Decode,
}

impl Stage {
    /// Execution order of the stages.
    pub const PIPELINE: [Stage; 6] = [
        Stage::Prepare,
        Stage::Encode,
        Stage::InjectError,
        Stage::MeasureSyndrome,
        Stage::Correct,
        Stage::Decode,
    ];

    /// Name of the stage.
    pub fn name(self) -> &'static str {
        match self {
            Stage::Prepare => "prepare",
            Stage::Encode => "encode",
            Stage::InjectError => "inject_error",
            Stage::MeasureSyndrome => "measure_syndrome",
            Stage::Correct => "correct",
            Stage::Decode => "decode",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A stabilizer code expressed as a fixed sequence of circuit stages.
///
/// Each stage method appends to the circuit it is given and must only touch
/// registers within [`layout`](StabilizerCode::layout). The stages are never
/// called directly; [`CodeCircuit::build`] runs them in order.
pub trait StabilizerCode {
    /// Short name, e.g. `"shor"`.
    fn name(&self) -> &str;

    /// Register sizes the code requires.
    fn layout(&self) -> RegisterLayout;

    /// Logical state prepared before encoding.
    fn initial_state(&self) -> InitialState;

    /// Fault applied by [`inject_error`](StabilizerCode::inject_error).
    fn injected_error(&self) -> Option<InjectedError>;

    /// Prepare the logical state on data qubit 0.
    fn prepare(&self, circuit: &mut Circuit) -> CodeResult<()> {
        self.initial_state().prepare(circuit, Qubit::data(0))?;
        Ok(())
    }

    /// Encode data qubit 0 into the data register.
    fn encode(&self, circuit: &mut Circuit) -> CodeResult<()>;

    /// Apply the configured fault, if any.
    fn inject_error(&self, circuit: &mut Circuit) -> CodeResult<()> {
        if let Some(error) = self.injected_error() {
            error.apply(circuit)?;
        }
        Ok(())
    }

    /// Measure the stabilizers into the classical register.
    fn measure_syndrome(&self, circuit: &mut Circuit) -> CodeResult<()>;

    /// Lookup tables mapping syndrome bits to corrections.
    fn decode_tables(&self) -> Vec<DecodeTable>;

    /// Append a guarded correction for every non-zero sub-syndrome.
    fn correct(&self, circuit: &mut Circuit) -> CodeResult<()> {
        for table in self.decode_tables() {
            table.append_to(circuit)?;
        }
        Ok(())
    }

    /// Map the encoded state back onto data qubit 0.
    fn decode(&self, circuit: &mut Circuit) -> CodeResult<()>;
}

/// A fully built pipeline circuit.
///
/// Construction runs every stage exactly once; afterwards the circuit can
/// only be read.
#[derive(Debug, Clone)]
pub struct CodeCircuit {
    code: String,
    circuit: Circuit,
    spans: [Range<usize>; 6],
    tables: Vec<DecodeTable>,
}

impl CodeCircuit {
    /// Build the pipeline on the registers the code asks for.
    pub fn build<C: StabilizerCode + ?Sized>(code: &C) -> CodeResult<Self> {
        Self::build_with_layout(code, code.layout())
    }

    /// Build the pipeline on caller-supplied registers.
    ///
    /// Fails with [`CodeError::InvalidSize`] unless `layout` matches the
    /// code's requirement exactly.
    pub fn build_with_layout<C: StabilizerCode + ?Sized>(
        code: &C,
        layout: RegisterLayout,
    ) -> CodeResult<Self> {
        check_layout(code.name(), code.layout(), layout)?;

        let mut circuit = Circuit::with_layout(code.name(), layout)?;
        let mut spans: [Range<usize>; 6] = Default::default();

        for stage in Stage::PIPELINE {
            let start = circuit.len();
            match stage {
                Stage::Prepare => code.prepare(&mut circuit)?,
                Stage::Encode => code.encode(&mut circuit)?,
                Stage::InjectError => code.inject_error(&mut circuit)?,
                Stage::MeasureSyndrome => code.measure_syndrome(&mut circuit)?,
                Stage::Correct => code.correct(&mut circuit)?,
                Stage::Decode => code.decode(&mut circuit)?,
            }
            spans[stage.index()] = start..circuit.len();
            debug!(
                "{}: {} appended {} operation(s)",
                code.name(),
                stage,
                circuit.len() - start
            );
        }

        info!(
            "Built {} circuit: {} with {} gates",
            code.name(),
            layout,
            circuit.gate_count()
        );

        Ok(Self {
            code: code.name().to_string(),
            circuit,
            spans,
            tables: code.decode_tables(),
        })
    }

    /// Name of the code that produced this circuit.
    pub fn code_name(&self) -> &str {
        &self.code
    }

    /// The finished circuit.
    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    /// Operations appended by one stage.
    pub fn stage(&self, stage: Stage) -> &[Operation] {
        &self.circuit.operations()[self.span(stage)]
    }

    /// Top-level operation range of one stage.
    pub fn span(&self, stage: Stage) -> Range<usize> {
        self.spans[stage.index()].clone()
    }

    /// Tables used by the correction stage.
    pub fn decode_tables(&self) -> &[DecodeTable] {
        &self.tables
    }
}

impl fmt::Display for CodeCircuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "// {} {}", self.code, self.circuit.layout())?;
        for stage in Stage::PIPELINE {
            let ops = self.stage(stage);
            if ops.is_empty() {
                continue;
            }
            writeln!(f, "// {stage}")?;
            for op in ops {
                writeln!(f, "{op}")?;
            }
        }
        Ok(())
    }
}

fn check_layout(code: &str, expected: RegisterLayout, got: RegisterLayout) -> CodeResult<()> {
    let checks = [
        (RegisterKind::Data, expected.num_data, got.num_data),
        (RegisterKind::Ancilla, expected.num_ancilla, got.num_ancilla),
        (RegisterKind::Classical, expected.num_clbits, got.num_clbits),
    ];
    match checks.into_iter().find(|(_, e, g)| e != g) {
        Some((register, expected, got)) => Err(CodeError::InvalidSize {
            code: code.to_string(),
            register,
            expected,
            got,
        }),
        None => Ok(()),
    }
}
