//! Experiment configuration.
//!
//! An [`Experiment`] selects a code, the logical state to protect, the
//! fault to inject and an optional RNG seed. It can be written as YAML:
//!
//! ```yaml
//! code: shor
//! initial_state: plus
//! error: y:4
//! seed: 7
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use stabq_hal::QubitState;
use stabq_ir::{Circuit, IrResult, Pauli, Qubit};

use crate::bit_flip::BitFlipCode;
use crate::code::StabilizerCode;
use crate::error::{CodeError, CodeResult};
use crate::shor::ShorCode;

/// Logical state prepared on data qubit 0 before encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InitialState {
    /// `|0⟩`
    Zero,
    /// `|1⟩`
    One,
    /// `|+⟩`
    Plus,
    /// `|−⟩`
    Minus,
}

impl InitialState {
    /// Append the preparation gates for this state.
    pub fn prepare(self, circuit: &mut Circuit, qubit: Qubit) -> IrResult<()> {
        match self {
            InitialState::Zero => {}
            InitialState::One => {
                circuit.x(qubit)?;
            }
            InitialState::Plus => {
                circuit.h(qubit)?;
            }
            InitialState::Minus => {
                circuit.x(qubit)?.h(qubit)?;
            }
        }
        Ok(())
    }

    /// The single-qubit state this preparation produces.
    pub fn state(self) -> QubitState {
        match self {
            InitialState::Zero => QubitState::zero(),
            InitialState::One => QubitState::one(),
            InitialState::Plus => QubitState::plus(),
            InitialState::Minus => QubitState::minus(),
        }
    }
}

impl fmt::Display for InitialState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            InitialState::Zero => "zero",
            InitialState::One => "one",
            InitialState::Plus => "plus",
            InitialState::Minus => "minus",
        };
        f.write_str(s)
    }
}

impl FromStr for InitialState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "zero" | "0" => Ok(InitialState::Zero),
            "one" | "1" => Ok(InitialState::One),
            "plus" | "+" => Ok(InitialState::Plus),
            "minus" | "-" => Ok(InitialState::Minus),
            other => Err(format!(
                "Unknown initial state '{other}', expected zero, one, plus or minus"
            )),
        }
    }
}

/// A single Pauli fault on one data qubit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct InjectedError {
    /// The fault.
    pub pauli: Pauli,
    /// Data qubit index.
    pub qubit: u32,
}

impl InjectedError {
    /// Create a fault.
    pub const fn new(pauli: Pauli, qubit: u32) -> Self {
        Self { pauli, qubit }
    }

    /// Append the fault to a circuit.
    pub fn apply(&self, circuit: &mut Circuit) -> IrResult<()> {
        circuit.pauli(self.pauli, Qubit::data(self.qubit))?;
        Ok(())
    }
}

impl fmt::Display for InjectedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.pauli, self.qubit)
    }
}

impl FromStr for InjectedError {
    type Err = String;

    /// Parse `pauli:qubit`, e.g. `x:1`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (pauli, qubit) = s
            .split_once(':')
            .ok_or_else(|| format!("Invalid error '{s}', expected <pauli>:<qubit> such as x:1"))?;
        let pauli = pauli.parse()?;
        let qubit = qubit
            .trim()
            .parse()
            .map_err(|e| format!("Invalid qubit index '{}': {e}", qubit.trim()))?;
        Ok(Self { pauli, qubit })
    }
}

impl TryFrom<String> for InjectedError {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<InjectedError> for String {
    fn from(e: InjectedError) -> Self {
        e.to_string()
    }
}

/// The bundled codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CodeKind {
    /// Three-qubit repetition code against bit flips.
    BitFlip,
    /// Nine-qubit Shor code.
    Shor,
}

impl CodeKind {
    /// Construct the code with its default initial state and fault.
    pub fn default_code(self) -> Box<dyn StabilizerCode> {
        match self {
            CodeKind::BitFlip => Box::new(BitFlipCode::default()),
            CodeKind::Shor => Box::new(ShorCode::default()),
        }
    }

    /// Construct the code with an explicit initial state and fault.
    pub fn code(
        self,
        initial_state: InitialState,
        error: Option<InjectedError>,
    ) -> Box<dyn StabilizerCode> {
        match self {
            CodeKind::BitFlip => Box::new(
                BitFlipCode::new()
                    .with_initial_state(initial_state)
                    .with_error(error),
            ),
            CodeKind::Shor => Box::new(
                ShorCode::new()
                    .with_initial_state(initial_state)
                    .with_error(error),
            ),
        }
    }
}

impl fmt::Display for CodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodeKind::BitFlip => f.write_str("bit-flip"),
            CodeKind::Shor => f.write_str("shor"),
        }
    }
}

impl FromStr for CodeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bit-flip" | "bit_flip" | "bitflip" => Ok(CodeKind::BitFlip),
            "shor" => Ok(CodeKind::Shor),
            other => Err(format!("Unknown code '{other}', expected bit-flip or shor")),
        }
    }
}

/// One error-correction experiment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Experiment {
    /// Code to run.
    pub code: CodeKind,
    /// Logical state to protect; the code's default when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_state: Option<InitialState>,
    /// Fault to inject; a clean run when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<InjectedError>,
    /// Measurement RNG seed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Experiment {
    /// A clean run of `code` from its default initial state.
    pub fn new(code: CodeKind) -> Self {
        Self {
            code,
            initial_state: None,
            error: None,
            seed: None,
        }
    }

    /// The code's built-in demonstration: default state and default fault.
    pub fn demo(code: CodeKind) -> Self {
        let default = code.default_code();
        Self {
            code,
            initial_state: Some(default.initial_state()),
            error: default.injected_error(),
            seed: None,
        }
    }

    /// Set the initial state.
    #[must_use]
    pub fn with_initial_state(mut self, state: InitialState) -> Self {
        self.initial_state = Some(state);
        self
    }

    /// Set the injected fault.
    #[must_use]
    pub fn with_error(mut self, error: Option<InjectedError>) -> Self {
        self.error = error;
        self
    }

    /// Set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Parse from YAML.
    pub fn from_yaml_str(s: &str) -> CodeResult<Self> {
        serde_yaml_ng::from_str(s).map_err(|e| CodeError::Config(format!("Invalid YAML: {e}")))
    }

    /// Parse from JSON.
    pub fn from_json_str(s: &str) -> CodeResult<Self> {
        serde_json::from_str(s).map_err(|e| CodeError::Config(format!("Invalid JSON: {e}")))
    }

    /// Load from a file; `.json` files are parsed as JSON, anything else as
    /// YAML.
    pub fn from_path(path: impl AsRef<Path>) -> CodeResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| CodeError::Config(format!("Cannot read {}: {e}", path.display())))?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&content),
            _ => Self::from_yaml_str(&content),
        }
    }

    /// The initial state this experiment prepares.
    pub fn resolved_initial_state(&self) -> InitialState {
        self.initial_state
            .unwrap_or_else(|| self.code.default_code().initial_state())
    }

    /// Build the configured code.
    pub fn code(&self) -> Box<dyn StabilizerCode> {
        self.code.code(self.resolved_initial_state(), self.error)
    }

    /// The same experiment without the fault.
    pub fn reference(&self) -> Self {
        Self {
            error: None,
            initial_state: Some(self.resolved_initial_state()),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_injected_error() {
        let e: InjectedError = "x:1".parse().unwrap();
        assert_eq!(e, InjectedError::new(Pauli::X, 1));
        assert_eq!("Z: 4".parse::<InjectedError>().unwrap().qubit, 4);
        assert!("x1".parse::<InjectedError>().is_err());
        assert!("h:1".parse::<InjectedError>().is_err());
        assert!("x:-1".parse::<InjectedError>().is_err());
        assert_eq!(e.to_string(), "x:1");
    }

    #[test]
    fn test_code_kind_names() {
        assert_eq!("bit-flip".parse::<CodeKind>().unwrap(), CodeKind::BitFlip);
        assert_eq!("Shor".parse::<CodeKind>().unwrap(), CodeKind::Shor);
        assert_eq!(CodeKind::BitFlip.to_string(), "bit-flip");
        assert!("steane".parse::<CodeKind>().is_err());
    }

    #[test]
    fn test_experiment_from_yaml() {
        let yaml = "code: shor\ninitial_state: plus\nerror: y:4\nseed: 7\n";
        let exp = Experiment::from_yaml_str(yaml).unwrap();
        assert_eq!(exp.code, CodeKind::Shor);
        assert_eq!(exp.initial_state, Some(InitialState::Plus));
        assert_eq!(exp.error, Some(InjectedError::new(Pauli::Y, 4)));
        assert_eq!(exp.seed, Some(7));
    }

    #[test]
    fn test_experiment_defaults() {
        let exp = Experiment::from_json_str(r#"{"code": "bit-flip"}"#).unwrap();
        assert_eq!(exp.error, None);
        assert_eq!(exp.resolved_initial_state(), InitialState::Plus);

        let shor = Experiment::new(CodeKind::Shor);
        assert_eq!(shor.resolved_initial_state(), InitialState::One);
    }

    #[test]
    fn test_experiment_rejects_bad_config() {
        assert!(matches!(
            Experiment::from_yaml_str("code: steane\n"),
            Err(CodeError::Config(_))
        ));
        assert!(matches!(
            Experiment::from_yaml_str("code: shor\nerror: q:1\n"),
            Err(CodeError::Config(_))
        ));
        assert!(matches!(
            Experiment::from_yaml_str("code: shor\nshots: 10\n"),
            Err(CodeError::Config(_))
        ));
    }

    #[test]
    fn test_demo_matches_defaults() {
        let demo = Experiment::demo(CodeKind::BitFlip);
        assert_eq!(demo.error, Some(InjectedError::new(Pauli::X, 1)));
        let demo = Experiment::demo(CodeKind::Shor);
        assert_eq!(demo.error, Some(InjectedError::new(Pauli::Z, 0)));
        assert_eq!(demo.reference().error, None);
    }

    #[test]
    fn test_experiment_serializes() {
        let exp = Experiment::demo(CodeKind::Shor).with_seed(3);
        let json = serde_json::to_string(&exp).unwrap();
        assert_eq!(
            json,
            r#"{"code":"shor","initial_state":"one","error":"z:0","seed":3}"#
        );
        assert_eq!(Experiment::from_json_str(&json).unwrap(), exp);
    }
}
