//! Shared helpers for CLI commands.

use std::path::Path;

use anyhow::{Context, Result};

use stabq_codes::{CodeKind, Experiment, InitialState, InjectedError};

/// Parse the `--error` flag: `none` for a clean run, otherwise `<pauli>:<qubit>`.
pub fn parse_error_flag(value: &str) -> Result<Option<InjectedError>> {
    if value.trim().eq_ignore_ascii_case("none") {
        return Ok(None);
    }
    value
        .parse()
        .map(Some)
        .map_err(|e: String| anyhow::anyhow!(e))
}

/// Assemble an experiment from an optional config file and flag overrides.
///
/// Without a config file the code's own demonstration (default state and
/// fault) is the starting point.
pub fn experiment_from_args(
    code: Option<CodeKind>,
    config: Option<&str>,
    initial: Option<InitialState>,
    error: Option<&str>,
    seed: Option<u64>,
) -> Result<Experiment> {
    let mut experiment = match (config, code) {
        (Some(path), _) => {
            if !Path::new(path).exists() {
                anyhow::bail!("File not found: {path}");
            }
            Experiment::from_path(path)
                .with_context(|| format!("Failed to load experiment: {path}"))?
        }
        (None, Some(code)) => Experiment::demo(code),
        (None, None) => anyhow::bail!("Either --code or --config is required"),
    };

    if let (Some(_), Some(code)) = (config, code) {
        experiment.code = code;
    }
    if let Some(state) = initial {
        experiment.initial_state = Some(state);
    }
    if let Some(flag) = error {
        experiment.error = parse_error_flag(flag)?;
    }
    if let Some(seed) = seed {
        experiment.seed = Some(seed);
    }

    tracing::debug!("Experiment: {:?}", experiment);
    Ok(experiment)
}
