//! Run command implementation.

use anyhow::Result;
use console::style;

use stabq_adapter_sim::SimulatorBackend;
use stabq_codes::{Experiment, ExperimentReport, run_experiment};

/// Execute the run command.
pub fn execute(experiment: &Experiment, format: &str) -> Result<()> {
    let backend = match experiment.seed {
        Some(seed) => SimulatorBackend::new().with_seed(seed),
        None => SimulatorBackend::new(),
    };

    let report = run_experiment(experiment, &backend)?;

    match format.to_lowercase().as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        "table" => print_report(&report),
        other => anyhow::bail!("Unknown format: '{other}'. Available: table, json"),
    }
    Ok(())
}

fn print_report(report: &ExperimentReport) {
    println!(
        "{} {} code, {} state, {}",
        style("→").cyan().bold(),
        style(&report.code).green(),
        style(report.initial_state).yellow(),
        report.error.map_or_else(
            || "no error".to_string(),
            |e| format!("{} error on q{}", e.pauli, e.qubit)
        )
    );
    println!();
    println!("{report}");

    if !report.fired.is_empty() {
        println!();
        println!("Fired corrections:");
        for op in &report.fired {
            println!("  {op}");
        }
    }

    println!();
    if report.recovered {
        println!("{} Logical qubit recovered", style("✓").green().bold());
    } else {
        println!(
            "{} Logical qubit not recovered (fidelity {:.6})",
            style("✗").red().bold(),
            report.fidelity
        );
    }
}
