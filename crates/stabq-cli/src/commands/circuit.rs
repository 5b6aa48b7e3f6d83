//! Circuit command implementation.

use anyhow::Result;
use console::style;

use stabq_codes::{CodeCircuit, Experiment};

/// Execute the circuit command.
pub fn execute(experiment: &Experiment, format: &str) -> Result<()> {
    let code = experiment.code();
    let built = CodeCircuit::build(code.as_ref())?;

    match format.to_lowercase().as_str() {
        "json" => println!("{}", built.circuit().to_json()?),
        "text" => {
            let circuit = built.circuit();
            eprintln!(
                "{} {}: {} qubits, {} clbits, {} gates",
                style("→").cyan().bold(),
                style(built.code_name()).green(),
                circuit.num_qubits(),
                circuit.num_clbits(),
                circuit.gate_count()
            );
            print!("{built}");
        }
        other => anyhow::bail!("Unknown format: '{other}'. Available: text, json"),
    }
    Ok(())
}
