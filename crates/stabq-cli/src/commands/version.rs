//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - stabilizer error-correction pipelines",
        style("Stabq").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  stabq-ir           Circuit model with classically guarded blocks");
    println!("  stabq-hal          Backend contract and result types");
    println!("  stabq-adapter-sim  Statevector simulator");
    println!("  stabq-codes        Bit-flip and Shor code pipelines");
    println!();
    println!("License: {}", style("Apache-2.0").dim());
}
