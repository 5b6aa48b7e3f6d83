//! Stabq Command-Line Interface
//!
//! Build and simulate stabilizer error-correction pipelines.
//!
//! ```text
//! stabq run --code shor --error y:4
//! stabq run --config experiment.yaml --format json
//! stabq circuit --code bit-flip
//! ```

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

use stabq_codes::{CodeKind, InitialState};

mod commands;

use commands::{circuit, common, run, version};

/// Stabq - stabilizer error-correction pipelines on a statevector simulator
#[derive(Parser)]
#[command(name = "stabq")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build, simulate and decode one experiment
    Run {
        /// Code to run (bit-flip, shor)
        #[arg(short, long, required_unless_present = "config")]
        code: Option<CodeKind>,

        /// Logical state to protect (zero, one, plus, minus)
        #[arg(short, long)]
        initial: Option<InitialState>,

        /// Fault to inject as <pauli>:<qubit>, or "none"
        #[arg(short, long)]
        error: Option<String>,

        /// Measurement RNG seed
        #[arg(short, long)]
        seed: Option<u64>,

        /// Experiment file (YAML or JSON); flags override its values
        #[arg(long)]
        config: Option<String>,

        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Print the circuit a code builds
    Circuit {
        /// Code to build (bit-flip, shor)
        #[arg(short, long)]
        code: CodeKind,

        /// Logical state to protect (zero, one, plus, minus)
        #[arg(short, long)]
        initial: Option<InitialState>,

        /// Fault to inject as <pauli>:<qubit>, or "none"
        #[arg(short, long)]
        error: Option<String>,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    let result = match cli.command {
        Commands::Run {
            code,
            initial,
            error,
            seed,
            config,
            format,
        } => common::experiment_from_args(
            code,
            config.as_deref(),
            initial,
            error.as_deref(),
            seed,
        )
        .and_then(|experiment| run::execute(&experiment, &format)),

        Commands::Circuit {
            code,
            initial,
            error,
            format,
        } => common::experiment_from_args(Some(code), None, initial, error.as_deref(), None)
            .and_then(|experiment| circuit::execute(&experiment, &format)),

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
