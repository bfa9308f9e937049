//! zxbench Command-Line Interface
//!
//! Builds random Toffoli-heavy circuits as ZH diagrams and benchmarks
//! external solvers on them.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::common::CircuitArgs;
use commands::{generate, inspect, run, show};

/// zxbench - exact Toffoli gadget diagrams and solver benchmarks
#[derive(Parser)]
#[command(name = "zxbench")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build one benchmark diagram and write it in the solver format
    Generate {
        #[command(flatten)]
        circuit: CircuitArgs,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the gate grid and diagram statistics for one circuit
    Show {
        #[command(flatten)]
        circuit: CircuitArgs,
    },

    /// Print statistics for a serialized diagram file
    Inspect {
        /// Diagram file
        file: PathBuf,
    },

    /// Run the benchmark grid against the solver
    Run {
        /// YAML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Solver executable
        #[arg(long)]
        solver: Option<PathBuf>,

        /// Tasks in flight at once
        #[arg(short, long)]
        workers: Option<usize>,

        /// Per-invocation timeout in seconds
        #[arg(short, long)]
        timeout: Option<u64>,

        /// Random circuits per grid point
        #[arg(long)]
        samples: Option<usize>,

        /// Seed for the per-task seeds
        #[arg(long)]
        master_seed: Option<u64>,

        /// Bound only the WITHOUT_SD invocation
        #[arg(long)]
        second_only_timeout: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    // Execute command
    let result = match cli.command {
        Commands::Generate { circuit, output } => generate::execute(&circuit, output.as_deref()),

        Commands::Show { circuit } => show::execute(&circuit),

        Commands::Inspect { file } => inspect::execute(&file),

        Commands::Run {
            config,
            solver,
            workers,
            timeout,
            samples,
            master_seed,
            second_only_timeout,
        } => {
            let overrides = run::Overrides {
                solver,
                workers,
                timeout,
                samples,
                master_seed,
                second_only_timeout,
            };
            run::execute(config.as_deref(), overrides).await
        }
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
