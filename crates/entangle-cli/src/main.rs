//! Entangle Command-Line Interface
//!
//! Runs the textbook protocols of `entangle-demos` on the statevector
//! simulator and prints circuit diagrams and measurement histograms.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

use entangle_demos::circuits::{BellState, Message, Oracle};

mod commands;

use commands::{all, basics, bell, chsh, deutsch_jozsa, superdense, teleport, version};

/// Entangle - exact statevector simulation of small quantum protocols
#[derive(Parser)]
#[command(name = "entangle")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(flatten)]
    run: RunArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Simulator settings shared by every protocol command.
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Number of shots per run
    #[arg(short, long, global = true, env = "ENTANGLE_SHOTS", default_value = "1000")]
    pub shots: usize,

    /// Seed for reproducible runs
    #[arg(long, global = true, env = "ENTANGLE_SEED")]
    pub seed: Option<u64>,

    /// Worker threads for shot sampling
    #[arg(short, long, global = true, env = "ENTANGLE_WORKERS")]
    pub workers: Option<usize>,

    /// Simulator configuration file (JSON)
    #[arg(short, long, global = true, env = "ENTANGLE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Re-execute the circuit for every shot
    #[arg(long, global = true)]
    pub replay: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// NOT, Hadamard and identity on a single qubit
    Basics,

    /// Prepare and measure a Bell state
    Bell {
        /// Bell state (phi+, phi-, psi+, psi-)
        #[arg(long, default_value = "phi+")]
        state: BellState,
    },

    /// Play the CHSH game
    Chsh,

    /// Teleport the state Y^y X^x |0⟩
    Teleport {
        /// X exponent (random if omitted)
        #[arg(short, long)]
        x: Option<f64>,

        /// Y exponent (random if omitted)
        #[arg(short, long)]
        y: Option<f64>,
    },

    /// Send two classical bits with superdense coding
    Superdense {
        /// Message (00, 01, 10, 11)
        #[arg(short, long, default_value = "01")]
        message: Message,
    },

    /// Classify a one-bit function with a single query
    DeutschJozsa {
        /// Oracle (constant0, constant1, balanced, balanced-not)
        #[arg(short, long, default_value = "balanced")]
        oracle: Oracle,
    },

    /// Run every protocol
    All,

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
        .init();

    // Execute command
    let result = match cli.command {
        Commands::Basics => basics::execute(&cli.run),
        Commands::Bell { state } => bell::execute(&cli.run, state),
        Commands::Chsh => chsh::execute(&cli.run),
        Commands::Teleport { x, y } => teleport::execute(&cli.run, x, y),
        Commands::Superdense { message } => superdense::execute(&cli.run, message),
        Commands::DeutschJozsa { oracle } => deutsch_jozsa::execute(&cli.run, oracle),
        Commands::All => all::execute(&cli.run),
        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
