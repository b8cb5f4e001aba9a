use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "bb84",
    about = "BB84 quantum key distribution simulator with eavesdropper analysis",
    version,
    propagate_version = true,
    disable_help_subcommand = true
)]
pub struct Bb84Cli {
    /// Global: path to config (TOML); default: ~/.bb84/config.toml
    #[arg(long = "config", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run one simulation and print the transcript
    ///
    /// Examples:
    ///   bb84 simulate -n 32 -s expert
    ///   bb84 simulate --seed 7 --json
    Simulate {
        /// Number of qubits (default from config, 16)
        #[arg(short = 'n', long = "num-bits", value_name = "N", allow_negative_numbers = true)]
        num_bits: Option<i64>,

        /// Eavesdropper strategy: beginner | intermediate | expert (anything else: random)
        #[arg(short = 's', long = "strategy", value_name = "NAME")]
        strategy: Option<String>,

        /// Seed the random source for a reproducible run
        #[arg(long = "seed", value_name = "SEED")]
        seed: Option<u64>,

        /// Use the canned analysis instead of the model
        #[arg(long = "mock", action = ArgAction::SetTrue, conflicts_with = "live")]
        mock: bool,

        /// Query the model for the analysis
        #[arg(long = "live", action = ArgAction::SetTrue)]
        live: bool,

        /// Print the JSON response instead of the transcript
        #[arg(long = "json", action = ArgAction::SetTrue)]
        json: bool,
    },

    /// Read a JSON request (stdin or --file) and print the JSON response
    Request {
        #[arg(long = "file", value_name = "FILE")]
        file: Option<PathBuf>,
        #[arg(long = "seed", value_name = "SEED")]
        seed: Option<u64>,
    },

    /// Repeat simulations for one strategy and summarize detection
    Sweep {
        #[arg(short = 'n', long = "num-bits", value_name = "N", default_value_t = 64, allow_negative_numbers = true)]
        num_bits: i64,
        #[arg(short = 's', long = "strategy", value_name = "NAME", default_value = "intermediate")]
        strategy: String,
        #[arg(long = "runs", value_name = "K", default_value_t = 100)]
        runs: usize,
        #[arg(long = "seed", value_name = "SEED")]
        seed: Option<u64>,
        #[arg(long = "json", action = ArgAction::SetTrue)]
        json: bool,
    },

    /// Show effective settings; --init writes a default config file
    Config {
        #[arg(long = "init", action = ArgAction::SetTrue)]
        init: bool,
    },
}

impl Command {
    /// `Some(flag)` when --mock / --live was given on `simulate`.
    pub fn mock_override(mock: bool, live: bool) -> Option<bool> {
        match (mock, live) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}
