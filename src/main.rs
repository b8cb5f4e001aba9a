//! `bb84` — simulate BB84 key exchanges and guess the eavesdropper's strategy.

use bb84_sim::cli::{Bb84Cli, Command};
use bb84_sim::commands;
use bb84_sim::commands::simulate::Bb84Request;
use bb84_sim::config;
use bb84_sim::qkd::Strategy;
use clap::Parser; // trait import enables Bb84Cli::parse()

fn main() -> anyhow::Result<()> {
    let args = Bb84Cli::parse();

    // A fresh --init target does not exist yet, so skip loading it.
    if let Command::Config { init: true } = args.cmd {
        return commands::config::main(&args.config, &config::Settings::default(), true);
    }

    let settings = config::load(&args.config)?;

    match args.cmd {
        Command::Simulate { num_bits, strategy, seed, mock, live, json } => {
            let req = Bb84Request {
                num_bits,
                eve_strategy: strategy,
                use_mock: Command::mock_override(mock, live),
            };
            commands::simulate::run(req, &settings, seed, json)
        }

        Command::Request { file, seed } => commands::simulate::run_request(file, &settings, seed),

        Command::Sweep { num_bits, strategy, runs, seed, json } => commands::sweep::run(
            num_bits,
            settings.max_num_bits,
            Strategy::from_name(&strategy),
            runs,
            seed,
            json,
        ),

        Command::Config { init } => commands::config::main(&args.config, &settings, init),
    }
}
