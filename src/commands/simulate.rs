//! Request handling for one BB84 run: defaults, validation, simulation,
//! match statistic and strategy analysis.

use anyhow::{Context, Result};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::PathBuf;

use crate::ai::analysis::{analyze, strategy_detected, AnalysisMode, EveAnalysis};
use crate::ai::{AiProvider, AiRegistry};
use crate::config::Settings;
use crate::core::QkdError;
use crate::qkd::{match_stat, simulate, Bit, RandomSource, RngSource, SimulationRecord, Strategy};

pub const NARRATION: &str = "This is a simulated quantum key distribution scenario.";

/// Body of a simulation request. Absent fields take the configured defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Bb84Request {
    #[serde(default)]
    pub num_bits: Option<i64>,
    #[serde(default)]
    pub eve_strategy: Option<String>,
    #[serde(default)]
    pub use_mock: Option<bool>,
}

/// Simulation record plus the analysis layered on top of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bb84Response {
    #[serde(flatten)]
    pub record: SimulationRecord,
    pub match_rate: f64,
    pub narration: String,
    pub eve_analysis: EveAnalysis,
}

/// Serves one request. Only invalid lengths are reported as errors; a failing
/// model call still yields a response.
pub fn handle<R: RandomSource + ?Sized>(
    req: &Bb84Request,
    settings: &Settings,
    rng: &mut R,
    provider: Option<&dyn AiProvider>,
) -> Result<Bb84Response, QkdError> {
    let n = QkdError::check_length(req.num_bits.unwrap_or(settings.default_num_bits), settings.max_num_bits)?;
    let strategy = Strategy::from_name(req.eve_strategy.as_deref().unwrap_or(&settings.default_strategy));
    let mode = AnalysisMode::from_mock_flag(req.use_mock.unwrap_or(settings.use_mock));

    let record = simulate(n, strategy, rng);
    let stat = match_stat(&record.alice_bases, &record.eve_bases)?;
    let outcome = analyze(mode, provider, &record, stat.match_rate);
    if outcome.is_fallback() {
        crate::debug_log!("analysis fell back to an unknown guess");
    }
    let eve_analysis = outcome.into_analysis();

    Ok(Bb84Response {
        record,
        match_rate: stat.match_rate,
        narration: NARRATION.to_string(),
        eve_analysis,
    })
}

fn rng_for(seed: Option<u64>) -> RngSource {
    match seed {
        Some(s) => RngSource::seeded(s),
        None => RngSource::from_entropy(),
    }
}

/// `bb84 simulate`: one run, printed as a transcript or JSON.
pub fn run(req: Bb84Request, settings: &Settings, seed: Option<u64>, json: bool) -> Result<()> {
    let registry = AiRegistry::from_settings(settings);
    let mut rng = rng_for(seed);
    let resp = handle(&req, settings, &mut rng, registry.first())?;

    if json {
        println!("{}", serde_json::to_string_pretty(&resp)?);
        return Ok(());
    }

    let requested = req.eve_strategy.as_deref().unwrap_or(&settings.default_strategy);
    print_transcript(&resp, requested);
    Ok(())
}

/// `bb84 request`: JSON request in, JSON response out.
pub fn run_request(file: Option<PathBuf>, settings: &Settings, seed: Option<u64>) -> Result<()> {
    let body = match file {
        Some(p) => std::fs::read_to_string(&p).with_context(|| format!("reading {}", p.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf).context("reading request from stdin")?;
            buf
        }
    };
    let req: Bb84Request = if body.trim().is_empty() {
        Bb84Request::default()
    } else {
        serde_json::from_str(&body).context("parsing request body")?
    };

    let registry = AiRegistry::from_settings(settings);
    let mut rng = rng_for(seed);
    match handle(&req, settings, &mut rng, registry.first()) {
        Ok(resp) => {
            println!("{}", serde_json::to_string_pretty(&resp)?);
            Ok(())
        }
        Err(e) => {
            println!("{}", serde_json::json!({ "error": e.to_string() }));
            std::process::exit(2);
        }
    }
}

fn join<T: ToString>(items: &[T], sep: &str) -> String {
    items.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(sep)
}

fn print_transcript(resp: &Bb84Response, requested: &str) {
    let rec = &resp.record;
    println!("{} {}", "Alice Bits:     ".cyan(), join(&rec.alice_bits, " "));
    println!("{} {}", "Alice Bases:    ".cyan(), join(&rec.alice_bases, " "));
    println!("{} {}", "Eve Bases:      ".magenta(), join(&rec.eve_bases, " "));
    println!("{} {}", "Bob Bases:      ".cyan(), join(&rec.bob_bases, " "));
    println!("{} {}", "Bob Bits:       ".cyan(), join(&rec.bob_bits, " "));
    println!();
    let key: Vec<Bit> = rec.sifted_key();
    println!("Sifted Key ({} bits): {}", key.len(), join(&key, ""));
    println!("Error Positions: {}", join(&rec.error_positions, ", "));
    println!("Errors: {} of {} sifted bits", rec.error_count(), key.len());
    println!("Error Rate: {}%", rec.error_rate);
    println!("Match Rate (Alice/Eve): {}%", resp.match_rate);
    if rec.is_secure {
        println!("Secure? {}", "YES".green().bold());
    } else {
        println!("Secure? {}", "NO".red().bold());
    }
    println!();
    println!("{}", resp.narration);
    println!("AI Guess: {}", resp.eve_analysis.strategy_guess.yellow());
    println!("Justification: {}", resp.eve_analysis.justification);
    println!("True Strategy: {}", requested.to_uppercase());
    if strategy_detected(&resp.eve_analysis.strategy_guess, requested) {
        println!("{}", "AI detected Eve's strategy!".green());
    } else {
        println!("{}", "AI was fooled by Eve.".red());
    }
}
