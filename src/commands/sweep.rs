//! Repeated runs for one strategy, summarized.
//!
//! Shows how often each eavesdropper strategy trips the QBER threshold at a
//! given qubit count.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use crate::core::QkdError;
use crate::qkd::protocol::round2;
use crate::qkd::{match_stat, simulate, RandomSource, RngSource, Strategy};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepSummary {
    pub strategy: String,
    pub num_bits: usize,
    pub runs: usize,
    pub mean_error_rate: f64,
    pub mean_match_rate: f64,
    /// Fraction of runs flagged insecure, as a percentage.
    pub detection_rate: f64,
    pub mean_sifted_len: f64,
}

pub fn sweep<R: RandomSource + ?Sized>(
    n: usize,
    strategy: Strategy,
    runs: usize,
    rng: &mut R,
) -> Result<SweepSummary, QkdError> {
    if n == 0 {
        return Err(QkdError::InvalidLength(0));
    }
    if runs == 0 {
        return Err(QkdError::EmptySequence);
    }
    let (mut qber, mut matches, mut flagged, mut sifted) = (0.0, 0.0, 0usize, 0usize);
    for _ in 0..runs {
        let rec = simulate(n, strategy, rng);
        qber += rec.error_rate;
        matches += match_stat(&rec.alice_bases, &rec.eve_bases)?.match_rate;
        sifted += rec.matching_indices.len();
        if !rec.is_secure {
            flagged += 1;
        }
    }
    let k = runs as f64;
    Ok(SweepSummary {
        strategy: strategy.name().to_string(),
        num_bits: n,
        runs,
        mean_error_rate: round2(qber / k),
        mean_match_rate: round2(matches / k),
        detection_rate: round2(100.0 * flagged as f64 / k),
        mean_sifted_len: round2(sifted as f64 / k),
    })
}

/// `bb84 sweep`
pub fn run(num_bits: i64, max: usize, strategy: Strategy, runs: usize, seed: Option<u64>, json: bool) -> Result<()> {
    let n = QkdError::check_length(num_bits, max)?;
    let mut rng = match seed {
        Some(s) => RngSource::seeded(s),
        None => RngSource::from_entropy(),
    };
    let summary = sweep(n, strategy, runs, &mut rng)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }
    println!("{} {} x {} qubits", "Strategy:".cyan(), summary.strategy, summary.num_bits);
    println!("Runs: {}", summary.runs);
    println!("Mean sifted length: {}", summary.mean_sifted_len);
    println!("Mean error rate: {}%", summary.mean_error_rate);
    println!("Mean match rate (Alice/Eve): {}%", summary.mean_match_rate);
    println!("Eavesdropper detected in {}% of runs", summary.detection_rate.to_string().bold());
    Ok(())
}
