//! Strategy inference: ask a language model which strategy the eavesdropper
//! used, and turn whatever comes back into an [`EveAnalysis`].
//!
//! Nothing here returns an error. A failed model call degrades to an
//! `Unknown` guess carrying the failure text, so the simulation result is
//! always delivered.

use serde::{Deserialize, Serialize};

use super::AiProvider;
use crate::qkd::{Basis, SimulationRecord};

/// The model's verdict, treated as opaque text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EveAnalysis {
    pub strategy_guess: String,
    pub justification: String,
}

impl EveAnalysis {
    /// Canned answer used in mock mode.
    pub fn mock() -> Self {
        Self {
            strategy_guess: "Intermediate".to_string(),
            justification: "Eve's basis choices appear random, matching Alice's about 50% of the time."
                .to_string(),
        }
    }

    pub fn unknown(reason: impl Into<String>) -> Self {
        Self { strategy_guess: "Unknown".to_string(), justification: reason.into() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisMode {
    Mock,
    Live,
}

impl AnalysisMode {
    pub fn from_mock_flag(use_mock: bool) -> Self {
        if use_mock { AnalysisMode::Mock } else { AnalysisMode::Live }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisOutcome {
    /// Canned or model-produced answer.
    Parsed(EveAnalysis),
    /// The model could not be reached or failed.
    Fallback(EveAnalysis),
}

impl AnalysisOutcome {
    pub fn into_analysis(self) -> EveAnalysis {
        match self {
            AnalysisOutcome::Parsed(a) | AnalysisOutcome::Fallback(a) => a,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, AnalysisOutcome::Fallback(_))
    }
}

fn join_bases(bases: &[Basis]) -> String {
    bases.iter().map(|b| b.symbol().to_string()).collect::<Vec<_>>().join(" ")
}

/// Prompt describing the three strategies and one run's basis data.
pub fn build_prompt(record: &SimulationRecord, match_rate: f64) -> String {
    format!(
        "\
You are analyzing a quantum key exchange that uses the BB84 quantum key distribution protocol.

An eavesdropper, Eve, follows exactly one of these strategies:
- Beginner: always measures in the '+' basis
- Intermediate: picks '+' or 'x' at random
- Expert: copies Alice's basis most of the time

Alice chooses a basis (+ or x) at random to encode each bit; these are the Alice bases.
Eve chooses a basis to measure each qubit; these are the Eve bases.
The match rate is how often Eve's basis equalled Alice's. A high rate suggests mimicry, a low one randomness or a fixed basis.

Data from one run:
- Alice bases: {alice}
- Eve bases: {eve}
- Match rate: {match_rate}%

Which strategy did Eve most likely use?

Respond in this format:
Answer=<Beginner | Intermediate | Expert> | <Justification, max 30 words>
",
        alice = join_bases(&record.alice_bases),
        eve = join_bases(&record.eve_bases),
    )
}

/// Extracts `Answer=<guess> | <justification>` from free-form model output.
pub fn parse_answer(text: &str) -> EveAnalysis {
    let Some((_, after)) = text.split_once("Answer=").filter(|_| text.contains('|')) else {
        return EveAnalysis::unknown(text);
    };
    // A second marker starts a new answer; only the first one counts.
    let after = after.split("Answer=").next().unwrap_or_default();
    let mut parts = after.split('|');
    let guess = parts.next().unwrap_or_default().trim().to_string();
    let justification = match parts.next() {
        Some(j) => j.trim().to_string(),
        None => "Parsing error: no justification follows the strategy guess".to_string(),
    };
    EveAnalysis { strategy_guess: guess, justification }
}

/// Runs the analysis step; provider failures become a fallback answer.
pub fn analyze(
    mode: AnalysisMode,
    provider: Option<&dyn AiProvider>,
    record: &SimulationRecord,
    match_rate: f64,
) -> AnalysisOutcome {
    if mode == AnalysisMode::Mock {
        return AnalysisOutcome::Parsed(EveAnalysis::mock());
    }
    let Some(provider) = provider else {
        return AnalysisOutcome::Fallback(EveAnalysis::unknown(
            "Model error: no analysis provider enabled in this build",
        ));
    };
    let prompt = build_prompt(record, match_rate);
    match provider.chat(&prompt) {
        Ok(text) => AnalysisOutcome::Parsed(parse_answer(&text)),
        Err(e) => {
            crate::debug_log!("{} analysis failed: {e:#}", provider.name());
            AnalysisOutcome::Fallback(EveAnalysis::unknown(format!("Model error: {e}")))
        }
    }
}

/// Whether the lowercased guess equals the strategy name as requested.
///
/// The comparison is against the requested text, not the resolved
/// [`Strategy`], so an unrecognised name like `sneaky` is only "detected" by
/// a guess spelling that same name.
pub fn strategy_detected(guess: &str, requested: &str) -> bool {
    guess.to_lowercase() == requested
}
