//! Basis coincidence between sender and eavesdropper.
//!
//! Informational only: downstream strategy inference reads it, the security
//! decision never does.

use serde::Serialize;

use super::basis::Basis;
use super::protocol::round2;
use crate::core::QkdError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MatchStat {
    pub match_count: usize,
    /// Percentage, rounded to 2 decimals.
    pub match_rate: f64,
}

/// Counts positions where `sender[i] == eve[i]`.
pub fn match_stat(sender: &[Basis], eve: &[Basis]) -> Result<MatchStat, QkdError> {
    if sender.len() != eve.len() {
        return Err(QkdError::LengthMismatch { left: sender.len(), right: eve.len() });
    }
    if sender.is_empty() {
        return Err(QkdError::EmptySequence);
    }
    let match_count = sender.iter().zip(eve).filter(|(a, e)| a == e).count();
    let match_rate = round2(100.0 * match_count as f64 / sender.len() as f64);
    Ok(MatchStat { match_count, match_rate })
}
