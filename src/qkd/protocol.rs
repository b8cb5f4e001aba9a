//! One full BB84 run: preparation, interception, measurement, sifting and
//! error estimation.

use serde::{Deserialize, Serialize};

use super::basis::{Basis, Bit};
use super::eve::{eve_bases, Strategy};
use super::random::{random_bases, random_bits, RandomSource};
use super::security::is_secure;

/// Transcript of a single protocol run.
///
/// The five per-qubit sequences are index-aligned: position `i` refers to
/// the same qubit in each of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRecord {
    pub alice_bits: Vec<Bit>,
    pub alice_bases: Vec<Basis>,
    pub eve_bases: Vec<Basis>,
    pub bob_bases: Vec<Basis>,
    pub bob_bits: Vec<Bit>,
    /// Sifted positions where Alice's and Bob's bits disagree.
    pub error_positions: Vec<usize>,
    /// QBER percentage, rounded to 2 decimals.
    pub error_rate: f64,
    pub is_secure: bool,
    /// Positions where Alice and Bob chose the same basis.
    pub matching_indices: Vec<usize>,
}

impl SimulationRecord {
    /// Number of qubits simulated.
    pub fn len(&self) -> usize {
        self.alice_bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alice_bits.is_empty()
    }

    /// Alice's bits at the sifted positions, before any error correction.
    pub fn sifted_key(&self) -> Vec<Bit> {
        self.matching_indices.iter().map(|&i| self.alice_bits[i]).collect()
    }

    pub fn error_count(&self) -> usize {
        self.error_positions.len()
    }
}

/// Rounds to 2 decimal places. Exact binary ties go to the even digit, so
/// 1/32 of 100 (3.125) becomes 3.12.
pub fn round2(x: f64) -> f64 {
    format!("{:.2}", x).parse().unwrap_or(x)
}

/// Runs the protocol over `n` qubits against an eavesdropper using `strategy`.
///
/// Draws are consumed in a fixed order (Alice's bits, Alice's bases, Eve's
/// bases, Bob's bases, then one bit per disturbed qubit and one per
/// mismatched measurement) so a seeded source reproduces the transcript.
pub fn simulate<R: RandomSource + ?Sized>(n: usize, strategy: Strategy, rng: &mut R) -> SimulationRecord {
    let alice_bits = random_bits(rng, n);
    let alice_bases = random_bases(rng, n);
    let eve_bases = eve_bases(&alice_bases, strategy, rng);
    let bob_bases = random_bases(rng, n);

    // Measuring in the wrong basis collapses the qubit to a random value.
    let qubits: Vec<Bit> = (0..n)
        .map(|i| if eve_bases[i] == alice_bases[i] { alice_bits[i] } else { rng.next_bit() })
        .collect();

    // Bob's correctness depends only on agreeing with Alice's basis.
    let bob_bits: Vec<Bit> = (0..n)
        .map(|i| if bob_bases[i] == alice_bases[i] { qubits[i] } else { rng.next_bit() })
        .collect();

    let matching_indices: Vec<usize> = (0..n).filter(|&i| alice_bases[i] == bob_bases[i]).collect();
    let error_positions: Vec<usize> = matching_indices
        .iter()
        .copied()
        .filter(|&i| alice_bits[i] != bob_bits[i])
        .collect();

    let error_rate = if matching_indices.is_empty() {
        0.0
    } else {
        round2(100.0 * error_positions.len() as f64 / matching_indices.len() as f64)
    };

    crate::debug_log!(
        "simulate n={} strategy={} sifted={} errors={} qber={}",
        n,
        strategy,
        matching_indices.len(),
        error_positions.len(),
        error_rate
    );

    SimulationRecord {
        alice_bits,
        alice_bases,
        eve_bases,
        bob_bases,
        bob_bits,
        error_positions,
        error_rate,
        is_secure: is_secure(error_rate),
        matching_indices,
    }
}
