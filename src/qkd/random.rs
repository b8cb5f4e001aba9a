//! Randomness source for the simulator.
//!
//! Protocol code never touches a global generator; every draw goes through a
//! [`RandomSource`] handed in by the caller. Production runs use
//! [`RngSource`] over the `rand` crate, optionally seeded for reproducible
//! transcripts, and tests can replay exact draws with [`ScriptedSource`].

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::basis::{Basis, Bit};

/// Supplier of the uniform draws a BB84 run consumes.
pub trait RandomSource {
    /// A uniformly random bit.
    fn next_bit(&mut self) -> Bit;

    /// A uniformly random basis.
    fn next_basis(&mut self) -> Basis;

    /// A Bernoulli trial that succeeds with probability `p`.
    fn chance(&mut self, p: f64) -> bool;
}

/// `n` independent uniform bits.
pub fn random_bits<R: RandomSource + ?Sized>(rng: &mut R, n: usize) -> Vec<Bit> {
    (0..n).map(|_| rng.next_bit()).collect()
}

/// `n` independent uniform bases.
pub fn random_bases<R: RandomSource + ?Sized>(rng: &mut R, n: usize) -> Vec<Basis> {
    (0..n).map(|_| rng.next_basis()).collect()
}

/// [`RandomSource`] backed by any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngSource<R: Rng = StdRng> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSource<StdRng> {
    /// Seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// Same seed, same sequence of draws.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_bit(&mut self) -> Bit {
        Bit::from_bool(self.rng.gen_bool(0.5))
    }

    fn next_basis(&mut self) -> Basis {
        if self.rng.gen_bool(0.5) { Basis::Diagonal } else { Basis::Rectilinear }
    }

    fn chance(&mut self, p: f64) -> bool {
        self.rng.gen_bool(p.clamp(0.0, 1.0))
    }
}

/// Replays fixed queues of draws, cycling when a queue runs out.
///
/// An empty queue yields `Bit::Zero`, `Basis::Rectilinear` or `false`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    bits: Vec<Bit>,
    bases: Vec<Basis>,
    outcomes: Vec<bool>,
    bit_pos: usize,
    basis_pos: usize,
    outcome_pos: usize,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bits(mut self, bits: impl IntoIterator<Item = Bit>) -> Self {
        self.bits = bits.into_iter().collect();
        self
    }

    pub fn with_bases(mut self, bases: impl IntoIterator<Item = Basis>) -> Self {
        self.bases = bases.into_iter().collect();
        self
    }

    /// Outcomes returned by successive [`RandomSource::chance`] calls,
    /// regardless of the probability asked for.
    pub fn with_outcomes(mut self, outcomes: impl IntoIterator<Item = bool>) -> Self {
        self.outcomes = outcomes.into_iter().collect();
        self
    }

    fn cycle<T: Copy>(queue: &[T], pos: &mut usize, fallback: T) -> T {
        if queue.is_empty() {
            return fallback;
        }
        let v = queue[*pos % queue.len()];
        *pos += 1;
        v
    }
}

impl RandomSource for ScriptedSource {
    fn next_bit(&mut self) -> Bit {
        Self::cycle(&self.bits, &mut self.bit_pos, Bit::Zero)
    }

    fn next_basis(&mut self) -> Basis {
        Self::cycle(&self.bases, &mut self.basis_pos, Basis::Rectilinear)
    }

    fn chance(&mut self, _p: f64) -> bool {
        Self::cycle(&self.outcomes, &mut self.outcome_pos, false)
    }
}
