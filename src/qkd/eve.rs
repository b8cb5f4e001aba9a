//! Eavesdropper strategies.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use super::basis::Basis;
use super::random::{random_bases, RandomSource};

/// Probability that an expert eavesdropper already knows the sender's basis.
pub const EXPERT_LEAK_PROBABILITY: f64 = 0.7;

/// How the eavesdropper picks her measurement bases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Strategy {
    /// Always measures in the rectilinear basis.
    Beginner,
    /// Uniform random basis per qubit.
    Intermediate,
    /// Copies the sender's basis with probability 0.7, otherwise uniform.
    Expert,
    /// Any unrecognized name. Behaves like `Intermediate`.
    #[default]
    Default,
}

impl Strategy {
    /// Exact-name lookup; anything unrecognized is `Default`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "beginner" => Strategy::Beginner,
            "intermediate" => Strategy::Intermediate,
            "expert" => Strategy::Expert,
            _ => Strategy::Default,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Strategy::Beginner => "beginner",
            Strategy::Intermediate => "intermediate",
            Strategy::Expert => "expert",
            Strategy::Default => "default",
        }
    }
}

impl FromStr for Strategy {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Strategy::from_name(s))
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Eavesdropper measurement bases, index-aligned with `sender_bases`.
pub fn eve_bases<R: RandomSource + ?Sized>(
    sender_bases: &[Basis],
    strategy: Strategy,
    rng: &mut R,
) -> Vec<Basis> {
    match strategy {
        Strategy::Beginner => vec![Basis::Rectilinear; sender_bases.len()],
        Strategy::Intermediate | Strategy::Default => random_bases(rng, sender_bases.len()),
        Strategy::Expert => sender_bases
            .iter()
            .map(|&b| if rng.chance(EXPERT_LEAK_PROBABILITY) { b } else { rng.next_basis() })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qkd::random::{RngSource, ScriptedSource};

    #[test]
    fn unknown_names_fall_back_to_default() {
        assert_eq!(Strategy::from_name("expert"), Strategy::Expert);
        assert_eq!(Strategy::from_name("Expert"), Strategy::Default);
        assert_eq!("sneaky".parse::<Strategy>(), Ok(Strategy::Default));
    }

    #[test]
    fn beginner_is_all_rectilinear() {
        let sender = [Basis::Diagonal, Basis::Rectilinear, Basis::Diagonal];
        let mut rng = RngSource::seeded(3);
        assert_eq!(eve_bases(&sender, Strategy::Beginner, &mut rng), vec![Basis::Rectilinear; 3]);
    }

    #[test]
    fn expert_copies_on_leak_and_draws_otherwise() {
        let sender = [Basis::Diagonal, Basis::Diagonal, Basis::Rectilinear];
        let mut rng = ScriptedSource::new()
            .with_outcomes([true, false, true])
            .with_bases([Basis::Rectilinear]);
        assert_eq!(
            eve_bases(&sender, Strategy::Expert, &mut rng),
            vec![Basis::Diagonal, Basis::Rectilinear, Basis::Rectilinear]
        );
    }

    #[test]
    fn default_draws_like_intermediate() {
        let sender = vec![Basis::Diagonal; 50];
        let a = eve_bases(&sender, Strategy::Default, &mut RngSource::seeded(9));
        let b = eve_bases(&sender, Strategy::Intermediate, &mut RngSource::seeded(9));
        assert_eq!(a, b);
    }
}
