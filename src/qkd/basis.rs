//! Measurement bases and classical bit values exchanged in a BB84 run.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Polarization basis used to encode or measure a qubit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Basis {
    /// `+`
    #[serde(rename = "+")]
    Rectilinear,
    /// `x`
    #[serde(rename = "x")]
    Diagonal,
}

impl Basis {
    pub fn symbol(self) -> char {
        match self {
            Basis::Rectilinear => '+',
            Basis::Diagonal => 'x',
        }
    }
}

impl fmt::Display for Basis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A classical bit. Serialized as the JSON integers 0 and 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Bit {
    Zero,
    One,
}

impl Bit {
    pub fn from_bool(b: bool) -> Self {
        if b { Bit::One } else { Bit::Zero }
    }
}

impl From<Bit> for u8 {
    fn from(b: Bit) -> u8 {
        match b {
            Bit::Zero => 0,
            Bit::One => 1,
        }
    }
}

impl TryFrom<u8> for Bit {
    type Error = String;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(Bit::Zero),
            1 => Ok(Bit::One),
            other => Err(format!("bit must be 0 or 1, got {other}")),
        }
    }
}

impl fmt::Display for Bit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", u8::from(*self))
    }
}
