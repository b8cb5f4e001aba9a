use std::fmt;

/// Failures the simulation core reports to its callers.
///
/// Every core computation is total over valid inputs; these variants
/// describe the inputs a caller must reject before invoking it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QkdError {
    /// Requested qubit count is zero or negative.
    InvalidLength(i64),
    /// Requested qubit count exceeds the configured ceiling.
    TooManyBits { requested: i64, max: usize },
    /// A statistic was asked for over an empty sequence.
    EmptySequence,
    /// Two index-aligned sequences differ in length.
    LengthMismatch { left: usize, right: usize },
}

impl fmt::Display for QkdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QkdError::InvalidLength(n) => write!(f, "Invalid Length: num_bits must be positive, got {}", n),
            QkdError::TooManyBits { requested, max } => {
                write!(f, "Invalid Length: num_bits {} exceeds the maximum of {}", requested, max)
            }
            QkdError::EmptySequence => write!(f, "Empty Sequence: cannot compute a rate over zero positions"),
            QkdError::LengthMismatch { left, right } => {
                write!(f, "Length Mismatch: {} vs {} positions", left, right)
            }
        }
    }
}

impl std::error::Error for QkdError {}

impl QkdError {
    /// Validates a client-supplied qubit count against `max`.
    pub fn check_length(requested: i64, max: usize) -> Result<usize, QkdError> {
        if requested <= 0 {
            return Err(QkdError::InvalidLength(requested));
        }
        let n = usize::try_from(requested).map_err(|_| QkdError::TooManyBits { requested, max })?;
        if n > max {
            return Err(QkdError::TooManyBits { requested, max });
        }
        Ok(n)
    }
}
