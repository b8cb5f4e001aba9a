//! Security decision from the quantum bit error rate.

/// QBER percentage at or above which eavesdropping is presumed.
pub const SECURITY_THRESHOLD: f64 = 11.0;

/// `true` when `qber` (a percentage) is strictly below [`SECURITY_THRESHOLD`].
pub fn is_secure(qber: f64) -> bool {
    qber < SECURITY_THRESHOLD
}
