//! Shared plumbing for the BB84 simulator: error taxonomy and debug logging.

pub mod error;
pub use error::QkdError;
#[macro_use]
pub mod debug; // gated debug logging (BB84_DEBUG=1) provides debug_log! macro
