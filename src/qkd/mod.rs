//! BB84 protocol simulation core.
//!
//! Data flows one way: the [`random`] source feeds the [`eve`] strategy
//! selector and the [`protocol`] simulator, whose record is then judged by
//! [`security`] and summarized by [`match_rate`].

pub mod basis;
pub mod eve;
pub mod match_rate;
pub mod protocol;
pub mod random;
pub mod security;

pub use basis::{Basis, Bit};
pub use eve::{eve_bases, Strategy};
pub use match_rate::{match_stat, MatchStat};
pub use protocol::{simulate, SimulationRecord};
pub use random::{RandomSource, RngSource, ScriptedSource};
pub use security::{is_secure, SECURITY_THRESHOLD};
