//! BB84 quantum key distribution simulator.
//!
//! `qkd` holds the protocol core; `ai`, `commands`, `config` and `cli` are
//! the service plumbing around it.
pub mod ai;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod qkd;

pub use crate::core::QkdError;
pub use crate::qkd::{simulate, SimulationRecord, Strategy};
