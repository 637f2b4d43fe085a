//! Chat module
//!
//! Turns, the per-session transcript, and the per-turn submission flow.

pub mod flow;
pub mod models;
pub mod transcript;

pub use flow::{submit_turn, TurnOutcome};
pub use models::{Role, Turn};
pub use transcript::Transcript;
