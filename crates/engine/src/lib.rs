//! The Summit coaching engine — the turn-level orchestrator.
//!
//! One coaching turn runs: crisis gate, signal extraction, prompt assembly,
//! a single provider call, the defensive parse chain, then the profile
//! merge-and-save. Every path through the engine performs exactly one
//! profile load and one save; non-crisis paths make exactly one provider
//! call with no retry.

pub mod parse;
pub mod prompt;
pub mod summary;
pub mod turn;

pub use parse::{parse_reply, ParsedReply};
pub use summary::generate_session_summary;
pub use turn::{CoachEngine, ModelSettings};
