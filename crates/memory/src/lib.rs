//! Per-user profile persistence for Summit.
//!
//! One JSON document per user under the configured memory directory,
//! loaded at the start of a turn and written back at the end. The store
//! hands out a per-user lock so concurrent turns for the same user
//! serialize their read-modify-write cycles instead of silently losing
//! updates.

pub mod behavior;
pub mod store;

pub use behavior::{record_turn, style_preference_shift};
pub use store::{update_from_turn, ProfileLoadOutcome, ProfileStore};
