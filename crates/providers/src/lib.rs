//! Provider implementations for Summit.
//!
//! One backend today: the Anthropic Messages API. The engine only sees the
//! `Provider` trait from `summit-core`, so additional backends slot in
//! without touching orchestration.

pub mod anthropic;

pub use anthropic::AnthropicProvider;
