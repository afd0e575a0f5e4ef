//! # Summit Core
//!
//! Domain types, traits, and error definitions for the Summit coaching
//! backend. This crate has **zero framework dependencies** — it defines the
//! domain model that all other crates implement against.
//!
//! ## Design Philosophy
//!
//! The LLM backend is defined as a trait here; implementations live in
//! `summit-providers`. Everything that flows through a coaching turn — the
//! inbound request, the derived signal bundle, the persisted profile, the
//! outbound reply — is a plain value type in this crate, so the classifiers
//! and the orchestrator can be tested without any I/O.

pub mod error;
pub mod message;
pub mod profile;
pub mod provider;
pub mod signal;
pub mod turn;

// Re-export key types at crate root for ergonomics
pub use error::{Error, MemoryError, ProviderError, Result};
pub use message::{ChatMessage, Role};
pub use profile::{
    EmotionEvent, SessionEvent, UserProfile, LAST_TOPICS_CAP, SESSION_EVENTS_CAP,
    TOPIC_SNIPPET_LEN,
};
pub use provider::{Provider, ProviderReply, ProviderRequest, Usage};
pub use signal::{
    CoachingStyle, ContextTriggers, EmotionAnalysis, EmotionLabel, EmotionScores, GoalHierarchy,
    GoalLink, LinguisticMarkers, OutcomePrediction, RiskLevel, Sentiment, SignalBundle,
    SituationalTrigger, SkillBuilding, Trajectory,
};
pub use turn::{
    BehaviorSignals, CoachingReply, EmotionBreakdown, SessionSummary, TurnRequest,
    ANONYMOUS_USER, QUICK_REPLY_COUNT, SUGGESTED_ACTIONS_CAP,
};
