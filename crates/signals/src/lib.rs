//! Deterministic signal extraction for Summit.
//!
//! Every classifier in this crate is a pure function over the lowercased
//! message text: keyword-membership tests resolving to a label from a small
//! fixed set, or a score clipped to [0, 1]. Nothing here touches the network,
//! the clock (callers pass `DateTime` in), or the filesystem, so the whole
//! crate is trivially testable and idempotent.
//!
//! Precedence rules are first-match-wins over keyword groups in a fixed
//! priority order. The tables live next to the functions that consume them,
//! one table per concern.

pub mod crisis;
pub mod emotion;
pub mod framework;
pub mod goals;
pub mod quickreply;
pub mod risk;
pub mod style;

pub use crisis::{crisis_response, detect_crisis, CRISIS_QUICK_REPLIES, CRISIS_SUGGESTED_ACTIONS};
pub use emotion::{analyze_emotion, infer_context_triggers};
pub use framework::{select_framework, Framework};
pub use goals::{
    build_goal_anchor, infer_goal_hierarchy, infer_goal_link, predict_outcome, skill_building,
};
pub use quickreply::generate_quick_replies;
pub use risk::{detect_escalation_risk, detect_upgrade_signals, UpgradeReason};
pub use style::{route_style, style_prompt};
