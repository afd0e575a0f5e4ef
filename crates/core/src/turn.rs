//! Turn request and reply — the inbound and outbound shapes of one coaching
//! exchange.

use crate::message::ChatMessage;
use crate::signal::{
    CoachingStyle, ContextTriggers, EmotionAnalysis, GoalHierarchy, GoalLink, OutcomePrediction,
    SkillBuilding,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Quick replies are clamped (padded or truncated) to exactly this many.
pub const QUICK_REPLY_COUNT: usize = 4;
/// Suggested actions are clamped to at most this many.
pub const SUGGESTED_ACTIONS_CAP: usize = 5;
/// User id used when the caller does not identify themselves.
pub const ANONYMOUS_USER: &str = "anonymous";

/// One inbound chat turn. Immutable once received.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnRequest {
    /// The user's current message.
    pub message: String,

    /// Prior conversation turns, oldest first. Trimmed to a recent window
    /// before prompt assembly.
    #[serde(default)]
    pub history: Vec<ChatMessage>,

    /// Extra caller-supplied context folded into the system prompt.
    #[serde(default)]
    pub context: Option<String>,

    /// Explicit style override. Always wins over heuristic routing.
    #[serde(default)]
    pub coaching_style: Option<CoachingStyle>,

    /// Who is talking; defaults to the anonymous sentinel.
    #[serde(default = "default_user_id")]
    pub user_id: String,
}

fn default_user_id() -> String {
    ANONYMOUS_USER.to_string()
}

impl TurnRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            history: Vec::new(),
            context: None,
            coaching_style: None,
            user_id: default_user_id(),
        }
    }

    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    pub fn with_style(mut self, style: CoachingStyle) -> Self {
        self.coaching_style = Some(style);
        self
    }

    pub fn with_history(mut self, history: Vec<ChatMessage>) -> Self {
        self.history = history;
        self
    }
}

/// Running behavior counters returned alongside the reply.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BehaviorSignals {
    pub style_usage: BTreeMap<String, u32>,
    pub goal_progress_signals: BTreeMap<String, u32>,
}

/// The outbound coaching reply: the model text plus the full signal bundle
/// for client-side display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoachingReply {
    /// The coach's response text.
    pub response: String,

    /// Exactly four deduplicated quick-reply suggestions.
    pub quick_replies: Vec<String>,

    /// Up to five suggested actions, when the model supplied them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_actions: Option<Vec<String>>,

    pub style_used: CoachingStyle,
    /// Mirrors `emotion.primary`; retained for clients that predate the
    /// scored taxonomy.
    pub emotion_detected: String,
    pub goal_link: GoalLink,

    #[serde(flatten)]
    pub emotion: EmotionBreakdown,

    pub behavior_signals: BehaviorSignals,
    pub context_triggers: ContextTriggers,
    pub recommended_style_shift: String,
    pub goal_hierarchy: GoalHierarchy,
    pub goal_anchor: String,
    pub progressive_skill_building: SkillBuilding,
    pub outcome_prediction: OutcomePrediction,

    /// Which model produced the response.
    pub model_used: String,

    /// Why the upgrade model was selected, when it was.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub upgrade_reasons: Vec<String>,
}

/// The emotion fields of the reply, flattened into the top-level JSON object
/// (`emotion_primary`, `emotion_scores`, `sentiment`, `linguistic_markers`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmotionBreakdown {
    pub emotion_primary: crate::signal::EmotionLabel,
    pub emotion_scores: crate::signal::EmotionScores,
    pub sentiment: crate::signal::Sentiment,
    pub linguistic_markers: crate::signal::LinguisticMarkers,
}

impl From<&EmotionAnalysis> for EmotionBreakdown {
    fn from(a: &EmotionAnalysis) -> Self {
        Self {
            emotion_primary: a.primary,
            emotion_scores: a.scores,
            sentiment: a.sentiment,
            linguistic_markers: a.linguistic_markers,
        }
    }
}

/// Structured summary of a whole coaching session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub summary: String,
    #[serde(default)]
    pub key_insights: Vec<String>,
    #[serde(default)]
    pub action_items: Vec<String>,
    #[serde(default)]
    pub progress_made: String,
    #[serde(default)]
    pub recommended_next_steps: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turn_request_defaults_anonymous() {
        let req: TurnRequest = serde_json::from_str(r#"{"message":"hello"}"#).unwrap();
        assert_eq!(req.user_id, ANONYMOUS_USER);
        assert!(req.history.is_empty());
        assert!(req.coaching_style.is_none());
    }

    #[test]
    fn turn_request_parses_style_override() {
        let req: TurnRequest =
            serde_json::from_str(r#"{"message":"hello","coaching_style":"directive"}"#).unwrap();
        assert_eq!(req.coaching_style, Some(CoachingStyle::Directive));
    }

    #[test]
    fn emotion_breakdown_flattens() {
        let analysis = EmotionAnalysis::neutral();
        let breakdown = EmotionBreakdown::from(&analysis);
        let json = serde_json::to_value(&breakdown).unwrap();
        assert_eq!(json["emotion_primary"], "neutral");
        assert!(json["emotion_scores"].is_object());
        assert!(json["sentiment"]["neutral"].as_f64().unwrap() > 0.9);
    }

    #[test]
    fn session_summary_tolerates_missing_fields() {
        let s: SessionSummary = serde_json::from_str(r#"{"summary":"We made a plan."}"#).unwrap();
        assert_eq!(s.summary, "We made a plan.");
        assert!(s.key_insights.is_empty());
    }
}
