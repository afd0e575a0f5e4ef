//! The turn-level controller.
//!
//! Sequencing per turn: crisis gate, signal extraction, prompt assembly,
//! one provider call, the parse chain, then the profile merge under the
//! user's lock. The signal bundle is fully built before the provider call,
//! so the failure path never guesses which fields exist.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use summit_config::AppConfig;
use summit_core::{
    BehaviorSignals, ChatMessage, CoachingReply, CoachingStyle, EmotionAnalysis, EmotionBreakdown,
    EmotionLabel, EmotionScores, GoalLink, Provider, ProviderRequest, Sentiment, SessionSummary,
    SignalBundle, TurnRequest, UserProfile,
};
use summit_memory::{record_turn, style_preference_shift, update_from_turn, ProfileStore};
use summit_signals::{
    analyze_emotion, build_goal_anchor, crisis_response, detect_crisis, detect_escalation_risk,
    detect_upgrade_signals, infer_context_triggers, infer_goal_hierarchy, infer_goal_link,
    predict_outcome, route_style, select_framework, skill_building, CRISIS_QUICK_REPLIES,
    CRISIS_SUGGESTED_ACTIONS,
};

use crate::parse::{fallback_reply, parse_reply, ParsedReply};
use crate::prompt::{build_messages, build_system_prompt};
use crate::summary::generate_session_summary;

/// Model routing and sampling settings, extracted from the app config.
#[derive(Debug, Clone)]
pub struct ModelSettings {
    pub model: String,
    pub upgrade_model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl From<&AppConfig> for ModelSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            model: config.model.clone(),
            upgrade_model: config.upgrade_model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        }
    }
}

/// The coaching engine: one instance serves all users.
pub struct CoachEngine {
    provider: Arc<dyn Provider>,
    store: Arc<ProfileStore>,
    settings: ModelSettings,
}

impl CoachEngine {
    pub fn new(provider: Arc<dyn Provider>, store: Arc<ProfileStore>, settings: ModelSettings) -> Self {
        Self {
            provider,
            store,
            settings,
        }
    }

    pub fn store(&self) -> &ProfileStore {
        &self.store
    }

    /// Handle one coaching turn. Never fails: provider errors degrade to the
    /// canned fallback, persistence errors are logged and swallowed.
    pub async fn respond(&self, request: &TurnRequest) -> CoachingReply {
        if detect_crisis(&request.message) {
            info!(user_id = %request.user_id, "Crisis gate tripped, skipping provider call");
            return self.crisis_turn(request).await;
        }

        // read-only snapshot for prompt context; the authoritative
        // read-modify-write happens under the user lock after the call
        let snapshot = self.store.load_or_default(&request.user_id);
        let signals = build_signal_bundle(request, &snapshot);
        let framework = select_framework(&request.message, signals.goal_link);

        let escalation = detect_escalation_risk(&request.message, &request.history);
        let upgrade_signals = detect_upgrade_signals(&request.message, &request.history, escalation);
        let model = if upgrade_signals.is_empty() {
            self.settings.model.clone()
        } else {
            self.settings.upgrade_model.clone()
        };
        let upgrade_reasons: Vec<String> =
            upgrade_signals.iter().map(|r| r.as_str().to_string()).collect();

        let mut messages = vec![ChatMessage::system(build_system_prompt(
            &signals, framework, &snapshot, request,
        ))];
        messages.extend(build_messages(request));

        let parsed = match self
            .provider
            .complete(ProviderRequest {
                model: model.clone(),
                messages,
                temperature: self.settings.temperature,
                max_tokens: Some(self.settings.max_tokens),
            })
            .await
        {
            Ok(reply) => parse_reply(&reply.text),
            Err(e) => {
                warn!(error = %e, user_id = %request.user_id, "Provider call failed, using fallback");
                fallback_reply()
            }
        };

        let profile = self
            .persist_turn(request, &signals.emotion, signals.style_used, signals.goal_link)
            .await;

        self.build_reply(request, signals, parsed, profile, model, upgrade_reasons)
    }

    /// The crisis short-circuit: fixed resources, forced signal values, no
    /// provider call, and the same persist step as a normal turn.
    async fn crisis_turn(&self, request: &TurnRequest) -> CoachingReply {
        let emotion = crisis_emotion();
        let style_used = CoachingStyle::Supportive;
        let goal_link = GoalLink::WellbeingFirst;

        let snapshot = self.store.load_or_default(&request.user_id);
        let goal_hierarchy = infer_goal_hierarchy(&request.message, goal_link, &snapshot.goals);
        let goal_anchor = build_goal_anchor(goal_link, &goal_hierarchy);
        let signals = SignalBundle {
            context_triggers: infer_context_triggers(&request.message, Utc::now()),
            style_used,
            goal_link,
            goal_anchor,
            goal_hierarchy,
            skill_building: skill_building(style_used, emotion.primary),
            outcome_prediction: predict_outcome(goal_link, emotion.primary, "no_shift"),
            emotion,
        };

        let profile = self
            .persist_turn(request, &signals.emotion, style_used, goal_link)
            .await;

        let parsed = ParsedReply {
            response: crisis_response().to_string(),
            quick_replies: CRISIS_QUICK_REPLIES.iter().map(|s| s.to_string()).collect(),
            suggested_actions: Some(
                CRISIS_SUGGESTED_ACTIONS.iter().map(|s| s.to_string()).collect(),
            ),
        };

        self.build_reply(request, signals, parsed, profile, self.settings.model.clone(), Vec::new())
    }

    /// Merge the turn into disk state under the user's lock.
    ///
    /// A failed save never blocks the already-computed response: it is
    /// logged and the in-memory document is still used for the reply.
    async fn persist_turn(
        &self,
        request: &TurnRequest,
        emotion: &EmotionAnalysis,
        style_used: CoachingStyle,
        goal_link: GoalLink,
    ) -> UserProfile {
        let _guard = self.store.lock_user(&request.user_id).await;

        let mut profile = self.store.load_or_default(&request.user_id);
        update_from_turn(&mut profile, &request.message, goal_link, emotion.primary.as_str());
        record_turn(&mut profile, style_used, goal_link);

        if let Err(e) = self.store.save(&profile) {
            warn!(error = %e, user_id = %request.user_id, "Profile save failed");
        }
        profile
    }

    fn build_reply(
        &self,
        _request: &TurnRequest,
        signals: SignalBundle,
        parsed: ParsedReply,
        profile: UserProfile,
        model_used: String,
        upgrade_reasons: Vec<String>,
    ) -> CoachingReply {
        // the shift reflects this turn's counters, so recompute the outcome
        // prediction with the final signal
        let shift = style_preference_shift(&profile);
        let outcome_prediction =
            predict_outcome(signals.goal_link, signals.emotion.primary, &shift);

        CoachingReply {
            response: parsed.response,
            quick_replies: parsed.quick_replies,
            suggested_actions: parsed.suggested_actions,
            style_used: signals.style_used,
            emotion_detected: signals.emotion.primary.as_str().to_string(),
            goal_link: signals.goal_link,
            emotion: EmotionBreakdown::from(&signals.emotion),
            behavior_signals: BehaviorSignals {
                style_usage: profile.style_usage.clone(),
                goal_progress_signals: profile.goal_progress_signals.clone(),
            },
            context_triggers: signals.context_triggers,
            recommended_style_shift: shift,
            goal_hierarchy: signals.goal_hierarchy,
            goal_anchor: signals.goal_anchor,
            progressive_skill_building: signals.skill_building,
            outcome_prediction,
            model_used,
            upgrade_reasons,
        }
    }

    /// Summarize a whole session with one analysis call on the default model.
    pub async fn summarize_session(&self, history: &[ChatMessage]) -> SessionSummary {
        generate_session_summary(self.provider.as_ref(), &self.settings.model, history).await
    }
}

/// Derive the full signal bundle for a non-crisis turn.
fn build_signal_bundle(request: &TurnRequest, snapshot: &UserProfile) -> SignalBundle {
    let emotion = analyze_emotion(&request.message);
    let style_used = route_style(&request.message, request.coaching_style, emotion.primary);
    let goal_link = infer_goal_link(&request.message);
    let goal_hierarchy = infer_goal_hierarchy(&request.message, goal_link, &snapshot.goals);
    let goal_anchor = build_goal_anchor(goal_link, &goal_hierarchy);
    // pre-call shift from the snapshot; the reply recomputes it post-merge
    let shift = style_preference_shift(snapshot);

    SignalBundle {
        context_triggers: infer_context_triggers(&request.message, Utc::now()),
        style_used,
        goal_link,
        goal_anchor,
        goal_hierarchy,
        skill_building: skill_building(style_used, emotion.primary),
        outcome_prediction: predict_outcome(goal_link, emotion.primary, &shift),
        emotion,
    }
}

/// Forced emotion values for a crisis turn: maximum stress, fully negative.
fn crisis_emotion() -> EmotionAnalysis {
    EmotionAnalysis {
        primary: EmotionLabel::HighStress,
        scores: EmotionScores {
            high_stress: 1.0,
            ..EmotionScores::default()
        },
        sentiment: Sentiment {
            negative: 1.0,
            ..Sentiment::default()
        },
        linguistic_markers: Default::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use summit_core::{ProviderError, ProviderReply};
    use tempfile::TempDir;

    /// Scripted provider: returns a fixed reply (or a fixed error) and
    /// counts calls.
    struct ScriptedProvider {
        reply: Option<String>,
        calls: AtomicUsize,
    }

    impl ScriptedProvider {
        fn returning(text: &str) -> Self {
            Self {
                reply: Some(text.to_string()),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                reply: None,
                calls: AtomicUsize::new(0),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Provider for ScriptedProvider {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn complete(
            &self,
            request: ProviderRequest,
        ) -> std::result::Result<ProviderReply, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.reply {
                Some(text) => Ok(ProviderReply {
                    text: text.clone(),
                    model: request.model,
                    usage: None,
                }),
                None => Err(ProviderError::Network("connection refused".into())),
            }
        }
    }

    fn settings() -> ModelSettings {
        ModelSettings {
            model: "claude-sonnet-4-5".into(),
            upgrade_model: "claude-opus-4-1".into(),
            temperature: 0.7,
            max_tokens: 800,
        }
    }

    fn engine_with(provider: Arc<ScriptedProvider>) -> (TempDir, CoachEngine, Arc<ScriptedProvider>) {
        let tmp = TempDir::new().unwrap();
        let store = Arc::new(ProfileStore::new(tmp.path().join("memory")));
        let engine = CoachEngine::new(provider.clone(), store, settings());
        (tmp, engine, provider)
    }

    #[tokio::test]
    async fn crisis_turn_skips_provider_and_persists() {
        let (_tmp, engine, provider) =
            engine_with(Arc::new(ScriptedProvider::returning("should never be used")));

        let request = TurnRequest::new("I want to kill myself").with_user("c1");
        let reply = engine.respond(&request).await;

        assert_eq!(provider.call_count(), 0);
        assert!(reply.response.contains("988"));
        assert!(reply.response.contains("741741"));
        assert_eq!(reply.style_used, CoachingStyle::Supportive);
        assert_eq!(reply.goal_link, GoalLink::WellbeingFirst);
        assert_eq!(reply.emotion_detected, "high_stress");
        assert_eq!(reply.quick_replies.len(), 4);

        // the forced values were folded into the profile
        let profile = engine.store().load_or_default("c1");
        assert_eq!(profile.style_usage["supportive"], 1);
        assert!(profile.goals.is_empty()); // wellbeing_first is not trackable
        assert_eq!(profile.emotion_timeline[0].emotion, "high_stress");
    }

    #[tokio::test]
    async fn malformed_reply_still_yields_usable_response() {
        let (_tmp, engine, provider) =
            engine_with(Arc::new(ScriptedProvider::returning("not-json response")));

        let reply = engine.respond(&TurnRequest::new("help me plan my week")).await;

        assert_eq!(provider.call_count(), 1);
        assert!(!reply.response.is_empty());
        assert_eq!(reply.response, "not-json response");
        assert_eq!(reply.quick_replies.len(), 4);
    }

    #[tokio::test]
    async fn structured_reply_is_used_verbatim() {
        let raw = r#"{"response": "Name the decision you're avoiding.", "quick_replies": ["The hire", "The deadline", "Neither"], "suggested_actions": ["List your options"]}"#;
        let (_tmp, engine, _) = engine_with(Arc::new(ScriptedProvider::returning(raw)));

        let reply = engine.respond(&TurnRequest::new("I keep deferring things")).await;

        assert_eq!(reply.response, "Name the decision you're avoiding.");
        assert_eq!(reply.quick_replies[0], "The hire");
        assert_eq!(reply.quick_replies.len(), 4);
        assert_eq!(reply.suggested_actions, Some(vec!["List your options".to_string()]));
    }

    #[tokio::test]
    async fn provider_failure_degrades_to_fallback_and_persists() {
        let (_tmp, engine, provider) = engine_with(Arc::new(ScriptedProvider::failing()));

        let request = TurnRequest::new("my team is overwhelmed").with_user("u2");
        let reply = engine.respond(&request).await;

        assert_eq!(provider.call_count(), 1);
        assert_eq!(reply.response, crate::parse::FALLBACK_RESPONSE);
        assert_eq!(reply.quick_replies.len(), 4);

        // the turn still reached the profile
        let profile = engine.store().load_or_default("u2");
        assert_eq!(profile.last_topics.len(), 1);
        assert_eq!(profile.goals, vec!["leadership_effectiveness"]);
    }

    #[tokio::test]
    async fn complex_decision_routes_to_upgrade_model() {
        let (_tmp, engine, _) = engine_with(Arc::new(ScriptedProvider::returning("ok")));

        let reply = engine
            .respond(&TurnRequest::new("I have a job offer and can't decide"))
            .await;

        assert_eq!(reply.model_used, "claude-opus-4-1");
        assert_eq!(reply.upgrade_reasons, vec!["complex_decision"]);
    }

    #[tokio::test]
    async fn plain_turn_stays_on_default_model() {
        let (_tmp, engine, _) = engine_with(Arc::new(ScriptedProvider::returning("ok")));

        let reply = engine.respond(&TurnRequest::new("how do I run better 1:1s")).await;

        assert_eq!(reply.model_used, "claude-sonnet-4-5");
        assert!(reply.upgrade_reasons.is_empty());
    }

    #[tokio::test]
    async fn explicit_style_override_reaches_the_reply() {
        let (_tmp, engine, _) = engine_with(Arc::new(ScriptedProvider::returning("ok")));

        let request =
            TurnRequest::new("I'm anxious about everything").with_style(CoachingStyle::Directive);
        let reply = engine.respond(&request).await;

        assert_eq!(reply.style_used, CoachingStyle::Directive);
    }

    #[tokio::test]
    async fn new_manager_scenario_classifies_as_expected() {
        let (_tmp, engine, _) = engine_with(Arc::new(ScriptedProvider::returning("ok")));

        let request = TurnRequest::new(
            "I'm a new engineering manager struggling with delegation. I don't trust my team.",
        );
        let reply = engine.respond(&request).await;

        assert_eq!(reply.style_used, CoachingStyle::Strategic);
        assert_eq!(reply.goal_link, GoalLink::LeadershipEffectiveness);
        assert!(!reply.response.contains("988"));
    }

    #[tokio::test]
    async fn save_failure_does_not_block_the_response() {
        let tmp = TempDir::new().unwrap();
        // occupy the memory-dir path with a plain file so saves fail
        let dir = tmp.path().join("memory");
        std::fs::write(&dir, "not a directory").unwrap();

        let provider = Arc::new(ScriptedProvider::returning("ok"));
        let store = Arc::new(ProfileStore::new(dir));
        let engine = CoachEngine::new(provider, store, settings());

        let reply = engine.respond(&TurnRequest::new("hello").with_user("u3")).await;
        assert_eq!(reply.response, "ok");
        assert_eq!(reply.quick_replies.len(), 4);
    }

    #[tokio::test]
    async fn behavior_counters_accumulate_across_turns() {
        let (_tmp, engine, _) = engine_with(Arc::new(ScriptedProvider::returning("ok")));

        let request = TurnRequest::new("long term strategy for my org").with_user("u4");
        engine.respond(&request).await;
        let reply = engine.respond(&request).await;

        assert_eq!(reply.behavior_signals.style_usage["strategic"], 2);
        assert_eq!(reply.recommended_style_shift, "stable:strategic");
    }
}
