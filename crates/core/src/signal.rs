//! The signal bundle — every classification derived from one inbound message.
//!
//! All of these are computed once per turn by `summit-signals` and carried
//! through prompt assembly, the provider call, and the profile update. The
//! bundle is always fully populated *before* the external call, so the
//! fallback path never has to guess which fields were computed.

use serde::{Deserialize, Serialize};

/// `Display` via `as_str` — shared by the label enums below.
macro_rules! fmt_as_str {
    () => {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str(self.as_str())
        }
    };
}

/// One of four fixed coaching-tone presets, selected per turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoachingStyle {
    Directive,
    Facilitative,
    Supportive,
    Strategic,
}

impl CoachingStyle {
    pub const ALL: [CoachingStyle; 4] = [
        CoachingStyle::Directive,
        CoachingStyle::Facilitative,
        CoachingStyle::Supportive,
        CoachingStyle::Strategic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CoachingStyle::Directive => "directive",
            CoachingStyle::Facilitative => "facilitative",
            CoachingStyle::Supportive => "supportive",
            CoachingStyle::Strategic => "strategic",
        }
    }

    /// Parse a client-supplied style name. Unknown names yield `None` so an
    /// invalid override falls through to heuristic routing.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "directive" => Some(CoachingStyle::Directive),
            "facilitative" => Some(CoachingStyle::Facilitative),
            "supportive" => Some(CoachingStyle::Supportive),
            "strategic" => Some(CoachingStyle::Strategic),
            _ => None,
        }
    }
}

impl std::fmt::Display for CoachingStyle {
    fmt_as_str!();
}

/// Coarse category tag for what kind of objective the message relates to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalLink {
    CareerAdvancement,
    LeadershipEffectiveness,
    ExecutionExcellence,
    ProfessionalGrowth,
    /// Forced by the crisis gate; never stored as a real goal.
    WellbeingFirst,
}

impl GoalLink {
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalLink::CareerAdvancement => "career_advancement",
            GoalLink::LeadershipEffectiveness => "leadership_effectiveness",
            GoalLink::ExecutionExcellence => "execution_excellence",
            GoalLink::ProfessionalGrowth => "professional_growth",
            GoalLink::WellbeingFirst => "wellbeing_first",
        }
    }

    /// Whether this link represents a real, trackable goal.
    ///
    /// `professional_growth` is the catch-all default and `wellbeing_first`
    /// is the crisis sentinel; neither is merged into the profile goal set.
    pub fn is_trackable(&self) -> bool {
        !matches!(self, GoalLink::ProfessionalGrowth | GoalLink::WellbeingFirst)
    }
}

impl std::fmt::Display for GoalLink {
    fmt_as_str!();
}

/// The canonical emotion taxonomy: six labels, scored in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmotionLabel {
    HighStress,
    LowConfidence,
    HighEnergy,
    Frustration,
    AnalyticalMode,
    Neutral,
}

impl EmotionLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmotionLabel::HighStress => "high_stress",
            EmotionLabel::LowConfidence => "low_confidence",
            EmotionLabel::HighEnergy => "high_energy",
            EmotionLabel::Frustration => "frustration",
            EmotionLabel::AnalyticalMode => "analytical_mode",
            EmotionLabel::Neutral => "neutral",
        }
    }
}

impl std::fmt::Display for EmotionLabel {
    fmt_as_str!();
}

/// Per-label emotion scores. Every field is clipped to [0, 1].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EmotionScores {
    pub high_stress: f32,
    pub low_confidence: f32,
    pub high_energy: f32,
    pub frustration: f32,
    pub analytical_mode: f32,
    pub neutral: f32,
}

impl EmotionScores {
    /// The non-neutral labels in declaration order (tie-break order for the
    /// primary-label argmax).
    pub fn scored_labels(&self) -> [(EmotionLabel, f32); 5] {
        [
            (EmotionLabel::HighStress, self.high_stress),
            (EmotionLabel::LowConfidence, self.low_confidence),
            (EmotionLabel::HighEnergy, self.high_energy),
            (EmotionLabel::Frustration, self.frustration),
            (EmotionLabel::AnalyticalMode, self.analytical_mode),
        ]
    }
}

/// Positive/negative/neutral sentiment, each in [0, 1].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    pub positive: f32,
    pub negative: f32,
    pub neutral: f32,
}

/// Linguistic surface markers, each in [0, 1].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LinguisticMarkers {
    pub certainty: f32,
    pub uncertainty: f32,
    pub complexity: f32,
    pub engagement: f32,
}

/// Full emotion analysis for one message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionAnalysis {
    pub primary: EmotionLabel,
    pub scores: EmotionScores,
    pub sentiment: Sentiment,
    pub linguistic_markers: LinguisticMarkers,
}

impl EmotionAnalysis {
    /// A fully-neutral analysis, used when the crisis gate forces values or
    /// before extraction has run.
    pub fn neutral() -> Self {
        Self {
            primary: EmotionLabel::Neutral,
            scores: EmotionScores {
                neutral: 1.0,
                ..EmotionScores::default()
            },
            sentiment: Sentiment {
                neutral: 1.0,
                ..Sentiment::default()
            },
            linguistic_markers: LinguisticMarkers::default(),
        }
    }
}

/// Highest-priority situational trigger found in the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SituationalTrigger {
    DeadlinePressure,
    MeetingContext,
    TeamConflict,
    General,
}

impl SituationalTrigger {
    pub fn as_str(&self) -> &'static str {
        match self {
            SituationalTrigger::DeadlinePressure => "deadline_pressure",
            SituationalTrigger::MeetingContext => "meeting_context",
            SituationalTrigger::TeamConflict => "team_conflict",
            SituationalTrigger::General => "general",
        }
    }
}

impl std::fmt::Display for SituationalTrigger {
    fmt_as_str!();
}

/// Situational context for the turn: trigger + wall-clock coordinates.
///
/// `time_of_day` and `day_of_week` are transmitted as text for client-side
/// display (hour 0-23 and weekday index 0-6 respectively).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextTriggers {
    pub situational_trigger: SituationalTrigger,
    pub time_of_day: String,
    pub day_of_week: String,
}

/// Three-tier goal hierarchy. Each tier holds at most 3 deduplicated
/// statements, first-seen order preserved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GoalHierarchy {
    pub strategic: Vec<String>,
    pub tactical: Vec<String>,
    pub daily: Vec<String>,
}

/// Micro-learning recommendation for the selected style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillBuilding {
    pub micro_learning: String,
    pub practice_opportunity: String,
    pub competency_track: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trajectory {
    Improving,
    AtRisk,
}

/// Outcome prediction for the active goal, derived from emotion + style shift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomePrediction {
    pub goal_link: GoalLink,
    pub trajectory: Trajectory,
    pub risk_level: RiskLevel,
    pub style_shift_signal: String,
    pub recommendation: String,
}

/// Everything derived from one inbound message, computed before the provider
/// call and folded into the profile after it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalBundle {
    pub emotion: EmotionAnalysis,
    pub context_triggers: ContextTriggers,
    pub style_used: CoachingStyle,
    pub goal_link: GoalLink,
    pub goal_hierarchy: GoalHierarchy,
    pub goal_anchor: String,
    pub skill_building: SkillBuilding,
    pub outcome_prediction: OutcomePrediction,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn style_parse_roundtrip() {
        for style in CoachingStyle::ALL {
            assert_eq!(CoachingStyle::parse(style.as_str()), Some(style));
        }
        assert_eq!(CoachingStyle::parse("Strategic"), Some(CoachingStyle::Strategic));
        assert_eq!(CoachingStyle::parse("aggressive"), None);
    }

    #[test]
    fn goal_link_trackability() {
        assert!(GoalLink::CareerAdvancement.is_trackable());
        assert!(GoalLink::LeadershipEffectiveness.is_trackable());
        assert!(GoalLink::ExecutionExcellence.is_trackable());
        assert!(!GoalLink::ProfessionalGrowth.is_trackable());
        assert!(!GoalLink::WellbeingFirst.is_trackable());
    }

    #[test]
    fn labels_serialize_snake_case() {
        let json = serde_json::to_string(&EmotionLabel::AnalyticalMode).unwrap();
        assert_eq!(json, r#""analytical_mode""#);
        let json = serde_json::to_string(&GoalLink::WellbeingFirst).unwrap();
        assert_eq!(json, r#""wellbeing_first""#);
    }

    #[test]
    fn neutral_analysis_is_neutral() {
        let a = EmotionAnalysis::neutral();
        assert_eq!(a.primary, EmotionLabel::Neutral);
        assert_eq!(a.scores.neutral, 1.0);
        assert_eq!(a.sentiment.neutral, 1.0);
        assert_eq!(a.scores.high_stress, 0.0);
    }

    #[test]
    fn scored_labels_declaration_order() {
        let scores = EmotionScores::default();
        let labels: Vec<EmotionLabel> =
            scores.scored_labels().iter().map(|(l, _)| *l).collect();
        assert_eq!(labels[0], EmotionLabel::HighStress);
        assert_eq!(labels[4], EmotionLabel::AnalyticalMode);
    }
}
