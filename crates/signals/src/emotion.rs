//! Emotion and sentiment scoring.
//!
//! Each emotion group scores (matching keywords) / 3.0, clipped to [0, 1].
//! The primary label is neutral when every group scores below 0.25, else the
//! argmax with ties broken in declaration order.

use chrono::{DateTime, Datelike, Timelike, Utc};
use summit_core::{
    ContextTriggers, EmotionAnalysis, EmotionLabel, EmotionScores, LinguisticMarkers, Sentiment,
    SituationalTrigger,
};

/// Primary label threshold: below this, everything is neutral.
const PRIMARY_THRESHOLD: f32 = 0.25;

const STRESS_TERMS: &[&str] = &[
    "overwhelmed", "anxious", "pressure", "burnout", "panic", "stressed",
];
const CONFIDENCE_TERMS: &[&str] = &[
    "not good enough", "imposter", "doubt", "hesitate", "afraid",
];
const ENERGY_TERMS: &[&str] = &["excited", "motivated", "energized", "ready", "let's do it"];
const FRUSTRATION_TERMS: &[&str] = &["blocked", "stuck", "frustrated", "politics", "can't move"];
const ANALYTICAL_TERMS: &[&str] = &[
    "tradeoff", "framework", "strategy", "options", "prioritize", "roadmap",
];

const CERTAINTY_TERMS: &[&str] = &["definitely", "clearly", "certain", "must"];
const UNCERTAINTY_TERMS: &[&str] = &["maybe", "not sure", "unclear", "might", "perhaps"];

fn clip01(v: f32) -> f32 {
    v.clamp(0.0, 1.0)
}

fn group_score(text: &str, terms: &[&str]) -> f32 {
    let hits = terms.iter().filter(|t| text.contains(*t)).count();
    clip01(hits as f32 / 3.0)
}

/// Score one message against the six-label emotion taxonomy.
pub fn analyze_emotion(message: &str) -> EmotionAnalysis {
    let text = message.to_lowercase();

    let high_stress = group_score(&text, STRESS_TERMS);
    let low_confidence = group_score(&text, CONFIDENCE_TERMS);
    let high_energy = group_score(&text, ENERGY_TERMS);
    let frustration = group_score(&text, FRUSTRATION_TERMS);
    let analytical_mode = group_score(&text, ANALYTICAL_TERMS);

    let certainty = group_score(&text, CERTAINTY_TERMS);
    let uncertainty = group_score(&text, UNCERTAINTY_TERMS);

    let words = text.split_whitespace().count() as f32;
    let complexity = clip01(words / 80.0);
    let engagement = clip01(words / 50.0);

    let negative = clip01((high_stress + low_confidence + frustration) / 2.5);
    let positive = clip01((high_energy + certainty) / 2.0);
    let neutral_sentiment = clip01(1.0 - (positive - negative).abs());

    let mut scores = EmotionScores {
        high_stress,
        low_confidence,
        high_energy,
        frustration,
        analytical_mode,
        neutral: 0.0,
    };

    // argmax over non-neutral labels, strict `>` keeps declaration order on ties
    let labeled = scores.scored_labels();
    let (mut primary, mut best) = (labeled[0].0, labeled[0].1);
    for (label, score) in labeled.into_iter().skip(1) {
        if score > best {
            primary = label;
            best = score;
        }
    }
    if best < PRIMARY_THRESHOLD {
        primary = EmotionLabel::Neutral;
    }
    scores.neutral = if primary == EmotionLabel::Neutral { 1.0 } else { 0.0 };

    EmotionAnalysis {
        primary,
        scores,
        sentiment: Sentiment {
            positive,
            negative,
            neutral: neutral_sentiment,
        },
        linguistic_markers: LinguisticMarkers {
            certainty,
            uncertainty,
            complexity,
            engagement,
        },
    }
}

const DEADLINE_TERMS: &[&str] = &["deadline", "due", "urgent", "eod"];
const MEETING_TERMS: &[&str] = &["meeting", "1:1", "all-hands", "board"];
const CONFLICT_TERMS: &[&str] = &["team", "conflict", "manager", "stakeholder"];

/// Infer the situational trigger plus wall-clock coordinates for the turn.
///
/// First-match-wins priority: deadline pressure, meeting context, team
/// conflict, else general. The caller passes `now` so the function stays
/// deterministic under test.
pub fn infer_context_triggers(message: &str, now: DateTime<Utc>) -> ContextTriggers {
    let text = message.to_lowercase();

    let trigger = if DEADLINE_TERMS.iter().any(|t| text.contains(t)) {
        SituationalTrigger::DeadlinePressure
    } else if MEETING_TERMS.iter().any(|t| text.contains(t)) {
        SituationalTrigger::MeetingContext
    } else if CONFLICT_TERMS.iter().any(|t| text.contains(t)) {
        SituationalTrigger::TeamConflict
    } else {
        SituationalTrigger::General
    };

    ContextTriggers {
        situational_trigger: trigger,
        time_of_day: now.hour().to_string(),
        day_of_week: now.weekday().num_days_from_monday().to_string(),
    }
}
