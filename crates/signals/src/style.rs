//! Coaching-style routing.
//!
//! Resolution order: explicit caller override, message keyword groups in
//! fixed priority, emotion-based fallback, then strategic as the default.
//! An explicit override is authoritative even when it conflicts with the
//! detected emotion.

use summit_core::{CoachingStyle, EmotionLabel};

const DIRECTIVE_TERMS: &[&str] = &["urgent", "asap", "decision now", "crisis", "immediately"];
const FACILITATIVE_TERMS: &[&str] = &["stuck", "not sure", "what if", "confused", "options"];
const SUPPORTIVE_TERMS: &[&str] = &["anxious", "burnout", "overwhelmed", "confidence", "afraid"];
const STRATEGIC_TERMS: &[&str] = &[
    "strategy", "long term", "roadmap", "org", "stakeholder", "vp", "director",
];

/// Resolve exactly one style for the turn.
pub fn route_style(
    message: &str,
    override_style: Option<CoachingStyle>,
    emotion: EmotionLabel,
) -> CoachingStyle {
    if let Some(style) = override_style {
        return style;
    }

    let text = message.to_lowercase();

    if DIRECTIVE_TERMS.iter().any(|t| text.contains(t)) {
        return CoachingStyle::Directive;
    }
    if FACILITATIVE_TERMS.iter().any(|t| text.contains(t)) {
        return CoachingStyle::Facilitative;
    }
    if SUPPORTIVE_TERMS.iter().any(|t| text.contains(t)) {
        return CoachingStyle::Supportive;
    }
    if STRATEGIC_TERMS.iter().any(|t| text.contains(t)) {
        return CoachingStyle::Strategic;
    }

    if matches!(emotion, EmotionLabel::HighStress | EmotionLabel::LowConfidence) {
        return CoachingStyle::Supportive;
    }

    CoachingStyle::Strategic
}

/// The tone instruction injected into the system prompt for each style.
pub fn style_prompt(style: CoachingStyle) -> &'static str {
    match style {
        CoachingStyle::Directive => {
            "You are a directive executive coach: clear recommendations, concrete steps, confident tone."
        }
        CoachingStyle::Facilitative => {
            "You are a facilitative coach: use Socratic questions to guide discovery and reflection."
        }
        CoachingStyle::Supportive => {
            "You are a supportive coach: validate emotions, build confidence, and encourage momentum."
        }
        CoachingStyle::Strategic => {
            "You are a strategic coach: zoom out, connect decisions to long-term leadership goals and tradeoffs."
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_always_wins() {
        // supportive keywords in the message, override still decides
        let style = route_style(
            "I'm anxious and overwhelmed",
            Some(CoachingStyle::Directive),
            EmotionLabel::HighStress,
        );
        assert_eq!(style, CoachingStyle::Directive);
    }

    #[test]
    fn urgent_routes_directive() {
        let style = route_style("urgent decision now", None, EmotionLabel::Neutral);
        assert_eq!(style, CoachingStyle::Directive);
    }

    #[test]
    fn keyword_priority_order() {
        // "urgent" (directive) outranks "stuck" (facilitative)
        let style = route_style("urgent and stuck", None, EmotionLabel::Neutral);
        assert_eq!(style, CoachingStyle::Directive);
    }

    #[test]
    fn emotion_fallback_when_no_keywords() {
        let style = route_style("hello there", None, EmotionLabel::LowConfidence);
        assert_eq!(style, CoachingStyle::Supportive);
    }

    #[test]
    fn default_is_strategic() {
        let style = route_style("hello there", None, EmotionLabel::Neutral);
        assert_eq!(style, CoachingStyle::Strategic);
    }

    #[test]
    fn every_style_has_a_prompt() {
        for style in CoachingStyle::ALL {
            assert!(!style_prompt(style).is_empty());
        }
    }
}
