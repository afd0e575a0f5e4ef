//! The crisis gate: literal-phrase short-circuit for explicit self-harm
//! statements.
//!
//! The phrase list is deliberately narrow. Ordinary distress language
//! (burnout, overwhelm, "I hate my job") must NOT trip the gate — those are
//! coaching-appropriate topics, and a false positive here derails a normal
//! turn into crisis mode.

/// Explicit self-harm phrases, matched case-insensitively as substrings.
const CRISIS_PHRASES: &[&str] = &[
    "suicide",
    "kill myself",
    "end my life",
    "want to die",
    "hurt myself",
    "no reason to live",
    "better off dead",
];

/// Quick replies attached to the crisis response.
pub const CRISIS_QUICK_REPLIES: [&str; 4] = [
    "I'm safe, thanks",
    "I need to talk to someone",
    "Find professional help",
    "Tell me more about these resources",
];

/// Suggested actions attached to the crisis response.
pub const CRISIS_SUGGESTED_ACTIONS: [&str; 2] = [
    "Contact crisis support",
    "Reach out to a trusted person",
];

/// True when the message contains an explicit self-harm phrase.
pub fn detect_crisis(message: &str) -> bool {
    let text = message.to_lowercase();
    CRISIS_PHRASES.iter().any(|p| text.contains(p))
}

/// The fixed crisis-resources message. Always contains the 988 lifeline and
/// the 741741 text line.
pub fn crisis_response() -> &'static str {
    "I'm concerned about what you're sharing. Your wellbeing matters, and \
there are people who can help right now:\n\n\
**Immediate Support:**\n\
- **National Suicide Prevention Lifeline**: Call or text **988** (US)\n\
- **Crisis Text Line**: Text **HOME** to **741741**\n\
- **International resources**: https://findahelpline.com\n\n\
These services are free, confidential, and available 24/7. You don't have \
to face this alone.\n\n\
Would you like to talk about what's going on? I'm here to listen, and I can \
also help you find professional support in your area."
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_phrases_trip_the_gate() {
        assert!(detect_crisis("I want to kill myself"));
        assert!(detect_crisis("Sometimes I think I'd be better off dead."));
        assert!(detect_crisis("no reason to live anymore"));
        assert!(detect_crisis("I've been thinking about suicide"));
        assert!(detect_crisis("I WANT TO DIE"));
    }

    #[test]
    fn ordinary_distress_does_not() {
        for msg in [
            "I feel burned out and exhausted",
            "I wake up dreading work",
            "I can't handle the pressure",
            "I hate my job and my manager",
            "I'm completely overwhelmed this quarter",
            "",
        ] {
            assert!(!detect_crisis(msg), "false positive on: {msg:?}");
        }
    }

    #[test]
    fn response_names_both_hotlines() {
        let text = crisis_response();
        assert!(text.contains("988"));
        assert!(text.contains("741741"));
    }
}
