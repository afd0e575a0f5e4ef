//! Quick-reply generation: a fixed base set with keyword-triggered insertions,
//! clamped to exactly four.

use summit_core::QUICK_REPLY_COUNT;

const BASE_REPLIES: [&str; 4] = [
    "Tell me more about that",
    "What's my next step?",
    "Help me brainstorm options",
    "I'd like to explore this deeper",
];

/// Derive quick replies from the assistant's response text.
///
/// Topic-specific suggestions are inserted at the front when the response
/// mentions goals, options, or actions; the list is then clamped to exactly
/// [`QUICK_REPLY_COUNT`] items.
pub fn generate_quick_replies(response_text: &str) -> Vec<String> {
    let text = response_text.to_lowercase();
    let mut replies: Vec<String> = BASE_REPLIES.iter().map(|s| s.to_string()).collect();

    if text.contains("goal") || text.contains("achieve") {
        replies.insert(0, "Let's define my goal".into());
    }
    if text.contains("option") || text.contains("choice") {
        replies.insert(0, "What are my options?".into());
    }
    if text.contains("action") || text.contains("step") {
        replies.insert(0, "Create an action plan".into());
    }

    replies.truncate(QUICK_REPLY_COUNT);
    replies
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn always_exactly_four() {
        assert_eq!(generate_quick_replies("").len(), 4);
        assert_eq!(
            generate_quick_replies("goal options action steps achieve choice").len(),
            4
        );
    }

    #[test]
    fn keyword_insertions_lead() {
        let replies = generate_quick_replies("Let's set a goal for this quarter.");
        assert_eq!(replies[0], "Let's define my goal");
    }

    #[test]
    fn most_recent_insertion_wins_front() {
        let replies = generate_quick_replies("your goal has options and next steps");
        assert_eq!(replies[0], "Create an action plan");
        assert_eq!(replies[1], "What are my options?");
        assert_eq!(replies[2], "Let's define my goal");
    }

    #[test]
    fn plain_text_gets_base_set() {
        let replies = generate_quick_replies("Interesting thought.");
        assert_eq!(replies, BASE_REPLIES.map(String::from).to_vec());
    }
}
