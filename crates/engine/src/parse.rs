//! Defensive parsing of the model's reply.
//!
//! The prompt asks for a JSON object but the model may return anything:
//! clean JSON, JSON buried in prose, fenced JSON, JSON-encoded strings
//! wrapping more JSON, or plain text. The chain here never fails — some
//! usable response text and exactly four quick replies always come out.

use serde_json::Value;
use tracing::debug;

use summit_core::{QUICK_REPLY_COUNT, SUGGESTED_ACTIONS_CAP};
use summit_signals::generate_quick_replies;

/// Maximum levels of fence/string/object wrapping peeled off raw text.
const MAX_UNWRAP_DEPTH: usize = 3;

/// The model reply after the parse chain has run.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedReply {
    pub response: String,
    /// Always exactly [`QUICK_REPLY_COUNT`] items, deduplicated.
    pub quick_replies: Vec<String>,
    /// At most [`SUGGESTED_ACTIONS_CAP`] items, when present.
    pub suggested_actions: Option<Vec<String>>,
}

/// Run the full chain on raw model output.
pub fn parse_reply(raw: &str) -> ParsedReply {
    if let Some(obj) = parse_object(raw) {
        if let Some(response) = obj.get("response").and_then(Value::as_str) {
            let model_replies = string_array(obj.get("quick_replies"));
            // fewer than two model-supplied replies is treated as "none":
            // re-derive them from the response instead
            let quick_replies = if model_replies.len() >= 2 {
                clamp_quick_replies(model_replies, response)
            } else {
                generate_quick_replies(response)
            };

            let suggested_actions = obj.get("suggested_actions").map(|v| {
                let mut actions = string_array(Some(v));
                actions.truncate(SUGGESTED_ACTIONS_CAP);
                actions
            });

            return ParsedReply {
                response: response.to_string(),
                quick_replies,
                suggested_actions: suggested_actions.filter(|a| !a.is_empty()),
            };
        }
        debug!("Model JSON lacks a string `response` field, using raw text");
    }

    let response = unwrap_text(raw);
    let quick_replies = generate_quick_replies(&response);
    ParsedReply {
        response,
        quick_replies,
        suggested_actions: None,
    }
}

/// Direct parse, then first-`{`-to-last-`}` substring extraction.
fn parse_object(raw: &str) -> Option<Value> {
    if let Ok(v @ Value::Object(_)) = serde_json::from_str::<Value>(raw.trim()) {
        return Some(v);
    }

    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end <= start {
        return None;
    }
    match serde_json::from_str::<Value>(&raw[start..=end]) {
        Ok(v @ Value::Object(_)) => Some(v),
        _ => None,
    }
}

fn string_array(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|arr| {
            arr.iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Dedupe preserving order, pad from the heuristic generator, clamp to four.
fn clamp_quick_replies(supplied: Vec<String>, response: &str) -> Vec<String> {
    let mut replies: Vec<String> = Vec::with_capacity(QUICK_REPLY_COUNT);
    for reply in supplied {
        let trimmed = reply.trim();
        if !trimmed.is_empty() && !replies.iter().any(|r| r == trimmed) {
            replies.push(trimmed.to_string());
        }
    }
    for fallback in generate_quick_replies(response) {
        if replies.len() >= QUICK_REPLY_COUNT {
            break;
        }
        if !replies.contains(&fallback) {
            replies.push(fallback);
        }
    }
    replies.truncate(QUICK_REPLY_COUNT);
    replies
}

/// Peel markdown fences, JSON string encoding, and `{"response": ...}`
/// wrapping off plain-text output, up to [`MAX_UNWRAP_DEPTH`] levels.
fn unwrap_text(raw: &str) -> String {
    let mut text = raw.trim().to_string();

    for _ in 0..MAX_UNWRAP_DEPTH {
        let before = text.clone();

        text = strip_fences(&text);

        // a JSON-encoded string wrapping the real content
        if let Ok(Value::String(inner)) = serde_json::from_str::<Value>(&text) {
            text = inner.trim().to_string();
        }

        // an object wrapper that only carries a response field
        if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(&text) {
            if let Some(inner) = map.get("response").and_then(Value::as_str) {
                text = inner.trim().to_string();
            }
        }

        if text == before {
            break;
        }
    }

    if text.is_empty() {
        FALLBACK_RESPONSE.to_string()
    } else {
        text
    }
}

fn strip_fences(text: &str) -> String {
    let trimmed = text.trim();
    if !trimmed.starts_with("```") {
        return trimmed.to_string();
    }
    let without_open = match trimmed.find('\n') {
        Some(idx) => &trimmed[idx + 1..],
        None => return trimmed.to_string(),
    };
    without_open
        .trim_end()
        .trim_end_matches("```")
        .trim()
        .to_string()
}

/// Canned response used when the provider call fails or yields nothing.
pub const FALLBACK_RESPONSE: &str = "I'm here to help you work through this. \
Could you tell me more about what's on your mind?";

/// The fallback reply for a failed provider call.
pub fn fallback_reply() -> ParsedReply {
    ParsedReply {
        response: FALLBACK_RESPONSE.to_string(),
        quick_replies: generate_quick_replies(FALLBACK_RESPONSE),
        suggested_actions: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_json_parses_directly() {
        let raw = r#"{"response": "Let's set a goal.", "quick_replies": ["Yes", "Not yet", "Why?"], "suggested_actions": ["Write it down"]}"#;
        let parsed = parse_reply(raw);
        assert_eq!(parsed.response, "Let's set a goal.");
        assert_eq!(parsed.quick_replies.len(), 4);
        assert_eq!(parsed.quick_replies[0], "Yes");
        assert_eq!(parsed.suggested_actions, Some(vec!["Write it down".to_string()]));
    }

    #[test]
    fn json_buried_in_prose_is_extracted() {
        let raw = "Here you go:\n{\"response\": \"Start small.\", \"quick_replies\": [\"Ok\", \"How?\"]}\nHope that helps!";
        let parsed = parse_reply(raw);
        assert_eq!(parsed.response, "Start small.");
        assert_eq!(parsed.quick_replies[0], "Ok");
        assert_eq!(parsed.quick_replies.len(), 4);
    }

    #[test]
    fn single_model_reply_triggers_rederivation() {
        let raw = r#"{"response": "Think about your goal.", "quick_replies": ["Ok"]}"#;
        let parsed = parse_reply(raw);
        // "goal" in the response seeds the heuristic generator
        assert_eq!(parsed.quick_replies[0], "Let's define my goal");
        assert_eq!(parsed.quick_replies.len(), 4);
    }

    #[test]
    fn plain_text_falls_through() {
        let parsed = parse_reply("not-json response");
        assert_eq!(parsed.response, "not-json response");
        assert_eq!(parsed.quick_replies.len(), 4);
        assert!(parsed.suggested_actions.is_none());
    }

    #[test]
    fn fenced_json_string_unwraps() {
        let raw = "```json\n\"You are closer than you think.\"\n```";
        let parsed = parse_reply(raw);
        assert_eq!(parsed.response, "You are closer than you think.");
    }

    #[test]
    fn nested_response_wrapper_unwraps() {
        // object parse path: response field is itself the final text
        let raw = r#"{"response": "Keep going."}"#;
        let parsed = parse_reply(raw);
        assert_eq!(parsed.response, "Keep going.");
        assert_eq!(parsed.quick_replies.len(), 4);
    }

    #[test]
    fn empty_output_gets_canned_fallback() {
        let parsed = parse_reply("   ");
        assert_eq!(parsed.response, FALLBACK_RESPONSE);
        assert_eq!(parsed.quick_replies.len(), 4);
    }

    #[test]
    fn duplicate_model_replies_are_deduped_and_padded() {
        let raw = r#"{"response": "ok", "quick_replies": ["Same", "Same", "Same"]}"#;
        let parsed = parse_reply(raw);
        assert_eq!(parsed.quick_replies.len(), 4);
        assert_eq!(parsed.quick_replies[0], "Same");
        assert_eq!(
            parsed.quick_replies.iter().filter(|r| *r == "Same").count(),
            1
        );
    }

    #[test]
    fn suggested_actions_clamped_to_five() {
        let raw = r#"{"response": "ok", "quick_replies": ["a", "b"], "suggested_actions": ["1","2","3","4","5","6","7"]}"#;
        let parsed = parse_reply(raw);
        assert_eq!(parsed.suggested_actions.unwrap().len(), 5);
    }

    #[test]
    fn fallback_reply_is_well_formed() {
        let reply = fallback_reply();
        assert!(!reply.response.is_empty());
        assert_eq!(reply.quick_replies.len(), 4);
    }
}
