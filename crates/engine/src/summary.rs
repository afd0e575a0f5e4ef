//! Session summaries: one analysis call over the whole conversation, parsed
//! with the same defensive posture as the main turn handler.

use serde_json::Value;
use tracing::warn;

use summit_core::{ChatMessage, Provider, ProviderRequest, SessionSummary};

const SUMMARY_MAX_TOKENS: u32 = 500;
/// Raw model text is truncated to this many characters in the fallback path.
const RAW_SUMMARY_CAP: usize = 200;

fn summary_prompt(history: &[ChatMessage]) -> String {
    let conversation: Vec<String> = history
        .iter()
        .map(|m| format!("{}: {}", m.role, m.content))
        .collect();

    format!(
        "Analyze this coaching session and provide a structured summary.\n\n\
Conversation:\n{}\n\n\
Provide a JSON response with:\n\
{{\n\
  \"summary\": \"2-3 sentence overall summary\",\n\
  \"key_insights\": [\"insight 1\", \"insight 2\", \"insight 3\"],\n\
  \"action_items\": [\"action 1\", \"action 2\"],\n\
  \"progress_made\": \"What progress or breakthroughs happened\",\n\
  \"recommended_next_steps\": [\"next step 1\", \"next step 2\"]\n\
}}\n\n\
Focus on what the coachee discovered, decisions made, and concrete next actions.",
        conversation.join("\n")
    )
}

/// Summarize a session. Never fails: parse problems and provider errors both
/// degrade to a minimal summary.
pub async fn generate_session_summary(
    provider: &dyn Provider,
    model: &str,
    history: &[ChatMessage],
) -> SessionSummary {
    let request = ProviderRequest {
        model: model.to_string(),
        messages: vec![ChatMessage::user(summary_prompt(history))],
        temperature: 0.7,
        max_tokens: Some(SUMMARY_MAX_TOKENS),
    };

    let raw = match provider.complete(request).await {
        Ok(reply) => reply.text,
        Err(e) => {
            warn!(error = %e, "Session summary call failed");
            return SessionSummary {
                summary: "Summary generation failed.".into(),
                progress_made: "Session completed".into(),
                ..SessionSummary::default()
            };
        }
    };

    parse_summary(&raw)
}

/// Direct parse, then brace-substring extraction, then truncated raw text.
pub fn parse_summary(raw: &str) -> SessionSummary {
    if let Ok(summary) = serde_json::from_str::<SessionSummary>(raw.trim()) {
        return summary;
    }

    if let (Some(start), Some(end)) = (raw.find('{'), raw.rfind('}')) {
        if end > start {
            if let Ok(Value::Object(_)) = serde_json::from_str::<Value>(&raw[start..=end]) {
                if let Ok(summary) = serde_json::from_str::<SessionSummary>(&raw[start..=end]) {
                    return summary;
                }
            }
        }
    }

    let truncated: String = raw.chars().take(RAW_SUMMARY_CAP).collect();
    SessionSummary {
        summary: if truncated.is_empty() {
            "Summary generation failed.".into()
        } else {
            truncated
        },
        progress_made: "Session completed".into(),
        ..SessionSummary::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structured_summary_parses() {
        let raw = r#"{"summary": "Good session.", "key_insights": ["Trust grows slowly"], "action_items": ["Schedule 1:1s"], "progress_made": "Named the real blocker", "recommended_next_steps": ["Draft the plan"]}"#;
        let s = parse_summary(raw);
        assert_eq!(s.summary, "Good session.");
        assert_eq!(s.key_insights, vec!["Trust grows slowly"]);
        assert_eq!(s.progress_made, "Named the real blocker");
    }

    #[test]
    fn summary_buried_in_prose_is_extracted() {
        let raw = "Sure! Here is the summary:\n{\"summary\": \"We set a goal.\"}\nLet me know.";
        let s = parse_summary(raw);
        assert_eq!(s.summary, "We set a goal.");
        assert!(s.key_insights.is_empty());
    }

    #[test]
    fn unparseable_output_truncates_raw() {
        let raw = "x".repeat(500);
        let s = parse_summary(&raw);
        assert_eq!(s.summary.len(), RAW_SUMMARY_CAP);
        assert_eq!(s.progress_made, "Session completed");
    }

    #[test]
    fn empty_output_reports_failure() {
        let s = parse_summary("");
        assert_eq!(s.summary, "Summary generation failed.");
    }
}
