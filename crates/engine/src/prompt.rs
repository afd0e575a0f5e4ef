//! System prompt and message assembly for a coaching turn.

use summit_core::{ChatMessage, GoalHierarchy, SignalBundle, TurnRequest, UserProfile};
use summit_signals::{style_prompt, Framework};

/// The base coaching persona. Every non-crisis turn starts from this.
pub const GROW_SYSTEM_PROMPT: &str = "\
You are an expert Career & Executive Coach using the GROW model.

**GROW Framework:**
1. **Goal**: What does the coachee want to achieve?
2. **Reality**: What is the current situation?
3. **Options**: What choices do they have?
4. **Will/Way Forward**: What specific actions will they take?

**Coaching Principles:**
- Ask powerful questions, don't just give answers
- Help coachees discover their own solutions
- Be supportive but challenge assumptions
- Focus on actionable outcomes
- Celebrate progress and insights

**Crisis Protocol:**
If someone explicitly expresses thoughts of self-harm or suicide:
1. Express genuine concern
2. Provide crisis resources immediately
3. Recommend professional help
4. Do not attempt to provide therapy

**Coaching-Appropriate Topics:**
Career stress, burnout, overwhelm, work-life balance, job dissatisfaction, \
and professional challenges are all appropriate for coaching. These are NOT \
crises. Coach them normally with empathy and strategic guidance.

Crisis Resources (only share for explicit self-harm/suicide statements):
- National Suicide Prevention Lifeline: 988 (US)
- Crisis Text Line: Text HOME to 741741

Always maintain a warm, professional, and supportive tone. Keep responses \
concise but meaningful (2-4 paragraphs max unless exploring deeply).";

/// Instruction for the structured reply shape the parse chain expects.
const RESPONSE_SHAPE_INSTRUCTION: &str = "\
Reply with a JSON object of this shape when you can:
{\"response\": \"your coaching reply\", \"quick_replies\": [\"...\"], \
\"suggested_actions\": [\"...\"]}
If structure gets in the way of a good coaching reply, plain text is fine.";

/// History longer than this gets trimmed before prompt assembly.
const HISTORY_TRIM_THRESHOLD: usize = 20;
const HISTORY_HEAD: usize = 2;
const HISTORY_TAIL: usize = 10;

/// Trim long histories to the opening turns plus the recent window.
///
/// The first turns anchor what the session is about; the tail carries the
/// active thread. Everything between is dropped to bound prompt size.
pub fn trim_history(history: &[ChatMessage]) -> Vec<ChatMessage> {
    if history.len() <= HISTORY_TRIM_THRESHOLD {
        return history.to_vec();
    }
    let mut trimmed = Vec::with_capacity(HISTORY_HEAD + HISTORY_TAIL);
    trimmed.extend_from_slice(&history[..HISTORY_HEAD]);
    trimmed.extend_from_slice(&history[history.len() - HISTORY_TAIL..]);
    trimmed
}

/// Compact recent-history packet folded into the system prompt.
pub fn build_context_packet(request: &TurnRequest) -> String {
    let mut parts = Vec::new();

    if let Some(context) = request.context.as_deref().filter(|c| !c.trim().is_empty()) {
        parts.push(format!("Explicit context: {context}"));
    }

    if !request.history.is_empty() {
        let tail = &request.history[request.history.len().saturating_sub(4)..];
        let compact: Vec<String> = tail
            .iter()
            .map(|m| {
                let snippet: String = m.content.chars().take(140).collect();
                format!("{}: {snippet}", m.role)
            })
            .collect();
        parts.push(format!("Recent history: {}", compact.join(" | ")));
    }

    parts.push(format!("Latest user message: {}", request.message));
    parts.join("\n")
}

fn format_hierarchy(h: &GoalHierarchy) -> String {
    format!(
        "Strategic: {}\nTactical: {}\nDaily: {}",
        h.strategic.join("; "),
        h.tactical.join("; "),
        h.daily.join("; ")
    )
}

/// Assemble the full system prompt for a non-crisis turn.
pub fn build_system_prompt(
    signals: &SignalBundle,
    framework: Framework,
    profile: &UserProfile,
    request: &TurnRequest,
) -> String {
    let mut prompt = String::from(GROW_SYSTEM_PROMPT);
    prompt.push_str("\n\n");
    prompt.push_str(style_prompt(signals.style_used));

    prompt.push_str("\n\nUse this framework when appropriate:\n");
    prompt.push_str(framework.text());

    prompt.push_str("\n\n");
    prompt.push_str(&signals.goal_anchor);
    prompt.push_str("\nGoal hierarchy for this session:\n");
    prompt.push_str(&format_hierarchy(&signals.goal_hierarchy));

    if !profile.goals.is_empty() || !profile.patterns.is_empty() || !profile.last_topics.is_empty()
    {
        prompt.push_str("\n\nCoachee context:");
        if !profile.goals.is_empty() {
            prompt.push_str(&format!("\n- Tracked goals: {}", profile.goals.join(", ")));
        }
        if !profile.patterns.is_empty() {
            prompt.push_str(&format!(
                "\n- Observed patterns: {}",
                profile.patterns.join(", ")
            ));
        }
        if let Some(topic) = profile.last_topics.last() {
            prompt.push_str(&format!("\n- Last topic discussed: {topic}"));
        }
    }

    prompt.push_str("\n\n");
    prompt.push_str(&build_context_packet(request));

    prompt.push_str("\n\n");
    prompt.push_str(RESPONSE_SHAPE_INSTRUCTION);
    prompt
}

/// The role-tagged message list for the provider: trimmed history plus the
/// current message.
pub fn build_messages(request: &TurnRequest) -> Vec<ChatMessage> {
    let mut messages = trim_history(&request.history);
    messages.push(ChatMessage::user(request.message.clone()));
    messages
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_history_passes_through() {
        let history: Vec<ChatMessage> = (0..20).map(|i| ChatMessage::user(format!("t{i}"))).collect();
        assert_eq!(trim_history(&history).len(), 20);
    }

    #[test]
    fn long_history_keeps_head_and_tail() {
        let history: Vec<ChatMessage> = (0..30).map(|i| ChatMessage::user(format!("t{i}"))).collect();
        let trimmed = trim_history(&history);
        assert_eq!(trimmed.len(), 12);
        assert_eq!(trimmed[0].content, "t0");
        assert_eq!(trimmed[1].content, "t1");
        assert_eq!(trimmed[2].content, "t20");
        assert_eq!(trimmed[11].content, "t29");
    }

    #[test]
    fn context_packet_layers() {
        let mut req = TurnRequest::new("What should I do?");
        req.context = Some("Mid-cycle review week".into());
        req.history = vec![
            ChatMessage::user("I'm preparing for a review"),
            ChatMessage::assistant("What outcome do you want?"),
        ];
        let packet = build_context_packet(&req);
        assert!(packet.starts_with("Explicit context: Mid-cycle review week"));
        assert!(packet.contains("Recent history: user: I'm preparing"));
        assert!(packet.ends_with("Latest user message: What should I do?"));
    }

    #[test]
    fn messages_end_with_current_turn() {
        let req = TurnRequest::new("hello").with_history(vec![ChatMessage::assistant("hi")]);
        let messages = build_messages(&req);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages.last().unwrap().content, "hello");
    }

    #[test]
    fn persona_keeps_crisis_resources() {
        assert!(GROW_SYSTEM_PROMPT.contains("988"));
        assert!(GROW_SYSTEM_PROMPT.contains("741741"));
    }
}
