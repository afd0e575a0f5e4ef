//! Framework selection: map the message (and goal link) to one of five canned
//! coaching frameworks injected into the system prompt.
//!
//! The framework text is payload, not logic. Selection is first-match-wins
//! over five keyword groups, most specific first, with a goal-link fallback
//! so the function is total.

use summit_core::GoalLink;

/// The five coaching frameworks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Framework {
    DirectCareFeedback,
    LeadershipFoundation,
    PowerOwnership,
    CourageousLeadership,
    ExecutiveEvolution,
}

impl Framework {
    pub fn as_str(&self) -> &'static str {
        match self {
            Framework::DirectCareFeedback => "direct_care_feedback",
            Framework::LeadershipFoundation => "leadership_foundation",
            Framework::PowerOwnership => "power_ownership_model",
            Framework::CourageousLeadership => "courageous_leadership",
            Framework::ExecutiveEvolution => "executive_evolution",
        }
    }

    /// The prompt text block for this framework.
    pub fn text(&self) -> &'static str {
        match self {
            Framework::DirectCareFeedback => DIRECT_CARE_FEEDBACK,
            Framework::LeadershipFoundation => LEADERSHIP_FOUNDATION,
            Framework::PowerOwnership => POWER_OWNERSHIP,
            Framework::CourageousLeadership => COURAGEOUS_LEADERSHIP,
            Framework::ExecutiveEvolution => EXECUTIVE_EVOLUTION,
        }
    }
}

const EXECUTIVE_TERMS: &[&str] = &[
    "360 feedback", "360", "vp", "c-suite", "senior leader", "executive", "derailer",
    "blindspot", "reputation", "board",
];
const NEW_MANAGER_TERMS: &[&str] = &[
    "new manager", "first time manager", "managing people", "delegation", "team lead",
    "new leader",
];
const SELF_DOUBT_TERMS: &[&str] = &[
    "imposter", "not ready", "deserve", "doubt", "negotiat", "raise", "promotion", "self doubt",
];
const TRUST_TERMS: &[&str] = &[
    "vulnerable", "authentic", "trust", "psychological safety", "courage", "safe",
];
const FEEDBACK_TERMS: &[&str] = &[
    "feedback", "difficult conversation", "confrontation", "honest", "direct",
    "hard conversation",
];

/// Pick the most relevant framework for this turn. Always returns one.
pub fn select_framework(message: &str, goal_link: GoalLink) -> Framework {
    let text = message.to_lowercase();

    let groups: [(&[&str], Framework); 5] = [
        (EXECUTIVE_TERMS, Framework::ExecutiveEvolution),
        (NEW_MANAGER_TERMS, Framework::LeadershipFoundation),
        (SELF_DOUBT_TERMS, Framework::PowerOwnership),
        (TRUST_TERMS, Framework::CourageousLeadership),
        (FEEDBACK_TERMS, Framework::DirectCareFeedback),
    ];

    for (terms, framework) in groups {
        if terms.iter().any(|t| text.contains(t)) {
            return framework;
        }
    }

    match goal_link {
        GoalLink::LeadershipEffectiveness => Framework::LeadershipFoundation,
        GoalLink::CareerAdvancement => Framework::PowerOwnership,
        _ => Framework::DirectCareFeedback,
    }
}

const DIRECT_CARE_FEEDBACK: &str = "\
**Direct Care Feedback Framework**

Core principle: balance empathy with clarity in feedback conversations.

The feedback matrix:
1. Direct care (high empathy + high clarity): specific, actionable feedback \
delivered with genuine investment in the person's growth.
2. Avoidance (high empathy, low clarity): being nice but not helpful.
3. Harshness (low empathy, high clarity): honesty that lands like an attack.
4. Dishonesty (low empathy, low clarity): passive-aggressive or insincere.

Separate facts from stories: facts are observable behaviors, stories are your \
interpretations. Share your story as a story: \"The story I'm telling myself \
is...\" to open dialogue.

Key phrases:
- \"I'm sharing this because I care about your growth...\"
- \"What I observed was... and here's why it matters...\"

Use for: performance feedback, team dynamics, difficult conversations.";

const LEADERSHIP_FOUNDATION: &str = "\
**Leadership Foundation Framework**

Core focus: building leadership capability from the ground up.

The leadership triangle:
1. Purpose: make sure the team knows why their work matters.
2. People: hire for strengths, develop capabilities, foster safety.
3. Process: clear workflows, autonomy with accountability.

Delegation ladder:
- Level 1: \"Tell me what to do\" (needs development)
- Level 2: \"Here are the options\" (building skills)
- Level 3: \"Here's my plan\" (growing trust)
- Level 4: \"Here's what I did\" (full autonomy)

1-on-1 structure: let them set the agenda, dig in with powerful questions \
(\"What's the real challenge here?\", \"What do you need from me?\"), close \
with next actions.

Use for: new-leader transitions, delegation challenges, team building.";

const POWER_OWNERSHIP: &str = "\
**Power Ownership Model Framework**

Core focus: taking control of your career through ownership, influence, and \
evidence-based confidence.

Five career-limiting beliefs and their reframes:
1. \"I'm not ready yet\" -> nobody ever is; list evidence of preparation.
2. \"I don't deserve it\" -> document wins quarterly; you earned your seat.
3. \"It's never enough\" -> progress beats perfection.
4. \"I can't have it all\" -> define your own \"all\"; pick top 3 priorities.
5. \"It's too late\" -> careers are not linear.

Power = ownership + influence: own your narrative, your career, your voice, \
your mistakes.

Negotiation: know your market value, ask for more than you think you deserve, \
negotiate beyond salary, get it in writing.

Key question: \"What evidence do you have for that belief?\"

Use for: promotions, negotiations, imposter feelings, executive presence.";

const COURAGEOUS_LEADERSHIP: &str = "\
**Courageous Leadership Framework**

Core focus: building trust and authenticity through vulnerability and clear \
communication.

Armor vs courage: perfectionism, numbing, controlling, and pleasing everyone \
are defensive armor. Courage is showing up authentically, taking smart risks, \
embracing discomfort, and having hard conversations.

Trust is built systematically: boundaries, reliability, accountability, \
keeping confidences, integrity, non-judgment, generosity.

Clear is kind: being vague to avoid discomfort is unkind. Direct, specific \
communication is the most caring approach.

Key question: \"What story are you telling yourself about this?\"

Use for: trust-building, psychological safety, recovering from setbacks.";

const EXECUTIVE_EVOLUTION: &str = "\
**Executive Evolution Framework**

Core focus: identifying and changing the habits that limit senior leaders.

Common derailers: winning too much, adding too much value to every idea, \
passing judgment, starting with \"no\" or \"but\", withholding information, \
failing to give recognition, clinging to the past, not listening, goal \
obsession that damages relationships.

The FeedForward process: pick one behavior, ask stakeholders \"What \
suggestions do you have for me in the future?\", listen without defending, \
say thank you, repeat broadly, follow up quarterly.

Apology framework: \"I'm sorry, I was wrong\" — specific, no \"but\", then \
change the behavior.

Key question: \"What worked at your previous level but not anymore?\"

Use for: senior-executive coaching, 360 follow-up, C-suite transitions.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn executive_cues_outrank_everything() {
        // "feedback" also matches the feedback group; "360" wins
        let f = select_framework("my 360 feedback was rough", GoalLink::ProfessionalGrowth);
        assert_eq!(f, Framework::ExecutiveEvolution);
    }

    #[test]
    fn new_manager_gets_leadership_foundation() {
        let f = select_framework(
            "I'm a first time manager struggling with delegation",
            GoalLink::ProfessionalGrowth,
        );
        assert_eq!(f, Framework::LeadershipFoundation);
    }

    #[test]
    fn goal_link_fallback() {
        assert_eq!(
            select_framework("hello", GoalLink::LeadershipEffectiveness),
            Framework::LeadershipFoundation
        );
        assert_eq!(
            select_framework("hello", GoalLink::CareerAdvancement),
            Framework::PowerOwnership
        );
        assert_eq!(
            select_framework("hello", GoalLink::ProfessionalGrowth),
            Framework::DirectCareFeedback
        );
    }

    #[test]
    fn every_framework_has_text() {
        for f in [
            Framework::DirectCareFeedback,
            Framework::LeadershipFoundation,
            Framework::PowerOwnership,
            Framework::CourageousLeadership,
            Framework::ExecutiveEvolution,
        ] {
            assert!(!f.text().is_empty());
            assert!(!f.as_str().is_empty());
        }
    }
}
