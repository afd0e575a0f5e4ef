//! Goal inference: link classification, the three-tier hierarchy, the anchor
//! sentence, skill building, and outcome prediction.

use summit_core::{
    CoachingStyle, EmotionLabel, GoalHierarchy, GoalLink, OutcomePrediction, RiskLevel,
    SkillBuilding, Trajectory,
};

const CAREER_TERMS: &[&str] = &["promotion", "vp", "director", "career growth"];
const LEADERSHIP_TERMS: &[&str] = &["team", "manager", "leadership", "stakeholder"];
const EXECUTION_TERMS: &[&str] = &["focus", "productivity", "prioritize", "execution"];

/// First-match-wins goal-link classification.
pub fn infer_goal_link(message: &str) -> GoalLink {
    let text = message.to_lowercase();

    if CAREER_TERMS.iter().any(|t| text.contains(t)) {
        GoalLink::CareerAdvancement
    } else if LEADERSHIP_TERMS.iter().any(|t| text.contains(t)) {
        GoalLink::LeadershipEffectiveness
    } else if EXECUTION_TERMS.iter().any(|t| text.contains(t)) {
        GoalLink::ExecutionExcellence
    } else {
        GoalLink::ProfessionalGrowth
    }
}

const TIER_CAP: usize = 3;

fn push_unique(tier: &mut Vec<String>, statement: &str) {
    if !tier.iter().any(|s| s == statement) {
        tier.push(statement.to_string());
    }
}

fn any_term(text: &str, terms: &[&str]) -> bool {
    terms.iter().any(|t| text.contains(t))
}

/// Build the strategic/tactical/daily hierarchy from keyword presence.
///
/// Each tier is populated independently, deduplicated in first-seen order and
/// capped at 3. An empty tier falls back: strategic to the profile's stored
/// goals (title-cased), then fixed defaults.
pub fn infer_goal_hierarchy(
    message: &str,
    goal_link: GoalLink,
    profile_goals: &[String],
) -> GoalHierarchy {
    let text = message.to_lowercase();
    let mut h = GoalHierarchy::default();

    // strategic layer (3-12 months)
    if goal_link == GoalLink::CareerAdvancement
        || any_term(&text, &["promotion", "vp", "director", "career"])
    {
        push_unique(&mut h.strategic, "Career advancement objective");
        push_unique(&mut h.strategic, "Leadership effectiveness improvement");
    }
    if any_term(&text, &["org", "stakeholder", "impact", "influence"]) {
        push_unique(&mut h.strategic, "Organizational impact target");
    }
    if any_term(&text, &["skill", "learn", "develop"]) {
        push_unique(&mut h.strategic, "Skill development priority");
    }

    // tactical layer (1-6 weeks)
    if any_term(&text, &["project", "deliver", "roadmap", "plan"]) {
        push_unique(&mut h.tactical, "Specific project outcome");
    }
    if any_term(&text, &["team", "manager", "1:1", "delegate"]) {
        push_unique(&mut h.tactical, "Team development objective");
    }
    if any_term(&text, &["communication", "presentation", "message"]) {
        push_unique(&mut h.tactical, "Communication improvement target");
    }
    if any_term(&text, &["process", "workflow", "efficiency", "optimize"]) {
        push_unique(&mut h.tactical, "Process optimization target");
    }

    // daily action layer (immediate)
    if any_term(&text, &["meeting", "tomorrow", "today", "prep"]) {
        push_unique(&mut h.daily, "Meeting preparation + follow-up");
    }
    if any_term(&text, &["difficult conversation", "conflict", "hard talk"]) {
        push_unique(&mut h.daily, "Difficult conversation navigation");
    }
    if any_term(&text, &["decide", "decision", "tradeoff"]) {
        push_unique(&mut h.daily, "Decision-making support");
    }
    if any_term(&text, &["stress", "overwhelmed", "anxious", "burnout"]) {
        push_unique(&mut h.daily, "Stress regulation technique");
    }

    if h.strategic.is_empty() && !profile_goals.is_empty() {
        h.strategic = profile_goals
            .iter()
            .take(2)
            .map(|g| title_case(&g.replace('_', " ")))
            .collect();
    }
    if h.strategic.is_empty() {
        h.strategic.push("Leadership effectiveness improvement".into());
    }
    if h.tactical.is_empty() {
        h.tactical.push("Specific project outcome".into());
    }
    if h.daily.is_empty() {
        h.daily.push("Decision-making support".into());
    }

    h.strategic.truncate(TIER_CAP);
    h.tactical.truncate(TIER_CAP);
    h.daily.truncate(TIER_CAP);
    h
}

fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// One-line anchor sentence tying the session to the top strategic item.
pub fn build_goal_anchor(goal_link: GoalLink, hierarchy: &GoalHierarchy) -> String {
    let top = hierarchy
        .strategic
        .first()
        .map(String::as_str)
        .unwrap_or("leadership growth");
    match goal_link {
        GoalLink::CareerAdvancement => format!("Anchor this session to career growth: {top}."),
        GoalLink::LeadershipEffectiveness => {
            format!("Anchor this session to leadership impact: {top}.")
        }
        _ => format!("Anchor this session to measurable progress: {top}."),
    }
}

/// Micro-learning recommendation keyed by style, with a practice hint that
/// de-escalates when the coachee is stressed or low on confidence.
pub fn skill_building(style_used: CoachingStyle, emotion_primary: EmotionLabel) -> SkillBuilding {
    let micro = match style_used {
        CoachingStyle::Directive => {
            "Use a 3-step decision checklist (context, options, first action)."
        }
        CoachingStyle::Facilitative => "Use 1 Socratic question chain (What? So what? Now what?).",
        CoachingStyle::Supportive => "Use 90-second emotional labeling + one confidence reframe.",
        CoachingStyle::Strategic => "Use 2x2 tradeoff matrix before committing.",
    };

    let practice = if matches!(
        emotion_primary,
        EmotionLabel::HighStress | EmotionLabel::LowConfidence
    ) {
        "Apply this in a low-risk scenario first, then escalate scope."
    } else {
        "Apply this in your next high-stakes conversation."
    };

    SkillBuilding {
        micro_learning: micro.into(),
        practice_opportunity: practice.into(),
        competency_track: "leadership_judgment".into(),
    }
}

/// Risk and trajectory for the active goal, from emotion membership in fixed
/// sets, plus a recommendation keyed by trajectory.
pub fn predict_outcome(
    goal_link: GoalLink,
    emotion_primary: EmotionLabel,
    style_shift: &str,
) -> OutcomePrediction {
    let risk_level = match emotion_primary {
        EmotionLabel::HighStress | EmotionLabel::Frustration => RiskLevel::High,
        EmotionLabel::HighEnergy | EmotionLabel::AnalyticalMode => RiskLevel::Low,
        _ => RiskLevel::Medium,
    };

    let trajectory = if risk_level == RiskLevel::High {
        Trajectory::AtRisk
    } else {
        Trajectory::Improving
    };

    let recommendation = match trajectory {
        Trajectory::AtRisk => {
            "Use supportive stabilization this week, then re-enter strategic planning."
        }
        Trajectory::Improving => "Continue current plan with weekly checkpoints.",
    };

    OutcomePrediction {
        goal_link,
        trajectory,
        risk_level,
        style_shift_signal: style_shift.to_string(),
        recommendation: recommendation.into(),
    }
}
