//! Behavior tracking: running usage counters and the style-preference shift
//! signal computed from them.

use chrono::Utc;

use summit_core::{CoachingStyle, GoalLink, SessionEvent, UserProfile, SESSION_EVENTS_CAP};

/// Fold one turn into the profile's usage counters and event log.
pub fn record_turn(profile: &mut UserProfile, style_used: CoachingStyle, goal_link: GoalLink) {
    *profile
        .style_usage
        .entry(style_used.as_str().to_string())
        .or_insert(0) += 1;
    *profile
        .goal_progress_signals
        .entry(goal_link.as_str().to_string())
        .or_insert(0) += 1;

    profile.session_events.push(SessionEvent {
        ts: Utc::now(),
        style: style_used.as_str().to_string(),
        goal: goal_link.as_str().to_string(),
    });
    if profile.session_events.len() > SESSION_EVENTS_CAP {
        let overflow = profile.session_events.len() - SESSION_EVENTS_CAP;
        profile.session_events.drain(..overflow);
    }
}

/// Summarize where the user's style preference is heading.
///
/// `no_shift` with no usage yet, `stable:<style>` with a single style,
/// `blended` when the top two counts are within 1 of each other, else
/// `leaning:<style>`.
pub fn style_preference_shift(profile: &UserProfile) -> String {
    if profile.style_usage.is_empty() {
        return "no_shift".into();
    }

    let mut counts: Vec<(&str, u32)> = profile
        .style_usage
        .iter()
        .map(|(style, count)| (style.as_str(), *count))
        .collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    if counts.len() == 1 {
        return format!("stable:{}", counts[0].0);
    }
    if counts[0].1 - counts[1].1 <= 1 {
        return "blended".into();
    }
    format!("leaning:{}", counts[0].0)
}
