//! The persisted per-user profile — the only entity that outlives a request.
//!
//! One JSON document per user id. Counts only grow; the topic and event
//! lists are capped windows. Deletion is out of scope for this component.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Most-recent message snippets retained per profile.
pub const LAST_TOPICS_CAP: usize = 8;
/// Most-recent session events retained per profile.
pub const SESSION_EVENTS_CAP: usize = 50;
/// Message snippets are truncated to this many characters before storage.
pub const TOPIC_SNIPPET_LEN: usize = 120;

/// One coaching turn, as recorded in the profile's event log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionEvent {
    pub ts: DateTime<Utc>,
    pub style: String,
    pub goal: String,
}

/// A point on the per-user emotion timeline (append-only).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionEvent {
    pub ts: DateTime<Utc>,
    pub emotion: String,
}

/// Per-user coaching memory, persisted after every turn.
///
/// `BTreeMap` keys keep serialization deterministic so profile round-trips
/// compare equal in tests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: String,

    /// Inferred trackable goals, sorted and deduplicated.
    #[serde(default)]
    pub goals: Vec<String>,

    /// Behavior pattern tags derived from keyword hits, sorted.
    #[serde(default)]
    pub patterns: Vec<String>,

    /// Most-recent message snippets, oldest first, capped at 8.
    #[serde(default)]
    pub last_topics: Vec<String>,

    /// Turn count per coaching style.
    #[serde(default)]
    pub style_usage: BTreeMap<String, u32>,

    /// Turn count per goal link.
    #[serde(default)]
    pub goal_progress_signals: BTreeMap<String, u32>,

    /// Capped log of recent turns.
    #[serde(default)]
    pub session_events: Vec<SessionEvent>,

    /// Append-only emotion history.
    #[serde(default)]
    pub emotion_timeline: Vec<EmotionEvent>,
}

impl UserProfile {
    /// The empty-default document created on first access for an unseen user.
    pub fn empty(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            goals: Vec::new(),
            patterns: Vec::new(),
            last_topics: Vec::new(),
            style_usage: BTreeMap::new(),
            goal_progress_signals: BTreeMap::new(),
            session_events: Vec::new(),
            emotion_timeline: Vec::new(),
        }
    }

    /// Record a message snippet, dropping the oldest beyond the cap.
    pub fn push_topic(&mut self, message: &str) {
        let snippet: String = message.chars().take(TOPIC_SNIPPET_LEN).collect();
        self.last_topics.push(snippet);
        if self.last_topics.len() > LAST_TOPICS_CAP {
            let overflow = self.last_topics.len() - LAST_TOPICS_CAP;
            self.last_topics.drain(..overflow);
        }
    }

    /// Insert a goal tag keeping `goals` sorted and deduplicated.
    pub fn add_goal(&mut self, goal: &str) {
        if let Err(pos) = self.goals.binary_search_by(|g| g.as_str().cmp(goal)) {
            self.goals.insert(pos, goal.to_string());
        }
    }

    /// Insert a pattern tag keeping `patterns` sorted and deduplicated.
    pub fn add_pattern(&mut self, pattern: &str) {
        if let Err(pos) = self.patterns.binary_search_by(|p| p.as_str().cmp(pattern)) {
            self.patterns.insert(pos, pattern.to_string());
        }
    }
}
