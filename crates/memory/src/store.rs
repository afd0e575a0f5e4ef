//! File-backed profile store — one pretty-printed JSON document per user.
//!
//! Storage location: `<memory dir>/<sanitized user id>.json`. The directory
//! is created lazily on the first write. Reads distinguish "no profile yet"
//! from "profile exists but is unreadable" so callers and tests can tell the
//! two apart; both resolve to an empty default document for the turn.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{debug, warn};

use summit_core::{EmotionEvent, GoalLink, MemoryError, UserProfile, ANONYMOUS_USER};

/// Typed result of a profile read.
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileLoadOutcome {
    /// The stored document parsed cleanly.
    Loaded(UserProfile),
    /// No file for this user yet.
    Absent,
    /// A file exists but could not be read or parsed. The turn proceeds with
    /// an empty default; the next save overwrites the bad file.
    Corrupt,
}

impl ProfileLoadOutcome {
    /// Resolve to a usable document, falling back to the empty default.
    pub fn into_profile(self, user_id: &str) -> UserProfile {
        match self {
            ProfileLoadOutcome::Loaded(profile) => profile,
            ProfileLoadOutcome::Absent | ProfileLoadOutcome::Corrupt => {
                UserProfile::empty(user_id)
            }
        }
    }
}

/// Per-user JSON profile store with per-user write serialization.
pub struct ProfileStore {
    dir: PathBuf,
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl ProfileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        debug!(dir = %dir.display(), "Profile store initialized");
        Self {
            dir,
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Acquire the lock for one user's read-modify-write cycle.
    ///
    /// Turns for different users never contend; two in-flight turns for the
    /// same user serialize here instead of racing on the file.
    pub async fn lock_user(&self, user_id: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            locks
                .entry(sanitize(user_id))
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };
        lock.lock_owned().await
    }

    fn path_for(&self, user_id: &str) -> PathBuf {
        self.dir.join(format!("{}.json", sanitize(user_id)))
    }

    /// Read a user's profile from disk.
    ///
    /// I/O and parse failures never propagate: a missing file is `Absent`,
    /// anything else unreadable is `Corrupt`.
    pub fn load(&self, user_id: &str) -> ProfileLoadOutcome {
        let path = self.path_for(user_id);
        let content = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return ProfileLoadOutcome::Absent;
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Profile unreadable");
                return ProfileLoadOutcome::Corrupt;
            }
        };

        match serde_json::from_str::<UserProfile>(&content) {
            Ok(profile) => ProfileLoadOutcome::Loaded(profile),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Profile corrupt, starting fresh");
                ProfileLoadOutcome::Corrupt
            }
        }
    }

    /// Load a usable document for the turn, empty default when needed.
    pub fn load_or_default(&self, user_id: &str) -> UserProfile {
        self.load(user_id).into_profile(user_id)
    }

    /// Serialize and overwrite the user's document. Last writer wins.
    pub fn save(&self, profile: &UserProfile) -> Result<(), MemoryError> {
        std::fs::create_dir_all(&self.dir).map_err(|e| {
            MemoryError::Storage(format!("Failed to create memory directory: {e}"))
        })?;

        let content = serde_json::to_string_pretty(profile)
            .map_err(|e| MemoryError::Serialize(e.to_string()))?;

        let path = self.path_for(&profile.user_id);
        std::fs::write(&path, content)
            .map_err(|e| MemoryError::Storage(format!("Failed to write profile: {e}")))?;

        debug!(path = %path.display(), "Profile saved");
        Ok(())
    }

    /// Debug passthrough: the raw document plus whether it existed on disk.
    pub fn inspect(&self, user_id: &str) -> (UserProfile, bool) {
        match self.load(user_id) {
            ProfileLoadOutcome::Loaded(p) => (p, true),
            outcome => (outcome.into_profile(user_id), false),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

const STRESS_PATTERN_TERMS: &[&str] = &["stuck", "overwhelmed", "burnout", "anxious"];
const ADVANCEMENT_PATTERN_TERMS: &[&str] = &["promotion", "vp", "director", "career"];
const LEADERSHIP_PATTERN_TERMS: &[&str] = &["team", "stakeholder", "manager", "leadership"];

/// Merge one turn's signals into the in-memory document.
///
/// Records the message snippet, the trackable goal (the catch-all and crisis
/// links are excluded), newly matched behavior pattern tags, and an emotion
/// timeline point. The caller saves afterwards.
pub fn update_from_turn(
    profile: &mut UserProfile,
    message: &str,
    goal_link: GoalLink,
    emotion: &str,
) {
    profile.push_topic(message);

    if goal_link.is_trackable() {
        profile.add_goal(goal_link.as_str());
    }

    let text = message.to_lowercase();
    if STRESS_PATTERN_TERMS.iter().any(|t| text.contains(t)) {
        profile.add_pattern("stress_load");
    }
    if ADVANCEMENT_PATTERN_TERMS.iter().any(|t| text.contains(t)) {
        profile.add_pattern("advancement_focus");
    }
    if LEADERSHIP_PATTERN_TERMS.iter().any(|t| text.contains(t)) {
        profile.add_pattern("leadership_scope");
    }

    profile.emotion_timeline.push(EmotionEvent {
        ts: Utc::now(),
        emotion: emotion.to_string(),
    });
}

fn sanitize(user_id: &str) -> String {
    let id = if user_id.trim().is_empty() {
        ANONYMOUS_USER
    } else {
        user_id
    };
    id.replace(['/', '\\'], "_")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store() -> (TempDir, ProfileStore) {
        let tmp = TempDir::new().unwrap();
        let store = ProfileStore::new(tmp.path().join("memory"));
        (tmp, store)
    }

    #[tokio::test]
    async fn unseen_user_is_absent() {
        let (_tmp, store) = store();
        assert_eq!(store.load("nobody"), ProfileLoadOutcome::Absent);
        let profile = store.load_or_default("nobody");
        assert_eq!(profile, UserProfile::empty("nobody"));
    }

    #[tokio::test]
    async fn save_then_load_roundtrips() {
        let (_tmp, store) = store();
        let mut profile = UserProfile::empty("alice");
        update_from_turn(
            &mut profile,
            "I want a promotion but my team is overwhelmed",
            GoalLink::CareerAdvancement,
            "high_stress",
        );
        store.save(&profile).unwrap();

        match store.load("alice") {
            ProfileLoadOutcome::Loaded(loaded) => assert_eq!(loaded, profile),
            other => panic!("expected Loaded, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn corrupt_file_is_distinguished_from_absent() {
        let (_tmp, store) = store();
        std::fs::create_dir_all(store.dir()).unwrap();
        std::fs::write(store.dir().join("bob.json"), "{not json").unwrap();

        assert_eq!(store.load("bob"), ProfileLoadOutcome::Corrupt);
        // and the fallback document is still usable
        assert_eq!(store.load_or_default("bob"), UserProfile::empty("bob"));
    }

    #[tokio::test]
    async fn corrupt_file_recovers_on_next_save() {
        let (_tmp, store) = store();
        std::fs::create_dir_all(store.dir()).unwrap();
        std::fs::write(store.dir().join("carol.json"), "garbage").unwrap();

        let profile = store.load_or_default("carol");
        store.save(&profile).unwrap();
        assert_eq!(store.load("carol"), ProfileLoadOutcome::Loaded(profile));
    }

    #[tokio::test]
    async fn user_id_with_path_separators_is_sanitized() {
        let (_tmp, store) = store();
        let profile = UserProfile::empty("../evil/../../user");
        store.save(&profile).unwrap();

        // the file lands inside the memory dir, nothing escapes
        let entries: Vec<_> = std::fs::read_dir(store.dir()).unwrap().collect();
        assert_eq!(entries.len(), 1);
        assert_eq!(
            store.load("../evil/../../user"),
            ProfileLoadOutcome::Loaded(profile)
        );
    }

    #[tokio::test]
    async fn update_from_turn_merges_signals() {
        let mut profile = UserProfile::empty("dave");
        update_from_turn(
            &mut profile,
            "I'm stuck leading my team through a stressful launch",
            GoalLink::LeadershipEffectiveness,
            "frustration",
        );

        assert_eq!(profile.goals, vec!["leadership_effectiveness"]);
        // add_pattern keeps the list sorted
        assert_eq!(profile.patterns, vec!["leadership_scope", "stress_load"]);
        assert_eq!(profile.last_topics.len(), 1);
        assert_eq!(profile.emotion_timeline.len(), 1);
        assert_eq!(profile.emotion_timeline[0].emotion, "frustration");
    }

    #[tokio::test]
    async fn untrackable_goals_are_not_stored() {
        let mut profile = UserProfile::empty("erin");
        update_from_turn(&mut profile, "hello", GoalLink::ProfessionalGrowth, "neutral");
        update_from_turn(&mut profile, "hello", GoalLink::WellbeingFirst, "high_stress");
        assert!(profile.goals.is_empty());
    }

    #[tokio::test]
    async fn per_user_lock_serializes_writers() {
        let (_tmp, store) = store();
        let store = Arc::new(store);

        let guard = store.lock_user("frank").await;
        let contender = {
            let store = store.clone();
            tokio::spawn(async move {
                let _guard = store.lock_user("frank").await;
            })
        };
        // a different user is not blocked
        let _other = store.lock_user("grace").await;

        assert!(!contender.is_finished());
        drop(guard);
        contender.await.unwrap();
    }
}
