//! The learner's run: session state consumed by the scheduler.
//!
//! A run is owned by exactly one session. The scheduler only lazily creates
//! progress records in it; the result recorder appends history and advances
//! progress.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use super::exercise::{ExerciseResult, ExerciseType};
use super::progress::{ConceptProgress, INITIAL_LEVEL};
use crate::id::generate_run_id;
use crate::storage::HasId;

/// Target/support language pair, as BCP-47-ish tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguagePair {
    /// Language being learned
    pub target: String,
    /// Language the learner already knows
    pub support: String,
}

impl LanguagePair {
    pub fn new(target: impl Into<String>, support: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            support: support.into(),
        }
    }
}

impl Default for LanguagePair {
    fn default() -> Self {
        Self::new("es", "en")
    }
}

/// One past exercise outcome. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub concept_id: String,
    pub exercise_type: ExerciseType,
    /// Value of the run's step counter when the exercise was answered
    pub step: u64,
    pub result: ExerciseResult,
}

/// One learner's active run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Run {
    //=== Identity ===
    /// Unique identifier (timestamp + random suffix: "1738300800123-a1b2")
    pub id: String,

    pub languages: LanguagePair,

    //=== Timestamps ===
    pub created_at: DateTime<Utc>,
    pub last_active: DateTime<Utc>,

    //=== Progress State ===
    /// Number of answered exercises. Only ever increases.
    #[serde(default)]
    pub step_counter: u64,

    /// Append-only, insertion order significant
    #[serde(default)]
    pub history: Vec<HistoryEntry>,

    #[serde(default)]
    pub concept_progress: HashMap<String, ConceptProgress>,

    #[serde(default)]
    pub stage_unlocks: BTreeMap<String, bool>,
}

impl Run {
    /// Create a fresh run with a newly generated id.
    pub fn new(languages: LanguagePair) -> Self {
        Self::with_id(generate_run_id(), languages)
    }

    /// Create a fresh run under an existing id (used when resetting).
    pub fn with_id(id: impl Into<String>, languages: LanguagePair) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            languages,
            created_at: now,
            last_active: now,
            step_counter: 0,
            history: Vec::new(),
            concept_progress: HashMap::new(),
            stage_unlocks: BTreeMap::new(),
        }
    }

    /// Progress for a concept, if it has been initialized.
    pub fn progress(&self, concept_id: &str) -> Option<&ConceptProgress> {
        self.concept_progress.get(concept_id)
    }

    /// Get the concept's progress, creating the default record on first access.
    pub fn progress_or_init(&mut self, concept_id: &str) -> &mut ConceptProgress {
        self.concept_progress.entry(concept_id.to_string()).or_default()
    }

    /// Current level of a concept; uninitialized concepts are at level 1.
    pub fn level_of(&self, concept_id: &str) -> u8 {
        self.progress(concept_id)
            .map(|p| p.current_exercise_level)
            .unwrap_or(INITIAL_LEVEL)
    }

    /// Streak for a concept at an exercise type; 0 if absent.
    pub fn streak_of(&self, concept_id: &str, exercise_type: ExerciseType) -> u32 {
        self.progress(concept_id).map(|p| p.streak(exercise_type)).unwrap_or(0)
    }

    /// The most recent history entry.
    pub fn last_entry(&self) -> Option<&HistoryEntry> {
        self.history.last()
    }

    pub fn is_stage_unlocked(&self, stage: &str) -> bool {
        self.stage_unlocks.get(stage).copied().unwrap_or(false)
    }

    pub fn unlock_stage(&mut self, stage: impl Into<String>) {
        self.stage_unlocks.insert(stage.into(), true);
    }

    /// Bump `last_active` to now.
    pub fn touch(&mut self) {
        self.last_active = Utc::now();
    }
}

impl HasId for Run {
    fn id(&self) -> &str {
        &self.id
    }
}
