//! Per-concept mastery record.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::exercise::ExerciseType;

/// Lowest mastery level; every concept starts here.
pub const INITIAL_LEVEL: u8 = 1;

/// Mastery progress for one concept within a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptProgress {
    /// Highest ladder rung unlocked for this concept. Never decreases.
    pub current_exercise_level: u8,

    /// Consecutive-correct count per exercise type
    #[serde(default)]
    pub exercise_streaks: BTreeMap<ExerciseType, u32>,
}

impl Default for ConceptProgress {
    fn default() -> Self {
        Self {
            current_exercise_level: INITIAL_LEVEL,
            exercise_streaks: BTreeMap::new(),
        }
    }
}

impl ConceptProgress {
    /// Progress at a given level with no streaks.
    pub fn at_level(level: u8) -> Self {
        Self {
            current_exercise_level: level.max(INITIAL_LEVEL),
            ..Default::default()
        }
    }

    /// Builder: set a streak.
    pub fn with_streak(mut self, exercise_type: ExerciseType, streak: u32) -> Self {
        self.exercise_streaks.insert(exercise_type, streak);
        self
    }

    /// Consecutive-correct count for a type (0 if never recorded).
    pub fn streak(&self, exercise_type: ExerciseType) -> u32 {
        self.exercise_streaks.get(&exercise_type).copied().unwrap_or(0)
    }

    /// Raise the level to `level`. Lower values are ignored.
    ///
    /// Returns true if the level changed.
    pub fn raise_level(&mut self, level: u8) -> bool {
        if level > self.current_exercise_level {
            self.current_exercise_level = level;
            true
        } else {
            false
        }
    }

    /// The ladder rung matching the current level, if the level is a rung.
    pub fn current_rung(&self) -> Option<ExerciseType> {
        ExerciseType::from_level(self.current_exercise_level)
    }
}
