//! Result recording: the grader's side of the run.
//!
//! After each answered exercise the recorder appends history, advances the
//! step counter, updates streaks, and promotes concepts up the ladder. The
//! scheduler only ever reads what this module writes.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::domain::{ExerciseDirective, ExerciseResult, ExerciseType, HistoryEntry, Run};
use crate::error::{DrillError, Result};

/// Promotion thresholds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GradingConfig {
    /// Consecutive correct answers at a concept's current rung before it moves up
    #[serde(rename = "promote-after", alias = "promote_after")]
    pub promote_after: u32,

    /// Same, for the exposure rung
    #[serde(rename = "exposure-promote-after", alias = "exposure_promote_after")]
    pub exposure_promote_after: u32,
}

impl Default for GradingConfig {
    fn default() -> Self {
        Self {
            promote_after: 2,
            exposure_promote_after: 1,
        }
    }
}

impl GradingConfig {
    /// Streak needed at `exercise_type` to promote.
    pub fn threshold(&self, exercise_type: ExerciseType) -> u32 {
        match exercise_type {
            ExerciseType::Exposure => self.exposure_promote_after,
            _ => self.promote_after,
        }
    }
}

/// A concept that moved up the ladder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Promotion {
    pub concept_id: String,
    pub from_level: u8,
    pub to_level: u8,
}

/// What a single `record` call changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordOutcome {
    /// Step the answer was recorded at
    pub step: u64,
    pub promotions: Vec<Promotion>,
}

/// Records answered exercises into a run.
#[derive(Debug, Clone, Default)]
pub struct ResultRecorder {
    config: GradingConfig,
}

impl ResultRecorder {
    pub fn new(config: GradingConfig) -> Self {
        Self { config }
    }

    /// Record the learner's answer to `directive`.
    ///
    /// One history entry is appended per concept in the directive (four for a
    /// matching exercise), all stamped with the same step. The step counter
    /// advances once.
    pub fn record(&self, run: &mut Run, directive: &ExerciseDirective, result: ExerciseResult) -> Result<RecordOutcome> {
        let Some(exercise_type) = directive.exercise_type else {
            return Err(DrillError::InvalidState("no exercise was scheduled".to_string()));
        };
        let concepts = directive.concepts();
        if concepts.is_empty() {
            return Err(DrillError::InvalidState(format!(
                "{} directive has no concepts",
                exercise_type
            )));
        }

        let step = run.step_counter;
        let mut promotions = Vec::new();

        for concept_id in concepts {
            run.history.push(HistoryEntry {
                concept_id: concept_id.to_string(),
                exercise_type,
                step,
                result,
            });

            let threshold = self.config.threshold(exercise_type);
            let progress = run.progress_or_init(concept_id);
            let streak = progress.exercise_streaks.entry(exercise_type).or_insert(0);
            match result {
                ExerciseResult::Correct => *streak += 1,
                ExerciseResult::Incorrect => *streak = 0,
                ExerciseResult::Other => {}
            }
            let streak = *streak;

            if result == ExerciseResult::Correct
                && progress.current_rung() == Some(exercise_type)
                && streak >= threshold
                && let Some(next) = exercise_type.next()
            {
                let from_level = progress.current_exercise_level;
                if progress.raise_level(next.level()) {
                    info!("Promoted {} from level {} to {}", concept_id, from_level, next.level());
                    promotions.push(Promotion {
                        concept_id: concept_id.to_string(),
                        from_level,
                        to_level: next.level(),
                    });
                }
            }
        }

        run.step_counter += 1;
        run.touch();
        debug!("Run {} recorded {:?} for {} at step {}", run.id, result, exercise_type, step);

        Ok(RecordOutcome { step, promotions })
    }
}
