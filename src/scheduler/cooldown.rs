//! Cooldown tracking for spaced repetition.
//!
//! Only the single most recent history entry is consulted, so cooldowns do not
//! stack across several recent exposures.

use crate::domain::{ExerciseResult, ExerciseType, Run};

/// Steps a concept rests after a correct answer.
pub const COOLDOWN_AFTER_CORRECT: u64 = 3;
/// Steps a concept rests after an incorrect answer.
pub const COOLDOWN_AFTER_INCORRECT: u64 = 1;
/// Cooldown for any other recorded result.
pub const COOLDOWN_OTHER: u64 = 0;

/// Cooldown length for a recorded result.
pub fn cooldown_for(result: ExerciseResult) -> u64 {
    match result {
        ExerciseResult::Correct => COOLDOWN_AFTER_CORRECT,
        ExerciseResult::Incorrect => COOLDOWN_AFTER_INCORRECT,
        ExerciseResult::Other => COOLDOWN_OTHER,
    }
}

/// Check if a concept is still too recent to repeat.
///
/// A concept is on cooldown when the last history entry is for it and
/// `step_counter - entry.step <= cooldown_for(entry.result)`.
pub fn is_on_cooldown(run: &Run, concept_id: &str) -> bool {
    let Some(last) = run.last_entry() else {
        return false;
    };
    if last.concept_id != concept_id {
        return false;
    }

    // An entry stamped after the current step counts as zero elapsed
    match run.step_counter.checked_sub(last.step) {
        Some(elapsed) => elapsed <= cooldown_for(last.result),
        None => true,
    }
}

/// Check if the last exercise was of the same type.
pub fn is_same_type_as_last(run: &Run, exercise_type: ExerciseType) -> bool {
    run.last_entry()
        .map(|last| last.exercise_type == exercise_type)
        .unwrap_or(false)
}
