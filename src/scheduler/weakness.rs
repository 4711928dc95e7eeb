//! Weakness scoring for candidate ranking.
//!
//! Concepts are scored by an inverse streak:
//! - Base score 10
//! - Minus the consecutive-correct streak at the target exercise type
//!
//! Higher = weaker = scheduled first. There is no secondary tie-break; equal
//! scores keep their iteration order.

use crate::domain::{ExerciseType, Run};

/// Score of a concept with no streak at all.
pub const WEAKNESS_BASE: i64 = 10;

/// Weakness score of a concept at an exercise type.
pub fn weakness_score(run: &Run, concept_id: &str, exercise_type: ExerciseType) -> i64 {
    WEAKNESS_BASE - i64::from(run.streak_of(concept_id, exercise_type))
}

/// Stable sort by descending weakness. `key` extracts the concept id.
pub fn sort_weakest_first<T>(items: &mut [T], run: &Run, exercise_type: ExerciseType, key: impl Fn(&T) -> &str) {
    items.sort_by_cached_key(|item| std::cmp::Reverse(weakness_score(run, key(item), exercise_type)));
}
