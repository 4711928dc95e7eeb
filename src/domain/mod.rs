//! Domain types for nextdrill
//!
//! This module contains all core domain types:
//! - Run: one learner's session state (history, per-concept progress)
//! - ConceptProgress: mastery level and per-exercise streaks for a concept
//! - ConceptMeta / VocabIndex: read-only concept metadata
//! - Template / TemplateCatalog: read-only exercise content
//! - ExerciseType / ExerciseDirective: the ladder and the scheduler's output

pub mod concept;
pub mod exercise;
pub mod progress;
pub mod run;
pub mod template;

pub use concept::{ConceptKind, ConceptMeta, RawVocabEntry, VocabIndex};
pub use exercise::{ExerciseDirective, ExerciseResult, ExerciseType};
pub use progress::{ConceptProgress, INITIAL_LEVEL};
pub use run::{HistoryEntry, LanguagePair, Run};
pub use template::{Question, Template, TemplateCatalog};
