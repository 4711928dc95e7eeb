//! Exercise types, recorded results, and the scheduler's output directive.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::template::Template;

/// The rungs of the exercise ladder.
///
/// The numeric value doubles as the mastery level a concept must have reached
/// before the exercise can be scheduled for it. There is no type 2 rung.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ExerciseType {
    /// First exposure to a brand-new concept inside a sentence template
    Exposure,
    /// Sentence exercise for a concept at level 3 or higher
    Contextual,
    /// Concept-only drill, no template
    ConceptDrill,
    /// Answer-driven recall: the template's question answer is the drilled concept
    Recall,
    /// Batch matching over four concepts
    Matching,
}

impl ExerciseType {
    /// All rungs in ladder order.
    pub const LADDER: [ExerciseType; 5] = [
        ExerciseType::Exposure,
        ExerciseType::Contextual,
        ExerciseType::ConceptDrill,
        ExerciseType::Recall,
        ExerciseType::Matching,
    ];

    /// Numeric level of this rung (1, 3, 4, 5, 6).
    pub fn level(self) -> u8 {
        match self {
            ExerciseType::Exposure => 1,
            ExerciseType::Contextual => 3,
            ExerciseType::ConceptDrill => 4,
            ExerciseType::Recall => 5,
            ExerciseType::Matching => 6,
        }
    }

    /// Look up the rung for a numeric level.
    pub fn from_level(level: u8) -> Option<Self> {
        Self::LADDER.into_iter().find(|t| t.level() == level)
    }

    /// The rung after this one, if any.
    pub fn next(self) -> Option<Self> {
        let idx = Self::LADDER.iter().position(|t| *t == self)?;
        Self::LADDER.get(idx + 1).copied()
    }
}

impl TryFrom<u8> for ExerciseType {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_level(value).ok_or_else(|| format!("unknown exercise type: {}", value))
    }
}

impl From<ExerciseType> for u8 {
    fn from(value: ExerciseType) -> Self {
        value.level()
    }
}

impl fmt::Display for ExerciseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExerciseType::Exposure => "exposure",
            ExerciseType::Contextual => "contextual",
            ExerciseType::ConceptDrill => "concept-drill",
            ExerciseType::Recall => "recall",
            ExerciseType::Matching => "matching",
        };
        write!(f, "{} ({})", name, self.level())
    }
}

/// Outcome of one answered exercise, as recorded by the grader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseResult {
    Correct,
    Incorrect,
    /// Anything else the grader reports (skipped, timed out, ...)
    #[serde(other)]
    Other,
}

/// The engine's decision: what to present next.
///
/// `exercise_type == None` means nothing can be scheduled from the current state. Matching
/// exercises carry `concept_ids` instead of a single `concept_id`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExerciseDirective {
    pub exercise_type: Option<ExerciseType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub concept_id: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub concept_ids: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<Template>,
}

impl ExerciseDirective {
    /// Nothing is schedulable.
    pub fn none() -> Self {
        Self::default()
    }

    /// Single-concept directive, optionally with the template it is presented in.
    pub fn single(exercise_type: ExerciseType, concept_id: impl Into<String>, template: Option<Template>) -> Self {
        Self {
            exercise_type: Some(exercise_type),
            concept_id: Some(concept_id.into()),
            concept_ids: Vec::new(),
            template,
        }
    }

    /// Multi-concept matching directive.
    pub fn matching(concept_ids: Vec<String>) -> Self {
        Self {
            exercise_type: Some(ExerciseType::Matching),
            concept_id: None,
            concept_ids,
            template: None,
        }
    }

    pub fn is_none(&self) -> bool {
        self.exercise_type.is_none()
    }

    /// Every concept this directive drills, in order.
    pub fn concepts(&self) -> Vec<&str> {
        match &self.concept_id {
            Some(id) => vec![id.as_str()],
            None => self.concept_ids.iter().map(String::as_str).collect(),
        }
    }
}
