//! Presentation: turning a directive into something a learner sees.

use colored::*;

use crate::domain::{ExerciseDirective, ExerciseType, LanguagePair, VocabIndex};

/// Shown when the scheduler has nothing to offer. Recording cannot advance
/// such a run, so the message must not suggest waiting.
pub const NOTHING_SCHEDULABLE: &str = "No exercise can be scheduled from this run's progress and catalog";

/// What to show for one exercise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    /// Exercise type, or `None` when there is nothing to practice
    pub exercise_type: Option<ExerciseType>,
    pub text: String,
    /// Whether the text could be played as audio in the target language
    pub listenable: bool,
    /// Language tag of `text`
    pub language: String,
}

fn concept_text(vocab: &VocabIndex, concept_id: &str) -> String {
    vocab
        .get(concept_id)
        .map(|c| c.text.clone())
        .unwrap_or_else(|| concept_id.to_string())
}

impl DisplayItem {
    /// Build the display item for a directive.
    pub fn from_directive(directive: &ExerciseDirective, vocab: &VocabIndex, languages: &LanguagePair) -> Self {
        let target = || languages.target.clone();
        let support = || languages.support.clone();

        let Some(exercise_type) = directive.exercise_type else {
            return Self {
                exercise_type: None,
                text: NOTHING_SCHEDULABLE.to_string(),
                listenable: false,
                language: support(),
            };
        };

        let template = directive.template.as_ref();
        let concept = directive.concept_id.as_deref().unwrap_or_default();

        let (text, listenable, language) = match exercise_type {
            ExerciseType::Exposure | ExerciseType::Contextual => {
                let text = template
                    .map(|t| t.text.clone())
                    .filter(|t| !t.is_empty())
                    .unwrap_or_else(|| concept_text(vocab, concept));
                (text, true, target())
            }
            ExerciseType::ConceptDrill => {
                let text = match vocab.get(concept) {
                    Some(meta) => match &meta.gloss {
                        Some(gloss) => format!("{} ({})", meta.text, gloss),
                        None => meta.text.clone(),
                    },
                    None => concept.to_string(),
                };
                (text, true, target())
            }
            ExerciseType::Recall => {
                let prompt = template
                    .and_then(|t| t.question.as_ref())
                    .map(|q| q.prompt.clone())
                    .filter(|p| !p.is_empty());
                match prompt {
                    Some(prompt) => (prompt, false, support()),
                    None => (concept_text(vocab, concept), true, target()),
                }
            }
            ExerciseType::Matching => {
                let words: Vec<String> = directive.concept_ids.iter().map(|id| concept_text(vocab, id)).collect();
                (words.join(" / "), false, target())
            }
        };

        Self {
            exercise_type: Some(exercise_type),
            text,
            listenable,
            language,
        }
    }
}

/// Something that can show a display item to the learner.
pub trait Presenter {
    fn present(&mut self, item: &DisplayItem);
}

/// Prints display items to stdout.
#[derive(Debug, Default)]
pub struct ConsolePresenter;

impl Presenter for ConsolePresenter {
    fn present(&mut self, item: &DisplayItem) {
        match item.exercise_type {
            Some(exercise_type) => {
                let listen = if item.listenable { " [listen]".dimmed().to_string() } else { String::new() };
                println!("{} {}{}", format!("{}:", exercise_type).green(), item.text.bold(), listen);
                println!("  {} {}", "language:".cyan(), item.language);
            }
            None => println!("{}", item.text.yellow()),
        }
    }
}
