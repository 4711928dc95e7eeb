//! Candidate selection for a single ladder rung.
//!
//! A candidate is dropped when:
//! - its concept is on cooldown
//! - the rung's exercise type repeats the previous exercise's type
//!
//! The survivors are ranked weakest first and the top one wins.

use crate::domain::{ExerciseType, Run, Template};
use crate::scheduler::cooldown::{is_on_cooldown, is_same_type_as_last};
use crate::scheduler::weakness::sort_weakest_first;

/// A concept under consideration at one rung, with the template it would be
/// presented in (if the rung uses templates).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate<'a> {
    pub concept_id: &'a str,
    pub template: Option<&'a Template>,
}

impl<'a> Candidate<'a> {
    pub fn concept(concept_id: &'a str) -> Self {
        Self {
            concept_id,
            template: None,
        }
    }

    pub fn with_template(concept_id: &'a str, template: &'a Template) -> Self {
        Self {
            concept_id,
            template: Some(template),
        }
    }
}

/// Pick the weakest eligible candidate for `exercise_type`.
///
/// Returns `None` when every candidate is excluded, which sends the engine on
/// to the next rung.
pub fn pick_best<'a>(run: &Run, candidates: Vec<Candidate<'a>>, exercise_type: ExerciseType) -> Option<Candidate<'a>> {
    let same_type = is_same_type_as_last(run, exercise_type);
    let mut eligible: Vec<Candidate<'a>> = candidates
        .into_iter()
        .filter(|c| !same_type && !is_on_cooldown(run, c.concept_id))
        .collect();

    if eligible.is_empty() {
        return None;
    }

    sort_weakest_first(&mut eligible, run, exercise_type, |c| c.concept_id);
    eligible.into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ConceptProgress, ExerciseResult, HistoryEntry, LanguagePair};

    fn run_with_last(concept: &str, exercise_type: ExerciseType, result: ExerciseResult) -> Run {
        let mut run = Run::new(LanguagePair::default());
        run.history.push(HistoryEntry {
            concept_id: concept.to_string(),
            exercise_type,
            step: 0,
            result,
        });
        run.step_counter = 1;
        run
    }

    #[test]
    fn test_pick_best_empty() {
        let run = Run::new(LanguagePair::default());
        assert!(pick_best(&run, vec![], ExerciseType::Exposure).is_none());
    }

    #[test]
    fn test_pick_best_prefers_weakest() {
        let mut run = Run::new(LanguagePair::default());
        run.concept_progress.insert(
            "c3".to_string(),
            ConceptProgress::default().with_streak(ExerciseType::Exposure, 5),
        );
        run.concept_progress.insert(
            "c4".to_string(),
            ConceptProgress::default().with_streak(ExerciseType::Exposure, 0),
        );

        let picked = pick_best(
            &run,
            vec![Candidate::concept("c3"), Candidate::concept("c4")],
            ExerciseType::Exposure,
        );
        assert_eq!(picked.map(|c| c.concept_id), Some("c4"));
    }

    #[test]
    fn test_pick_best_tie_keeps_first() {
        let run = Run::new(LanguagePair::default());
        let picked = pick_best(
            &run,
            vec![Candidate::concept("b"), Candidate::concept("a")],
            ExerciseType::ConceptDrill,
        );
        assert_eq!(picked.map(|c| c.concept_id), Some("b"));
    }

    #[test]
    fn test_pick_best_skips_cooldown() {
        let run = run_with_last("c1", ExerciseType::Exposure, ExerciseResult::Correct);
        let picked = pick_best(
            &run,
            vec![Candidate::concept("c1"), Candidate::concept("c2")],
            ExerciseType::ConceptDrill,
        );
        assert_eq!(picked.map(|c| c.concept_id), Some("c2"));
    }

    #[test]
    fn test_pick_best_all_on_cooldown() {
        let run = run_with_last("c1", ExerciseType::Exposure, ExerciseResult::Incorrect);
        let picked = pick_best(&run, vec![Candidate::concept("c1")], ExerciseType::ConceptDrill);
        assert!(picked.is_none());
    }

    #[test]
    fn test_pick_best_same_type_excludes_all() {
        let run = run_with_last("other", ExerciseType::ConceptDrill, ExerciseResult::Correct);
        let picked = pick_best(
            &run,
            vec![Candidate::concept("c1"), Candidate::concept("c2")],
            ExerciseType::ConceptDrill,
        );
        assert!(picked.is_none());
    }

    #[test]
    fn test_pick_best_keeps_template() {
        let run = Run::new(LanguagePair::default());
        let template = Template::new("t1", &["c1"]);
        let picked = pick_best(&run, vec![Candidate::with_template("c1", &template)], ExerciseType::Exposure);
        assert_eq!(picked.and_then(|c| c.template).map(|t| t.id.as_str()), Some("t1"));
    }
}
