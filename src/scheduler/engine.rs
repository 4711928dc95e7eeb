//! Ladder traversal: the next-exercise decision.
//!
//! Rungs are evaluated strictly in order and the first rung that yields a pick
//! wins:
//! 1. Exposure: level-1 concepts with an eligible template
//! 2. Contextual: level >= 3 concepts with an eligible template
//! 3. Concept drill: level >= 4 concepts, no template
//! 4. Recall: templates whose question answer is a level >= 5 concept
//! 5. Matching: the four weakest level >= 6 concepts, batch of at least 4
//!
//! When nothing qualifies the directive has no exercise type.

use log::debug;

use crate::domain::{ExerciseDirective, ExerciseType, Run, TemplateCatalog, VocabIndex};
use crate::scheduler::cooldown::is_same_type_as_last;
use crate::scheduler::eligibility::template_allowed;
use crate::scheduler::matcher::find_template;
use crate::scheduler::select::{Candidate, pick_best};
use crate::scheduler::weakness::sort_weakest_first;

/// Number of concepts in one matching exercise; also the minimum pool size.
pub const MATCHING_BATCH_SIZE: usize = 4;

/// Exercise scheduler. Holds no state of its own; construct one and pass it
/// to whoever needs decisions.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchedulerEngine;

impl SchedulerEngine {
    pub fn new() -> Self {
        Self
    }

    /// Create default progress for every vocab concept the run has not seen yet.
    ///
    /// Returns the number of records created. Existing records are untouched,
    /// so calling this repeatedly is harmless.
    pub fn ensure_initialized(&self, run: &mut Run, vocab: &VocabIndex) -> usize {
        let mut created = 0;
        for id in vocab.ids() {
            if run.progress(id).is_none() {
                run.progress_or_init(id);
                created += 1;
            }
        }
        if created > 0 {
            debug!("Initialized progress for {} concepts in run {}", created, run.id);
        }
        created
    }

    /// Decide the next exercise without touching the run.
    pub fn decide(&self, run: &Run, templates: &TemplateCatalog, vocab: &VocabIndex) -> ExerciseDirective {
        let directive = self
            .exposure(run, templates, vocab)
            .or_else(|| self.contextual(run, templates, vocab))
            .or_else(|| self.concept_drill(run, vocab))
            .or_else(|| self.recall(run, templates, vocab))
            .or_else(|| self.matching(run, vocab));

        match directive {
            Some(d) => {
                debug!(
                    "Run {} step {}: scheduled {:?} for {:?}",
                    run.id,
                    run.step_counter,
                    d.exercise_type,
                    d.concepts()
                );
                d
            }
            None => {
                debug!("Run {} step {}: nothing schedulable", run.id, run.step_counter);
                ExerciseDirective::none()
            }
        }
    }

    /// Initialize missing progress, then decide.
    pub fn get_next_exercise(
        &self,
        run: &mut Run,
        templates: &TemplateCatalog,
        vocab: &VocabIndex,
    ) -> ExerciseDirective {
        self.ensure_initialized(run, vocab);
        self.decide(run, templates, vocab)
    }

    fn exposure(&self, run: &Run, templates: &TemplateCatalog, vocab: &VocabIndex) -> Option<ExerciseDirective> {
        let level = ExerciseType::Exposure.level();
        let candidates: Vec<Candidate> = vocab
            .ids()
            .filter(|id| run.level_of(id) == level)
            .filter_map(|id| find_template(run, templates, vocab, id, level).map(|t| Candidate::with_template(id, t)))
            .collect();

        self.pick_directive(run, candidates, ExerciseType::Exposure)
    }

    fn contextual(&self, run: &Run, templates: &TemplateCatalog, vocab: &VocabIndex) -> Option<ExerciseDirective> {
        let level = ExerciseType::Contextual.level();
        let candidates: Vec<Candidate> = vocab
            .ids()
            .filter(|id| run.level_of(id) >= level)
            .filter_map(|id| find_template(run, templates, vocab, id, level).map(|t| Candidate::with_template(id, t)))
            .collect();

        self.pick_directive(run, candidates, ExerciseType::Contextual)
    }

    fn concept_drill(&self, run: &Run, vocab: &VocabIndex) -> Option<ExerciseDirective> {
        let level = ExerciseType::ConceptDrill.level();
        let candidates: Vec<Candidate> = vocab
            .ids()
            .filter(|id| run.level_of(id) >= level)
            .map(Candidate::concept)
            .collect();

        self.pick_directive(run, candidates, ExerciseType::ConceptDrill)
    }

    fn recall(&self, run: &Run, templates: &TemplateCatalog, vocab: &VocabIndex) -> Option<ExerciseDirective> {
        let level = ExerciseType::Recall.level();
        let candidates: Vec<Candidate> = templates
            .iter()
            .filter_map(|t| {
                let answer = t.answer_concept()?;
                (run.level_of(answer) >= level && template_allowed(run, t, vocab, level))
                    .then(|| Candidate::with_template(answer, t))
            })
            .collect();

        self.pick_directive(run, candidates, ExerciseType::Recall)
    }

    fn matching(&self, run: &Run, vocab: &VocabIndex) -> Option<ExerciseDirective> {
        let level = ExerciseType::Matching.level();
        let mut pool: Vec<&str> = vocab.ids().filter(|id| run.level_of(id) >= level).collect();

        if pool.len() < MATCHING_BATCH_SIZE || is_same_type_as_last(run, ExerciseType::Matching) {
            return None;
        }

        sort_weakest_first(&mut pool, run, ExerciseType::Matching, |id| *id);
        let batch = pool
            .into_iter()
            .take(MATCHING_BATCH_SIZE)
            .map(str::to_string)
            .collect();
        Some(ExerciseDirective::matching(batch))
    }

    fn pick_directive(
        &self,
        run: &Run,
        candidates: Vec<Candidate>,
        exercise_type: ExerciseType,
    ) -> Option<ExerciseDirective> {
        let count = candidates.len();
        let picked = pick_best(run, candidates, exercise_type);
        if picked.is_none() && count > 0 {
            debug!("{} candidates for {} all excluded", count, exercise_type);
        }
        picked.map(|c| ExerciseDirective::single(exercise_type, c.concept_id, c.template.cloned()))
    }
}
