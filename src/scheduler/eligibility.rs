//! Forward-leakage guard.
//!
//! A template may only be shown at a rung when every real concept it depends
//! on has itself reached that rung's level. Placeholders (dependencies not in
//! the vocab index) and glue concepts never block a template.

use crate::domain::{Run, Template, VocabIndex};

/// Check whether `template` may be presented at `min_level`.
pub fn template_allowed(run: &Run, template: &Template, vocab: &VocabIndex, min_level: u8) -> bool {
    first_blocking_dependency(run, template, vocab, min_level).is_none()
}

/// The first dependency that keeps `template` from being shown at `min_level`.
pub fn first_blocking_dependency<'a>(
    run: &Run,
    template: &'a Template,
    vocab: &VocabIndex,
    min_level: u8,
) -> Option<&'a str> {
    template
        .dependencies
        .iter()
        .map(String::as_str)
        .find(|dep| match vocab.get(dep) {
            // Placeholder
            None => false,
            Some(meta) if meta.kind.is_glue() => false,
            Some(_) => run.level_of(dep) < min_level,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ConceptKind, ConceptMeta, ConceptProgress, LanguagePair};

    fn vocab(ids: &[&str]) -> VocabIndex {
        VocabIndex::from_entries(ids.iter().map(|id| ConceptMeta::lexical(*id)).collect()).unwrap()
    }

    fn run_with_levels(levels: &[(&str, u8)]) -> Run {
        let mut run = Run::new(LanguagePair::default());
        for (id, level) in levels {
            run.concept_progress
                .insert(id.to_string(), ConceptProgress::at_level(*level));
        }
        run
    }

    #[test]
    fn test_blocked_by_lower_level_dependency() {
        let run = run_with_levels(&[("c1", 5), ("c2", 2)]);
        let template = Template::new("t", &["c1", "c2"]);
        let vocab = vocab(&["c1", "c2"]);

        assert!(!template_allowed(&run, &template, &vocab, 5));
        assert_eq!(first_blocking_dependency(&run, &template, &vocab, 5), Some("c2"));
        assert!(template_allowed(&run, &template, &vocab, 2));
    }

    #[test]
    fn test_placeholders_ignored() {
        let run = run_with_levels(&[("c1", 3)]);
        let template = Template::new("t", &["{subject}", "c1", "unknown"]);
        let vocab = vocab(&["c1"]);

        assert!(template_allowed(&run, &template, &vocab, 3));
    }

    #[test]
    fn test_missing_progress_defaults_to_level_one() {
        let run = run_with_levels(&[]);
        let template = Template::new("t", &["c1"]);
        let vocab = vocab(&["c1"]);

        assert!(template_allowed(&run, &template, &vocab, 1));
        assert!(!template_allowed(&run, &template, &vocab, 3));
    }

    #[test]
    fn test_glue_concepts_exempt() {
        let run = run_with_levels(&[("comer", 3)]);
        let vocab = VocabIndex::from_entries(vec![
            ConceptMeta::lexical("comer"),
            ConceptMeta::lexical("yo").with_kind(ConceptKind::Pronoun),
            ConceptMeta::lexical("y").with_kind(ConceptKind::Connector),
            ConceptMeta::lexical("el").with_kind(ConceptKind::Article),
        ])
        .unwrap();
        let template = Template::new("t", &["yo", "comer", "y", "el"]);

        assert!(template_allowed(&run, &template, &vocab, 3));
    }

    #[test]
    fn test_no_dependencies_always_allowed() {
        let run = run_with_levels(&[]);
        let template = Template::new("t", &[]);
        assert!(template_allowed(&run, &template, &VocabIndex::default(), 6));
    }
}
