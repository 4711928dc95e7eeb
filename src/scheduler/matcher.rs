//! Template matching for sentence-based rungs.

use crate::domain::{Run, Template, TemplateCatalog, VocabIndex};
use crate::scheduler::eligibility::template_allowed;

/// First template in catalog order that references `concept_id` and passes
/// the forward-leakage guard at `min_level`. No ranking among templates.
pub fn find_template<'a>(
    run: &Run,
    templates: &'a TemplateCatalog,
    vocab: &VocabIndex,
    concept_id: &str,
    min_level: u8,
) -> Option<&'a Template> {
    templates
        .iter()
        .find(|t| t.references(concept_id) && template_allowed(run, t, vocab, min_level))
}
