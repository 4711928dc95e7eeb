//! Exercise templates: reusable sentence content over the concepts it depends on.

use serde::{Deserialize, Serialize};

/// Primary question of an answer-driven template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    #[serde(default)]
    pub prompt: String,

    /// Concept id the question drills. Empty means the template is not answer-driven.
    #[serde(default)]
    pub answer: String,
}

/// A catalog template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    pub id: String,

    /// Display text in the target language
    #[serde(default)]
    pub text: String,

    /// Concept ids this template depends on, in order. Entries that are not in
    /// the vocab index are placeholders and never gate eligibility.
    #[serde(default)]
    pub dependencies: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question: Option<Question>,
}

impl Template {
    pub fn new(id: impl Into<String>, dependencies: &[&str]) -> Self {
        Self {
            id: id.into(),
            text: String::new(),
            dependencies: dependencies.iter().map(|d| d.to_string()).collect(),
            question: None,
        }
    }

    /// Builder: attach a primary question answered by `answer`.
    pub fn with_question(mut self, prompt: impl Into<String>, answer: impl Into<String>) -> Self {
        self.question = Some(Question {
            prompt: prompt.into(),
            answer: answer.into(),
        });
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// True if `concept_id` appears anywhere in the dependency list.
    pub fn references(&self, concept_id: &str) -> bool {
        self.dependencies.iter().any(|d| d == concept_id)
    }

    /// The concept the primary question drills, if the answer is non-empty.
    pub fn answer_concept(&self) -> Option<&str> {
        self.question
            .as_ref()
            .map(|q| q.answer.trim())
            .filter(|a| !a.is_empty())
    }
}

/// Ordered, read-only template catalog. Catalog order is significant: the
/// first matching template wins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateCatalog {
    templates: Vec<Template>,
}

impl TemplateCatalog {
    pub fn new(templates: Vec<Template>) -> Self {
        Self { templates }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Template> {
        self.templates.iter()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Template> {
        self.templates.iter().find(|t| t.id == id)
    }

    pub(crate) fn extend(&mut self, templates: Vec<Template>) {
        self.templates.extend(templates);
    }
}

impl<'a> IntoIterator for &'a TemplateCatalog {
    type Item = &'a Template;
    type IntoIter = std::slice::Iter<'a, Template>;

    fn into_iter(self) -> Self::IntoIter {
        self.templates.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_references() {
        let t = Template::new("t1", &["yo", "ser", "{name}"]);
        assert!(t.references("ser"));
        assert!(t.references("{name}"));
        assert!(!t.references("estar"));
    }

    #[test]
    fn test_answer_concept_empty_is_none() {
        let t = Template::new("t1", &["yo"]).with_question("Who?", "  ");
        assert_eq!(t.answer_concept(), None);

        let t = Template::new("t2", &["yo"]);
        assert_eq!(t.answer_concept(), None);

        let t = Template::new("t3", &["yo"]).with_question("Who?", "yo");
        assert_eq!(t.answer_concept(), Some("yo"));
    }

    #[test]
    fn test_template_deserialize_minimal() {
        let t: Template = serde_yaml::from_str("id: t9\ndependencies: [a, b]\n").unwrap();
        assert_eq!(t.dependencies, vec!["a", "b"]);
        assert!(t.question.is_none());
        assert!(t.text.is_empty());
    }

    #[test]
    fn test_catalog_get_preserves_order() {
        let catalog = TemplateCatalog::new(vec![Template::new("a", &[]), Template::new("b", &[])]);
        let ids: Vec<&str> = catalog.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert!(catalog.get("b").is_some());
        assert!(catalog.get("z").is_none());
    }
}
