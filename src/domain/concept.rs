//! Concept metadata and the vocab index.
//!
//! Concepts are classified into a closed set of kinds when the vocab is
//! loaded. Glue kinds (pronouns, connectors, articles, grammar-only rules)
//! never gate template eligibility.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{DrillError, Result};

/// What kind of concept a vocab entry is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConceptKind {
    Lexical,
    Pronoun,
    Connector,
    Article,
    GrammarGlue,
}

impl ConceptKind {
    /// Glue concepts are exempt from prerequisite gating.
    pub fn is_glue(self) -> bool {
        !matches!(self, ConceptKind::Lexical)
    }

    /// Classify a raw entry. `grammar_only` wins over part of speech.
    pub fn classify(pos: Option<&str>, grammar_only: bool) -> Self {
        if grammar_only {
            return ConceptKind::GrammarGlue;
        }
        match pos.map(|p| p.trim().to_ascii_lowercase()).as_deref() {
            Some("pronoun") | Some("pron") => ConceptKind::Pronoun,
            Some("connector") | Some("conjunction") | Some("conj") => ConceptKind::Connector,
            Some("article") | Some("determiner") | Some("det") => ConceptKind::Article,
            _ => ConceptKind::Lexical,
        }
    }
}

/// Vocab entry as it appears in the catalog file.
#[derive(Debug, Clone, Deserialize)]
pub struct RawVocabEntry {
    pub id: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub gloss: Option<String>,
    #[serde(default)]
    pub pos: Option<String>,
    #[serde(default)]
    pub grammar_only: bool,
    /// Explicit kind; overrides classification when present.
    #[serde(default)]
    pub kind: Option<ConceptKind>,
}

/// Read-only metadata for one concept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptMeta {
    pub id: String,
    pub text: String,
    pub gloss: Option<String>,
    pub kind: ConceptKind,
}

impl ConceptMeta {
    pub fn lexical(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            text: id.clone(),
            id,
            gloss: None,
            kind: ConceptKind::Lexical,
        }
    }

    pub fn with_kind(mut self, kind: ConceptKind) -> Self {
        self.kind = kind;
        self
    }
}

impl From<RawVocabEntry> for ConceptMeta {
    fn from(raw: RawVocabEntry) -> Self {
        let kind = raw
            .kind
            .unwrap_or_else(|| ConceptKind::classify(raw.pos.as_deref(), raw.grammar_only));
        let text = if raw.text.is_empty() { raw.id.clone() } else { raw.text };
        Self {
            id: raw.id,
            text,
            gloss: raw.gloss,
            kind,
        }
    }
}

/// Ordered concept lookup. Entry order is the scheduler's candidate
/// iteration order, so it is preserved from the source file.
#[derive(Debug, Clone, Default)]
pub struct VocabIndex {
    entries: Vec<ConceptMeta>,
    by_id: HashMap<String, usize>,
}

impl VocabIndex {
    /// Build an index, rejecting duplicate ids.
    pub fn from_entries(entries: Vec<ConceptMeta>) -> Result<Self> {
        let mut by_id = HashMap::with_capacity(entries.len());
        for (idx, entry) in entries.iter().enumerate() {
            if by_id.insert(entry.id.clone(), idx).is_some() {
                return Err(DrillError::Catalog(format!("duplicate concept id: {}", entry.id)));
            }
        }
        Ok(Self { entries, by_id })
    }

    pub fn from_raw(raw: Vec<RawVocabEntry>) -> Result<Self> {
        Self::from_entries(raw.into_iter().map(ConceptMeta::from).collect())
    }

    pub fn get(&self, id: &str) -> Option<&ConceptMeta> {
        self.by_id.get(id).map(|&idx| &self.entries[idx])
    }

    /// Concept ids in source order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
