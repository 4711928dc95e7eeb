//! Catalog loading: vocab and template files from disk.
//!
//! Both are read-only for the life of a session. Files ending in `.json` are
//! parsed as JSON; everything else as YAML.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::de::DeserializeOwned;

use crate::domain::{RawVocabEntry, Template, TemplateCatalog, VocabIndex};
use crate::error::{DrillError, Result};

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"))
}

fn read_list<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let content = fs::read_to_string(path)
        .map_err(|e| DrillError::Catalog(format!("cannot read {}: {}", path.display(), e)))?;
    if is_json(path) {
        serde_json::from_str(&content).map_err(|source| DrillError::JsonFile {
            path: path.to_path_buf(),
            source,
        })
    } else {
        serde_yaml::from_str(&content).map_err(|source| DrillError::Yaml {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Load the vocab index from a YAML or JSON list of entries.
pub fn load_vocab(path: impl AsRef<Path>) -> Result<VocabIndex> {
    let path = path.as_ref();
    let raw: Vec<RawVocabEntry> = read_list(path)?;
    let vocab = VocabIndex::from_raw(raw)?;
    info!("Loaded {} concepts from {}", vocab.len(), path.display());
    Ok(vocab)
}

/// Resolve a template source to files: an existing path is used as-is,
/// anything else is treated as a glob pattern.
fn template_files(pattern: &str) -> Result<Vec<PathBuf>> {
    let path = Path::new(pattern);
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut files: Vec<PathBuf> = glob::glob(pattern)
        .map_err(|e| DrillError::Catalog(format!("bad template pattern {}: {}", pattern, e)))?
        .filter_map(|r| r.ok())
        .filter(|p| p.is_file())
        .collect();
    files.sort();

    if files.is_empty() {
        return Err(DrillError::Catalog(format!("no template files match {}", pattern)));
    }
    Ok(files)
}

/// Load templates from a file or glob pattern. Files are read in sorted path
/// order and templates keep their order within each file.
pub fn load_templates(pattern: &str) -> Result<TemplateCatalog> {
    let mut catalog = TemplateCatalog::default();
    for file in template_files(pattern)? {
        let templates: Vec<Template> = read_list(&file)?;
        debug!("Read {} templates from {}", templates.len(), file.display());
        catalog.extend(templates);
    }
    info!("Loaded {} templates from {}", catalog.len(), pattern);
    Ok(catalog)
}
