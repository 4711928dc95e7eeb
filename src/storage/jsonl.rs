//! JSONL-based storage implementation with in-memory caching.
//!
//! Each collection is one `<collection>.jsonl` file, one record per line.
//! Lines that are not valid JSON are skipped on load and dropped on the next
//! rewrite.

use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use log::warn;
use serde::{Serialize, de::DeserializeOwned};

use super::traits::{HasId, Storage};
use crate::error::{DrillError, Result};

/// JSONL-based storage with in-memory caching.
pub struct JsonlStorage {
    base_path: PathBuf,
    cache: RwLock<HashMap<String, Vec<serde_json::Value>>>,
}

impl std::fmt::Debug for JsonlStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonlStorage")
            .field("base_path", &self.base_path)
            .finish_non_exhaustive()
    }
}

fn lock_err<E: std::fmt::Display>(e: E) -> DrillError {
    DrillError::Storage(e.to_string())
}

fn record_id(record: &serde_json::Value) -> Option<&str> {
    record.get("id").and_then(|v| v.as_str())
}

/// Pull the leading `"id":"..."` out of a line that is not valid JSON.
fn recover_id(line: &str) -> Option<String> {
    let rest = line.trim_start().strip_prefix('{')?.trim_start();
    let rest = rest.strip_prefix("\"id\"")?.trim_start();
    let rest = rest.strip_prefix(':')?.trim_start();
    let rest = rest.strip_prefix('"')?;
    let end = rest.find('"')?;
    let id = &rest[..end];
    (!id.is_empty() && !id.contains('\\')).then(|| id.to_string())
}

impl JsonlStorage {
    /// Create a new JsonlStorage at the given path.
    pub fn new(base_path: impl AsRef<Path>) -> Result<Self> {
        let base_path = base_path.as_ref().to_path_buf();
        fs::create_dir_all(&base_path)?;
        Ok(Self {
            base_path,
            cache: RwLock::new(HashMap::new()),
        })
    }

    /// Get the file path for a collection.
    fn collection_path(&self, collection: &str) -> PathBuf {
        self.base_path.join(format!("{}.jsonl", collection))
    }

    /// Load a collection into cache if not already loaded.
    fn ensure_loaded(&self, collection: &str) -> Result<()> {
        {
            let cache = self.cache.read().map_err(lock_err)?;
            if cache.contains_key(collection) {
                return Ok(());
            }
        }

        let mut cache = self.cache.write().map_err(lock_err)?;
        if cache.contains_key(collection) {
            return Ok(());
        }

        let path = self.collection_path(collection);
        let mut records = Vec::new();
        if path.exists() {
            let reader = BufReader::new(File::open(&path)?);
            for (lineno, line) in reader.lines().enumerate() {
                let line = line?;
                if line.trim().is_empty() {
                    continue;
                }
                match serde_json::from_str::<serde_json::Value>(&line) {
                    Ok(record) => records.push(record),
                    Err(e) => match recover_id(&line) {
                        // Keep an id-only stub so the record can still be found and reset
                        Some(id) => {
                            warn!("Unreadable line {} in {} ({}); keeping id {}", lineno + 1, path.display(), e, id);
                            records.push(serde_json::json!({ "id": id }));
                        }
                        None => warn!("Skipping unreadable line {} in {}: {}", lineno + 1, path.display(), e),
                    },
                }
            }
        }

        cache.insert(collection.to_string(), records);
        Ok(())
    }

    /// Append a record to the JSONL file.
    fn append_to_file(&self, collection: &str, record: &serde_json::Value) -> Result<()> {
        let path = self.collection_path(collection);
        let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
        writeln!(file, "{}", serde_json::to_string(record)?)?;
        Ok(())
    }

    /// Rewrite the entire collection file from cache.
    fn rewrite_file(&self, collection: &str, records: &[serde_json::Value]) -> Result<()> {
        let path = self.collection_path(collection);
        let tmp = path.with_extension("jsonl.tmp");
        {
            let mut file = File::create(&tmp)?;
            for record in records {
                writeln!(file, "{}", serde_json::to_string(record)?)?;
            }
            file.sync_all()?;
        }
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn not_loaded(collection: &str) -> DrillError {
        DrillError::Storage(format!("Collection not loaded: {}", collection))
    }
}

impl Storage for JsonlStorage {
    fn create<T: Serialize + HasId>(&self, collection: &str, record: &T) -> Result<()> {
        self.ensure_loaded(collection)?;

        let value = serde_json::to_value(record)?;
        let mut cache = self.cache.write().map_err(lock_err)?;
        let records = cache.get_mut(collection).ok_or_else(|| Self::not_loaded(collection))?;

        if records.iter().any(|r| record_id(r) == Some(record.id())) {
            return Err(DrillError::Storage(format!(
                "Record already exists in {}: {}",
                collection,
                record.id()
            )));
        }

        // Append to file first (source of truth)
        self.append_to_file(collection, &value)?;
        records.push(value);
        Ok(())
    }

    fn get_raw(&self, collection: &str, id: &str) -> Result<Option<serde_json::Value>> {
        self.ensure_loaded(collection)?;

        let cache = self.cache.read().map_err(lock_err)?;
        let records = cache.get(collection).ok_or_else(|| Self::not_loaded(collection))?;
        Ok(records.iter().find(|r| record_id(r) == Some(id)).cloned())
    }

    fn update<T: Serialize + HasId>(&self, collection: &str, record: &T) -> Result<()> {
        self.ensure_loaded(collection)?;

        let value = serde_json::to_value(record)?;
        let mut cache = self.cache.write().map_err(lock_err)?;
        let records = cache.get_mut(collection).ok_or_else(|| Self::not_loaded(collection))?;

        let slot = records
            .iter_mut()
            .find(|r| record_id(r) == Some(record.id()))
            .ok_or_else(|| DrillError::Storage(format!("Record not found in {}: {}", collection, record.id())))?;
        *slot = value;

        self.rewrite_file(collection, records)
    }

    fn delete(&self, collection: &str, id: &str) -> Result<()> {
        self.ensure_loaded(collection)?;

        let mut cache = self.cache.write().map_err(lock_err)?;
        let records = cache.get_mut(collection).ok_or_else(|| Self::not_loaded(collection))?;

        let original_len = records.len();
        records.retain(|r| record_id(r) != Some(id));
        if records.len() == original_len {
            return Err(DrillError::Storage(format!("Record not found in {}: {}", collection, id)));
        }

        self.rewrite_file(collection, records)
    }

    fn ids(&self, collection: &str) -> Result<Vec<String>> {
        self.ensure_loaded(collection)?;

        let cache = self.cache.read().map_err(lock_err)?;
        let records = cache.get(collection).ok_or_else(|| Self::not_loaded(collection))?;
        Ok(records.iter().filter_map(record_id).map(str::to_string).collect())
    }

    fn list<T: DeserializeOwned>(&self, collection: &str) -> Result<Vec<T>> {
        self.ensure_loaded(collection)?;

        let cache = self.cache.read().map_err(lock_err)?;
        let records = cache.get(collection).ok_or_else(|| Self::not_loaded(collection))?;
        records
            .iter()
            .map(|r| serde_json::from_value(r.clone()).map_err(DrillError::from))
            .collect()
    }
}
