//! Run-specific storage helpers.

use std::path::Path;

use log::{info, warn};

use super::jsonl::JsonlStorage;
use super::traits::Storage;
use crate::domain::{LanguagePair, Run};
use crate::error::{DrillError, Result};

/// Collection name for runs.
pub const RUNS_COLLECTION: &str = "runs";

/// Loads and saves learner runs.
#[derive(Debug)]
pub struct RunStore<S: Storage = JsonlStorage> {
    storage: S,
}

impl RunStore<JsonlStorage> {
    /// Open the JSONL-backed store under `data_dir`.
    pub fn open(data_dir: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(JsonlStorage::new(data_dir)?))
    }
}

impl<S: Storage> RunStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Start a new run and persist it.
    pub fn create_run(&self, languages: LanguagePair) -> Result<Run> {
        let run = Run::new(languages);
        self.storage.create(RUNS_COLLECTION, &run)?;
        info!("Created run {} ({} -> {})", run.id, run.languages.support, run.languages.target);
        Ok(run)
    }

    /// Load a run by id.
    ///
    /// A stored record that no longer deserializes is replaced by a fresh run
    /// under the same id, which is saved before returning.
    pub fn load_run(&self, id: &str) -> Result<Run> {
        let raw = self
            .storage
            .get_raw(RUNS_COLLECTION, id)?
            .ok_or_else(|| DrillError::RunNotFound(id.to_string()))?;

        match serde_json::from_value::<Run>(raw.clone()) {
            Ok(run) => Ok(run),
            Err(e) => {
                warn!("Run {} is unreadable ({}); starting it over", id, e);
                let languages: LanguagePair = raw
                    .get("languages")
                    .and_then(|v| serde_json::from_value(v.clone()).ok())
                    .unwrap_or_default();
                let run = Run::with_id(id, languages);
                self.storage.update(RUNS_COLLECTION, &run)?;
                Ok(run)
            }
        }
    }

    /// Persist an updated run.
    pub fn save_run(&self, run: &Run) -> Result<()> {
        self.storage.update(RUNS_COLLECTION, run)
    }

    /// All readable runs, in creation order. Unreadable records are skipped.
    pub fn list_runs(&self) -> Result<Vec<Run>> {
        let mut runs = Vec::new();
        for id in self.storage.ids(RUNS_COLLECTION)? {
            match self.storage.get::<Run>(RUNS_COLLECTION, &id) {
                Ok(Some(run)) => runs.push(run),
                Ok(None) => {}
                Err(e) => warn!("Skipping unreadable run {}: {}", id, e),
            }
        }
        Ok(runs)
    }

    /// Wipe a run's progress, keeping its id and language pair.
    pub fn reset_run(&self, id: &str) -> Result<Run> {
        let old = self.load_run(id)?;
        let run = Run::with_id(id, old.languages);
        self.storage.update(RUNS_COLLECTION, &run)?;
        info!("Reset run {}", id);
        Ok(run)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ExerciseResult, ExerciseType, HistoryEntry};
    use std::fs;
    use tempfile::TempDir;

    fn create_test_store() -> (RunStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = RunStore::open(temp_dir.path()).unwrap();
        (store, temp_dir)
    }

    #[test]
    fn test_create_and_load_run() {
        let (store, _temp) = create_test_store();
        let run = store.create_run(LanguagePair::new("fr", "en")).unwrap();

        let loaded = store.load_run(&run.id).unwrap();
        assert_eq!(loaded, run);
        assert_eq!(loaded.languages.target, "fr");
    }

    #[test]
    fn test_load_unknown_run() {
        let (store, _temp) = create_test_store();
        assert!(matches!(store.load_run("nope"), Err(DrillError::RunNotFound(_))));
    }

    #[test]
    fn test_save_run_persists_across_instances() {
        let temp_dir = TempDir::new().unwrap();
        let id = {
            let store = RunStore::open(temp_dir.path()).unwrap();
            let mut run = store.create_run(LanguagePair::default()).unwrap();
            run.progress_or_init("casa").raise_level(3);
            run.history.push(HistoryEntry {
                concept_id: "casa".into(),
                exercise_type: ExerciseType::Exposure,
                step: 0,
                result: ExerciseResult::Correct,
            });
            run.step_counter = 1;
            store.save_run(&run).unwrap();
            run.id
        };

        let store = RunStore::open(temp_dir.path()).unwrap();
        let run = store.load_run(&id).unwrap();
        assert_eq!(run.step_counter, 1);
        assert_eq!(run.level_of("casa"), 3);
        assert_eq!(run.history.len(), 1);
    }

    #[test]
    fn test_malformed_run_starts_over_with_same_id() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("runs.jsonl"),
            "{\"id\":\"r1\",\"languages\":{\"target\":\"it\",\"support\":\"en\"},\"step_counter\":\"many\"}\n",
        )
        .unwrap();

        let store = RunStore::open(temp_dir.path()).unwrap();
        let run = store.load_run("r1").unwrap();
        assert_eq!(run.id, "r1");
        assert_eq!(run.step_counter, 0);
        assert_eq!(run.languages.target, "it");

        // The replacement was saved
        let store = RunStore::open(temp_dir.path()).unwrap();
        assert_eq!(store.list_runs().unwrap().len(), 1);
    }

    #[test]
    fn test_truncated_run_starts_over_with_same_id() {
        let temp_dir = TempDir::new().unwrap();
        let store = RunStore::open(temp_dir.path()).unwrap();
        let mut other = store.create_run(LanguagePair::default()).unwrap();
        drop(store);

        let path = temp_dir.path().join("runs.jsonl");
        let mut contents = fs::read_to_string(&path).unwrap();
        contents.push_str("{\"id\":\"r1\",\"languages\":{\"target\":\"it\"\n");
        fs::write(&path, contents).unwrap();

        // Saving another run must not drop the damaged record
        let store = RunStore::open(temp_dir.path()).unwrap();
        other.step_counter = 3;
        store.save_run(&other).unwrap();
        assert!(fs::read_to_string(&path).unwrap().contains("\"r1\""));

        let store = RunStore::open(temp_dir.path()).unwrap();
        let run = store.load_run("r1").unwrap();
        assert_eq!(run.id, "r1");
        assert_eq!(run.step_counter, 0);

        let reset = store.reset_run("r1").unwrap();
        assert_eq!(reset.id, "r1");
        assert_eq!(store.load_run(&other.id).unwrap().step_counter, 3);
    }

    #[test]
    fn test_list_runs_skips_unreadable() {
        let temp_dir = TempDir::new().unwrap();
        let store = RunStore::open(temp_dir.path()).unwrap();
        let good = store.create_run(LanguagePair::default()).unwrap();
        drop(store);

        let path = temp_dir.path().join("runs.jsonl");
        let mut contents = fs::read_to_string(&path).unwrap();
        contents.push_str("{\"id\":\"bad\",\"history\":7}\n");
        fs::write(&path, contents).unwrap();

        let store = RunStore::open(temp_dir.path()).unwrap();
        let runs = store.list_runs().unwrap();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].id, good.id);
    }

    #[test]
    fn test_reset_run_keeps_id_and_languages() {
        let (store, _temp) = create_test_store();
        let mut run = store.create_run(LanguagePair::new("de", "en")).unwrap();
        run.step_counter = 12;
        run.unlock_stage("matching");
        store.save_run(&run).unwrap();

        let reset = store.reset_run(&run.id).unwrap();
        assert_eq!(reset.id, run.id);
        assert_eq!(reset.languages.target, "de");
        assert_eq!(reset.step_counter, 0);
        assert!(!reset.is_stage_unlocked("matching"));
        assert_eq!(store.load_run(&run.id).unwrap().step_counter, 0);
    }
}
