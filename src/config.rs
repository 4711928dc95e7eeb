use eyre::{Context, Result, bail};
use nextdrill::domain::LanguagePair;
use nextdrill::grading::GradingConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub log_level: Option<String>,
    pub storage: StorageConfig,
    pub catalog: CatalogConfig,
    pub languages: LanguagesConfig,
    pub grading: GradingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("nextdrill"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Vocab file (YAML or JSON)
    pub vocab: PathBuf,
    /// Template file or glob pattern
    pub templates: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            vocab: PathBuf::from("catalog/vocab.yml"),
            templates: "catalog/templates/*.yml".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguagesConfig {
    pub target: String,
    pub support: String,
}

impl Default for LanguagesConfig {
    fn default() -> Self {
        let pair = LanguagePair::default();
        Self {
            target: pair.target,
            support: pair.support,
        }
    }
}

impl LanguagesConfig {
    /// Language pair for a new run, with optional command-line overrides.
    pub fn pair(&self, target: Option<&str>, support: Option<&str>) -> LanguagePair {
        LanguagePair::new(target.unwrap_or(self.target.as_str()), support.unwrap_or(self.support.as_str()))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: Some("info".to_string()),
            storage: StorageConfig::default(),
            catalog: CatalogConfig::default(),
            languages: LanguagesConfig::default(),
            grading: GradingConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        let project_name = env!("CARGO_PKG_NAME");
        let mut candidates = vec![PathBuf::from(format!("{}.yml", project_name))];
        if let Some(config_dir) = dirs::config_dir() {
            candidates.push(config_dir.join(project_name).join(format!("{}.yml", project_name)));
        }

        Ok(Self::load_first_usable(&candidates))
    }

    /// First candidate that exists and loads; failures are logged and skipped.
    fn load_first_usable(candidates: &[PathBuf]) -> Self {
        for candidate in candidates {
            if !candidate.exists() {
                continue;
            }
            match Self::load_from_file(candidate) {
                Ok(config) => return config,
                Err(e) => {
                    log::warn!("Failed to load config from {}: {:#}", candidate.display(), e);
                }
            }
        }

        // No config file found, use defaults
        log::info!("No config file found, using defaults");
        Self::default()
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;
        config.validate()?;

        log::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    /// Reject settings the scheduler cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.grading.promote_after == 0 || self.grading.exposure_promote_after == 0 {
            bail!("grading thresholds must be at least 1");
        }
        if self.languages.target.trim().is_empty() || self.languages.support.trim().is_empty() {
            bail!("language tags must not be empty");
        }
        Ok(())
    }
}
