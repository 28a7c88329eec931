//! Named scenario persistence
//!
//! The core has no dependency on storage; the surrounding application
//! injects a [`ScenarioStore`] and saves `{ params, events }` pairs under
//! user-chosen names. The bundled implementation keeps one JSON file per
//! scenario in a directory.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::inputs::{SimulationParameters, YearEvent};

/// A named, saved run configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub params: SimulationParameters,
    pub events: Vec<YearEvent>,
    pub saved_at: DateTime<Utc>,
}

impl Scenario {
    pub fn new(params: SimulationParameters, events: Vec<YearEvent>) -> Self {
        Self {
            params,
            events,
            saved_at: Utc::now(),
        }
    }
}

/// Failures of the persistence layer. Corrupt files surface as `Format`
/// errors instead of panics or silently dropped data.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("scenario store I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("scenario file is not valid: {0}")]
    Format(#[from] serde_json::Error),

    #[error("no scenario named '{0}'")]
    NotFound(String),

    #[error("scenario name '{0}' is empty or contains path separators")]
    InvalidName(String),
}

/// Repository interface for named scenarios
pub trait ScenarioStore {
    fn save(&self, name: &str, scenario: &Scenario) -> Result<(), StoreError>;
    fn load(&self, name: &str) -> Result<Scenario, StoreError>;
    fn list(&self) -> Result<Vec<String>, StoreError>;
    fn delete(&self, name: &str) -> Result<(), StoreError>;
}

/// Directory-backed store, one pretty-printed JSON file per scenario
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Create a store rooted at `dir`. The directory is created lazily on
    /// the first save.
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Resolve a scenario name to its file, rejecting names that would
    /// escape the store directory.
    fn path(&self, name: &str) -> Result<PathBuf, StoreError> {
        if name.is_empty() || name.contains(['/', '\\', '\0']) || name == ".." {
            return Err(StoreError::InvalidName(name.to_string()));
        }
        Ok(self.dir.join(format!("{name}.json")))
    }
}

impl ScenarioStore for JsonFileStore {
    fn save(&self, name: &str, scenario: &Scenario) -> Result<(), StoreError> {
        let path = self.path(name)?;
        fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string_pretty(scenario)?;
        fs::write(path, json)?;
        Ok(())
    }

    fn load(&self, name: &str) -> Result<Scenario, StoreError> {
        let path = self.path(name)?;
        if !path.exists() {
            return Err(StoreError::NotFound(name.to_string()));
        }
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    fn list(&self) -> Result<Vec<String>, StoreError> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) == Some("json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    names.push(stem.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    fn delete(&self, name: &str) -> Result<(), StoreError> {
        let path = self.path(name)?;
        if !path.exists() {
            return Err(StoreError::NotFound(name.to_string()));
        }
        fs::remove_file(path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inputs::default_schedule;
    use std::env;

    fn test_params() -> SimulationParameters {
        SimulationParameters {
            initial_nav: 50.0,
            initial_market_value: 10.0,
            initial_cash: 0.0,
            substance_discount_percent: 60.0,
            ownership_share_percent: 10.0,
            initial_share_count: 441_862,
            default_raise_amount: 5.0,
            default_management_cost: 5.0,
            default_growth_percent: 20.0,
        }
    }

    fn temp_store(tag: &str) -> JsonFileStore {
        let dir = env::temp_dir().join(format!(
            "holding_simulator_store_{tag}_{}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        JsonFileStore::new(dir)
    }

    #[test]
    fn save_load_round_trip() {
        let store = temp_store("round_trip");
        let params = test_params();
        let scenario = Scenario::new(params.clone(), default_schedule(&params, 10));

        store.save("base case", &scenario).unwrap();
        let loaded = store.load("base case").unwrap();
        assert_eq!(loaded, scenario);

        let _ = fs::remove_dir_all(store.dir());
    }

    #[test]
    fn list_and_delete() {
        let store = temp_store("list_delete");
        let params = test_params();
        let scenario = Scenario::new(params.clone(), default_schedule(&params, 5));

        store.save("bull", &scenario).unwrap();
        store.save("bear", &scenario).unwrap();
        assert_eq!(store.list().unwrap(), vec!["bear", "bull"]);

        store.delete("bear").unwrap();
        assert_eq!(store.list().unwrap(), vec!["bull"]);

        let _ = fs::remove_dir_all(store.dir());
    }

    #[test]
    fn missing_scenario_is_not_found() {
        let store = temp_store("missing");
        assert!(matches!(
            store.load("nothing"),
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(
            store.delete("nothing"),
            Err(StoreError::NotFound(_))
        ));
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn names_with_path_separators_are_rejected() {
        let store = temp_store("names");
        let params = test_params();
        let scenario = Scenario::new(params.clone(), default_schedule(&params, 1));

        for name in ["../escape", "a/b", "a\\b", "..", ""] {
            assert!(matches!(
                store.save(name, &scenario),
                Err(StoreError::InvalidName(_))
            ));
            assert!(matches!(store.load(name), Err(StoreError::InvalidName(_))));
            assert!(matches!(
                store.delete(name),
                Err(StoreError::InvalidName(_))
            ));
        }

        // Nothing may be written outside (or inside) the store directory
        assert!(!store.dir().exists());
    }

    #[test]
    fn corrupt_file_is_a_format_error() {
        let store = temp_store("corrupt");
        fs::create_dir_all(store.dir()).unwrap();
        fs::write(store.dir().join("bad.json"), "{ not json").unwrap();

        assert!(matches!(store.load("bad"), Err(StoreError::Format(_))));

        let _ = fs::remove_dir_all(store.dir());
    }
}
