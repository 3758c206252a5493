//! Filesystem store for generated script artifacts.
//!
//! Scripts land as pretty-printed JSON under the configured scripts
//! directory, named by id. The store only persists and retrieves;
//! browsing a saved-scripts catalog is a shell concern this crate does
//! not model.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::{CallScript, ScriptId};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("script '{0}' not found")]
    NotFound(ScriptId),

    #[error("failed to access {}", .0.display())]
    Io(PathBuf, #[source] std::io::Error),

    #[error("script '{0}' is not readable as a script document")]
    Malformed(ScriptId, #[source] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct ScriptStore {
    dir: PathBuf,
}

impl ScriptStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Where a script with the given id lives on disk.
    pub fn path_for(&self, id: &ScriptId) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }

    /// Persist a script, creating the directory on first use.
    pub fn save(&self, script: &CallScript) -> Result<PathBuf, StoreError> {
        fs::create_dir_all(&self.dir).map_err(|e| StoreError::Io(self.dir.clone(), e))?;

        let path = self.path_for(&script.id);
        let body = serde_json::to_string_pretty(script)
            .map_err(|e| StoreError::Malformed(script.id.clone(), e))?;
        fs::write(&path, body).map_err(|e| StoreError::Io(path.clone(), e))?;

        tracing::info!(id = %script.id, path = %path.display(), "script saved");
        Ok(path)
    }

    /// Load a script back by id.
    pub fn load(&self, id: &ScriptId) -> Result<CallScript, StoreError> {
        let path = self.path_for(id);
        if !path.exists() {
            return Err(StoreError::NotFound(id.clone()));
        }
        let body = fs::read_to_string(&path).map_err(|e| StoreError::Io(path, e))?;
        serde_json::from_str(&body).map_err(|e| StoreError::Malformed(id.clone(), e))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::ScriptRequest;
    use crate::wizard::CallGoal;
    use tempfile::TempDir;

    fn sample_script(id: &str) -> CallScript {
        CallScript {
            id: ScriptId::new(id),
            created_at: chrono::Utc::now(),
            request: ScriptRequest {
                product: "Cloud CRM".to_string(),
                persona: "Sales Directors".to_string(),
                industry: "Technology".to_string(),
                goal: CallGoal::ScheduleDemo,
                tone: "professional".to_string(),
                objections: "No budget".to_string(),
            },
            opener: "Hi there".to_string(),
            value_pitch: "It helps".to_string(),
            objection_handling: "Understood".to_string(),
            closing: "Shall we?".to_string(),
        }
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let temp = TempDir::new().unwrap();
        let store = ScriptStore::new(temp.path().join("scripts"));

        let script = sample_script("20260101T000000Z-0001");
        let path = store.save(&script).unwrap();
        assert!(path.exists());

        let loaded = store.load(&script.id).unwrap();
        assert_eq!(loaded, script);
    }

    #[test]
    fn test_load_missing_script_reports_not_found() {
        let temp = TempDir::new().unwrap();
        let store = ScriptStore::new(temp.path());

        let err = store.load(&ScriptId::new("nope")).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[test]
    fn test_malformed_script_file_is_reported() {
        let temp = TempDir::new().unwrap();
        let store = ScriptStore::new(temp.path());
        let id = ScriptId::new("broken");
        std::fs::write(store.path_for(&id), "not json").unwrap();

        let err = store.load(&id).unwrap_err();
        assert!(matches!(err, StoreError::Malformed(_, _)));
    }
}
