// ABOUTME: Durable media for preference state
// ABOUTME: JSON file store with full rewrites plus an in-memory store for sessions and tests

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::error::PreferenceError;
use crate::types::PreferenceState;

#[async_trait]
pub trait PreferenceStore: Send + Sync {
    /// Load saved state; a store that has never been written returns defaults
    async fn load(&self) -> Result<PreferenceState, PreferenceError>;

    /// Overwrite the stored state with `state`
    async fn save(&self, state: &PreferenceState) -> Result<(), PreferenceError>;
}

/// Preferences kept in a single pretty-printed JSON document
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Where an unreadable document is moved before it can be overwritten
    pub fn corrupt_backup_path(&self) -> PathBuf {
        self.sibling_path(".corrupt")
    }

    fn temp_path(&self) -> PathBuf {
        self.sibling_path(".tmp")
    }

    fn sibling_path(&self, suffix: &str) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(suffix);
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl PreferenceStore for JsonFileStore {
    async fn load(&self) -> Result<PreferenceState, PreferenceError> {
        debug!("Reading preferences from {:?}", self.path);
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No preferences stored at {:?}", self.path);
                return Ok(PreferenceState::default());
            }
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str(&content) {
            Ok(state) => Ok(state),
            Err(e) => {
                // Keep the unreadable bytes; the next save rewrites the original path
                let backup = self.corrupt_backup_path();
                match fs::rename(&self.path, &backup).await {
                    Ok(()) => warn!("Moved unreadable preferences to {:?}", backup),
                    Err(rename_err) => warn!(
                        "Could not move unreadable preferences to {:?}: {}",
                        backup, rename_err
                    ),
                }
                Err(e.into())
            }
        }
    }

    async fn save(&self, state: &PreferenceState) -> Result<(), PreferenceError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(state)?;
        let temp = self.temp_path();
        fs::write(&temp, json).await?;
        fs::rename(&temp, &self.path).await?;

        debug!("Saved preferences to {:?}", self.path);
        Ok(())
    }
}

/// Non-durable store; can simulate unavailable storage
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<Option<PreferenceState>>,
    unavailable: AtomicBool,
    saves: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: PreferenceState) -> Self {
        Self {
            state: Mutex::new(Some(state)),
            ..Default::default()
        }
    }

    /// A store whose loads and saves all fail, like exhausted browser storage
    pub fn unavailable() -> Self {
        let store = Self::default();
        store.set_unavailable(true);
        store
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Last successfully saved state
    pub async fn snapshot(&self) -> Option<PreferenceState> {
        self.state.lock().await.clone()
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    fn check_available(&self) -> Result<(), PreferenceError> {
        if self.unavailable.load(Ordering::SeqCst) {
            Err(PreferenceError::PersistenceUnavailable(
                "storage quota exceeded".to_string(),
            ))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl PreferenceStore for MemoryStore {
    async fn load(&self) -> Result<PreferenceState, PreferenceError> {
        self.check_available()?;
        Ok(self.state.lock().await.clone().unwrap_or_default())
    }

    async fn save(&self, state: &PreferenceState) -> Result<(), PreferenceError> {
        self.check_available()?;
        *self.state.lock().await = Some(state.clone());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_file_loads_defaults() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("prefs.json"));

        let state = store.load().await.unwrap();
        assert_eq!(state, PreferenceState::default());
    }

    #[tokio::test]
    async fn test_save_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("deeper").join("prefs.json");
        let store = JsonFileStore::new(&path);

        let mut state = PreferenceState::default();
        state.increment_usage();
        store.save(&state).await.unwrap();

        assert!(path.exists());
        assert!(!store.temp_path().exists());
        assert_eq!(store.load().await.unwrap(), state);
    }

    #[tokio::test]
    async fn test_corrupt_file_reports_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, "{ definitely not json").unwrap();

        let store = JsonFileStore::new(&path);
        let result = store.load().await;
        assert!(matches!(result, Err(PreferenceError::Corrupt(_))));

        assert!(!path.exists());
        assert_eq!(
            std::fs::read_to_string(store.corrupt_backup_path()).unwrap(),
            "{ definitely not json"
        );
    }

    #[tokio::test]
    async fn test_unreadable_path_is_not_treated_as_missing() {
        let dir = TempDir::new().unwrap();
        // A directory where the document should be cannot be read as a file
        let path = dir.path().join("prefs.json");
        std::fs::create_dir(&path).unwrap();

        let result = JsonFileStore::new(&path).load().await;
        assert!(matches!(
            result,
            Err(PreferenceError::PersistenceUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_memory_store_unavailable() {
        let store = MemoryStore::unavailable();
        let result = store.save(&PreferenceState::default()).await;

        assert!(matches!(
            result,
            Err(PreferenceError::PersistenceUnavailable(_))
        ));
        assert_eq!(store.save_count(), 0);
        assert!(store.snapshot().await.is_none());
    }
}
