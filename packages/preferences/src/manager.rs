// ABOUTME: Preference manager tying in-memory state to a durable store
// ABOUTME: Loads once at startup and saves the full state after every mutation

use chrono::Utc;
use tracing::{debug, warn};

use crate::error::PreferenceError;
use crate::store::PreferenceStore;
use crate::types::{PreferenceRecord, PreferenceState};

/// One user's preferences for the current session.
///
/// The in-memory state is authoritative: when the store cannot be read the
/// session starts from defaults, and when a save fails the mutation is kept
/// and the failure is remembered in [`last_persistence_error`](Self::last_persistence_error).
pub struct PreferenceManager<S: PreferenceStore> {
    store: S,
    state: PreferenceState,
    last_error: Option<PreferenceError>,
}

impl<S: PreferenceStore> PreferenceManager<S> {
    pub async fn open(store: S) -> Self {
        let (state, last_error) = match store.load().await {
            Ok(state) => (state.sanitize(), None),
            Err(e) => {
                warn!("Failed to load preferences, using defaults: {}", e);
                (PreferenceState::default(), Some(e))
            }
        };

        debug!(
            "Opened preferences: {} favorites, {} ratings, usage {}",
            state.favorites.len(),
            state.ratings.len(),
            state.usage_count
        );

        Self {
            store,
            state,
            last_error,
        }
    }

    pub fn state(&self) -> &PreferenceState {
        &self.state
    }

    pub fn record(&self, id: &str) -> PreferenceRecord {
        self.state.record(id)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Error from the most recent load or save, cleared by the next successful save
    pub fn last_persistence_error(&self) -> Option<&PreferenceError> {
        self.last_error.as_ref()
    }

    pub async fn toggle_favorite(&mut self, id: &str) -> Result<bool, PreferenceError> {
        let favorited = self.state.toggle_favorite(id)?;
        self.persist().await;
        Ok(favorited)
    }

    pub async fn set_rating(&mut self, id: &str, rating: u8) -> Result<(), PreferenceError> {
        self.state.set_rating(id, rating)?;
        self.persist().await;
        Ok(())
    }

    pub async fn increment_usage(&mut self) -> u64 {
        let count = self.state.increment_usage();
        self.persist().await;
        count
    }

    pub async fn mark_used(&mut self, id: &str) -> Result<(), PreferenceError> {
        self.state.mark_used(id, Utc::now())?;
        self.persist().await;
        Ok(())
    }

    pub async fn set_custom_text(
        &mut self,
        id: &str,
        text: impl Into<String>,
    ) -> Result<(), PreferenceError> {
        self.state.set_custom_text(id, text.into())?;
        self.persist().await;
        Ok(())
    }

    pub async fn clear_custom_text(&mut self, id: &str) -> Result<bool, PreferenceError> {
        let removed = self.state.clear_custom_text(id)?;
        if removed {
            self.persist().await;
        }
        Ok(removed)
    }

    async fn persist(&mut self) {
        match self.store.save(&self.state).await {
            Ok(()) => self.last_error = None,
            Err(e) => {
                warn!("Failed to save preferences, keeping changes in memory: {}", e);
                self.last_error = Some(e);
            }
        }
    }
}
