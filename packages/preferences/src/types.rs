// ABOUTME: Preference state and per-item records
// ABOUTME: Pure state transforms applied before every save

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::warn;

use crate::error::PreferenceError;

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

/// Everything persisted for one user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PreferenceState {
    pub favorites: BTreeSet<String>,
    pub ratings: BTreeMap<String, u8>,
    /// Monotonic count of completed uses (copies, calculations)
    pub usage_count: u64,
    pub custom_texts: BTreeMap<String, String>,
    pub last_used: BTreeMap<String, DateTime<Utc>>,
}

/// View of a single item's preferences
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferenceRecord {
    pub favorited: bool,
    pub rating: Option<u8>,
    pub last_used_at: Option<DateTime<Utc>>,
    pub custom_text: Option<String>,
}

impl PreferenceState {
    pub fn record(&self, id: &str) -> PreferenceRecord {
        PreferenceRecord {
            favorited: self.favorites.contains(id),
            rating: self.ratings.get(id).copied(),
            last_used_at: self.last_used.get(id).copied(),
            custom_text: self.custom_texts.get(id).cloned(),
        }
    }

    /// Returns whether the item is a favorite afterwards
    pub fn toggle_favorite(&mut self, id: &str) -> Result<bool, PreferenceError> {
        let id = checked_id(id)?;
        if self.favorites.remove(id) {
            Ok(false)
        } else {
            self.favorites.insert(id.to_string());
            Ok(true)
        }
    }

    pub fn set_rating(&mut self, id: &str, rating: u8) -> Result<(), PreferenceError> {
        let id = checked_id(id)?;
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(PreferenceError::InvalidRating(rating));
        }
        self.ratings.insert(id.to_string(), rating);
        Ok(())
    }

    pub fn increment_usage(&mut self) -> u64 {
        self.usage_count = self.usage_count.saturating_add(1);
        self.usage_count
    }

    pub fn mark_used(&mut self, id: &str, at: DateTime<Utc>) -> Result<(), PreferenceError> {
        let id = checked_id(id)?;
        self.last_used.insert(id.to_string(), at);
        Ok(())
    }

    pub fn set_custom_text(&mut self, id: &str, text: String) -> Result<(), PreferenceError> {
        let id = checked_id(id)?;
        self.custom_texts.insert(id.to_string(), text);
        Ok(())
    }

    /// Returns true if there was text to remove
    pub fn clear_custom_text(&mut self, id: &str) -> Result<bool, PreferenceError> {
        let id = checked_id(id)?;
        Ok(self.custom_texts.remove(id).is_some())
    }

    /// Drop entries that could only come from hand-edited or corrupt storage
    pub(crate) fn sanitize(mut self) -> Self {
        let before = self.ratings.len();
        self.ratings
            .retain(|id, rating| !id.trim().is_empty() && (MIN_RATING..=MAX_RATING).contains(rating));
        if self.ratings.len() != before {
            warn!(
                "Discarded {} invalid stored ratings",
                before - self.ratings.len()
            );
        }

        self.favorites.retain(|id| !id.trim().is_empty());
        self
    }
}

fn checked_id(id: &str) -> Result<&str, PreferenceError> {
    let id = id.trim();
    if id.is_empty() {
        Err(PreferenceError::EmptyId)
    } else {
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_favorite_twice() {
        let mut state = PreferenceState::default();
        assert!(state.toggle_favorite("prompt-42").unwrap());
        assert!(state.record("prompt-42").favorited);
        assert!(!state.toggle_favorite("prompt-42").unwrap());
        assert!(!state.record("prompt-42").favorited);
    }

    #[test]
    fn test_rating_bounds() {
        let mut state = PreferenceState::default();
        assert!(state.set_rating("a", 1).is_ok());
        assert!(state.set_rating("b", 5).is_ok());
        assert!(matches!(
            state.set_rating("c", 0),
            Err(PreferenceError::InvalidRating(0))
        ));
        assert!(matches!(
            state.set_rating("c", 6),
            Err(PreferenceError::InvalidRating(6))
        ));
        assert_eq!(state.record("c").rating, None);
    }

    #[test]
    fn test_empty_id_rejected() {
        let mut state = PreferenceState::default();
        assert!(matches!(
            state.toggle_favorite("  "),
            Err(PreferenceError::EmptyId)
        ));
        assert!(state.favorites.is_empty());
    }

    #[test]
    fn test_usage_count_is_monotonic() {
        let mut state = PreferenceState {
            usage_count: u64::MAX - 1,
            ..Default::default()
        };
        assert_eq!(state.increment_usage(), u64::MAX);
        assert_eq!(state.increment_usage(), u64::MAX);
    }

    #[test]
    fn test_sanitize_drops_bad_ratings() {
        let mut state = PreferenceState::default();
        state.ratings.insert("good".to_string(), 4);
        state.ratings.insert("bad".to_string(), 9);
        state.favorites.insert(String::new());

        let state = state.sanitize();
        assert_eq!(state.ratings.len(), 1);
        assert_eq!(state.record("good").rating, Some(4));
        assert!(state.favorites.is_empty());
    }

    #[test]
    fn test_missing_fields_deserialize_to_defaults() {
        let state: PreferenceState = serde_json::from_str(r#"{"usageCount": 3}"#).unwrap();
        assert_eq!(state.usage_count, 3);
        assert!(state.favorites.is_empty());
    }
}
