// ABOUTME: Preference persistence for favorites, ratings, usage and custom text
// ABOUTME: In-memory state is authoritative; storage failures degrade to best-effort durability

pub mod error;
pub mod manager;
pub mod store;
pub mod types;

pub use error::PreferenceError;
pub use manager::PreferenceManager;
pub use store::{JsonFileStore, MemoryStore, PreferenceStore};
pub use types::{PreferenceRecord, PreferenceState, MAX_RATING, MIN_RATING};
