//! Persistence for the high score list and player settings

pub mod error;
pub mod json;
pub mod store;

pub use error::StorageError;
pub use json::JsonStore;
pub use store::{MAX_SCORES, MemoryStore, ScoreEntry, ScoreStore, Settings, format_relative};
