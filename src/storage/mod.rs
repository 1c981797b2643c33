pub mod db;
pub mod decks;
pub mod kv;

pub use db::Database;
pub use decks::DeckStore;
pub use kv::{KeyValueStore, MemoryStore};

/// Namespace holding the deck document
pub const DECK_NAMESPACE: &str = "deck";
/// Namespace holding the mastery map
pub const MASTERY_NAMESPACE: &str = "mastery";

/// Open the configured database. When it cannot be opened, study data is kept
/// in a process-local store and lost on exit.
pub fn open_backend() -> Box<dyn KeyValueStore> {
    match Database::open() {
        Ok(db) => Box::new(db),
        Err(e) => {
            tracing::warn!("Storage unavailable, continuing in memory: {:#}", e);
            Box::new(MemoryStore::new())
        }
    }
}
