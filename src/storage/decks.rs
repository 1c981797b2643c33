use super::{DECK_NAMESPACE, KeyValueStore};
use crate::deck::Deck;
use crate::error::StorageError;

/// Reads and writes the deck namespace. Failures are logged and swallowed.
pub struct DeckStore<'a> {
    backend: &'a dyn KeyValueStore,
}

impl<'a> DeckStore<'a> {
    pub fn new(backend: &'a dyn KeyValueStore) -> Self {
        Self { backend }
    }

    /// Load the saved deck, or an empty default deck if none is readable
    pub fn load(&self) -> Deck {
        match self.try_load() {
            Ok(Some(deck)) => deck,
            Ok(None) => Deck::default(),
            Err(e) => {
                tracing::warn!("Could not load saved deck, starting empty: {}", e);
                Deck::default()
            }
        }
    }

    /// Persist the deck. Returns whether the write succeeded.
    pub fn save(&self, deck: &Deck) -> bool {
        match self.try_save(deck) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Could not save deck: {}", e);
                false
            }
        }
    }

    fn try_load(&self) -> Result<Option<Deck>, StorageError> {
        match self.backend.get(DECK_NAMESPACE)? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    fn try_save(&self, deck: &Deck) -> Result<(), StorageError> {
        let json = serde_json::to_string(deck)?;
        self.backend.set(DECK_NAMESPACE, &json)
    }
}
