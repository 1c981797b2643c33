use std::cell::RefCell;
use std::collections::HashMap;

use crate::error::StorageError;

/// Best-effort string storage keyed by namespace.
///
/// Implementations take `&self` so one backend can be shared by the deck and
/// mastery stores during a single command.
pub trait KeyValueStore {
    fn get(&self, namespace: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, namespace: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, namespace: &str) -> Result<(), StorageError>;
}

/// Process-local backend, used by tests and as a stand-in when no database is wanted
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, namespace: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.borrow().get(namespace).cloned())
    }

    fn set(&self, namespace: &str, value: &str) -> Result<(), StorageError> {
        self.values
            .borrow_mut()
            .insert(namespace.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, namespace: &str) -> Result<(), StorageError> {
        self.values.borrow_mut().remove(namespace);
        Ok(())
    }
}
