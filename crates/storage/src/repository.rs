use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("connection error: {0}")]
    Connection(String),
}

/// Durable key-value capability backing the quiz.
///
/// Two logical records live here: the fullscreen flag and the session
/// snapshot. The trait keeps both the session engine and the shell
/// ignorant of the backend, so tests run against [`InMemoryStore`] while
/// the desktop app uses [`crate::JsonFileStore`].
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Fetch the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` when the backend cannot be read.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` when the write cannot be made durable.
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove the record under `key`. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` when the removal cannot be made durable.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Simple in-memory store for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl KeyValueStore for InMemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn set_get_remove_round_trip() {
        let store = InMemoryStore::new();

        assert_eq!(store.get("quizState").await.unwrap(), None);

        store.set("quizState", "{}").await.unwrap();
        assert_eq!(store.get("quizState").await.unwrap(), Some("{}".into()));

        store.set("quizState", "{\"timer\":1}").await.unwrap();
        assert_eq!(
            store.get("quizState").await.unwrap(),
            Some("{\"timer\":1}".into())
        );

        store.remove("quizState").await.unwrap();
        assert_eq!(store.get("quizState").await.unwrap(), None);
    }

    #[tokio::test]
    async fn removing_absent_key_is_not_an_error() {
        let store = InMemoryStore::new();
        store.remove("missing").await.unwrap();
    }

    #[tokio::test]
    async fn records_are_independent() {
        let store = InMemoryStore::new();
        store.set("isFullscreen", "true").await.unwrap();
        store.set("quizState", "{}").await.unwrap();

        store.remove("quizState").await.unwrap();

        assert_eq!(
            store.get("isFullscreen").await.unwrap(),
            Some("true".into())
        );
    }
}
