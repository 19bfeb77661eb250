//! Persistence stores: a key-value tree addressed by slash separated paths.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

#[cfg(feature = "realtime")]
mod realtime;
pub mod schema;
pub mod sqlite;

pub use sqlite::SqliteStore;

/// Errors that can occur while reading or writing the store
#[derive(Debug)]
pub enum StoreError {
    DatabaseError(rusqlite::Error),
    RemoteError(String),
    JsonError(String),
    Other(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::DatabaseError(e) => write!(f, "Database error: {}", e),
            StoreError::RemoteError(e) => write!(f, "Remote store error: {}", e),
            StoreError::JsonError(e) => write!(f, "JSON error: {}", e),
            StoreError::Other(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        StoreError::DatabaseError(err)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::JsonError(err.to_string())
    }
}

#[async_trait]
pub trait PersistenceStore: Send + Sync {
    /// Replace the node at `path`; writing `null` removes it
    async fn write(&self, path: &str, value: Value) -> Result<(), StoreError>;

    /// Read the node at `path`, `None` when it does not exist
    async fn read(&self, path: &str) -> Result<Option<Value>, StoreError>;
}

/// Serialize `record` and write it to `path`
pub async fn write_record<T: Serialize + ?Sized>(
    store: &dyn PersistenceStore,
    path: &str,
    record: &T,
) -> Result<(), StoreError> {
    let value = serde_json::to_value(record)?;
    store.write(path, value).await
}

/// Read `path` and decode it as `T`
pub async fn read_record<T: DeserializeOwned>(
    store: &dyn PersistenceStore,
    path: &str,
) -> Result<Option<T>, StoreError> {
    match store.read(path).await? {
        Some(value) => Ok(Some(serde_json::from_value(value)?)),
        None => Ok(None),
    }
}
