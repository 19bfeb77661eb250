use super::{schema, PersistenceStore, StoreError};
use crate::paths;
use async_trait::async_trait;
use rusqlite::{Connection, OptionalExtension};
use serde_json::Value;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

/// Key-value tree kept in a local SQLite database
///
/// Each node is stored whole under its normalized path; reading a parent
/// path does not assemble its children. Queries run on the blocking pool.
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| StoreError::Other(format!("Failed to create {}: {}", parent.display(), e)))?;
        }
        Self::from_connection(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, StoreError> {
        schema::init_store_schema(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run `task` against the connection without blocking the async executor
    async fn with_connection<T, F>(&self, task: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T, StoreError> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || task(&lock(&conn)))
            .await
            .map_err(|e| StoreError::Other(format!("Store task failed: {}", e)))?
    }
}

fn lock(conn: &Mutex<Connection>) -> MutexGuard<'_, Connection> {
    conn.lock().unwrap_or_else(|e| e.into_inner())
}

fn put(conn: &Connection, path: &str, value: &Value) -> Result<(), StoreError> {
    if value.is_null() {
        conn.execute("DELETE FROM kv_nodes WHERE path = ?1", [path])?;
        log::debug!("Deleted node {}", path);
        return Ok(());
    }

    let text = serde_json::to_string(value)?;
    conn.execute(
        "INSERT INTO kv_nodes (path, value) VALUES (?1, ?2)
         ON CONFLICT(path) DO UPDATE SET value = excluded.value, updated_at = CURRENT_TIMESTAMP",
        (path, &text),
    )?;
    log::debug!("Wrote node {}", path);
    Ok(())
}

fn get(conn: &Connection, path: &str) -> Result<Option<Value>, StoreError> {
    let text: Option<String> = conn
        .query_row("SELECT value FROM kv_nodes WHERE path = ?1", [path], |row| {
            row.get(0)
        })
        .optional()?;

    match text {
        Some(text) => Ok(Some(serde_json::from_str(&text)?)),
        None => Ok(None),
    }
}

#[async_trait]
impl PersistenceStore for SqliteStore {
    async fn write(&self, path: &str, value: Value) -> Result<(), StoreError> {
        let path = paths::normalize(path);
        self.with_connection(move |conn| put(conn, &path, &value)).await
    }

    async fn read(&self, path: &str) -> Result<Option<Value>, StoreError> {
        let path = paths::normalize(path);
        self.with_connection(move |conn| get(conn, &path)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PhotoRecord;
    use crate::store::{read_record, write_record};
    use serde_json::json;

    #[tokio::test]
    async fn test_write_and_read() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.write("rolls", json!(3)).await.unwrap();

        assert_eq!(store.read("rolls").await.unwrap(), Some(json!(3)));
    }

    #[tokio::test]
    async fn test_missing_node() {
        let store = SqliteStore::open_in_memory().unwrap();
        assert_eq!(store.read("images/mars/unknown").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_overwrite_and_delete() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.write("rolls", json!(1)).await.unwrap();
        store.write("/rolls/", json!(2)).await.unwrap();
        assert_eq!(store.read("rolls").await.unwrap(), Some(json!(2)));

        store.write("rolls", Value::Null).await.unwrap();
        assert_eq!(store.read("rolls").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_typed_records() {
        let store = SqliteStore::open_in_memory().unwrap();
        let photo = PhotoRecord::new("a1", "http://x/a1?blur=10");

        write_record(&store, "images/picsum/a1", &photo).await.unwrap();
        let loaded: Option<PhotoRecord> = read_record(&store, "images/picsum/a1").await.unwrap();

        assert_eq!(loaded, Some(photo));
    }

    #[tokio::test]
    async fn test_undecodable_record() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.write("images/mars/a1", json!({"unexpected": true})).await.unwrap();

        let result: Result<Option<PhotoRecord>, _> = read_record(&store, "images/mars/a1").await;
        assert!(matches!(result, Err(StoreError::JsonError(_))));
    }

    #[tokio::test]
    async fn test_open_file_persists() {
        let dir = std::env::temp_dir().join(format!("photo-session-{}", std::process::id()));
        let db_path = dir.join("store.db");

        {
            let store = SqliteStore::open(&db_path).unwrap();
            store.write("rolls", json!(7)).await.unwrap();
        }
        let reopened = SqliteStore::open(&db_path).unwrap();
        assert_eq!(reopened.read("rolls").await.unwrap(), Some(json!(7)));

        drop(reopened);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_busy_connection_does_not_stall_executor() {
        let store = Arc::new(SqliteStore::open_in_memory().unwrap());
        store.write("rolls", json!(5)).await.unwrap();

        let guard = store.conn.lock().unwrap();
        let reader = Arc::clone(&store);
        let handle = tokio::spawn(async move { reader.read("rolls").await });

        // The read waits on the pool while this task keeps running
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        assert!(!handle.is_finished());

        drop(guard);
        assert_eq!(handle.await.unwrap().unwrap(), Some(json!(5)));
    }
}
