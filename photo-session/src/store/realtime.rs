use super::{PersistenceStore, StoreError};
use async_trait::async_trait;
use realtime_db::{DatabaseError, RealtimeDatabase};
use serde_json::Value;

impl From<DatabaseError> for StoreError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::JsonError(msg) => StoreError::JsonError(msg),
            other => StoreError::RemoteError(other.to_string()),
        }
    }
}

#[async_trait]
impl PersistenceStore for RealtimeDatabase {
    async fn write(&self, path: &str, value: Value) -> Result<(), StoreError> {
        if value.is_null() {
            self.delete_value(path).await?;
        } else {
            self.set_value(path, &value).await?;
        }
        Ok(())
    }

    async fn read(&self, path: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.get_value(path).await?)
    }
}
