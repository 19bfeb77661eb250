use crate::models::DatabaseConfig;
use reqwest::StatusCode;
use serde_json::Value;

/// Error type for database operations
#[derive(Debug)]
pub enum DatabaseError {
    NetworkError(String),
    JsonError(String),
    ServerError(String),
}

impl std::fmt::Display for DatabaseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatabaseError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            DatabaseError::JsonError(msg) => write!(f, "JSON error: {}", msg),
            DatabaseError::ServerError(msg) => write!(f, "Server error: {}", msg),
        }
    }
}

impl std::error::Error for DatabaseError {}

/// REST client for one realtime database
pub struct RealtimeDatabase {
    config: DatabaseConfig,
}

impl RealtimeDatabase {
    pub fn new(config: DatabaseConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    /// REST URL of the node at `path`
    ///
    /// Path segments and the auth token are percent-encoded.
    pub fn node_url(&self, path: &str) -> Result<String, DatabaseError> {
        let mut url = reqwest::Url::parse(&self.config.url).map_err(|e| {
            DatabaseError::NetworkError(format!("Invalid database URL {}: {}", self.config.url, e))
        })?;

        let mut segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let last = format!("{}.json", segments.pop().unwrap_or(""));
        url.path_segments_mut()
            .map_err(|_| {
                DatabaseError::NetworkError(format!("Database URL {} cannot hold a path", self.config.url))
            })?
            .pop_if_empty()
            .extend(segments)
            .push(&last);

        if let Some(token) = &self.config.auth_token {
            url.query_pairs_mut().append_pair("auth", token);
        }
        Ok(url.into())
    }

    fn client(&self) -> Result<reqwest::Client, DatabaseError> {
        reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(self.config.timeout_secs))
            .connect_timeout(std::time::Duration::from_secs(10))
            .tcp_keepalive(std::time::Duration::from_secs(30))
            .user_agent("RealtimeDb/0.1.0")
            .build()
            .map_err(|e| DatabaseError::NetworkError(format!("Client build failed: {}", e)))
    }

    /// Replace the node at `path` with `value`
    pub async fn set_value(&self, path: &str, value: &Value) -> Result<(), DatabaseError> {
        let url = self.node_url(path)?;
        let response = self
            .client()?
            .put(&url)
            .json(value)
            .send()
            .await
            .map_err(|e| DatabaseError::NetworkError(format!("PUT {} failed: {}", path, e)))?;

        check_status("PUT", path, response.status())?;
        log::debug!("Wrote node {}", path);
        Ok(())
    }

    /// Read the node at `path`
    /// Returns Ok(None) if the node does not exist
    pub async fn get_value(&self, path: &str) -> Result<Option<Value>, DatabaseError> {
        let url = self.node_url(path)?;
        let response = self
            .client()?
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| DatabaseError::NetworkError(format!("GET {} failed: {}", path, e)))?;

        check_status("GET", path, response.status())?;

        let value = response
            .json::<Value>()
            .await
            .map_err(|e| DatabaseError::JsonError(format!("Failed to parse node {}: {}", path, e)))?;

        Ok(node_value(value))
    }

    /// Remove the node at `path`
    pub async fn delete_value(&self, path: &str) -> Result<(), DatabaseError> {
        let url = self.node_url(path)?;
        let response = self
            .client()?
            .delete(&url)
            .send()
            .await
            .map_err(|e| DatabaseError::NetworkError(format!("DELETE {} failed: {}", path, e)))?;

        check_status("DELETE", path, response.status())?;
        log::debug!("Deleted node {}", path);
        Ok(())
    }
}

/// Any non-2xx status is a server error
fn check_status(method: &str, path: &str, status: StatusCode) -> Result<(), DatabaseError> {
    if status.is_success() {
        return Ok(());
    }
    Err(DatabaseError::ServerError(format!(
        "{} {} returned status: {}",
        method, path, status
    )))
}

/// The database answers `null` for nodes that do not exist
fn node_value(value: Value) -> Option<Value> {
    match value {
        Value::Null => None,
        value => Some(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_node_url() {
        let db = RealtimeDatabase::new(DatabaseConfig::new("https://db.example.com/"));
        assert_eq!(
            db.node_url("images/mars/42").unwrap(),
            "https://db.example.com/images/mars/42.json"
        );
    }

    #[test]
    fn test_node_url_trims_slashes() {
        let db = RealtimeDatabase::new(DatabaseConfig::new("https://db.example.com"));
        assert_eq!(db.node_url("/rolls/").unwrap(), "https://db.example.com/rolls.json");
        assert_eq!(db.node_url("").unwrap(), "https://db.example.com/.json");
    }

    #[test]
    fn test_node_url_with_auth() {
        let config = DatabaseConfig::new("https://db.example.com").with_auth_token("secret");
        let db = RealtimeDatabase::new(config);
        assert_eq!(
            db.node_url("rolls").unwrap(),
            "https://db.example.com/rolls.json?auth=secret"
        );
    }

    #[test]
    fn test_node_url_encodes_segments_and_token() {
        let config = DatabaseConfig::new("https://db.example.com").with_auth_token("a&b=c");
        let db = RealtimeDatabase::new(config);
        assert_eq!(
            db.node_url("images/picsum/a b?c").unwrap(),
            "https://db.example.com/images/picsum/a%20b%3Fc.json?auth=a%26b%3Dc"
        );
    }

    #[test]
    fn test_node_url_invalid_base() {
        let db = RealtimeDatabase::new(DatabaseConfig::new("not a url"));
        assert!(matches!(db.node_url("rolls"), Err(DatabaseError::NetworkError(_))));
    }

    #[test]
    fn test_check_status() {
        assert!(check_status("PUT", "rolls", StatusCode::OK).is_ok());
        assert!(check_status("DELETE", "rolls", StatusCode::NO_CONTENT).is_ok());

        let err = check_status("GET", "rolls", StatusCode::UNAUTHORIZED).unwrap_err();
        match err {
            DatabaseError::ServerError(msg) => assert!(msg.contains("401")),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_node_value_null_is_missing() {
        assert_eq!(node_value(Value::Null), None);
        assert_eq!(node_value(json!(0)), Some(json!(0)));
        assert_eq!(
            node_value(json!({"id": "a1"})),
            Some(json!({"id": "a1"}))
        );
    }
}
