//! Remote photo sources.
//!
//! A source answers one fixed query with a list of photo records and can look
//! up a single record by id. Wire formats stay inside the implementations.

use crate::models::PhotoRecord;
use async_trait::async_trait;

#[cfg(feature = "http")]
mod http;
#[cfg(feature = "http")]
pub mod mars;
#[cfg(feature = "http")]
pub mod picsum;

#[cfg(feature = "http")]
pub use mars::MarsSource;
#[cfg(feature = "http")]
pub use picsum::PicsumSource;

/// Errors that can occur while talking to a photo source
#[derive(Debug)]
pub enum SourceError {
    NetworkError(String),
    JsonError(String),
    ServerError(String),
    NotFound(String),
}

impl std::fmt::Display for SourceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            SourceError::JsonError(msg) => write!(f, "JSON error: {}", msg),
            SourceError::ServerError(msg) => write!(f, "Server error: {}", msg),
            SourceError::NotFound(id) => write!(f, "Photo {} not found", id),
        }
    }
}

impl std::error::Error for SourceError {}

#[async_trait]
pub trait PhotoSource: Send + Sync {
    /// Fetch the full list for the source's fixed query
    async fn fetch_all(&self) -> Result<Vec<PhotoRecord>, SourceError>;

    /// Fetch one record by id
    async fn fetch_by_id(&self, id: &str) -> Result<PhotoRecord, SourceError>;
}
