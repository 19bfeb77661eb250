//! # Realtime DB
//!
//! A small REST client for Firebase-style realtime databases.
//!
//! The database is a JSON tree. Every node is addressed by a slash separated
//! path and exposed over HTTP as `<database-url>/<path>.json`:
//! - `PUT` replaces the node with the request body
//! - `GET` returns the node, or `null` when it does not exist
//! - `DELETE` removes the node
//!
//! ## Separation of Concerns
//!
//! This crate only moves JSON values. It does **not**:
//! - Decide which paths an application uses
//! - Serialize application records (callers pass `serde_json::Value`)
//! - Retry or queue writes
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use realtime_db::{DatabaseConfig, RealtimeDatabase};
//!
//! let db = RealtimeDatabase::new(DatabaseConfig::new("https://example.firebaseio.com"));
//! db.set_value("rolls", &serde_json::json!(3)).await?;
//! let rolls = db.get_value("rolls").await?;
//! ```

pub mod models;
pub mod service;

pub use models::DatabaseConfig;
pub use service::{DatabaseError, RealtimeDatabase};
