//! # Photo Session
//!
//! State management for a "random photo" screen.
//!
//! This crate provides:
//! - The photo record model shared by all sources and stores
//! - A session state machine (`Loading`, `Success`, `Error`) driven by remote fetches
//! - Cosmetic filters expressed as image URL query parameters
//! - Saving and loading the current photo through a key-value persistence store
//! - A roll counter mirrored to the store
//!
//! ## Features
//!
//! - `http`: Mars rover and Picsum photo sources over HTTP
//! - `realtime`: persistence through the `realtime-db` client
//!
//! Without features the crate still ships the SQLite key-value store, which is
//! enough for local use and tests.
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use photo_session::{PhotoSession, SessionConfig, SqliteStore};
//! use photo_session::source::PicsumSource;
//! use std::sync::Arc;
//!
//! let source = Arc::new(PicsumSource::new("https://picsum.photos", 30)?);
//! let store = Arc::new(SqliteStore::open("photos.db")?);
//! let session = PhotoSession::open(SessionConfig::picsum(), source, store);
//! ```

pub mod error;
pub mod filter;
pub mod models;
pub mod notice;
pub mod paths;
pub mod session;
pub mod source;
pub mod state;
pub mod store;

pub use error::SessionError;
pub use filter::Filter;
pub use models::{PhotoRecord, SessionConfig};
pub use notice::{Notice, NoticeKind};
pub use session::PhotoSession;
pub use source::{PhotoSource, SourceError};
pub use state::{FetchFailure, SessionState};
pub use store::{PersistenceStore, SqliteStore, StoreError};
