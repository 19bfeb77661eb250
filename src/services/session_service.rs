use crate::config::{self, AppConfig, StoreBackend};
use crate::error::AppError;
use crate::storage;
use photo_session::source::{MarsSource, PicsumSource};
use photo_session::{PersistenceStore, PhotoSession, SessionConfig, SqliteStore};
use realtime_db::{DatabaseConfig, RealtimeDatabase};
use std::sync::Arc;

/// The two photo sessions shown on the home screen
#[derive(Clone)]
pub struct Sessions {
    pub picsum: PhotoSession,
    pub mars: PhotoSession,
}

impl Sessions {
    pub fn all(&self) -> [&PhotoSession; 2] {
        [&self.picsum, &self.mars]
    }

    pub fn close(&self) {
        for session in self.all() {
            session.close();
        }
    }
}

/// Builds the persistence store selected in the config
pub fn build_store(config: &AppConfig) -> Result<Arc<dyn PersistenceStore>, AppError> {
    let settings = &config.database;
    match settings.backend {
        StoreBackend::Realtime => {
            let mut db_config = DatabaseConfig::new(settings.url.clone());
            db_config.timeout_secs = settings.timeout_secs;
            if let Some(token) = &settings.auth_token {
                db_config = db_config.with_auth_token(token.clone());
            }
            log::info!("Using realtime database at {}", settings.url);
            Ok(Arc::new(RealtimeDatabase::new(db_config)))
        }
        StoreBackend::Sqlite => {
            let path = storage::resolve_in_app_directory(&settings.sqlite_file)?;
            log::info!("Using local database at {}", path.display());
            Ok(Arc::new(SqliteStore::open(&path)?))
        }
    }
}

/// Creates both sessions without starting any fetch
pub fn build_sessions(config: &AppConfig) -> Result<Sessions, AppError> {
    let store = build_store(config)?;
    let sources = &config.sources;
    let blur_radius = config.filters.blur_radius;

    let picsum = PhotoSession::new(
        SessionConfig::picsum().with_blur_radius(blur_radius),
        Arc::new(PicsumSource::new(
            sources.picsum_base_url.clone(),
            sources.timeout_secs,
        )?),
        store.clone(),
    );
    let mars = PhotoSession::new(
        SessionConfig::mars().with_blur_radius(blur_radius),
        Arc::new(MarsSource::new(
            sources.mars_base_url.clone(),
            sources.timeout_secs,
        )?),
        store,
    );

    Ok(Sessions { picsum, mars })
}

/// Loads the config and creates both sessions
pub fn open_sessions() -> Result<Sessions, AppError> {
    let config = config::load_config()?;
    build_sessions(&config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use photo_session::SessionState;

    fn sqlite_config(file: &str) -> AppConfig {
        let mut config = AppConfig::default();
        config.database.backend = StoreBackend::Sqlite;
        config.database.sqlite_file = std::env::temp_dir()
            .join(file)
            .to_string_lossy()
            .to_string();
        config
    }

    #[test]
    fn test_build_sessions_with_sqlite() {
        let config = sqlite_config(&format!("marsphotos-test-{}.db", std::process::id()));
        let sessions = build_sessions(&config).unwrap();

        assert_eq!(sessions.picsum.config().namespace, "images/picsum");
        assert_eq!(sessions.mars.config().namespace, "images/mars");
        assert_eq!(sessions.picsum.state(), SessionState::Loading);

        let _ = std::fs::remove_file(&config.database.sqlite_file);
    }

    #[test]
    fn test_close_closes_both() {
        let config = sqlite_config(&format!("marsphotos-close-{}.db", std::process::id()));
        let sessions = build_sessions(&config).unwrap();

        sessions.close();

        assert!(sessions.picsum.is_closed());
        assert!(sessions.mars.is_closed());
        let _ = std::fs::remove_file(&config.database.sqlite_file);
    }

    #[test]
    fn test_blur_radius_is_clamped() {
        let mut config = sqlite_config(&format!("marsphotos-blur-{}.db", std::process::id()));
        config.filters.blur_radius = 25;
        let sessions = build_sessions(&config).unwrap();

        assert_eq!(sessions.picsum.config().blur_radius, 10);
        let _ = std::fs::remove_file(&config.database.sqlite_file);
    }
}
