//! Photo session state manager.
//!
//! A [`PhotoSession`] owns the current photo of one screen, the id of the last
//! saved photo and the roll counter. Fetch and filter operations drive the
//! [`SessionState`] (`Loading` first, then `Success` or `Error`); persistence
//! operations report through notices and only touch the state when a load
//! succeeds.
//!
//! Operations are not queued. Two fetches started back to back both run and
//! the one finishing last wins. Locks are never held across an await.
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use photo_session::{PhotoSession, SessionConfig, SqliteStore};
//!
//! let session = PhotoSession::new(SessionConfig::picsum(), source, store);
//! session.fetch_random_photo().await?;
//! session.apply_blur().await?;
//! session.save().await?;
//! ```

use crate::error::SessionError;
use crate::filter::Filter;
use crate::models::{PhotoRecord, SessionConfig};
use crate::notice::{Notice, NoticeBoard};
use crate::paths;
use crate::source::PhotoSource;
use crate::state::{FetchFailure, SessionState};
use crate::store::{self, PersistenceStore};
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::{broadcast, watch};

#[derive(Debug, Default)]
struct SessionData {
    current_photo: Option<PhotoRecord>,
    last_saved_id: Option<String>,
}

struct SessionInner {
    config: SessionConfig,
    source: Arc<dyn PhotoSource>,
    store: Arc<dyn PersistenceStore>,
    data: Mutex<SessionData>,
    state_tx: watch::Sender<SessionState>,
    rolls_tx: watch::Sender<u64>,
    notices: NoticeBoard,
    closed: AtomicBool,
}

/// Handle to one photo session; clones share the same session
#[derive(Clone)]
pub struct PhotoSession {
    inner: Arc<SessionInner>,
}

impl PhotoSession {
    pub fn new(
        config: SessionConfig,
        source: Arc<dyn PhotoSource>,
        store: Arc<dyn PersistenceStore>,
    ) -> Self {
        let (state_tx, _) = watch::channel(SessionState::Loading);
        let (rolls_tx, _) = watch::channel(0);

        Self {
            inner: Arc::new(SessionInner {
                config,
                source,
                store,
                data: Mutex::new(SessionData::default()),
                state_tx,
                rolls_tx,
                notices: NoticeBoard::new(),
                closed: AtomicBool::new(false),
            }),
        }
    }

    /// Create the session and start the first fetch on the tokio runtime
    pub fn open(
        config: SessionConfig,
        source: Arc<dyn PhotoSource>,
        store: Arc<dyn PersistenceStore>,
    ) -> Self {
        let session = Self::new(config, source, store);
        let background = session.clone();
        tokio::spawn(async move {
            // Failures are already reflected in state and logs
            let _ = background.fetch_random_photo().await;
        });
        session
    }

    pub fn config(&self) -> &SessionConfig {
        &self.inner.config
    }

    pub fn state(&self) -> SessionState {
        self.inner.state_tx.borrow().clone()
    }

    pub fn subscribe_state(&self) -> watch::Receiver<SessionState> {
        self.inner.state_tx.subscribe()
    }

    pub fn roll_count(&self) -> u64 {
        *self.inner.rolls_tx.borrow()
    }

    pub fn subscribe_rolls(&self) -> watch::Receiver<u64> {
        self.inner.rolls_tx.subscribe()
    }

    pub fn subscribe_notices(&self) -> broadcast::Receiver<Notice> {
        self.inner.notices.subscribe()
    }

    /// Recent notices, oldest first
    pub fn notice_log(&self) -> Vec<Notice> {
        self.inner.notices.entries()
    }

    pub fn current_photo(&self) -> Option<PhotoRecord> {
        self.data().current_photo.clone()
    }

    pub fn last_saved_id(&self) -> Option<String> {
        self.data().last_saved_id.clone()
    }

    /// Tear the session down; late completions are dropped from now on
    pub fn close(&self) {
        if !self.inner.closed.swap(true, Ordering::SeqCst) {
            log::debug!("{} session closed", self.inner.config.label);
        }
    }

    pub fn is_closed(&self) -> bool {
        self.inner.closed.load(Ordering::SeqCst)
    }

    /// Fetch the source listing and make a random element the current photo
    pub async fn fetch_random_photo(&self) -> Result<PhotoRecord, SessionError> {
        self.ensure_open()?;
        self.set_state(SessionState::Loading);

        let result = self.inner.source.fetch_all().await;
        self.ensure_open()?;

        let photos = match result {
            Ok(photos) => photos,
            Err(e) => {
                log::error!("{} fetch failed: {}", self.inner.config.label, e);
                let reason = e.to_string();
                self.set_state(SessionState::Error(FetchFailure::Network(reason.clone())));
                return Err(SessionError::Network(reason));
            }
        };

        if photos.is_empty() {
            log::error!("{} source returned no photos", self.inner.config.label);
            self.set_state(SessionState::Error(FetchFailure::EmptySelection));
            return Err(SessionError::EmptySelection);
        }

        let total = photos.len();
        let photo = pick_random(photos);
        log::info!(
            "{} roll picked photo {} out of {}",
            self.inner.config.label,
            photo.id,
            total
        );

        {
            let mut data = self.data();
            data.current_photo = Some(photo.clone());
            self.set_state(SessionState::Success {
                message: format!("{} photos retrieved", total),
                photo: photo.clone(),
            });
        }

        // Counter failures are reported as notices, the roll itself succeeded
        let _ = self.update_roll().await;

        Ok(photo)
    }

    pub async fn apply_blur(&self) -> Result<PhotoRecord, SessionError> {
        let radius = self.inner.config.blur_radius;
        self.apply_filter(Filter::Blur(radius)).await
    }

    pub async fn apply_grayscale(&self) -> Result<PhotoRecord, SessionError> {
        self.apply_filter(Filter::Grayscale).await
    }

    /// Append `filter` to the current photo's URL
    pub async fn apply_filter(&self, filter: Filter) -> Result<PhotoRecord, SessionError> {
        self.ensure_open()?;

        let id = self.data().current_photo.as_ref().map(|photo| photo.id.clone());
        let Some(id) = id else {
            return Err(self.report(
                SessionError::MissingCurrentPhoto,
                "Cannot apply filter without a current photo",
            ));
        };

        let previous = self.state();
        self.set_state(SessionState::Loading);

        // The lookup is informational; the local URL stays authoritative.
        match self.inner.source.fetch_by_id(&id).await {
            Ok(remote) => log::debug!(
                "{} photo {} confirmed by source ({})",
                self.inner.config.label,
                remote.id,
                remote.image_url
            ),
            Err(e) => log::warn!(
                "{} lookup of photo {} failed: {}",
                self.inner.config.label,
                id,
                e
            ),
        }
        self.ensure_open()?;

        let filtered = {
            let mut data = self.data();
            data.current_photo.as_mut().map(|photo| {
                photo.apply_filter(filter);
                let photo = photo.clone();
                self.set_state(SessionState::Success {
                    message: format!("{} photo {}", self.inner.config.label, filter.verb()),
                    photo: photo.clone(),
                });
                photo
            })
        };

        let Some(photo) = filtered else {
            self.set_state(previous);
            return Err(self.report(
                SessionError::MissingCurrentPhoto,
                "Cannot apply filter without a current photo",
            ));
        };

        log::info!("Applied {:?} to photo {}: {}", filter, photo.id, photo.image_url);
        Ok(photo)
    }

    /// Write the current photo under `<namespace>/<id>`
    pub async fn save(&self) -> Result<String, SessionError> {
        self.ensure_open()?;

        let Some(photo) = self.current_photo() else {
            return Err(self.report(
                SessionError::MissingCurrentPhoto,
                "Cannot save without a current photo",
            ));
        };

        let result = match paths::photo_path(&self.inner.config.namespace, &photo.id) {
            Ok(path) => store::write_record(self.inner.store.as_ref(), &path, &photo).await,
            Err(e) => Err(e),
        };
        self.ensure_open()?;

        match result {
            Ok(()) => {
                self.data().last_saved_id = Some(photo.id.clone());
                self.inner.notices.post(Notice::info(format!(
                    "{} image saved successfully with ID: {}",
                    self.inner.config.label, photo.id
                )));
                Ok(photo.id)
            }
            Err(e) => Err(self.report(
                SessionError::from(e),
                &format!("Failed to save {} image {}", self.inner.config.label, photo.id),
            )),
        }
    }

    /// Read back the last saved photo and make it current
    pub async fn load(&self) -> Result<PhotoRecord, SessionError> {
        self.ensure_open()?;

        let Some(id) = self.last_saved_id() else {
            return Err(self.report(
                SessionError::NotFound("Last saved image".to_string()),
                "No last saved image to fetch",
            ));
        };

        let result = match paths::photo_path(&self.inner.config.namespace, &id) {
            Ok(path) => store::read_record::<PhotoRecord>(self.inner.store.as_ref(), &path).await,
            Err(e) => Err(e),
        };
        self.ensure_open()?;

        match result {
            Ok(Some(photo)) => {
                {
                    let mut data = self.data();
                    data.current_photo = Some(photo.clone());
                    self.set_state(SessionState::Success {
                        message: format!("Loaded {}", id),
                        photo: photo.clone(),
                    });
                }
                self.inner.notices.post(Notice::info(format!(
                    "{} image loaded successfully with ID: {}",
                    self.inner.config.label, id
                )));
                Ok(photo)
            }
            Ok(None) => Err(self.report(
                SessionError::NotFound(format!("Image {}", id)),
                &format!("{} image not found for ID: {}", self.inner.config.label, id),
            )),
            Err(e) => Err(self.report(
                SessionError::from(e),
                &format!("Failed to retrieve {} image {}", self.inner.config.label, id),
            )),
        }
    }

    /// Read, increment and write back the roll counter
    ///
    /// Not atomic against other writers; one device per counter is assumed.
    pub async fn update_roll(&self) -> Result<u64, SessionError> {
        self.ensure_open()?;

        let Some(path) = self.inner.config.roll_path.clone() else {
            let mut next = 0;
            self.inner.rolls_tx.send_modify(|count| {
                *count += 1;
                next = *count;
            });
            return Ok(next);
        };

        let persisted = match self.inner.store.read(&path).await {
            Ok(Some(value)) => value.as_u64().unwrap_or_else(|| {
                log::warn!("Roll counter at {} is not an integer: {}", path, value);
                0
            }),
            Ok(None) => 0,
            Err(e) => {
                self.ensure_open()?;
                self.inner.rolls_tx.send_modify(|count| *count += 1);
                return Err(self.report(SessionError::from(e), "Failed to read roll counter"));
            }
        };
        self.ensure_open()?;

        let next = persisted + 1;
        let result = self.inner.store.write(&path, serde_json::json!(next)).await;
        self.ensure_open()?;

        self.inner.rolls_tx.send_replace(next);
        match result {
            Ok(()) => {
                log::debug!("Roll counter at {} is now {}", path, next);
                Ok(next)
            }
            Err(e) => Err(self.report(SessionError::from(e), "Failed to write roll counter")),
        }
    }

    fn data(&self) -> MutexGuard<'_, SessionData> {
        self.inner.data.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn set_state(&self, state: SessionState) {
        self.inner.state_tx.send_replace(state);
    }

    fn ensure_open(&self) -> Result<(), SessionError> {
        if self.is_closed() {
            log::debug!(
                "{} session closed, dropping operation result",
                self.inner.config.label
            );
            return Err(SessionError::Closed);
        }
        Ok(())
    }

    /// Post a failure notice and hand the error back
    fn report(&self, err: SessionError, context: &str) -> SessionError {
        log::warn!("{}: {}", context, err);
        self.inner
            .notices
            .post(Notice::failure(format!("{}. {}", context, err.user_message())));
        err
    }
}

/// Uniform pick; `photos` must not be empty
fn pick_random(mut photos: Vec<PhotoRecord>) -> PhotoRecord {
    let index = rand::rng().random_range(0..photos.len());
    photos.swap_remove(index)
}
