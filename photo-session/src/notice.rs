//! Side channel for persistence results and precondition failures.
//!
//! Notices are the toast-style messages of the app. They never change the
//! session state, so a failed save keeps the current photo on screen.

use std::sync::Mutex;
use tokio::sync::broadcast;

/// Number of notices kept for late subscribers
const LOG_CAPACITY: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Failure,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    pub ts_ms: i64,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Info, message)
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Failure, message)
    }

    fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            ts_ms: chrono::Utc::now().timestamp_millis(),
        }
    }

    pub fn is_failure(&self) -> bool {
        self.kind == NoticeKind::Failure
    }
}

/// Broadcasts notices and keeps a capped log of them
pub(crate) struct NoticeBoard {
    tx: broadcast::Sender<Notice>,
    log: Mutex<Vec<Notice>>,
}

impl NoticeBoard {
    pub(crate) fn new() -> Self {
        let (tx, _rx) = broadcast::channel(32);
        Self {
            tx,
            log: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn post(&self, notice: Notice) {
        match notice.kind {
            NoticeKind::Info => log::info!("{}", notice.message),
            NoticeKind::Failure => log::error!("{}", notice.message),
        }

        {
            let mut guard = self.log.lock().unwrap_or_else(|e| e.into_inner());
            guard.push(notice.clone());
            let len = guard.len();
            if len > LOG_CAPACITY {
                guard.drain(0..len - LOG_CAPACITY);
            }
        }

        // No subscribers is fine
        let _ = self.tx.send(notice);
    }

    pub(crate) fn subscribe(&self) -> broadcast::Receiver<Notice> {
        self.tx.subscribe()
    }

    pub(crate) fn entries(&self) -> Vec<Notice> {
        self.log.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}
