//! User-facing notices emitted by the client.
//!
//! Every outcome the user should hear about (base URL accepted or rejected,
//! call succeeded, HTTP error, unreachable host, missing configuration) goes
//! through a `NotificationSink`. Notices are transient: sinks may display,
//! log, or record them, but the client never reads them back.

use std::fmt;
use std::sync::{Arc, Mutex};

use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.level {
            NoticeLevel::Success => write!(f, "[ok] {}", self.message),
            NoticeLevel::Error => write!(f, "[error] {}", self.message),
        }
    }
}

pub trait NotificationSink: Send + Sync {
    fn notify(&self, notice: Notice);
}

impl<S: NotificationSink + ?Sized> NotificationSink for Arc<S> {
    fn notify(&self, notice: Notice) {
        (**self).notify(notice);
    }
}

/// Forwards notices to the `tracing` subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Success => info!(target: "notice", "{}", notice.message),
            NoticeLevel::Error => warn!(target: "notice", "{}", notice.message),
        }
    }
}

/// Keeps every notice in memory, oldest first.
#[derive(Debug, Default)]
pub struct MemorySink {
    notices: Mutex<Vec<Notice>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn last(&self) -> Option<Notice> {
        self.notices.lock().unwrap_or_else(|e| e.into_inner()).last().cloned()
    }

    /// Remove and return everything recorded so far.
    pub fn drain(&self) -> Vec<Notice> {
        std::mem::take(&mut *self.notices.lock().unwrap_or_else(|e| e.into_inner()))
    }
}

impl NotificationSink for MemorySink {
    fn notify(&self, notice: Notice) {
        self.notices.lock().unwrap_or_else(|e| e.into_inner()).push(notice);
    }
}
