//! Transient visitor feedback: the single-slot toast.
//!
//! At most one toast is live at any time. Raising a new toast replaces the
//! current one and schedules its own expiry; an expiry firing for a toast
//! that has already been replaced is a no-op, decided by comparing toast
//! ids rather than by cancelling the timer task.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use strum::{AsRefStr, Display};

/// How long a toast stays up before it expires on its own.
pub const TOAST_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}

impl Toast {
    pub fn icon(&self) -> &'static str {
        match self.kind {
            ToastKind::Success => "✅",
            ToastKind::Error => "❌",
            ToastKind::Info => "ℹ️",
        }
    }
}

#[derive(Clone)]
pub struct ToastHub {
    current: Arc<Mutex<Option<Toast>>>,
    next_id: Arc<AtomicU64>,
    ttl: Duration,
}

impl Default for ToastHub {
    fn default() -> Self {
        Self::new(TOAST_TTL)
    }
}

impl ToastHub {
    pub fn new(ttl: Duration) -> Self {
        Self {
            current: Arc::new(Mutex::new(None)),
            next_id: Arc::new(AtomicU64::new(1)),
            ttl,
        }
    }

    /// Replace whatever toast is showing and schedule expiry for the new one.
    pub fn raise(&self, kind: ToastKind, message: impl Into<String>) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let toast = Toast {
            id,
            kind,
            message: message.into(),
        };

        *self.current.lock().expect("toast lock") = Some(toast);

        let hub = self.clone();
        let ttl = self.ttl;
        tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            hub.clear_if(id);
        });

        id
    }

    /// Expire the toast with the given id. Stale ids (already replaced or
    /// dismissed) clear nothing.
    pub fn clear_if(&self, id: u64) -> bool {
        let mut current = self.current.lock().expect("toast lock");
        match current.as_ref() {
            Some(toast) if toast.id == id => {
                *current = None;
                true
            }
            _ => false,
        }
    }

    /// Manual close, whatever is showing.
    pub fn dismiss(&self) {
        *self.current.lock().expect("toast lock") = None;
    }

    pub fn current(&self) -> Option<Toast> {
        self.current.lock().expect("toast lock").clone()
    }
}
