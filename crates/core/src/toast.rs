//! Transient toast messages with their own deadline.

use std::time::{Duration, Instant};

/// Default time a toast stays visible.
pub const DEFAULT_TOAST_TTL: Duration = Duration::from_secs(3);

/// Toast colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    /// Green confirmation.
    Success,
    /// Red failure notice.
    Error,
}

/// A visible toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    /// Colour.
    pub kind: ToastKind,
    /// Text.
    pub message: String,
    /// When the toast disappears.
    pub expires_at: Instant,
}

/// Holds at most one toast; a new toast replaces the current one.
#[derive(Debug, Clone)]
pub struct ToastNotifier {
    ttl: Duration,
    current: Option<Toast>,
}

impl Default for ToastNotifier {
    fn default() -> Self {
        Self::new(DEFAULT_TOAST_TTL)
    }
}

impl ToastNotifier {
    /// Notifier whose toasts live for `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, current: None }
    }

    /// Show `message`, replacing any visible toast.
    pub fn show(&mut self, kind: ToastKind, message: impl Into<String>, now: Instant) {
        self.current = Some(Toast {
            kind,
            message: message.into(),
            expires_at: now + self.ttl,
        });
    }

    /// Success toast shorthand.
    pub fn success(&mut self, message: impl Into<String>, now: Instant) {
        self.show(ToastKind::Success, message, now);
    }

    /// Drop the toast once its deadline has passed. Returns whether it was removed.
    pub fn expire(&mut self, now: Instant) -> bool {
        match &self.current {
            Some(toast) if now >= toast.expires_at => {
                self.current = None;
                true
            }
            _ => false,
        }
    }

    /// Remove the toast immediately.
    pub fn dismiss(&mut self) {
        self.current = None;
    }

    /// Visible toast, if any.
    pub fn current(&self) -> Option<&Toast> {
        self.current.as_ref()
    }
}
