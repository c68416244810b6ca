//! Short-lived user-facing acknowledgements ("toasts").
//!
//! Each toast carries its own deadline; expiry of one never touches another.

use std::time::{Duration, Instant};

/// Default time a toast stays on screen
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Failure,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub kind: ToastKind,
    pub expires_at: Instant,
}

/// Ordered queue of visible toasts, oldest first
#[derive(Debug, Clone)]
pub struct Toasts {
    items: Vec<Toast>,
    next_id: u64,
    duration: Duration,
    cap: Option<usize>,
}

impl Default for Toasts {
    fn default() -> Self {
        Self::new(DEFAULT_TOAST_DURATION, None)
    }
}

impl Toasts {
    pub fn new(duration: Duration, cap: Option<usize>) -> Self {
        Self {
            items: Vec::new(),
            next_id: 1,
            duration,
            cap,
        }
    }

    /// Queue a toast visible from `now` for the configured duration.
    /// Returns its id.
    pub fn notify_at(&mut self, message: impl Into<String>, kind: ToastKind, now: Instant) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.items.push(Toast {
            id,
            message: message.into(),
            kind,
            expires_at: now + self.duration,
        });
        if let Some(cap) = self.cap {
            while self.items.len() > cap {
                self.items.remove(0);
            }
        }
        id
    }

    pub fn notify(&mut self, message: impl Into<String>, kind: ToastKind) -> u64 {
        self.notify_at(message, kind, Instant::now())
    }

    pub fn success(&mut self, message: impl Into<String>) -> u64 {
        self.notify(message, ToastKind::Success)
    }

    pub fn failure(&mut self, message: impl Into<String>) -> u64 {
        self.notify(message, ToastKind::Failure)
    }

    /// Drop every toast whose own deadline has passed
    pub fn expire(&mut self, now: Instant) {
        self.items.retain(|t| t.expires_at > now);
    }

    /// Remove a toast immediately. Returns false if it was already gone.
    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.items.len();
        self.items.retain(|t| t.id != id);
        self.items.len() != before
    }

    /// Dismiss the oldest visible toast
    pub fn dismiss_oldest(&mut self) -> bool {
        match self.items.first().map(|t| t.id) {
            Some(id) => self.dismiss(id),
            None => false,
        }
    }

    pub fn items(&self) -> &[Toast] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
