//! Transient notification queue.

use std::collections::HashMap;

/// Maximum number of toasts kept on screen.
pub const MAX_TOASTS: usize = 4;

/// Toast variants used across the UI.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    /// Informational toast.
    Info,
    /// Success toast.
    Success,
    /// Error toast.
    Error,
}

/// Toast payload rendered by the toast host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    /// Monotonic toast identifier.
    pub id: u64,
    /// Display message for the toast.
    pub message: String,
    /// Severity classification.
    pub kind: ToastKind,
}

/// Bounded queue of visible toasts; the oldest are dropped first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ToastQueue {
    /// Visible toasts, oldest first.
    pub items: Vec<Toast>,
    next_id: u64,
}

impl ToastQueue {
    /// Append a toast and return its id.
    pub fn push(&mut self, kind: ToastKind, message: impl Into<String>) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.items.push(Toast {
            id,
            message: message.into(),
            kind,
        });
        if self.items.len() > MAX_TOASTS {
            let drain = self.items.len() - MAX_TOASTS;
            self.items.drain(0..drain);
        }
        id
    }

    /// Remove a toast by id; unknown ids are ignored.
    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|toast| toast.id != id);
    }
}

/// Auto-dismiss handles keyed by toast id.
///
/// Each toast gets exactly one handle for its whole lifetime, so new toasts
/// never restart the countdown of older ones.
#[derive(Debug)]
pub struct ToastTimers<H> {
    handles: HashMap<u64, H>,
}

impl<H> Default for ToastTimers<H> {
    fn default() -> Self {
        Self {
            handles: HashMap::new(),
        }
    }
}

impl<H> ToastTimers<H> {
    /// Start handles for unseen toasts and drop those whose toast is gone.
    pub fn sync(&mut self, items: &[Toast], mut start: impl FnMut(u64) -> H) {
        self.handles
            .retain(|id, _| items.iter().any(|toast| toast.id == *id));
        for toast in items {
            self.handles
                .entry(toast.id)
                .or_insert_with(|| start(toast.id));
        }
    }

    /// Drop every handle.
    pub fn clear(&mut self) {
        self.handles.clear();
    }

    /// Number of live handles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Whether no handle is live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}
