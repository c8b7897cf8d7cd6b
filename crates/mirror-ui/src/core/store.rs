//! App-wide yewdux store slices.
//!
//! # Design
//! - Keep shared UI state in one store to avoid ad-hoc contexts.
//! - Use small, focused slices so reducers stay predictable.
//! - The session slice mirrors the persisted token; the token store stays the
//!   source of truth for outgoing requests.

use crate::core::auth::normalize_token;
use crate::core::toast::{ToastKind, ToastQueue};
use crate::features::admin::state::AdminState;
use crate::features::gallery::state::GalleryState;
use crate::features::login::state::LoginForm;
#[cfg(target_arch = "wasm32")]
use yewdux::prelude::Dispatch;
use yewdux::store::Store;

/// Global application store for shared state.
#[derive(Clone, Debug, PartialEq, Eq, Store, Default)]
pub struct AppStore {
    /// Signed-in state.
    pub session: SessionSlice,
    /// Gallery listing and search.
    pub gallery: GalleryState,
    /// Admin dashboard.
    pub admin: AdminState,
    /// Login form.
    pub login: LoginForm,
    /// Visible notifications.
    pub toasts: ToastQueue,
}

impl AppStore {
    /// Queue an error toast.
    pub fn error(&mut self, message: impl Into<String>) {
        self.toasts.push(ToastKind::Error, message);
    }

    /// Queue a success toast.
    pub fn success(&mut self, message: impl Into<String>) {
        self.toasts.push(ToastKind::Success, message);
    }
}

/// Dispatch handle for the global store.
#[cfg(target_arch = "wasm32")]
#[must_use]
pub(crate) fn app_dispatch() -> Dispatch<AppStore> {
    Dispatch::<AppStore>::new()
}

/// Run `reduce` against the store and hand back what it returned.
#[cfg(target_arch = "wasm32")]
pub(crate) fn update_store<R>(reduce: impl FnOnce(&mut AppStore) -> R) -> Option<R> {
    let mut reduce = Some(reduce);
    let mut outcome = None;
    app_dispatch().reduce_mut(|store| {
        if let Some(reduce) = reduce.take() {
            outcome = Some(reduce(store));
        }
    });
    outcome
}

/// Shared session state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionSlice {
    /// Token mirrored from storage.
    pub token: Option<String>,
    /// Set when the router should navigate to the login view.
    pub login_redirect: bool,
}

impl SessionSlice {
    /// Seed from the persisted token at boot.
    #[must_use]
    pub fn from_stored(token: Option<&str>) -> Self {
        Self {
            token: normalize_token(token),
            login_redirect: false,
        }
    }

    /// Whether a token is present.
    #[must_use]
    pub const fn signed_in(&self) -> bool {
        self.token.is_some()
    }

    /// Record a freshly issued token.
    pub fn sign_in(&mut self, token: &str) {
        self.token = normalize_token(Some(token));
        self.login_redirect = false;
    }

    /// Forget the token after an explicit logout.
    pub fn sign_out(&mut self) {
        self.token = None;
    }

    /// The server rejected the token; drop it and request the login view.
    pub fn expire(&mut self) {
        self.token = None;
        self.login_redirect = true;
    }

    /// Consume a pending login redirect.
    pub const fn take_login_redirect(&mut self) -> bool {
        let pending = self.login_redirect;
        self.login_redirect = false;
        pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expire_requests_one_redirect() {
        let mut session = SessionSlice::from_stored(Some("abc"));
        assert!(session.signed_in());
        session.expire();
        assert!(!session.signed_in());
        assert!(session.take_login_redirect());
        assert!(!session.take_login_redirect());
    }

    #[test]
    fn sign_in_clears_pending_redirect() {
        let mut session = SessionSlice::from_stored(Some("  "));
        assert!(!session.signed_in());
        session.expire();
        session.sign_in("fresh");
        assert_eq!(session.token.as_deref(), Some("fresh"));
        assert!(!session.take_login_redirect());
        session.sign_out();
        assert!(!session.signed_in());
    }

    #[test]
    fn toast_helpers_queue_by_kind() {
        let mut store = AppStore::default();
        store.success("Crawl started");
        store.error("Failed to fetch logs");
        let kinds: Vec<ToastKind> = store.toasts.items.iter().map(|t| t.kind).collect();
        assert_eq!(kinds, vec![ToastKind::Success, ToastKind::Error]);
    }
}
