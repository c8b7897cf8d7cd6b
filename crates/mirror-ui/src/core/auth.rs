//! Session token primitives shared across the UI.
//!
//! # Design
//! - The bearer token is the only persisted client state; it lives behind a
//!   small trait so the browser store and tests share one contract.
//! - Treat blank tokens as absent at every read.
//! - Leave header encoding to the API client to keep core DOM-free.

use std::cell::RefCell;
use std::rc::Rc;

/// Local storage key holding the bearer token.
pub const TOKEN_KEY: &str = "token";

/// Path of the login view; the 401 hook navigates here.
pub const LOGIN_PATH: &str = "/login";

/// Storage for the opaque bearer token.
///
/// Implementations are read on every outgoing request, so a token cleared by
/// one request is immediately absent from the next.
pub trait TokenStore {
    /// Current token, if one is stored and non-blank.
    fn token(&self) -> Option<String>;
    /// Persist a freshly issued token.
    fn store(&self, token: &str);
    /// Remove any stored token.
    fn clear(&self);
}

/// In-memory token store, shared by clone.
#[derive(Clone, Debug, Default)]
pub struct MemoryTokenStore {
    inner: Rc<RefCell<Option<String>>>,
}

impl MemoryTokenStore {
    /// Create a store pre-populated with `token`.
    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Some(token.into()))),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn token(&self) -> Option<String> {
        normalize_token(self.inner.borrow().as_deref())
    }

    fn store(&self, token: &str) {
        *self.inner.borrow_mut() = Some(token.to_string());
    }

    fn clear(&self) {
        self.inner.borrow_mut().take();
    }
}

/// Trim a raw stored value, mapping blank values to `None`.
#[must_use]
pub fn normalize_token(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// `Authorization` header value for a token.
#[must_use]
pub fn bearer_value(token: &str) -> String {
    format!("Bearer {token}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_tokens_are_absent() {
        assert_eq!(normalize_token(None), None);
        assert_eq!(normalize_token(Some("")), None);
        assert_eq!(normalize_token(Some("   ")), None);
        assert_eq!(normalize_token(Some(" abc ")), Some("abc".to_string()));
    }

    #[test]
    fn memory_store_round_trips_and_clears() {
        let store = MemoryTokenStore::default();
        assert_eq!(store.token(), None);
        store.store("secret");
        assert_eq!(store.token().as_deref(), Some("secret"));

        let shared = store.clone();
        shared.clear();
        assert_eq!(store.token(), None);
    }

    #[test]
    fn bearer_value_uses_scheme_prefix() {
        assert_eq!(bearer_value("abc"), "Bearer abc");
    }
}
