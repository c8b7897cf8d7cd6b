//! Persistence and environment helpers for the app shell.

use crate::core::auth::{TOKEN_KEY, TokenStore, normalize_token};
use crate::core::logic::offset_from_js_minutes;
use chrono::FixedOffset;
use gloo::console;
use gloo::storage::{LocalStorage, Storage};
use gloo::utils::window;
use wasm_bindgen::JsValue;

/// Token store backed by `localStorage`, holding the raw token string.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct LocalTokenStore;

impl TokenStore for LocalTokenStore {
    fn token(&self) -> Option<String> {
        let raw = LocalStorage::raw().get_item(TOKEN_KEY).ok().flatten();
        normalize_token(raw.as_deref())
    }

    fn store(&self, token: &str) {
        if let Err(err) = LocalStorage::raw().set_item(TOKEN_KEY, token) {
            console::error!(format!("failed to persist token: {err:?}"));
        }
    }

    fn clear(&self) {
        if let Err(err) = LocalStorage::raw().remove_item(TOKEN_KEY) {
            console::error!(format!("failed to clear token: {err:?}"));
        }
    }
}

/// Origin of the serving page, when available.
pub(crate) fn page_origin() -> Option<String> {
    window().location().origin().ok()
}

/// Browser UTC offset in effect at `unix_seconds`, or right now for `None`.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn local_offset(unix_seconds: Option<i64>) -> FixedOffset {
    let date = unix_seconds.map_or_else(js_sys::Date::new_0, |seconds| {
        js_sys::Date::new(&JsValue::from_f64(seconds as f64 * 1000.0))
    });
    offset_from_js_minutes(date.get_timezone_offset())
}
