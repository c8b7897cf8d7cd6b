//! HTTP client helpers (REST).

pub mod api;
#[cfg(target_arch = "wasm32")]
pub mod fetch;
pub mod http;
