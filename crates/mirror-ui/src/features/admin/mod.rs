//! Admin dashboard feature wiring.
//!
//! # Design
//! - Gate the page on a stored token before any fetch.
//! - Keep form inputs as strings and validate required fields only on submit.
//! - Every mutation is followed by a fresh server read; nothing is patched
//!   locally.

pub mod actions;
pub mod forms;
pub mod state;
#[cfg(target_arch = "wasm32")]
pub mod view;
