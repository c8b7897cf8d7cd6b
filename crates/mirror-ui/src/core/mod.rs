//! Core, DOM-free primitives and helpers for the Web UI.
pub mod auth;
pub mod config;
pub mod logic;
pub mod store;
pub mod toast;
