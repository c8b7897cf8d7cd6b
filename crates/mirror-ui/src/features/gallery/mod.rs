//! Public gallery feature wiring.
//!
//! # Design
//! - Keep listing/search transitions in a DOM-free state slice.
//! - Restrict API calls to this feature layer to honor UI boundaries.

pub mod actions;
pub mod state;
#[cfg(target_arch = "wasm32")]
pub mod view;
