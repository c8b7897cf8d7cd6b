//! Login feature wiring.
//!
//! # Design
//! - Exchange credentials for a token and persist it through the client's
//!   token store so the next request is authenticated.
//! - A 401 from the token endpoint means bad credentials, not an expired
//!   session.

pub mod actions;
pub mod state;
#[cfg(target_arch = "wasm32")]
pub mod view;
