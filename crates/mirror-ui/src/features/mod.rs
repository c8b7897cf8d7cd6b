//! Page-level features: gallery, admin and login.

pub mod admin;
pub mod gallery;
pub mod login;
