//! API calls backing the gallery.

use crate::features::gallery::state::{GalleryFetch, GalleryLoaded};
use crate::services::api::{ApiClient, ApiError};
use crate::services::http::Transport;

/// Execute a gallery fetch.
///
/// # Errors
/// Propagates the client's [`ApiError`].
pub async fn run_fetch<T: Transport>(
    client: &ApiClient<T>,
    fetch: GalleryFetch,
) -> Result<GalleryLoaded, ApiError> {
    match fetch {
        GalleryFetch::Page { page, limit } => client
            .list_images(page, limit)
            .await
            .map(GalleryLoaded::Page),
        GalleryFetch::Search { query } => client
            .search_images(&query)
            .await
            .map(GalleryLoaded::Search),
    }
}

/// Failure toast text for a gallery fetch.
#[must_use]
pub fn failure_message(fetch: &GalleryFetch, err: &ApiError) -> String {
    match fetch {
        GalleryFetch::Page { .. } => format!("Failed to fetch images: {err}"),
        GalleryFetch::Search { query } => format!("Search for \"{query}\" failed: {err}"),
    }
}
