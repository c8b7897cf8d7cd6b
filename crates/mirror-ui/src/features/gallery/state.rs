//! Gallery listing and search state.
//!
//! # Design
//! - Every transition that needs data returns the fetch to run; callers
//!   execute it and feed the result back through [`GalleryState::apply`].
//! - An active search suspends pagination until it is cleared.

use crate::core::config::GALLERY_PAGE_SIZE;
use crate::core::logic::page_count;
use mirror_api_models::{Image, ImagePage};

/// Data request produced by a gallery transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GalleryFetch {
    /// Load a page of the full listing.
    Page {
        /// 1-based page number.
        page: u32,
        /// Page size.
        limit: u32,
    },
    /// Run a title search.
    Search {
        /// Trimmed, non-empty query.
        query: String,
    },
}

/// Data returned for a [`GalleryFetch`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GalleryLoaded {
    /// A listing page.
    Page(ImagePage),
    /// Search results.
    Search(Vec<Image>),
}

/// Gallery page state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GalleryState {
    /// Whether a fetch is in flight.
    pub loading: bool,
    /// Images currently displayed.
    pub images: Vec<Image>,
    /// Total for the listing, or the result count while searching.
    pub total: u64,
    /// Current 1-based page.
    pub page: u32,
    /// Images per page.
    pub page_size: u32,
    /// Text in the search box.
    pub search_query: String,
    /// Query of the search currently displayed, if any.
    pub active_search: Option<String>,
}

impl Default for GalleryState {
    fn default() -> Self {
        Self::with_page_size(GALLERY_PAGE_SIZE)
    }
}

impl GalleryState {
    /// Fresh state for the given page size.
    #[must_use]
    pub const fn with_page_size(page_size: u32) -> Self {
        Self {
            loading: true,
            images: Vec::new(),
            total: 0,
            page: 1,
            page_size,
            search_query: String::new(),
            active_search: None,
        }
    }

    /// Reset for a newly mounted page and request page 1.
    pub fn mount(&mut self) -> GalleryFetch {
        *self = Self::with_page_size(self.page_size);
        self.page_fetch()
    }

    /// Update the search box text without searching.
    pub fn set_query(&mut self, text: impl Into<String>) {
        self.search_query = text.into();
    }

    /// Move to `page`; ignored while a search is active or for page 0.
    pub fn change_page(&mut self, page: u32) -> Option<GalleryFetch> {
        if !self.pagination_enabled() || page == 0 {
            return None;
        }
        self.page = page;
        self.loading = true;
        Some(self.page_fetch())
    }

    /// Submit the search box. Blank text clears an active search.
    pub fn submit_search(&mut self) -> Option<GalleryFetch> {
        let query = self.search_query.trim().to_string();
        if query.is_empty() {
            return self.clear_search();
        }
        self.active_search = Some(query.clone());
        self.page = 1;
        self.loading = true;
        Some(GalleryFetch::Search { query })
    }

    /// Clear the search box and, when a search was active, resume the
    /// listing from page 1.
    pub fn clear_search(&mut self) -> Option<GalleryFetch> {
        self.search_query.clear();
        self.active_search.take()?;
        self.page = 1;
        self.loading = true;
        Some(self.page_fetch())
    }

    /// Apply fetched data.
    // TODO: tag fetches with a generation counter and drop results older than
    // the latest request; rapid page/search changes can currently land stale
    // data.
    pub fn apply(&mut self, loaded: GalleryLoaded) {
        match loaded {
            GalleryLoaded::Page(page) => {
                self.images = page.data;
                self.total = page.total;
            }
            GalleryLoaded::Search(images) => {
                self.total = images.len() as u64;
                self.images = images;
                self.page = 1;
            }
        }
        self.loading = false;
    }

    /// Record a failed fetch; previously displayed images stay.
    pub const fn fail(&mut self) {
        self.loading = false;
    }

    /// Whether pagination controls are usable.
    #[must_use]
    pub const fn pagination_enabled(&self) -> bool {
        self.active_search.is_none()
    }

    /// Number of listing pages.
    #[must_use]
    pub const fn page_count(&self) -> u32 {
        page_count(self.total, self.page_size)
    }

    const fn page_fetch(&self) -> GalleryFetch {
        GalleryFetch::Page {
            page: self.page,
            limit: self.page_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::image;

    fn loaded_page(ids: &[i64], total: u64) -> GalleryLoaded {
        GalleryLoaded::Page(ImagePage {
            data: ids.iter().map(|id| image(*id, "listed")).collect(),
            total,
            page: None,
            limit: None,
        })
    }

    #[test]
    fn mount_requests_first_page() {
        let mut state = GalleryState::default();
        state.page = 4;
        state.active_search = Some("old".into());
        assert_eq!(state.mount(), GalleryFetch::Page { page: 1, limit: 20 });
        assert!(state.loading);
        assert!(state.pagination_enabled());
    }

    #[test]
    fn page_change_fetches_and_replaces() {
        let mut state = GalleryState::default();
        state.mount();
        state.apply(loaded_page(&[1, 2], 45));
        assert_eq!(state.page_count(), 3);

        assert_eq!(
            state.change_page(2),
            Some(GalleryFetch::Page { page: 2, limit: 20 })
        );
        state.apply(loaded_page(&[21], 45));
        assert_eq!(state.page, 2);
        assert_eq!(state.images.len(), 1);
        assert_eq!(state.total, 45);
        assert!(!state.loading);
        assert_eq!(state.change_page(0), None);
    }

    #[test]
    fn search_replaces_results_and_suspends_pagination() {
        let mut state = GalleryState::default();
        state.mount();
        state.apply(loaded_page(&[1, 2, 3], 60));
        state.change_page(3);
        state.apply(loaded_page(&[41], 60));

        state.set_query("  pig ");
        assert_eq!(
            state.submit_search(),
            Some(GalleryFetch::Search { query: "pig".into() })
        );
        state.apply(GalleryLoaded::Search(vec![image(7, "pig"), image(9, "pig 2")]));

        let ids: Vec<i64> = state.images.iter().map(|img| img.id).collect();
        assert_eq!(ids, vec![7, 9]);
        assert_eq!(state.total, 2);
        assert_eq!(state.page, 1);
        assert!(!state.pagination_enabled());
        assert_eq!(state.change_page(2), None);
        assert_eq!(state.page, 1);
    }

    #[test]
    fn clearing_search_resumes_listing_at_page_one() {
        let mut state = GalleryState::default();
        state.mount();
        state.set_query("pig");
        state.submit_search();
        state.apply(GalleryLoaded::Search(vec![image(7, "pig")]));

        assert_eq!(
            state.clear_search(),
            Some(GalleryFetch::Page { page: 1, limit: 20 })
        );
        assert!(state.pagination_enabled());
        assert!(state.search_query.is_empty());
        assert_eq!(state.clear_search(), None);
    }

    #[test]
    fn blank_submit_only_clears_active_search() {
        let mut state = GalleryState::default();
        state.mount();
        state.set_query("   ");
        assert_eq!(state.submit_search(), None);

        state.set_query("pig");
        state.submit_search();
        state.set_query("");
        assert_eq!(
            state.submit_search(),
            Some(GalleryFetch::Page { page: 1, limit: 20 })
        );
    }

    #[test]
    fn failure_keeps_previous_images() {
        let mut state = GalleryState::default();
        state.mount();
        state.apply(loaded_page(&[1], 1));
        state.change_page(2);
        state.fail();
        assert!(!state.loading);
        assert_eq!(state.images.len(), 1);
    }
}
