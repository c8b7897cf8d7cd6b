//! Boot-time configuration for the UI.
//!
//! # Design
//! - Resolve once at startup from build-time variables and the page origin.
//! - Keep resolution pure so the fallbacks are testable without a browser.

use std::time::Duration;

/// Backend address used when nothing else is configured.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
/// Images per gallery page.
pub const GALLERY_PAGE_SIZE: u32 = 20;
/// Images fetched for the admin table.
pub const ADMIN_PAGE_SIZE: u32 = 100;
/// Delay before logs are re-fetched after a crawl is triggered.
pub const CRAWL_REFRESH_DELAY: Duration = Duration::from_millis(2_000);

/// Port used by `trunk serve` during development.
const DEV_SERVER_PORT: &str = "8080";
/// Port the backend listens on during development.
const DEV_BACKEND_PORT: &str = "8000";

/// Resolved UI configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UiConfig {
    /// Base URL for API, token and image requests, without a trailing slash.
    pub api_base_url: String,
    /// Tracing level directive for the console subscriber.
    pub log_level: String,
    /// Images per gallery page.
    pub gallery_page_size: u32,
    /// Images fetched for the admin table.
    pub admin_page_size: u32,
    /// Delay before logs are re-fetched after a crawl starts.
    pub crawl_refresh_delay: Duration,
}

impl UiConfig {
    /// Resolve configuration from explicit sources.
    ///
    /// `configured_url` and `configured_level` come from build-time variables;
    /// `origin` is the serving page's origin when running in a browser.
    #[must_use]
    pub fn resolve(
        configured_url: Option<&str>,
        origin: Option<&str>,
        configured_level: Option<&str>,
    ) -> Self {
        Self {
            api_base_url: resolve_api_base_url(configured_url, origin),
            log_level: resolve_log_level(configured_level),
            gallery_page_size: GALLERY_PAGE_SIZE,
            admin_page_size: ADMIN_PAGE_SIZE,
            crawl_refresh_delay: CRAWL_REFRESH_DELAY,
        }
    }

    /// Resolve configuration from `MIRROR_API_URL` / `MIRROR_LOG_LEVEL`
    /// captured at build time plus the runtime origin.
    #[must_use]
    pub fn from_build_env(origin: Option<&str>) -> Self {
        Self::resolve(
            option_env!("MIRROR_API_URL"),
            origin,
            option_env!("MIRROR_LOG_LEVEL"),
        )
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self::resolve(None, None, None)
    }
}

/// Pick the API base URL: explicit configuration, then the page origin (with
/// the dev server port mapped to the backend port), then the default.
#[must_use]
pub fn resolve_api_base_url(configured: Option<&str>, origin: Option<&str>) -> String {
    if let Some(url) = configured.map(str::trim).filter(|url| !url.is_empty()) {
        return url.trim_end_matches('/').to_string();
    }
    let Some(origin) = origin
        .map(str::trim)
        .filter(|origin| origin.starts_with("http://") || origin.starts_with("https://"))
    else {
        return DEFAULT_API_BASE_URL.to_string();
    };
    let origin = origin.trim_end_matches('/');
    match origin.rsplit_once(':') {
        Some((host, port)) if port == DEV_SERVER_PORT => format!("{host}:{DEV_BACKEND_PORT}"),
        _ => origin.to_string(),
    }
}

fn resolve_log_level(configured: Option<&str>) -> String {
    configured
        .map(str::trim)
        .filter(|level| !level.is_empty())
        .map_or_else(
            || {
                if cfg!(debug_assertions) {
                    "debug".to_string()
                } else {
                    "info".to_string()
                }
            },
            str::to_string,
        )
}
