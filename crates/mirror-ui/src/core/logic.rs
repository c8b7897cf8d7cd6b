//! Pure UI helpers extracted from components for non-wasm testing.

use chrono::{FixedOffset, NaiveDate, Offset, Utc};
use mirror_api_models::{CrawlStatus, parse_timestamp};

/// Color tone used for crawl status tags.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusTone {
    /// Finished successfully.
    Green,
    /// Still running.
    Blue,
    /// Anything else.
    Red,
}

impl StatusTone {
    /// CSS modifier class for the tone.
    #[must_use]
    pub const fn class(self) -> &'static str {
        match self {
            Self::Green => "tag-green",
            Self::Blue => "tag-blue",
            Self::Red => "tag-red",
        }
    }
}

/// Map a crawl status to its display tone.
#[must_use]
pub const fn status_tone(status: &CrawlStatus) -> StatusTone {
    match status {
        CrawlStatus::Success => StatusTone::Green,
        CrawlStatus::Running => StatusTone::Blue,
        CrawlStatus::Other(_) => StatusTone::Red,
    }
}

/// URL of a mirrored asset served under `/images`.
#[must_use]
pub fn image_url(base_url: &str, local_path: &str) -> String {
    format!(
        "{}/images/{}",
        base_url.trim_end_matches('/'),
        local_path.trim_start_matches('/')
    )
}

/// Whether `url` is served from `origin`; relative URLs always are.
///
/// Browsers ignore the `download` attribute on cross-origin links.
#[must_use]
pub fn is_same_origin(origin: Option<&str>, url: &str) -> bool {
    if url.starts_with('/') && !url.starts_with("//") {
        return true;
    }
    let Some(origin) = origin.map(|origin| origin.trim_end_matches('/')) else {
        return false;
    };
    url.strip_prefix(origin)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with(['/', '?', '#']))
}

/// Convert a JavaScript `getTimezoneOffset()` value (minutes behind UTC)
/// into the matching UTC offset.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn offset_from_js_minutes(minutes: f64) -> FixedOffset {
    if !minutes.is_finite() {
        return Utc.fix();
    }
    let seconds = (-minutes * 60.0).round() as i32;
    FixedOffset::east_opt(seconds).unwrap_or_else(|| Utc.fix())
}

/// Date label for an image card.
#[must_use]
pub fn format_date(date: Option<NaiveDate>) -> String {
    date.map_or_else(|| "-".to_string(), |date| date.format("%Y-%m-%d").to_string())
}

/// Timestamp label for log tables at the viewer's `offset`; unparseable
/// values are shown verbatim.
#[must_use]
pub fn format_timestamp(raw: &str, offset: FixedOffset) -> String {
    parse_timestamp(raw, offset).map_or_else(
        || raw.to_string(),
        |ts| ts.format("%Y-%m-%d %H:%M:%S").to_string(),
    )
}

/// Number of pages needed for `total` items.
#[must_use]
pub const fn page_count(total: u64, page_size: u32) -> u32 {
    if page_size == 0 || total == 0 {
        return 1;
    }
    let pages = total.div_ceil(page_size as u64);
    if pages > u32::MAX as u64 {
        u32::MAX
    } else {
        pages as u32
    }
}

/// Entry in a rendered pagination bar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageItem {
    /// A clickable page number.
    Page(u32),
    /// Collapsed run of pages.
    Gap,
}

/// Page numbers to render around `current`, keeping the first and last page
/// visible and collapsing the rest.
#[must_use]
pub fn page_window(current: u32, pages: u32, span: u32) -> Vec<PageItem> {
    let pages = pages.max(1);
    let current = current.clamp(1, pages);
    let start = current.saturating_sub(span).max(1);
    let end = current.saturating_add(span).min(pages);
    let mut items = Vec::new();
    if start > 1 {
        items.push(PageItem::Page(1));
        if start > 2 {
            items.push(PageItem::Gap);
        }
    }
    items.extend((start..=end).map(PageItem::Page));
    if end < pages {
        if end + 1 < pages {
            items.push(PageItem::Gap);
        }
        items.push(PageItem::Page(pages));
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_tones_follow_labels() {
        assert_eq!(status_tone(&CrawlStatus::Success), StatusTone::Green);
        assert_eq!(status_tone(&CrawlStatus::Running), StatusTone::Blue);
        assert_eq!(
            status_tone(&CrawlStatus::Other("failed".into())),
            StatusTone::Red
        );
        assert_eq!(StatusTone::Red.class(), "tag-red");
    }

    #[test]
    fn image_url_joins_without_double_slashes() {
        assert_eq!(
            image_url("http://localhost:8000/", "/2024/01/a.gif"),
            "http://localhost:8000/images/2024/01/a.gif"
        );
        assert_eq!(
            image_url("http://localhost:8000", "a.gif"),
            "http://localhost:8000/images/a.gif"
        );
    }

    #[test]
    fn timestamps_format_or_pass_through() {
        let utc = Utc.fix();
        assert_eq!(
            format_timestamp("2024-05-01T10:11:12.345678", utc),
            "2024-05-01 10:11:12"
        );
        assert_eq!(format_timestamp("yesterday", utc), "yesterday");
        assert_eq!(format_date(None), "-");
        assert_eq!(
            format_date(NaiveDate::from_ymd_opt(2024, 2, 29)),
            "2024-02-29"
        );
    }

    #[test]
    fn timestamps_render_in_the_viewer_zone() {
        let shanghai = offset_from_js_minutes(-480.0);
        assert_eq!(shanghai, FixedOffset::east_opt(8 * 3600).expect("offset"));
        assert_eq!(
            format_timestamp("2024-04-30T18:30:00Z", shanghai),
            "2024-05-01 02:30:00"
        );
        let new_york = offset_from_js_minutes(300.0);
        assert_eq!(
            format_timestamp("2024-05-01T02:00:00+08:00", new_york),
            "2024-04-30 13:00:00"
        );
        assert_eq!(offset_from_js_minutes(f64::NAN), Utc.fix());
    }

    #[test]
    fn cross_origin_assets_are_detected() {
        let origin = Some("http://localhost:8080");
        assert!(is_same_origin(origin, "http://localhost:8080/images/a.gif"));
        assert!(is_same_origin(origin, "/images/a.gif"));
        assert!(!is_same_origin(origin, "http://localhost:8000/images/a.gif"));
        assert!(!is_same_origin(origin, "http://localhost:80800/images/a.gif"));
        assert!(!is_same_origin(origin, "//cdn.example/images/a.gif"));
        assert!(!is_same_origin(None, "http://localhost:8080/images/a.gif"));
    }

    #[test]
    fn page_count_rounds_up() {
        assert_eq!(page_count(0, 20), 1);
        assert_eq!(page_count(20, 20), 1);
        assert_eq!(page_count(21, 20), 2);
        assert_eq!(page_count(5, 0), 1);
    }

    #[test]
    fn page_window_collapses_distant_pages() {
        assert_eq!(
            page_window(1, 3, 2),
            vec![PageItem::Page(1), PageItem::Page(2), PageItem::Page(3)]
        );
        assert_eq!(
            page_window(10, 20, 1),
            vec![
                PageItem::Page(1),
                PageItem::Gap,
                PageItem::Page(9),
                PageItem::Page(10),
                PageItem::Page(11),
                PageItem::Gap,
                PageItem::Page(20),
            ]
        );
        assert_eq!(
            page_window(2, 4, 1),
            vec![
                PageItem::Page(1),
                PageItem::Page(2),
                PageItem::Page(3),
                PageItem::Page(4),
            ]
        );
    }
}
