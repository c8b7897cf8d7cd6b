#![forbid(unsafe_code)]
#![deny(
    unused_must_use,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls
)]
#![warn(missing_docs, unreachable_pub)]
//! Shared HTTP DTOs for the Image Mirror API.
//!
//! The mirror backend owns every record described here; the web UI only
//! decodes them for display and encodes the few request bodies it sends.
//! Field names follow the wire format exactly so serde needs no renames
//! beyond the token alias.

use std::fmt::{self, Display, Formatter};

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A mirrored media asset with its metadata and storage locators.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Image {
    /// Local primary key.
    pub id: i64,
    /// Identifier of the asset on the mirrored upstream site.
    pub remote_id: i64,
    /// Display title.
    pub title: String,
    /// Upstream view counter at crawl time.
    pub view_count: u64,
    /// Upstream download counter at crawl time.
    pub download_count: u64,
    /// Upstream thumbnail URL.
    pub thumbnail_url: String,
    /// Path of the mirrored file relative to the `/images` mount.
    pub local_path: String,
    /// Original file name.
    pub filename: String,
    /// Duration label for animated assets (empty for stills).
    pub duration: String,
    /// Media type label (for example `gif` or `jpg`).
    pub image_type: String,
    /// Upstream modification time, unix seconds.
    pub mtime: i64,
    /// Creation timestamp of the local record, ISO-8601 text.
    pub created_at: String,
}

impl Image {
    /// Calendar date of the upstream modification time as seen at `offset`.
    #[must_use]
    pub fn mtime_date(&self, offset: FixedOffset) -> Option<NaiveDate> {
        DateTime::from_timestamp(self.mtime, 0).map(|ts| ts.with_timezone(&offset).date_naive())
    }

    /// Name to use when saving the asset locally.
    #[must_use]
    pub fn download_name(&self) -> &str {
        if !self.filename.trim().is_empty() {
            return &self.filename;
        }
        self.local_path
            .rsplit('/')
            .find(|segment| !segment.is_empty())
            .unwrap_or(self.title.as_str())
    }
}

/// One page of the image listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ImagePage {
    /// Images on the requested page.
    pub data: Vec<Image>,
    /// Total number of images across all pages.
    pub total: u64,
    /// Page number echoed by the server, when provided.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Page size echoed by the server, when provided.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// Outcome reported for a crawl job.
///
/// Only `success` and `running` carry meaning for the UI; every other value is
/// preserved verbatim and treated as a failure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(from = "String", into = "String")]
pub enum CrawlStatus {
    /// Job finished without error.
    Success,
    /// Job is still in progress.
    Running,
    /// Any other status label reported by the backend.
    Other(String),
}

impl CrawlStatus {
    /// Wire label for the status.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Success => "success",
            Self::Running => "running",
            Self::Other(label) => label,
        }
    }

    /// Whether the status should be presented as a failure.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Other(_))
    }
}

impl From<String> for CrawlStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "success" => Self::Success,
            "running" => Self::Running,
            _ => Self::Other(value),
        }
    }
}

impl From<CrawlStatus> for String {
    fn from(value: CrawlStatus) -> Self {
        match value {
            CrawlStatus::Success => "success".to_string(),
            CrawlStatus::Running => "running".to_string(),
            CrawlStatus::Other(label) => label,
        }
    }
}

impl Display for CrawlStatus {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Record of one execution of the background crawl job.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CrawlLog {
    /// Log identifier.
    pub id: i64,
    /// Job status.
    pub status: CrawlStatus,
    /// Number of images discovered upstream.
    pub images_found: u32,
    /// Number of images mirrored locally.
    pub images_downloaded: u32,
    /// Failure description, when the job failed.
    #[serde(default)]
    pub error_message: Option<String>,
    /// Source the job crawled, when the backend tracks one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_id: Option<i64>,
    /// Job start timestamp, ISO-8601 text.
    pub created_at: String,
}

impl CrawlLog {
    /// Wall-clock time of `created_at` at `offset`.
    #[must_use]
    pub fn created_at_parsed(&self, offset: FixedOffset) -> Option<NaiveDateTime> {
        parse_timestamp(&self.created_at, offset)
    }
}

/// Parse an ISO-8601 timestamp into wall-clock time at `offset`.
///
/// Values carrying their own offset are converted; naive values are already
/// wall-clock time and are returned as written.
#[must_use]
pub fn parse_timestamp(value: &str, offset: FixedOffset) -> Option<NaiveDateTime> {
    let value = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&offset).naive_local());
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
}

/// Bearer token issued by the token endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenResponse {
    /// Opaque bearer credential.
    #[serde(alias = "access_token")]
    pub token: String,
    /// Token scheme reported by `OAuth2`-style servers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
}

/// Body of the rename request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RenameRequest {
    /// New display title.
    pub title: String,
}

/// Error body produced by the backend on non-2xx responses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProblemDetail {
    /// Either a message string or a list of validation entries.
    pub detail: problem::Detail,
}

impl ProblemDetail {
    /// Best-effort human-readable message.
    #[must_use]
    pub fn message(&self) -> String {
        self.detail.message()
    }
}

/// Shapes of the `detail` field.
pub mod problem {
    use serde::{Deserialize, Serialize};

    /// `detail` is a plain message or a list of validation entries.
    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
    #[serde(untagged)]
    pub enum Detail {
        /// Plain message.
        Message(String),
        /// Field validation failures.
        Invalid(Vec<InvalidField>),
    }

    /// One field validation failure.
    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
    pub struct InvalidField {
        /// Human-readable failure.
        pub msg: String,
    }

    impl Detail {
        /// Flatten into a single message.
        #[must_use]
        pub fn message(&self) -> String {
            match self {
                Self::Message(message) => message.clone(),
                Self::Invalid(fields) => fields
                    .iter()
                    .map(|field| field.msg.as_str())
                    .collect::<Vec<_>>()
                    .join("; "),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image_json() -> &'static str {
        r#"{
            "id": 7,
            "remote_id": 1201,
            "title": "pig in mud",
            "view_count": 42,
            "download_count": 3,
            "thumbnail_url": "https://upstream.example/t/1201.jpg",
            "local_path": "2024/01/1201.gif",
            "filename": "1201.gif",
            "duration": "",
            "image_type": "gif",
            "mtime": 1704067200,
            "created_at": "2024-01-02T03:04:05.123456"
        }"#
    }

    fn offset(hours: i32) -> FixedOffset {
        FixedOffset::east_opt(hours * 3600).expect("valid offset")
    }

    #[test]
    fn image_decodes_backend_payload() {
        let image: Image = serde_json::from_str(image_json()).expect("image decodes");
        assert_eq!(image.id, 7);
        assert_eq!(image.local_path, "2024/01/1201.gif");
        assert_eq!(image.mtime_date(offset(0)), NaiveDate::from_ymd_opt(2024, 1, 1));
    }

    #[test]
    fn mtime_date_follows_the_viewer_offset() {
        let mut image: Image = serde_json::from_str(image_json()).expect("image decodes");
        image.mtime = 1_704_040_200;
        assert_eq!(image.mtime_date(offset(8)), NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(image.mtime_date(offset(0)), NaiveDate::from_ymd_opt(2023, 12, 31));
        image.mtime = 1_704_067_200;
        assert_eq!(image.mtime_date(offset(-5)), NaiveDate::from_ymd_opt(2023, 12, 31));
    }

    #[test]
    fn timestamps_convert_only_when_they_carry_an_offset() {
        let expected = |raw: &str| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").ok();
        assert_eq!(
            parse_timestamp("2024-05-01T02:00:00+08:00", offset(8)),
            expected("2024-05-01 02:00:00")
        );
        assert_eq!(
            parse_timestamp("2024-05-01T02:00:00+08:00", offset(0)),
            expected("2024-04-30 18:00:00")
        );
        assert_eq!(
            parse_timestamp("2024-05-01T02:00:00", offset(-7)),
            expected("2024-05-01 02:00:00")
        );
        assert_eq!(parse_timestamp("not a date", offset(0)), None);
    }

    #[test]
    fn download_name_falls_back_to_path_segment() {
        let mut image: Image = serde_json::from_str(image_json()).expect("image decodes");
        assert_eq!(image.download_name(), "1201.gif");
        image.filename = "  ".into();
        image.local_path = "2024/01/other.png".into();
        assert_eq!(image.download_name(), "other.png");
    }

    #[test]
    fn page_tolerates_missing_echo_fields() {
        let page: ImagePage =
            serde_json::from_str(r#"{"data": [], "total": 12}"#).expect("page decodes");
        assert_eq!(page.total, 12);
        assert_eq!(page.page, None);
        let page: ImagePage =
            serde_json::from_str(r#"{"data": [], "total": 0, "page": 2, "limit": 20}"#)
                .expect("page decodes");
        assert_eq!(page.page, Some(2));
        assert_eq!(page.limit, Some(20));
    }

    #[test]
    fn crawl_status_keeps_unknown_labels() {
        let log: CrawlLog = serde_json::from_str(
            r#"{"id": 1, "status": "failed", "images_found": 10, "images_downloaded": 2,
                "error_message": "timeout", "source_id": null,
                "created_at": "2024-05-01T10:00:00Z"}"#,
        )
        .expect("log decodes");
        assert_eq!(log.status, CrawlStatus::Other("failed".into()));
        assert!(log.status.is_failure());
        assert_eq!(log.status.to_string(), "failed");
        assert!(log.created_at_parsed(offset(0)).is_some());

        let running: CrawlStatus = serde_json::from_str(r#""running""#).expect("status decodes");
        assert_eq!(running, CrawlStatus::Running);
        assert_eq!(
            serde_json::to_string(&CrawlStatus::Success).expect("encodes"),
            r#""success""#
        );
    }

    #[test]
    fn crawl_log_without_optional_fields() {
        let log: CrawlLog = serde_json::from_str(
            r#"{"id": 2, "status": "success", "images_found": 1, "images_downloaded": 1,
                "created_at": "2024-05-01 10:00:00"}"#,
        )
        .expect("log decodes");
        assert_eq!(log.error_message, None);
        assert_eq!(log.source_id, None);
        assert!(log.created_at_parsed(offset(3)).is_some());
    }

    #[test]
    fn token_accepts_both_shapes() {
        let plain: TokenResponse = serde_json::from_str(r#"{"token": "abc"}"#).expect("decodes");
        assert_eq!(plain.token, "abc");
        let oauth: TokenResponse =
            serde_json::from_str(r#"{"access_token": "xyz", "token_type": "bearer"}"#)
                .expect("decodes");
        assert_eq!(oauth.token, "xyz");
        assert_eq!(oauth.token_type.as_deref(), Some("bearer"));
    }

    #[test]
    fn problem_detail_flattens_validation_entries() {
        let plain: ProblemDetail =
            serde_json::from_str(r#"{"detail": "Image not found"}"#).expect("decodes");
        assert_eq!(plain.message(), "Image not found");
        let invalid: ProblemDetail = serde_json::from_str(
            r#"{"detail": [
                {"loc": ["body", "title"], "msg": "field required", "type": "missing"}
            ]}"#,
        )
        .expect("decodes");
        assert_eq!(invalid.message(), "field required");
    }
}
