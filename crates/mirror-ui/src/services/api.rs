//! HTTP client for the mirror REST API.
//!
//! # Design
//! - Create exactly one client per app boot and share it by `Rc`.
//! - Read the bearer token from the token store on every request.
//! - A 401 from any endpoint clears the token and fires the unauthorized
//!   hook; every other failure is returned to the call site.

use crate::core::auth::{TokenStore, bearer_value};
use crate::core::logic::image_url;
use crate::services::http::{
    HttpMethod, HttpRequest, HttpResponse, MultipartPart, RequestBody, Transport,
};
use mirror_api_models::{CrawlLog, Image, ImagePage, ProblemDetail, RenameRequest, TokenResponse};
use serde::de::DeserializeOwned;
use std::rc::Rc;
use thiserror::Error;

/// Errors surfaced by API calls.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),
    /// The server rejected the session; the token has been cleared.
    #[error("session expired, please log in again")]
    Unauthorized,
    /// Any other non-2xx response.
    #[error("request failed with status {status}{}", detail_suffix(.detail))]
    Status {
        /// HTTP status code.
        status: u16,
        /// Server-provided detail message, when present.
        detail: Option<String>,
    },
    /// A 2xx response whose body did not match the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),
}

fn detail_suffix(detail: &Option<String>) -> String {
    detail
        .as_deref()
        .map(|detail| format!(": {detail}"))
        .unwrap_or_default()
}

/// Validated image upload payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageUpload {
    /// Title for the new image.
    pub title: String,
    /// Original file name.
    pub file_name: String,
    /// MIME type reported by the browser, when known.
    pub content_type: Option<String>,
    /// File contents.
    pub bytes: Vec<u8>,
}

/// Mirror API client over a pluggable transport.
pub struct ApiClient<T> {
    base_url: String,
    transport: T,
    tokens: Rc<dyn TokenStore>,
    on_unauthorized: Option<Rc<dyn Fn()>>,
}

impl<T: Transport> ApiClient<T> {
    /// Create a client for `base_url` reading tokens from `tokens`.
    pub fn new(base_url: impl Into<String>, transport: T, tokens: Rc<dyn TokenStore>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            transport,
            tokens,
            on_unauthorized: None,
        }
    }

    /// Install the hook run after a 401 has cleared the token.
    #[must_use]
    pub fn with_unauthorized_hook(mut self, hook: impl Fn() + 'static) -> Self {
        self.on_unauthorized = Some(Rc::new(hook));
        self
    }

    /// Configured base URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Token store used for outgoing requests.
    #[must_use]
    pub fn tokens(&self) -> &Rc<dyn TokenStore> {
        &self.tokens
    }

    /// Public URL of a mirrored asset.
    #[must_use]
    pub fn image_url(&self, local_path: &str) -> String {
        image_url(&self.base_url, local_path)
    }

    /// Fetch one page of images.
    ///
    /// # Errors
    /// Returns [`ApiError`] on transport, status or decode failure.
    pub async fn list_images(&self, page: u32, limit: u32) -> Result<ImagePage, ApiError> {
        self.get_json(&format!("/api/images?page={page}&limit={limit}"))
            .await
    }

    /// Search images by title substring.
    ///
    /// # Errors
    /// Returns [`ApiError`] on transport, status or decode failure.
    pub async fn search_images(&self, query: &str) -> Result<Vec<Image>, ApiError> {
        self.get_json(&format!("/api/search?q={}", urlencoding::encode(query)))
            .await
    }

    /// Fetch crawl job logs.
    ///
    /// # Errors
    /// Returns [`ApiError`] on transport, status or decode failure.
    pub async fn list_logs(&self) -> Result<Vec<CrawlLog>, ApiError> {
        self.get_json("/api/logs").await
    }

    /// Ask the backend to start a crawl; the job runs asynchronously.
    ///
    /// # Errors
    /// Returns [`ApiError`] on transport or status failure.
    pub async fn trigger_crawl(&self) -> Result<(), ApiError> {
        self.execute(HttpRequest::new(HttpMethod::Post, self.url("/api/crawl")))
            .await?;
        Ok(())
    }

    /// Delete an image by id.
    ///
    /// # Errors
    /// Returns [`ApiError`] on transport or status failure.
    pub async fn delete_image(&self, id: i64) -> Result<(), ApiError> {
        self.execute(HttpRequest::new(
            HttpMethod::Delete,
            self.url(&format!("/api/images/{id}")),
        ))
        .await?;
        Ok(())
    }

    /// Rename an image.
    ///
    /// # Errors
    /// Returns [`ApiError`] on transport or status failure.
    pub async fn rename_image(&self, id: i64, title: &str) -> Result<(), ApiError> {
        let body = serde_json::to_string(&RenameRequest {
            title: title.to_string(),
        })
        .map_err(|err| ApiError::Decode(err.to_string()))?;
        let request = HttpRequest::new(
            HttpMethod::Put,
            self.url(&format!("/api/images/{id}/rename")),
        )
        .with_body(RequestBody::Json(body));
        self.execute(request).await?;
        Ok(())
    }

    /// Upload a new image as `multipart/form-data` with `file` and `title`.
    ///
    /// # Errors
    /// Returns [`ApiError`] on transport or status failure.
    pub async fn upload_image(&self, upload: ImageUpload) -> Result<(), ApiError> {
        let parts = vec![
            MultipartPart::File {
                name: "file".to_string(),
                file_name: upload.file_name,
                content_type: upload.content_type,
                bytes: upload.bytes,
            },
            MultipartPart::Text {
                name: "title".to_string(),
                value: upload.title,
            },
        ];
        let request = HttpRequest::new(HttpMethod::Post, self.url("/api/upload"))
            .with_body(RequestBody::Multipart(parts));
        self.execute(request).await?;
        Ok(())
    }

    /// Exchange credentials for a bearer token.
    ///
    /// # Errors
    /// Returns [`ApiError`] on transport, status or decode failure.
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenResponse, ApiError> {
        let request = HttpRequest::new(HttpMethod::Post, self.url("/token")).with_body(
            RequestBody::Form(vec![
                ("username".to_string(), username.to_string()),
                ("password".to_string(), password.to_string()),
            ]),
        );
        let response = self.execute(request).await?;
        decode(&response)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        let response = self
            .execute(HttpRequest::new(HttpMethod::Get, self.url(path)))
            .await?;
        decode(&response)
    }

    async fn execute(&self, mut request: HttpRequest) -> Result<HttpResponse, ApiError> {
        if let Some(token) = self.tokens.token() {
            request = request.with_header("Authorization", bearer_value(&token));
        }
        let method = request.method;
        let url = request.url.clone();
        tracing::debug!(%method, %url, "api request");

        let response = self.transport.send(request).await.map_err(|err| {
            tracing::warn!(%method, %url, error = %err, "api request failed to complete");
            ApiError::Network(err.0)
        })?;

        if response.status == 401 {
            tracing::warn!(%method, %url, "api rejected session; clearing token");
            self.tokens.clear();
            if let Some(hook) = &self.on_unauthorized {
                hook();
            }
            return Err(ApiError::Unauthorized);
        }
        if !response.is_success() {
            tracing::warn!(%method, %url, status = response.status, "api request failed");
            return Err(ApiError::Status {
                status: response.status,
                detail: problem_detail(&response.body),
            });
        }
        Ok(response)
    }
}

fn decode<R: DeserializeOwned>(response: &HttpResponse) -> Result<R, ApiError> {
    serde_json::from_str(&response.body).map_err(|err| ApiError::Decode(err.to_string()))
}

fn problem_detail(body: &str) -> Option<String> {
    serde_json::from_str::<ProblemDetail>(body)
        .ok()
        .map(|problem| problem.message())
        .filter(|message| !message.is_empty())
}
