//! Shared fixtures and a scripted transport for unit tests.

use crate::core::auth::MemoryTokenStore;
use crate::services::api::ApiClient;
use crate::services::http::{HttpRequest, HttpResponse, Transport, TransportError};
use async_trait::async_trait;
use mirror_api_models::{CrawlLog, CrawlStatus, Image, ImagePage};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// Transport that records requests and replays scripted responses in order.
#[derive(Clone, Default)]
pub(crate) struct RecordingTransport {
    requests: Rc<RefCell<Vec<HttpRequest>>>,
    responses: Rc<RefCell<VecDeque<Result<HttpResponse, TransportError>>>>,
}

impl RecordingTransport {
    pub(crate) fn respond(&self, status: u16, body: impl Into<String>) {
        self.responses
            .borrow_mut()
            .push_back(Ok(HttpResponse::new(status, body)));
    }

    pub(crate) fn fail(&self, message: &str) {
        self.responses
            .borrow_mut()
            .push_back(Err(TransportError(message.to_string())));
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }
}

#[async_trait(?Send)]
impl Transport for RecordingTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.borrow_mut().push(request);
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError("no scripted response".to_string())))
    }
}

pub(crate) fn client(
    transport: &RecordingTransport,
    tokens: &MemoryTokenStore,
) -> ApiClient<RecordingTransport> {
    ApiClient::new("http://api.test", transport.clone(), Rc::new(tokens.clone()))
}

pub(crate) fn image(id: i64, title: &str) -> Image {
    Image {
        id,
        remote_id: id + 1000,
        title: title.to_string(),
        view_count: 10,
        download_count: 1,
        thumbnail_url: format!("https://upstream.example/t/{id}.jpg"),
        local_path: format!("2024/{id}.gif"),
        filename: format!("{id}.gif"),
        duration: String::new(),
        image_type: "gif".to_string(),
        mtime: 1_704_067_200,
        created_at: "2024-01-01T00:00:00".to_string(),
    }
}

pub(crate) fn image_page_json(images: &[Image], total: u64) -> String {
    serde_json::to_string(&ImagePage {
        data: images.to_vec(),
        total,
        page: None,
        limit: None,
    })
    .unwrap_or_default()
}

pub(crate) fn images_json(images: &[Image]) -> String {
    serde_json::to_string(images).unwrap_or_default()
}

pub(crate) fn crawl_log(id: i64, status: CrawlStatus) -> CrawlLog {
    CrawlLog {
        id,
        status,
        images_found: 4,
        images_downloaded: 3,
        error_message: None,
        source_id: None,
        created_at: "2024-05-01T10:00:00".to_string(),
    }
}

pub(crate) fn logs_json() -> String {
    serde_json::to_string(&vec![
        crawl_log(2, CrawlStatus::Running),
        crawl_log(1, CrawlStatus::Success),
    ])
    .unwrap_or_default()
}
