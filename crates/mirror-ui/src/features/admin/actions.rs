//! API calls backing the admin dashboard.

use crate::features::admin::forms::{FormError, RenameForm, UploadForm};
use crate::features::admin::state::{AdminEffect, AdminFetch};
use crate::services::api::{ApiClient, ApiError};
use crate::services::http::Transport;
use mirror_api_models::{CrawlLog, Image};
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

/// Data returned for an [`AdminFetch`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AdminLoaded {
    /// Crawl logs.
    Logs(Vec<CrawlLog>),
    /// Images for the management table.
    Images(Vec<Image>),
}

/// Failure of an admin mutation.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AdminError {
    /// Rejected locally; no request was sent.
    #[error(transparent)]
    Form(#[from] FormError),
    /// Rejected by the server or the network.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Execute an admin fetch.
///
/// # Errors
/// Propagates the client's [`ApiError`].
pub async fn load<T: Transport>(
    client: &ApiClient<T>,
    fetch: AdminFetch,
) -> Result<AdminLoaded, ApiError> {
    match fetch {
        AdminFetch::Logs => client.list_logs().await.map(AdminLoaded::Logs),
        AdminFetch::Images { limit } => client
            .list_images(1, limit)
            .await
            .map(|page| AdminLoaded::Images(page.data)),
    }
}

/// Failure toast text for an admin fetch.
#[must_use]
pub fn load_failure_message(fetch: AdminFetch, err: &ApiError) -> String {
    match fetch {
        AdminFetch::Logs => format!("Failed to fetch logs: {err}"),
        AdminFetch::Images { .. } => format!("Failed to fetch images: {err}"),
    }
}

/// Progress of a crawl trigger, reported in order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CrawlStep {
    /// The backend accepted the job.
    Accepted,
    /// The trigger failed; nothing follows.
    Rejected(ApiError),
    /// The delayed logs re-fetch is about to start.
    Refreshing,
    /// The delayed logs re-fetch finished.
    Refreshed(Result<Vec<CrawlLog>, ApiError>),
}

/// Trigger a crawl, then re-fetch the logs once after the delay the caller
/// schedules in reply to [`CrawlStep::Accepted`].
///
/// `report` sees every step; its return value is only read for `Accepted`.
/// A rejected trigger never sleeps or refreshes.
pub async fn crawl_and_refresh<T, S, F>(
    client: &ApiClient<T>,
    sleep: S,
    mut report: impl FnMut(CrawlStep) -> Option<AdminEffect>,
) where
    T: Transport,
    S: FnOnce(Duration) -> F,
    F: Future<Output = ()>,
{
    if let Err(err) = client.trigger_crawl().await {
        tracing::warn!(error = %err, "crawl trigger failed");
        report(CrawlStep::Rejected(err));
        return;
    }
    tracing::info!("crawl started");
    let Some(AdminEffect::RefreshLogsAfter(delay)) = report(CrawlStep::Accepted) else {
        return;
    };
    sleep(delay).await;
    report(CrawlStep::Refreshing);
    report(CrawlStep::Refreshed(client.list_logs().await));
}

/// Upload the form contents after validating them.
///
/// # Errors
/// Returns [`AdminError::Form`] without any request when a field is missing,
/// otherwise the client's error.
pub async fn submit_upload<T: Transport>(
    client: &ApiClient<T>,
    form: &UploadForm,
) -> Result<(), AdminError> {
    let upload = form.validate()?;
    tracing::info!(title = %upload.title, file = %upload.file_name, "uploading image");
    client.upload_image(upload).await?;
    Ok(())
}

/// Rename the image in the form after validating the new title.
///
/// # Errors
/// Returns [`AdminError::Form`] without any request for a blank title,
/// otherwise the client's error.
pub async fn submit_rename<T: Transport>(
    client: &ApiClient<T>,
    form: &RenameForm,
) -> Result<(), AdminError> {
    let title = form.validate()?;
    tracing::info!(id = form.id, %title, "renaming image");
    client.rename_image(form.id, &title).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::auth::MemoryTokenStore;
    use crate::features::admin::forms::SelectedFile;
    use crate::features::admin::state::AdminState;
    use crate::services::http::HttpMethod;
    use crate::test_support::{RecordingTransport, client, image, image_page_json, logs_json};
    use std::cell::RefCell;

    /// Apply crawl steps the way the dashboard does.
    fn apply(state: &mut AdminState, step: CrawlStep) -> Option<AdminEffect> {
        match step {
            CrawlStep::Accepted => return Some(state.crawl_accepted()),
            CrawlStep::Rejected(_) => state.crawl_failed(),
            CrawlStep::Refreshing => {
                state.refresh_logs();
            }
            CrawlStep::Refreshed(Ok(logs)) => state.logs_loaded(logs),
            CrawlStep::Refreshed(Err(_)) => state.fetch_failed(AdminFetch::Logs),
        }
        None
    }

    #[tokio::test]
    async fn crawl_refreshes_logs_once_after_the_delay() {
        let transport = RecordingTransport::default();
        transport.respond(200, r#"{"message": "Crawl started"}"#);
        transport.respond(200, logs_json());
        let client = client(&transport, &MemoryTokenStore::with_token("t"));
        let mut state = AdminState::default();
        let slept = RefCell::new(Vec::new());

        assert!(state.begin_crawl());
        crawl_and_refresh(
            &client,
            |delay| {
                slept.borrow_mut().push((delay, transport.requests().len()));
                std::future::ready(())
            },
            |step| apply(&mut state, step),
        )
        .await;

        assert_eq!(*slept.borrow(), vec![(Duration::from_secs(2), 1)]);
        let requests = transport.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].method, HttpMethod::Post);
        assert_eq!(requests[0].url, "http://api.test/api/crawl");
        assert_eq!(requests[1].method, HttpMethod::Get);
        assert_eq!(requests[1].url, "http://api.test/api/logs");
        assert_eq!(state.logs.len(), 2);
        assert!(!state.crawl_busy);
        assert!(!state.logs_loading);
    }

    #[tokio::test]
    async fn rejected_crawl_never_refreshes() {
        let transport = RecordingTransport::default();
        transport.respond(500, r#"{"detail": "crawler offline"}"#);
        let client = client(&transport, &MemoryTokenStore::with_token("t"));
        let mut state = AdminState::default();
        let slept = RefCell::new(Vec::new());
        let mut steps = Vec::new();

        assert!(state.begin_crawl());
        crawl_and_refresh(
            &client,
            |delay| {
                slept.borrow_mut().push(delay);
                std::future::ready(())
            },
            |step| {
                steps.push(step.clone());
                apply(&mut state, step)
            },
        )
        .await;

        assert!(slept.borrow().is_empty());
        assert_eq!(transport.requests().len(), 1);
        assert_eq!(
            steps,
            vec![CrawlStep::Rejected(ApiError::Status {
                status: 500,
                detail: Some("crawler offline".into()),
            })]
        );
        assert!(!state.crawl_busy);
        assert!(!state.logs_loading);
    }

    #[tokio::test]
    async fn delete_then_refetch_drops_the_image() {
        let transport = RecordingTransport::default();
        transport.respond(200, "null");
        transport.respond(200, image_page_json(&[image(4, "a"), image(6, "b")], 2));
        let client = client(&transport, &MemoryTokenStore::with_token("t"));
        let mut state = AdminState::default();
        state.images_loaded(vec![image(4, "a"), image(5, "gone"), image(6, "b")]);

        client.delete_image(5).await.expect("delete");
        let fetch = state.delete_confirmed();
        let AdminLoaded::Images(images) = load(&client, fetch).await.expect("images") else {
            panic!("expected images");
        };
        state.images_loaded(images);

        let requests = transport.requests();
        assert_eq!(requests[0].method, HttpMethod::Delete);
        assert_eq!(requests[0].url, "http://api.test/api/images/5");
        assert_eq!(requests[1].url, "http://api.test/api/images?page=1&limit=100");
        assert!(state.images.iter().all(|img| img.id != 5));
    }

    #[tokio::test]
    async fn upload_without_title_sends_nothing() {
        let transport = RecordingTransport::default();
        let client = client(&transport, &MemoryTokenStore::with_token("t"));
        let form = UploadForm {
            title: String::new(),
            file: Some(SelectedFile {
                name: "a.gif".into(),
                content_type: None,
                bytes: vec![1],
            }),
        };

        let err = submit_upload(&client, &form).await.expect_err("invalid");
        assert_eq!(err, AdminError::Form(FormError::Missing("title")));
        assert_eq!(err.to_string(), "title is required");
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn rename_submits_trimmed_title() {
        let transport = RecordingTransport::default();
        transport.respond(200, "{}");
        let client = client(&transport, &MemoryTokenStore::with_token("t"));
        let mut form = RenameForm::for_image(&image(8, "old"));
        form.title = "  fresh ".into();

        submit_rename(&client, &form).await.expect("rename");
        let request = &transport.requests()[0];
        assert_eq!(request.method, HttpMethod::Put);
        assert_eq!(request.url, "http://api.test/api/images/8/rename");
    }

    #[tokio::test]
    async fn server_rejection_surfaces_as_api_error() {
        let transport = RecordingTransport::default();
        transport.respond(400, r#"{"detail": "Invalid file type"}"#);
        let client = client(&transport, &MemoryTokenStore::with_token("t"));
        let form = UploadForm {
            title: "x".into(),
            file: Some(SelectedFile {
                name: "a.txt".into(),
                content_type: Some("text/plain".into()),
                bytes: vec![1],
            }),
        };

        let err = submit_upload(&client, &form).await.expect_err("rejected");
        assert_eq!(
            err.to_string(),
            "request failed with status 400: Invalid file type"
        );
        assert_eq!(
            load_failure_message(AdminFetch::Logs, &ApiError::Unauthorized),
            "Failed to fetch logs: session expired, please log in again"
        );
    }
}
