//! Admin dashboard state.
//!
//! # Design
//! - Transitions return the follow-up fetch or effect instead of performing
//!   it, so the view decides how to schedule work.
//! - Dialogs are open exactly when their form is `Some`.

use crate::core::auth::normalize_token;
use crate::core::config::{ADMIN_PAGE_SIZE, CRAWL_REFRESH_DELAY};
use crate::features::admin::forms::{RenameForm, UploadForm};
use mirror_api_models::{CrawlLog, Image};
use std::time::Duration;

/// Decision taken when the admin page mounts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AdminEntry {
    /// No token: navigate to login and fetch nothing.
    RedirectToLogin,
    /// Token present: run these fetches concurrently.
    Load(Vec<AdminFetch>),
}

/// Data request issued by the admin page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdminFetch {
    /// Crawl logs.
    Logs,
    /// First page of images.
    Images {
        /// Page size.
        limit: u32,
    },
}

/// Deferred work scheduled by a transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdminEffect {
    /// Re-fetch logs once after the delay.
    RefreshLogsAfter(Duration),
}

/// Tabs of the admin dashboard.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AdminTab {
    /// Crawl log table.
    #[default]
    Logs,
    /// Image management table.
    Images,
}

/// Admin page state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdminState {
    /// Selected tab.
    pub tab: AdminTab,
    /// Crawl logs, newest first as served.
    pub logs: Vec<CrawlLog>,
    /// Images shown in the management table.
    pub images: Vec<Image>,
    /// Logs fetch in flight.
    pub logs_loading: bool,
    /// Images fetch in flight.
    pub images_loading: bool,
    /// Crawl trigger in flight.
    pub crawl_busy: bool,
    /// Upload dialog form; `Some` while the dialog is open.
    pub upload: Option<UploadForm>,
    /// Rename dialog form; `Some` while the dialog is open.
    pub rename: Option<RenameForm>,
    /// Upload or rename submission in flight.
    pub submitting: bool,
    /// Validation message shown inside the open dialog.
    pub dialog_error: Option<String>,
    /// Images fetched for the table.
    pub page_size: u32,
    /// Delay before logs are re-fetched after a crawl starts.
    pub crawl_refresh_delay: Duration,
}

impl Default for AdminState {
    fn default() -> Self {
        Self {
            tab: AdminTab::default(),
            logs: Vec::new(),
            images: Vec::new(),
            logs_loading: false,
            images_loading: false,
            crawl_busy: false,
            upload: None,
            rename: None,
            submitting: false,
            dialog_error: None,
            page_size: ADMIN_PAGE_SIZE,
            crawl_refresh_delay: CRAWL_REFRESH_DELAY,
        }
    }
}

impl AdminState {
    /// Guard the page on `token` and request the initial data.
    pub fn enter(&mut self, token: Option<&str>) -> AdminEntry {
        if normalize_token(token).is_none() {
            return AdminEntry::RedirectToLogin;
        }
        self.logs_loading = true;
        self.images_loading = true;
        AdminEntry::Load(vec![AdminFetch::Logs, self.images_fetch()])
    }

    /// Request a manual logs refresh.
    pub const fn refresh_logs(&mut self) -> AdminFetch {
        self.logs_loading = true;
        AdminFetch::Logs
    }

    /// Store fetched logs.
    pub fn logs_loaded(&mut self, logs: Vec<CrawlLog>) {
        self.logs = logs;
        self.logs_loading = false;
    }

    /// Store fetched images.
    pub fn images_loaded(&mut self, images: Vec<Image>) {
        self.images = images;
        self.images_loading = false;
    }

    /// Clear the loading flag for a failed fetch.
    pub const fn fetch_failed(&mut self, fetch: AdminFetch) {
        match fetch {
            AdminFetch::Logs => self.logs_loading = false,
            AdminFetch::Images { .. } => self.images_loading = false,
        }
    }

    /// Mark a crawl trigger as in flight; `false` if one already is.
    pub const fn begin_crawl(&mut self) -> bool {
        if self.crawl_busy {
            return false;
        }
        self.crawl_busy = true;
        true
    }

    /// The backend accepted the crawl; schedule the single logs refresh.
    pub const fn crawl_accepted(&mut self) -> AdminEffect {
        self.crawl_busy = false;
        AdminEffect::RefreshLogsAfter(self.crawl_refresh_delay)
    }

    /// The crawl trigger failed.
    pub const fn crawl_failed(&mut self) {
        self.crawl_busy = false;
    }

    /// The server confirmed a delete; re-read the image list.
    pub const fn delete_confirmed(&mut self) -> AdminFetch {
        self.images_loading = true;
        self.images_fetch()
    }

    /// Open the upload dialog with an empty form.
    pub fn open_upload(&mut self) {
        self.upload = Some(UploadForm::default());
        self.dialog_error = None;
    }

    /// Open the rename dialog for `image`.
    pub fn open_rename(&mut self, image: &Image) {
        self.rename = Some(RenameForm::for_image(image));
        self.dialog_error = None;
    }

    /// Close both dialogs, discarding their inputs.
    pub fn close_dialogs(&mut self) {
        self.upload = None;
        self.rename = None;
        self.submitting = false;
        self.dialog_error = None;
    }

    /// Mark a dialog submission as in flight; `false` if one already is.
    pub fn begin_submission(&mut self) -> bool {
        if self.submitting {
            return false;
        }
        self.submitting = true;
        self.dialog_error = None;
        true
    }

    /// Upload or rename accepted: close and reset the dialog, re-read images.
    pub fn submission_succeeded(&mut self) -> AdminFetch {
        self.close_dialogs();
        self.images_loading = true;
        self.images_fetch()
    }

    /// Upload or rename failed: keep the dialog open for correction, showing
    /// `message` inside it when the failure was a local validation error.
    pub fn submission_failed(&mut self, message: Option<String>) {
        self.submitting = false;
        self.dialog_error = message;
    }

    const fn images_fetch(&self) -> AdminFetch {
        AdminFetch::Images {
            limit: self.page_size,
        }
    }
}
