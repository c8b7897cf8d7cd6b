//! API client context for sharing a singleton client instance.
//!
//! # Design
//! - Create exactly one API client per app boot.
//! - The 401 hook only flags the session; the router performs the redirect.

use crate::app::preferences::LocalTokenStore;
use crate::core::store::update_store;
use crate::services::api::ApiClient;
use crate::services::fetch::FetchTransport;
use std::rc::Rc;

/// Client type used by every page.
pub(crate) type MirrorClient = ApiClient<FetchTransport>;

/// Shared API client context for UI services.
#[derive(Clone)]
pub(crate) struct ApiCtx {
    /// Singleton API client instance.
    pub client: Rc<MirrorClient>,
}

impl ApiCtx {
    /// Create a new context with the configured base URL.
    pub(crate) fn new(base_url: &str) -> Self {
        let client = ApiClient::new(base_url, FetchTransport, Rc::new(LocalTokenStore))
            .with_unauthorized_hook(|| {
                update_store(|store| store.session.expire());
            });
        Self {
            client: Rc::new(client),
        }
    }
}

impl PartialEq for ApiCtx {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.client, &other.client)
    }
}
