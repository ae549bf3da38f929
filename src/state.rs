//! Shared application state.

use std::sync::Arc;
use std::time::Duration;

use crate::admin::draft::DraftRegistry;
use crate::api::client::{HttpRemoteApi, RemoteApi};
use crate::config::PortalConfig;

pub struct AppState {
    pub api: Arc<dyn RemoteApi + Send + Sync>,
    pub drafts: DraftRegistry,
}

impl AppState {
    pub fn new(config: &PortalConfig) -> Self {
        let client = reqwest::Client::builder()
            .pool_idle_timeout(Duration::from_secs(900))
            .user_agent("desa-wisata-portal/0.4")
            .build()
            .expect("Failed to create reqwest client");

        let api = Arc::new(HttpRemoteApi::new(client, config.base_url.clone()));
        Self::with_api(api)
    }

    /// Build state around an injected API implementation. Tests use this to
    /// swap in an in-memory remote.
    pub fn with_api(api: Arc<dyn RemoteApi + Send + Sync>) -> Self {
        Self {
            api,
            drafts: DraftRegistry::default(),
        }
    }
}
