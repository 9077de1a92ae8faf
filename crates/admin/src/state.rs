//! Application state shared across handlers.

use std::sync::Arc;

use driftwood_catalog::CatalogClient;

use crate::config::AdminConfig;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; holds the configuration and the catalog API
/// client (with its session-scoped response cache).
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    catalog: CatalogClient,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: AdminConfig) -> Self {
        let catalog = CatalogClient::new(&config.catalog);

        Self {
            inner: Arc::new(AppStateInner { config, catalog }),
        }
    }

    /// Get a reference to the admin configuration.
    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    /// Get a reference to the catalog API client.
    #[must_use]
    pub fn catalog(&self) -> &CatalogClient {
        &self.inner.catalog
    }

    /// Base URL the catalog API serves product images from.
    #[must_use]
    pub fn image_base(&self) -> String {
        format!(
            "{}/files/product",
            self.inner
                .config
                .catalog
                .base_url
                .as_str()
                .trim_end_matches('/')
        )
    }
}
