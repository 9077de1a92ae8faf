//! Application state shared across handlers.

use std::sync::Arc;

use driftwood_catalog::CatalogClient;

use crate::config::StorefrontConfig;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the catalog API client and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: CatalogClient,
}

impl AppState {
    /// Create a new application state.
    ///
    /// The catalog client (and with it the session-scoped response cache)
    /// is constructed exactly once here and shared by every handler.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let catalog = CatalogClient::new(&config.catalog);

        Self {
            inner: Arc::new(AppStateInner { config, catalog }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
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
