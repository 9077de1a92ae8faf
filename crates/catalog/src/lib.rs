//! Driftwood catalog API client.
//!
//! # Architecture
//!
//! - The remote catalog API is the source of truth - no local sync, direct
//!   JSON/REST calls via `reqwest`
//! - Listing and detail responses are memoized in an explicit in-memory
//!   [`CatalogCache`] owned by the client; writes reconcile the cache so a
//!   session never re-reads stale copies of a product it just saved
//! - Auth (login/register/session check) goes through the same API and
//!   returns an [`AuthSession`] the binaries stash in their cookie session
//!
//! # Example
//!
//! ```rust,ignore
//! use driftwood_catalog::{CatalogClient, CatalogConfig, ListKey};
//!
//! let client = CatalogClient::new(&config.catalog);
//!
//! // First page of the men's listing (served from cache on revisit)
//! let page = client.list_products(&ListKey::new(9, 0, Some(Gender::Men))).await?;
//!
//! // Detail lookup by id or slug
//! let product = client.get_product("linen_overshirt").await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cache;
mod client;
mod types;

pub use cache::{CatalogCache, ListKey};
pub use client::{CatalogClient, CatalogConfig};
pub use types::{AuthSession, ImageUpload, ProductPayload};

use thiserror::Error;

/// Errors that can occur when talking to the catalog API.
///
/// Any error leaves the response cache untouched; a failed fetch is simply
/// retried from the network on the next access. The client never retries on
/// its own - retry policy belongs to the caller.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Transport-level failure (DNS, connect, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-2xx status not covered by a more
    /// specific variant.
    #[error("catalog API returned {status}: {message}")]
    Server { status: u16, message: String },

    /// No product matched the requested id or slug.
    #[error("not found: {0}")]
    NotFound(String),

    /// The API rejected the request body (400).
    #[error("validation failed: {0}")]
    Validation(String),

    /// Missing or insufficient credentials (401/403).
    #[error("unauthorized")]
    Unauthorized,

    /// The response body was not the JSON shape we expected.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CatalogError::NotFound("p-123".to_string());
        assert_eq!(err.to_string(), "not found: p-123");

        let err = CatalogError::Server {
            status: 502,
            message: "upstream down".to_string(),
        };
        assert_eq!(err.to_string(), "catalog API returned 502: upstream down");
    }
}
