//! Catalog API client implementation.
//!
//! Plain JSON/REST over `reqwest`. Listing and detail reads go through the
//! in-memory [`CatalogCache`]; create/update writes bypass it and reconcile
//! it afterwards.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use driftwood_core::{Product, ProductsPage, product::NEW_PRODUCT_ID};

use crate::CatalogError;
use crate::cache::{CatalogCache, ListKey};
use crate::types::{AuthSession, ImageUpload, ProductPayload, UploadedFile};

/// Connection settings for the remote catalog API.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Base URL of the API, e.g. `https://api.driftwoodsupply.co/api`.
    pub base_url: Url,
}

/// Client for the remote catalog API.
///
/// Cheap to clone; all clones share one HTTP connection pool and one
/// response cache. Construct once per application context and hand copies
/// to whoever needs catalog access.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    http: reqwest::Client,
    base_url: String,
    cache: CatalogCache,
}

impl CatalogClient {
    /// Create a new catalog API client with an empty cache.
    #[must_use]
    pub fn new(config: &CatalogConfig) -> Self {
        Self {
            inner: Arc::new(CatalogClientInner {
                http: reqwest::Client::new(),
                base_url: config.base_url.as_str().trim_end_matches('/').to_string(),
                cache: CatalogCache::new(),
            }),
        }
    }

    /// The response cache backing this client.
    #[must_use]
    pub fn cache(&self) -> &CatalogCache {
        &self.inner.cache
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.inner.base_url)
    }

    /// Decode a response, mapping non-2xx statuses onto the error taxonomy.
    ///
    /// The body is read as text first so failures can be logged with what
    /// the server actually said.
    async fn decode<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
        context: &str,
    ) -> Result<T, CatalogError> {
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message =
                error_message(&text).unwrap_or_else(|| text.chars().take(200).collect());
            debug!(status = %status, context, message = %message, "catalog API error response");

            return Err(if status == reqwest::StatusCode::NOT_FOUND {
                CatalogError::NotFound(context.to_string())
            } else if status == reqwest::StatusCode::BAD_REQUEST {
                CatalogError::Validation(message)
            } else if status == reqwest::StatusCode::UNAUTHORIZED
                || status == reqwest::StatusCode::FORBIDDEN
            {
                CatalogError::Unauthorized
            } else {
                CatalogError::Server {
                    status: status.as_u16(),
                    message,
                }
            });
        }

        serde_json::from_str(&text).map_err(|e| {
            tracing::error!(
                error = %e,
                context,
                body = %text.chars().take(500).collect::<String>(),
                "failed to parse catalog API response"
            );
            CatalogError::Parse(e)
        })
    }

    // =========================================================================
    // Product Methods
    // =========================================================================

    /// Fetch one page of the product listing.
    ///
    /// Served from the cache when the exact same query tuple was fetched
    /// before in this session; otherwise issues the network call and stores
    /// the result. A failed call stores nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(key = %key))]
    pub async fn list_products(&self, key: &ListKey) -> Result<ProductsPage, CatalogError> {
        if let Some(page) = self.inner.cache.list(key) {
            debug!("cache hit for product listing");
            return Ok(page);
        }

        let mut request = self.inner.http.get(self.endpoint("/products")).query(&[
            ("limit", key.limit.to_string()),
            ("offset", key.offset.to_string()),
        ]);
        if let Some(gender) = key.gender {
            request = request.query(&[("gender", gender.as_str())]);
        }

        let page: ProductsPage = self.decode(request.send().await?, "product listing").await?;

        self.inner.cache.store_list(key.clone(), page.clone());

        Ok(page)
    }

    /// Fetch a product by id or slug.
    ///
    /// The [`NEW_PRODUCT_ID`] sentinel short-circuits to an empty draft for
    /// the admin create form. Cached under whichever identifier the caller
    /// used.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if no product matches, or another
    /// error if the API request fails.
    #[instrument(skip(self), fields(term = %term))]
    pub async fn get_product(&self, term: &str) -> Result<Product, CatalogError> {
        if term == NEW_PRODUCT_ID {
            return Ok(Product::draft());
        }

        if let Some(product) = self.inner.cache.product(term) {
            debug!("cache hit for product");
            return Ok(product);
        }

        let response = self
            .inner
            .http
            .get(self.endpoint(&format!("/products/{term}")))
            .send()
            .await?;
        let product: Product = self.decode(response, term).await?;

        self.inner.cache.store_product(term, product.clone());

        Ok(product)
    }

    /// Create a product.
    ///
    /// On success the new record is reconciled into the cache, so a
    /// follow-up `get_product` by id is answered locally.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Validation`] if the API rejects the payload,
    /// [`CatalogError::Unauthorized`] without admin credentials, or another
    /// error if the request fails.
    #[instrument(skip(self, token, payload))]
    pub async fn create_product(
        &self,
        token: &str,
        payload: &ProductPayload,
    ) -> Result<Product, CatalogError> {
        let response = self
            .inner
            .http
            .post(self.endpoint("/products"))
            .bearer_auth(token)
            .json(payload)
            .send()
            .await?;
        let product: Product = self.decode(response, "create product").await?;

        self.inner.cache.reconcile(&product);

        Ok(product)
    }

    /// Update a product by id.
    ///
    /// On success every cached view of the record (detail and listing
    /// entries) is reconciled to the returned state.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] for an unknown id,
    /// [`CatalogError::Validation`] for a rejected payload, or another
    /// error if the request fails.
    #[instrument(skip(self, token, payload), fields(id = %id))]
    pub async fn update_product(
        &self,
        token: &str,
        id: &str,
        payload: &ProductPayload,
    ) -> Result<Product, CatalogError> {
        let response = self
            .inner
            .http
            .patch(self.endpoint(&format!("/products/{id}")))
            .bearer_auth(token)
            .json(payload)
            .send()
            .await?;
        let product: Product = self.decode(response, id).await?;

        self.inner.cache.reconcile(&product);

        Ok(product)
    }

    // =========================================================================
    // File Methods (not cached)
    // =========================================================================

    /// Upload one product image, returning the filename the API stored it
    /// under.
    ///
    /// # Errors
    ///
    /// Returns an error if the upload is rejected or the request fails.
    #[instrument(skip(self, token, upload), fields(filename = %upload.filename))]
    pub async fn upload_image(
        &self,
        token: &str,
        upload: ImageUpload,
    ) -> Result<String, CatalogError> {
        let part = reqwest::multipart::Part::bytes(upload.bytes).file_name(upload.filename);
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .inner
            .http
            .post(self.endpoint("/files/product"))
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await?;
        let uploaded: UploadedFile = self.decode(response, "image upload").await?;

        Ok(uploaded.file_name)
    }

    /// Upload a batch of images, all-or-nothing.
    ///
    /// Stops at the first failure; filenames of earlier uploads are dropped
    /// with it, matching the save form's "merge on full success only"
    /// behavior.
    ///
    /// # Errors
    ///
    /// Returns the first upload error encountered.
    pub async fn upload_images(
        &self,
        token: &str,
        uploads: Vec<ImageUpload>,
    ) -> Result<Vec<String>, CatalogError> {
        let mut filenames = Vec::with_capacity(uploads.len());
        for upload in uploads {
            filenames.push(self.upload_image(token, upload).await?);
        }
        Ok(filenames)
    }

    // =========================================================================
    // Auth Methods
    // =========================================================================

    /// Exchange credentials for a session.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Unauthorized`] on bad credentials, or another
    /// error if the request fails.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthSession, CatalogError> {
        let response = self
            .inner
            .http
            .post(self.endpoint("/auth/login"))
            .json(&serde_json::json!({
                "email": email,
                "password": password,
            }))
            .send()
            .await?;

        self.decode(response, "login").await
    }

    /// Register a new account and log it in.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Validation`] if the API rejects the fields
    /// (e.g. the email is taken), or another error if the request fails.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
    ) -> Result<AuthSession, CatalogError> {
        let response = self
            .inner
            .http
            .post(self.endpoint("/auth/register"))
            .json(&serde_json::json!({
                "email": email,
                "password": password,
                "fullName": full_name,
            }))
            .send()
            .await?;

        self.decode(response, "register").await
    }

    /// Re-validate a bearer token, returning a fresh session for it.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Unauthorized`] for an expired or bogus token,
    /// or another error if the request fails.
    #[instrument(skip(self, token))]
    pub async fn check_status(&self, token: &str) -> Result<AuthSession, CatalogError> {
        let response = self
            .inner
            .http
            .get(self.endpoint("/auth/check-status"))
            .bearer_auth(token)
            .send()
            .await?;

        self.decode(response, "check status").await
    }
}

/// Pull the human-readable message out of an API error body.
///
/// The API reports `message` as either a string or a list of field errors.
fn error_message(body: &str) -> Option<String> {
    #[derive(serde::Deserialize)]
    struct ErrorBody {
        message: serde_json::Value,
    }

    let body: ErrorBody = serde_json::from_str(body).ok()?;
    match body.message {
        serde_json::Value::String(message) => Some(message),
        serde_json::Value::Array(items) => {
            let messages: Vec<&str> = items.iter().filter_map(|item| item.as_str()).collect();
            if messages.is_empty() {
                None
            } else {
                Some(messages.join("; "))
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_string() {
        let body = r#"{"message": "Product not found", "statusCode": 404}"#;
        assert_eq!(error_message(body), Some("Product not found".to_string()));
    }

    #[test]
    fn test_error_message_list() {
        let body = r#"{"message": ["title must be a string", "price must not be negative"], "statusCode": 400}"#;
        assert_eq!(
            error_message(body),
            Some("title must be a string; price must not be negative".to_string())
        );
    }

    #[test]
    fn test_error_message_unparseable() {
        assert_eq!(error_message("<html>bad gateway</html>"), None);
        assert_eq!(error_message(r#"{"message": 42}"#), None);
    }

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let config = CatalogConfig {
            base_url: "http://localhost:3500/api/".parse().expect("valid url"),
        };
        let client = CatalogClient::new(&config);
        assert_eq!(client.endpoint("/products"), "http://localhost:3500/api/products");
    }
}
