//! Integration test harness for Driftwood.
//!
//! Spins up an in-process mock of the remote catalog API (an axum router on
//! an ephemeral port) and hands out [`CatalogClient`]s pointed at it. Every
//! handler bumps a request counter, so tests can assert exactly how many
//! calls actually hit the network - the whole point of the response cache.

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::expect_used)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use axum::{
    Json, Router,
    extract::{Multipart, Path, Query, State},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use url::Url;

use driftwood_catalog::{CatalogClient, CatalogConfig};
use driftwood_core::{Gender, Product, ProductsPage, Size, User};

/// Bearer token the mock API hands out and accepts for admin calls.
pub const ADMIN_TOKEN: &str = "test-admin-token";

/// Password the mock API accepts for any known user.
pub const ADMIN_PASSWORD: &str = "driftw00d-rocks";

/// Email of the seeded admin account.
pub const ADMIN_EMAIL: &str = "admin@driftwoodsupply.co";

#[derive(Clone)]
struct MockState {
    products: Arc<Mutex<Vec<Product>>>,
    requests: Arc<AtomicUsize>,
}

impl MockState {
    fn count(&self) {
        self.requests.fetch_add(1, Ordering::SeqCst);
    }

    fn products(&self) -> std::sync::MutexGuard<'_, Vec<Product>> {
        self.products.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// An in-process mock of the remote catalog API.
pub struct MockCatalog {
    addr: SocketAddr,
    state: MockState,
}

impl MockCatalog {
    /// Start the mock with the given catalog contents.
    ///
    /// # Panics
    ///
    /// Panics if no ephemeral port can be bound.
    pub async fn spawn(seed: Vec<Product>) -> Self {
        let state = MockState {
            products: Arc::new(Mutex::new(seed)),
            requests: Arc::new(AtomicUsize::new(0)),
        };

        let router = Router::new()
            .route("/api/products", get(list_products).post(create_product))
            .route("/api/products/{term}", get(get_product).patch(update_product))
            .route("/api/auth/login", post(login))
            .route("/api/auth/check-status", get(check_status))
            .route("/api/files/product", post(upload_image))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind ephemeral port");
        let addr = listener.local_addr().expect("local addr");

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("mock catalog API");
        });

        Self { addr, state }
    }

    /// Base URL of the mock API.
    ///
    /// # Panics
    ///
    /// Panics if the bound address does not form a valid URL (it always does).
    #[must_use]
    pub fn base_url(&self) -> Url {
        format!("http://{}/api", self.addr)
            .parse()
            .expect("valid base url")
    }

    /// A fresh client (with its own empty cache) pointed at this mock.
    #[must_use]
    pub fn client(&self) -> CatalogClient {
        CatalogClient::new(&CatalogConfig {
            base_url: self.base_url(),
        })
    }

    /// Number of requests that actually reached the mock so far.
    #[must_use]
    pub fn requests(&self) -> usize {
        self.state.requests.load(Ordering::SeqCst)
    }
}

/// Build a seed product. Slugs are derived from the title.
#[must_use]
pub fn seed_product(id: &str, title: &str, gender: Gender) -> Product {
    Product {
        id: id.to_string(),
        title: title.to_string(),
        price: Decimal::new(4590, 2),
        description: format!("{title}, woven from recycled sailcloth."),
        slug: title.to_lowercase().replace(' ', "_"),
        stock: 10,
        sizes: vec![Size::S, Size::M, Size::L],
        gender,
        tags: vec!["seed".to_string()],
        images: vec![format!("{id}.jpg")],
        user: None,
    }
}

/// Build `count` seed products for one gender, ids `{prefix}-{n}`.
#[must_use]
pub fn seed_products(prefix: &str, count: usize, gender: Gender) -> Vec<Product> {
    (1..=count)
        .map(|n| seed_product(&format!("{prefix}-{n}"), &format!("{prefix} item {n}"), gender))
        .collect()
}

// =============================================================================
// Handlers
// =============================================================================

#[derive(Debug, Deserialize)]
struct ListParams {
    limit: Option<u32>,
    offset: Option<u32>,
    gender: Option<String>,
}

async fn list_products(
    State(state): State<MockState>,
    Query(params): Query<ListParams>,
) -> Json<ProductsPage> {
    state.count();

    let limit = params.limit.unwrap_or(9).max(1);
    let offset = params.offset.unwrap_or(0);

    let filtered: Vec<Product> = state
        .products()
        .iter()
        .filter(|product| {
            params
                .gender
                .as_ref()
                .is_none_or(|gender| product.gender.as_str() == gender)
        })
        .cloned()
        .collect();

    let total = filtered.len() as u64;
    let pages = (total as u32).div_ceil(limit);
    let products: Vec<Product> = filtered
        .into_iter()
        .skip(offset as usize)
        .take(limit as usize)
        .collect();

    Json(ProductsPage {
        products,
        total,
        pages,
    })
}

async fn get_product(State(state): State<MockState>, Path(term): Path<String>) -> Response {
    state.count();

    let products = state.products();
    match products
        .iter()
        .find(|product| product.id == term || product.slug == term)
    {
        Some(product) => Json(product.clone()).into_response(),
        None => not_found(&term),
    }
}

/// Partial product body accepted by create and update.
#[derive(Debug, Deserialize)]
struct PayloadIn {
    title: Option<String>,
    description: Option<String>,
    slug: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    price: Option<Decimal>,
    stock: Option<u32>,
    sizes: Option<Vec<Size>>,
    gender: Option<Gender>,
    tags: Option<Vec<String>>,
    images: Option<Vec<String>>,
}

fn apply(product: &mut Product, payload: PayloadIn) {
    if let Some(title) = payload.title {
        product.title = title;
    }
    if let Some(description) = payload.description {
        product.description = description;
    }
    if let Some(slug) = payload.slug {
        product.slug = slug;
    }
    if let Some(price) = payload.price {
        product.price = price;
    }
    if let Some(stock) = payload.stock {
        product.stock = stock;
    }
    if let Some(sizes) = payload.sizes {
        product.sizes = sizes;
    }
    if let Some(gender) = payload.gender {
        product.gender = gender;
    }
    if let Some(tags) = payload.tags {
        product.tags = tags;
    }
    if let Some(images) = payload.images {
        product.images = images;
    }
}

async fn create_product(
    State(state): State<MockState>,
    headers: HeaderMap,
    Json(payload): Json<PayloadIn>,
) -> Response {
    state.count();

    if !authorized(&headers) {
        return unauthorized();
    }

    let mut product = Product {
        id: uuid::Uuid::new_v4().to_string(),
        title: String::new(),
        price: Decimal::ZERO,
        description: String::new(),
        slug: String::new(),
        stock: 0,
        sizes: Vec::new(),
        gender: Gender::Men,
        tags: Vec::new(),
        images: Vec::new(),
        user: Some(admin_user()),
    };
    apply(&mut product, payload);

    state.products().push(product.clone());

    (StatusCode::CREATED, Json(product)).into_response()
}

async fn update_product(
    State(state): State<MockState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(payload): Json<PayloadIn>,
) -> Response {
    state.count();

    if !authorized(&headers) {
        return unauthorized();
    }

    let mut products = state.products();
    match products.iter_mut().find(|product| product.id == id) {
        Some(product) => {
            apply(product, payload);
            Json(product.clone()).into_response()
        }
        None => not_found(&id),
    }
}

#[derive(Debug, Deserialize)]
struct LoginBody {
    email: String,
    password: String,
}

async fn login(State(state): State<MockState>, Json(body): Json<LoginBody>) -> Response {
    state.count();

    if body.email == ADMIN_EMAIL && body.password == ADMIN_PASSWORD {
        Json(json!({ "user": admin_user(), "token": ADMIN_TOKEN })).into_response()
    } else {
        unauthorized()
    }
}

async fn check_status(State(state): State<MockState>, headers: HeaderMap) -> Response {
    state.count();

    if authorized(&headers) {
        Json(json!({ "user": admin_user(), "token": ADMIN_TOKEN })).into_response()
    } else {
        unauthorized()
    }
}

async fn upload_image(
    State(state): State<MockState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Response {
    state.count();

    if !authorized(&headers) {
        return unauthorized();
    }

    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or("upload").to_string();
            // The real API stores under a generated name, extension kept
            let stored = format!("{}-{filename}", uuid::Uuid::new_v4());
            return Json(json!({ "fileName": stored })).into_response();
        }
    }

    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "message": "Make sure that the file is an image", "statusCode": 400 })),
    )
        .into_response()
}

// =============================================================================
// Helpers
// =============================================================================

fn admin_user() -> User {
    User {
        id: "admin-1".to_string(),
        email: ADMIN_EMAIL.to_string(),
        full_name: "Site Admin".to_string(),
        is_active: true,
        roles: vec!["admin".to_string(), "user".to_string()],
    }
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value == format!("Bearer {ADMIN_TOKEN}"))
}

fn not_found(term: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "message": format!("Product with term {term} not found"),
            "statusCode": 404,
        })),
    )
        .into_response()
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "message": "Invalid credentials", "statusCode": 401 })),
    )
        .into_response()
}
