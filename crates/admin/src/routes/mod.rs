//! HTTP route handlers for the admin panel.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                 - Redirect to /products
//! GET  /health           - Health check
//!
//! # Products (admin only)
//! GET  /products         - Products list (paginated)
//! GET  /products/:id     - Edit form ("new" serves the create form)
//! POST /products/:id     - Save (multipart: fields + image files)
//!
//! # Auth
//! GET  /auth/login       - Login page
//! POST /auth/login       - Login action (admin role required)
//! POST /auth/logout      - Logout action
//! ```

pub mod auth;
pub mod products;

use axum::{
    Router,
    response::Redirect,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", post(auth::logout))
}

/// Create all routes for the admin panel.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(|| async { Redirect::to("/products") }))
        .route("/products", get(products::index))
        .route("/products/{id}", get(products::edit).post(products::save))
        .nest("/auth", auth_routes())
}
