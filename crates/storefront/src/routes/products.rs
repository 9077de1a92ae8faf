//! Product route handlers and shared listing view types.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;
use tracing::instrument;

use driftwood_catalog::CatalogError;
use driftwood_core::{Paginator, Product};

use crate::error::Result;
use crate::filters;
use crate::middleware::OptionalAuth;
use crate::models::CurrentUser;
use crate::state::AppState;

/// Shipped with the static assets; shown when a product has no images.
pub const PLACEHOLDER_IMAGE: &str = "/static/images/no-image.jpg";

/// Format a price for display.
pub fn format_price(price: Decimal) -> String {
    format!("${price:.2}")
}

/// Product card data for listing grids.
#[derive(Clone)]
pub struct ProductCard {
    pub slug: String,
    pub title: String,
    pub price: String,
    pub image_url: String,
}

impl ProductCard {
    /// Build a card from a catalog record, resolving the first image against
    /// the catalog's file endpoint.
    #[must_use]
    pub fn from_product(product: &Product, image_base: &str) -> Self {
        let image_url = product
            .images
            .first()
            .map_or_else(|| PLACEHOLDER_IMAGE.to_string(), |name| format!("{image_base}/{name}"));

        Self {
            slug: product.slug.clone(),
            title: product.title.clone(),
            price: format_price(product.price),
            image_url,
        }
    }
}

/// One rendered pagination link.
#[derive(Clone)]
pub struct PageLink {
    pub number: u32,
    pub is_current: bool,
}

/// Build the rendered page-link row for a listing response.
#[must_use]
pub fn page_links(paginator: &Paginator, total_pages: u32) -> Vec<PageLink> {
    paginator
        .page_links(total_pages)
        .into_iter()
        .map(|number| PageLink {
            number,
            is_current: number == paginator.page(),
        })
        .collect()
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub user: Option<CurrentUser>,
    pub title: String,
    pub description: String,
    pub price: String,
    pub images: Vec<String>,
    pub sizes: Vec<String>,
    pub tags: Vec<String>,
    pub in_stock: bool,
}

impl ProductShowTemplate {
    fn for_product(product: &Product, image_base: &str, user: Option<CurrentUser>) -> Self {
        let mut images: Vec<String> = product
            .images
            .iter()
            .map(|name| format!("{image_base}/{name}"))
            .collect();
        if images.is_empty() {
            images.push(PLACEHOLDER_IMAGE.to_string());
        }

        Self {
            user,
            title: product.title.clone(),
            description: product.description.clone(),
            price: format_price(product.price),
            images,
            sizes: product.sizes.iter().map(ToString::to_string).collect(),
            tags: product.tags.clone(),
            in_stock: product.stock > 0,
        }
    }
}

/// Not-found page template.
#[derive(Template, WebTemplate)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate {
    pub user: Option<CurrentUser>,
}

/// Display product detail page.
///
/// The path segment is an id or a slug; the catalog API accepts either.
#[instrument(skip(state, user))]
pub async fn show(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    Path(term): Path<String>,
) -> Result<Response> {
    match state.catalog().get_product(&term).await {
        Ok(product) => {
            Ok(ProductShowTemplate::for_product(&product, &state.image_base(), user)
                .into_response())
        }
        Err(CatalogError::NotFound(_)) => {
            Ok((StatusCode::NOT_FOUND, NotFoundTemplate { user }).into_response())
        }
        Err(e) => Err(e.into()),
    }
}
