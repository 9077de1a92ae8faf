//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::instrument;

use driftwood_catalog::ListKey;
use driftwood_core::Paginator;

use crate::filters;
use crate::middleware::OptionalAuth;
use crate::models::CurrentUser;
use crate::state::AppState;

use super::products::{PageLink, ProductCard, page_links};

/// Pagination query parameters.
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
}

/// Home page template: the full catalog, paginated.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub user: Option<CurrentUser>,
    pub products: Vec<ProductCard>,
    pub pages: Vec<PageLink>,
    pub base_path: String,
}

/// Display the home page.
#[instrument(skip(state, user))]
pub async fn home(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    Query(query): Query<PageQuery>,
) -> impl IntoResponse {
    let paginator = Paginator::from_query(query.page);
    let key = ListKey::for_page(&paginator, None);
    let image_base = state.image_base();

    let (products, pages) = match state.catalog().list_products(&key).await {
        Ok(page) => (
            page.products
                .iter()
                .map(|product| ProductCard::from_product(product, &image_base))
                .collect(),
            page_links(&paginator, page.pages),
        ),
        Err(e) => {
            tracing::error!("Failed to fetch product listing: {e}");
            (Vec::new(), Vec::new())
        }
    };

    HomeTemplate {
        user,
        products,
        pages,
        base_path: "/".to_string(),
    }
}
