//! Gender section route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::instrument;

use driftwood_catalog::ListKey;
use driftwood_core::{Gender, Paginator};

use crate::filters;
use crate::middleware::OptionalAuth;
use crate::models::CurrentUser;
use crate::state::AppState;

use super::home::PageQuery;
use super::products::{NotFoundTemplate, PageLink, ProductCard, page_links};

/// Gender section page template.
#[derive(Template, WebTemplate)]
#[template(path = "gender.html")]
pub struct GenderTemplate {
    pub user: Option<CurrentUser>,
    pub section: &'static str,
    pub products: Vec<ProductCard>,
    pub pages: Vec<PageLink>,
    pub base_path: String,
}

/// Display one gender's section of the catalog.
#[instrument(skip(state, user))]
pub async fn show(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    Path(gender): Path<String>,
    Query(query): Query<PageQuery>,
) -> Response {
    let Ok(gender) = gender.parse::<Gender>() else {
        return (StatusCode::NOT_FOUND, NotFoundTemplate { user }).into_response();
    };

    let paginator = Paginator::from_query(query.page);
    let key = ListKey::for_page(&paginator, Some(gender));
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
            tracing::error!("Failed to fetch {gender} listing: {e}");
            (Vec::new(), Vec::new())
        }
    };

    GenderTemplate {
        user,
        section: gender.label(),
        products,
        pages,
        base_path: format!("/gender/{gender}"),
    }
    .into_response()
}
