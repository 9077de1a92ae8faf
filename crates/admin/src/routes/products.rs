//! Product management route handlers.
//!
//! The list page mirrors the storefront's pagination; the edit page serves
//! both create (the `new` sentinel) and update, posting as multipart so new
//! images travel with the fields. Uploads run before the save call and the
//! resulting filenames are merged into the payload, so a failed upload
//! fails the whole save.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use driftwood_catalog::{CatalogError, ListKey};
use driftwood_core::{Gender, Paginator, Product, Size, product::NEW_PRODUCT_ID};

use crate::error::Result;
use crate::filters;
use crate::forms::ProductForm;
use crate::middleware::RequireAdmin;
use crate::models::CurrentAdmin;
use crate::state::AppState;

/// Pagination query parameters.
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
}

/// Query parameters for the edit page.
#[derive(Debug, Deserialize)]
pub struct EditQuery {
    pub saved: Option<bool>,
}

// =============================================================================
// View Types
// =============================================================================

/// One row of the products table.
#[derive(Clone)]
pub struct ProductRow {
    pub id: String,
    pub title: String,
    pub price: String,
    pub stock: u32,
    pub gender: &'static str,
    pub image_url: Option<String>,
}

impl ProductRow {
    fn from_product(product: &Product, image_base: &str) -> Self {
        Self {
            id: product.id.clone(),
            title: product.title.clone(),
            price: format!("${:.2}", product.price),
            stock: product.stock,
            gender: product.gender.label(),
            image_url: product
                .images
                .first()
                .map(|name| format!("{image_base}/{name}")),
        }
    }
}

/// One rendered pagination link.
#[derive(Clone)]
pub struct PageLink {
    pub number: u32,
    pub is_current: bool,
}

/// A size checkbox on the edit form.
#[derive(Clone)]
pub struct SizeOption {
    pub label: &'static str,
    pub checked: bool,
}

/// A gender option on the edit form.
#[derive(Clone)]
pub struct GenderOption {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

/// An image attached to the product being edited.
#[derive(Clone)]
pub struct ImageView {
    pub name: String,
    pub url: String,
}

/// Everything the edit form needs to render, pre-stringified.
#[derive(Clone)]
pub struct EditView {
    pub id: String,
    pub title: String,
    pub description: String,
    pub slug: String,
    pub price: String,
    pub stock: String,
    pub tags: String,
    pub images: Vec<ImageView>,
    pub size_options: Vec<SizeOption>,
    pub gender_options: Vec<GenderOption>,
    pub is_new: bool,
}

impl EditView {
    fn from_product(product: &Product, image_base: &str) -> Self {
        Self {
            id: product.id.clone(),
            title: product.title.clone(),
            description: product.description.clone(),
            slug: product.slug.clone(),
            price: product.price.to_string(),
            stock: product.stock.to_string(),
            tags: product.tags.join(","),
            images: image_views(&product.images, image_base),
            size_options: size_options(|size| product.sizes.contains(&size)),
            gender_options: gender_options(|gender| gender == product.gender),
            is_new: product.is_draft(),
        }
    }

    /// Rebuild the view from a rejected submission so the admin doesn't
    /// lose what they typed.
    fn from_form(form: &ProductForm, id: &str, image_base: &str) -> Self {
        Self {
            id: id.to_string(),
            title: form.title.clone(),
            description: form.description.clone(),
            slug: form.slug.clone(),
            price: form.price.clone(),
            stock: form.stock.clone(),
            tags: form.tags.clone(),
            images: image_views(&form.existing_images, image_base),
            size_options: size_options(|size| form.sizes.iter().any(|s| s == size.as_str())),
            gender_options: gender_options(|gender| form.gender == gender.as_str()),
            is_new: id == NEW_PRODUCT_ID,
        }
    }
}

fn image_views(names: &[String], image_base: &str) -> Vec<ImageView> {
    names
        .iter()
        .map(|name| ImageView {
            name: name.clone(),
            url: format!("{image_base}/{name}"),
        })
        .collect()
}

fn size_options(checked: impl Fn(Size) -> bool) -> Vec<SizeOption> {
    Size::ALL
        .into_iter()
        .map(|size| SizeOption {
            label: size.as_str(),
            checked: checked(size),
        })
        .collect()
}

fn gender_options(selected: impl Fn(Gender) -> bool) -> Vec<GenderOption> {
    Gender::ALL
        .into_iter()
        .map(|gender| GenderOption {
            value: gender.as_str(),
            label: gender.label(),
            selected: selected(gender),
        })
        .collect()
}

// =============================================================================
// Templates
// =============================================================================

/// Products list page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub admin: Option<CurrentAdmin>,
    pub products: Vec<ProductRow>,
    pub pages: Vec<PageLink>,
    pub base_path: String,
}

/// Product edit page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/edit.html")]
pub struct ProductEditTemplate {
    pub admin: Option<CurrentAdmin>,
    pub product: EditView,
    pub errors: Vec<String>,
    pub saved: bool,
}

// =============================================================================
// Handlers
// =============================================================================

/// Products list page handler.
#[instrument(skip(admin, state))]
pub async fn index(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> impl IntoResponse {
    let paginator = Paginator::from_query(query.page);
    let key = ListKey::for_page(&paginator, None);
    let image_base = state.image_base();

    let (products, pages) = match state.catalog().list_products(&key).await {
        Ok(page) => (
            page.products
                .iter()
                .map(|product| ProductRow::from_product(product, &image_base))
                .collect(),
            paginator
                .page_links(page.pages)
                .into_iter()
                .map(|number| PageLink {
                    number,
                    is_current: number == paginator.page(),
                })
                .collect(),
        ),
        Err(e) => {
            tracing::error!("Failed to fetch products: {e}");
            (Vec::new(), Vec::new())
        }
    };

    ProductsIndexTemplate {
        admin: Some(admin),
        products,
        pages,
        base_path: "/products".to_string(),
    }
}

/// Product edit page handler.
///
/// `new` serves the empty draft form; anything else fetches the record by
/// id (or slug) through the cached client.
#[instrument(skip(admin, state))]
pub async fn edit(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<EditQuery>,
) -> Result<Response> {
    let product = state.catalog().get_product(&id).await?;

    Ok(ProductEditTemplate {
        admin: Some(admin),
        product: EditView::from_product(&product, &state.image_base()),
        errors: Vec::new(),
        saved: query.saved.unwrap_or(false),
    }
    .into_response())
}

/// Product save handler (create or update).
#[instrument(skip(admin, state, multipart))]
pub async fn save(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<Response> {
    let form = ProductForm::from_multipart(multipart).await?;
    let image_base = state.image_base();

    let mut payload = match form.validate() {
        Ok(payload) => payload,
        Err(errors) => {
            return Ok((
                StatusCode::UNPROCESSABLE_ENTITY,
                ProductEditTemplate {
                    admin: Some(admin),
                    product: EditView::from_form(&form, &id, &image_base),
                    errors,
                    saved: false,
                },
            )
                .into_response());
        }
    };

    // Upload new images first; the saved record references them by filename
    let mut images = form.existing_images.clone();
    let uploaded = state
        .catalog()
        .upload_images(&admin.token, form.uploads.clone())
        .await?;
    images.extend(uploaded);
    payload.images = Some(images);

    let saved = if id == NEW_PRODUCT_ID {
        state.catalog().create_product(&admin.token, &payload).await
    } else {
        state
            .catalog()
            .update_product(&admin.token, &id, &payload)
            .await
    };

    match saved {
        Ok(product) => Ok(Redirect::to(&format!("/products/{}?saved=true", product.id)).into_response()),
        Err(CatalogError::Validation(message)) => Ok((
            StatusCode::UNPROCESSABLE_ENTITY,
            ProductEditTemplate {
                admin: Some(admin),
                product: EditView::from_form(&form, &id, &image_base),
                errors: vec![message],
                saved: false,
            },
        )
            .into_response()),
        Err(e) => Err(e.into()),
    }
}
