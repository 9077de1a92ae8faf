//! Product form parsing and validation.
//!
//! The edit form posts as multipart so new image files ride along with the
//! text fields. Parsing collects everything verbatim; validation turns the
//! raw strings into a typed payload or a list of field errors for redisplay.

use std::str::FromStr;
use std::sync::LazyLock;

use axum::extract::Multipart;
use regex::Regex;
use rust_decimal::Decimal;

use driftwood_catalog::{ImageUpload, ProductPayload};
use driftwood_core::{Gender, Size};

use crate::error::AppError;

/// Slugs: lowercase alphanumerics/underscores, dash-separated.
static SLUG_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9_]+(?:-[a-z0-9_]+)*$").expect("slug pattern compiles")
});

/// Raw product form fields, exactly as posted.
#[derive(Debug, Default)]
pub struct ProductForm {
    pub title: String,
    pub description: String,
    pub slug: String,
    pub price: String,
    pub stock: String,
    pub gender: String,
    pub tags: String,
    pub sizes: Vec<String>,
    /// Filenames of images already attached to the product.
    pub existing_images: Vec<String>,
    /// New image files to upload before saving.
    pub uploads: Vec<ImageUpload>,
}

impl ProductForm {
    /// Drain a multipart body into a form.
    ///
    /// Unknown fields are ignored; empty file parts (a file input left
    /// blank submits one) are skipped.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` if the multipart stream is malformed.
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(format!("invalid multipart body: {e}")))?
        {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "images" => {
                    let filename = field.file_name().unwrap_or_default().to_string();
                    let bytes = field.bytes().await.map_err(|e| {
                        AppError::BadRequest(format!("failed to read image upload: {e}"))
                    })?;
                    if !filename.is_empty() && !bytes.is_empty() {
                        form.uploads.push(ImageUpload {
                            filename,
                            bytes: bytes.to_vec(),
                        });
                    }
                }
                "existing_images" => form.existing_images.push(read_text(field).await?),
                "sizes" => form.sizes.push(read_text(field).await?),
                "title" => form.title = read_text(field).await?,
                "description" => form.description = read_text(field).await?,
                "slug" => form.slug = read_text(field).await?,
                "price" => form.price = read_text(field).await?,
                "stock" => form.stock = read_text(field).await?,
                "gender" => form.gender = read_text(field).await?,
                "tags" => form.tags = read_text(field).await?,
                _ => {}
            }
        }

        Ok(form)
    }

    /// Validate the form into a product payload, sans images.
    ///
    /// Images are merged by the save handler after uploads complete, so a
    /// failed upload never half-saves.
    ///
    /// # Errors
    ///
    /// Returns every field error found, for redisplay above the form.
    pub fn validate(&self) -> Result<ProductPayload, Vec<String>> {
        let mut errors = Vec::new();

        if self.title.trim().is_empty() {
            errors.push("Title is required".to_string());
        }
        if self.description.trim().is_empty() {
            errors.push("Description is required".to_string());
        }

        if !SLUG_PATTERN.is_match(self.slug.trim()) {
            errors.push(
                "Slug must be lowercase letters, digits or underscores, separated by dashes"
                    .to_string(),
            );
        }

        let price = match Decimal::from_str(self.price.trim()) {
            Ok(price) if price >= Decimal::ZERO => Some(price),
            Ok(_) => {
                errors.push("Price must not be negative".to_string());
                None
            }
            Err(_) => {
                errors.push("Price must be a number".to_string());
                None
            }
        };

        let stock = match self.stock.trim().parse::<u32>() {
            Ok(stock) => Some(stock),
            Err(_) => {
                errors.push("Stock must be a whole number of at least 0".to_string());
                None
            }
        };

        let gender = match self.gender.parse::<Gender>() {
            Ok(gender) => Some(gender),
            Err(_) => {
                errors.push("Gender must be one of men, women, kid or unisex".to_string());
                None
            }
        };

        let mut sizes = Vec::with_capacity(self.sizes.len());
        for raw in &self.sizes {
            match raw.parse::<Size>() {
                Ok(size) => sizes.push(size),
                Err(e) => errors.push(e.to_string()),
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        let tags: Vec<String> = self
            .tags
            .to_lowercase()
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(ToString::to_string)
            .collect();

        Ok(ProductPayload {
            title: Some(self.title.trim().to_string()),
            description: Some(self.description.trim().to_string()),
            slug: Some(self.slug.trim().to_string()),
            price,
            stock,
            sizes: Some(sizes),
            gender,
            tags: Some(tags),
            images: None,
        })
    }
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(format!("invalid form field: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> ProductForm {
        ProductForm {
            title: "Linen Overshirt".to_string(),
            description: "A breezy overshirt.".to_string(),
            slug: "linen_overshirt".to_string(),
            price: "59.90".to_string(),
            stock: "8".to_string(),
            gender: "men".to_string(),
            tags: "Shirt, Summer ,linen".to_string(),
            sizes: vec!["S".to_string(), "M".to_string()],
            existing_images: vec![],
            uploads: vec![],
        }
    }

    #[test]
    fn test_valid_form_builds_payload() {
        let payload = valid_form().validate().expect("valid form");
        assert_eq!(payload.title.as_deref(), Some("Linen Overshirt"));
        assert_eq!(payload.stock, Some(8));
        assert_eq!(payload.gender, Some(Gender::Men));
        assert_eq!(payload.sizes, Some(vec![Size::S, Size::M]));
        // Tags are lowercased, trimmed, and split on commas
        assert_eq!(
            payload.tags,
            Some(vec![
                "shirt".to_string(),
                "summer".to_string(),
                "linen".to_string()
            ])
        );
        // Images are merged later, after uploads succeed
        assert!(payload.images.is_none());
    }

    #[test]
    fn test_slug_validation() {
        let mut form = valid_form();
        form.slug = "kids-hoodie_v2".to_string();
        assert!(form.validate().is_ok());

        form.slug = "Kids Hoodie".to_string();
        let errors = form.validate().expect_err("invalid slug");
        assert!(errors.iter().any(|e| e.contains("Slug")));
    }

    #[test]
    fn test_negative_price_rejected() {
        let mut form = valid_form();
        form.price = "-1".to_string();
        let errors = form.validate().expect_err("negative price");
        assert!(errors.iter().any(|e| e.contains("negative")));
    }

    #[test]
    fn test_collects_all_errors() {
        let form = ProductForm::default();
        let errors = form.validate().expect_err("empty form");
        // Title, description, slug, price, stock, gender all missing
        assert!(errors.len() >= 5);
    }
}
