//! Catalog product types.
//!
//! Wire-shape mirrors of the remote catalog API's product records. Products
//! are identified both by `id` and by a URL-safe `slug`; either can be used
//! to fetch one.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::user::User;

/// Sentinel product ID used on the admin edit path before a product exists.
pub const NEW_PRODUCT_ID: &str = "new";

/// Target audience of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[default]
    Men,
    Women,
    Kid,
    Unisex,
}

impl Gender {
    /// All genders, in display order.
    pub const ALL: [Self; 4] = [Self::Men, Self::Women, Self::Kid, Self::Unisex];

    /// The lowercase wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Men => "men",
            Self::Women => "women",
            Self::Kid => "kid",
            Self::Unisex => "unisex",
        }
    }

    /// Storefront section label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Men => "Men",
            Self::Women => "Women",
            Self::Kid => "Kids",
            Self::Unisex => "Unisex",
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error parsing a gender from its wire representation.
#[derive(Debug, Error)]
#[error("unknown gender: {0}")]
pub struct ParseGenderError(String);

impl std::str::FromStr for Gender {
    type Err = ParseGenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "men" => Ok(Self::Men),
            "women" => Ok(Self::Women),
            "kid" => Ok(Self::Kid),
            "unisex" => Ok(Self::Unisex),
            other => Err(ParseGenderError(other.to_string())),
        }
    }
}

/// Garment size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Size {
    XS,
    S,
    M,
    L,
    XL,
    XXL,
}

impl Size {
    /// All sizes, in display order.
    pub const ALL: [Self; 6] = [Self::XS, Self::S, Self::M, Self::L, Self::XL, Self::XXL];

    /// The uppercase wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::XS => "XS",
            Self::S => "S",
            Self::M => "M",
            Self::L => "L",
            Self::XL => "XL",
            Self::XXL => "XXL",
        }
    }
}

impl std::fmt::Display for Size {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error parsing a size from its wire representation.
#[derive(Debug, Error)]
#[error("unknown size: {0}")]
pub struct ParseSizeError(String);

impl std::str::FromStr for Size {
    type Err = ParseSizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "XS" => Ok(Self::XS),
            "S" => Ok(Self::S),
            "M" => Ok(Self::M),
            "L" => Ok(Self::L),
            "XL" => Ok(Self::XL),
            "XXL" => Ok(Self::XXL),
            other => Err(ParseSizeError(other.to_string())),
        }
    }
}

/// A catalog product record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product ID.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Unit price in the store currency. The API sends plain JSON numbers.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Long-form description.
    pub description: String,
    /// URL-safe unique slug.
    pub slug: String,
    /// Units in stock.
    pub stock: u32,
    /// Available sizes.
    #[serde(default)]
    pub sizes: Vec<Size>,
    /// Target audience.
    pub gender: Gender,
    /// Freeform lowercase tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Image filenames, resolvable through the catalog API's file endpoint.
    #[serde(default)]
    pub images: Vec<String>,
    /// Owning user, present on authenticated reads.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

impl Product {
    /// Empty draft product backing the admin create form.
    ///
    /// Carries the [`NEW_PRODUCT_ID`] sentinel so the save path can tell
    /// create from update.
    #[must_use]
    pub fn draft() -> Self {
        Self {
            id: NEW_PRODUCT_ID.to_string(),
            title: String::new(),
            price: Decimal::ZERO,
            description: String::new(),
            slug: String::new(),
            stock: 0,
            sizes: Vec::new(),
            gender: Gender::Men,
            tags: Vec::new(),
            images: Vec::new(),
            user: None,
        }
    }

    /// Whether this is the unsaved draft sentinel.
    #[must_use]
    pub fn is_draft(&self) -> bool {
        self.id == NEW_PRODUCT_ID
    }
}

/// One page of catalog products plus collection totals.
///
/// `pages` is the page count for the limit the query used; the server
/// computes it, the client only echoes it into pagination links.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductsPage {
    /// Products in listing order.
    pub products: Vec<Product>,
    /// Total matching products across all pages.
    pub total: u64,
    /// Total page count at the requested limit.
    pub pages: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gender_round_trip() {
        for gender in Gender::ALL {
            let parsed: Gender = gender.as_str().parse().expect("round trip");
            assert_eq!(parsed, gender);
        }
        assert!("cats".parse::<Gender>().is_err());
    }

    #[test]
    fn test_gender_serde_is_lowercase() {
        assert_eq!(
            serde_json::to_string(&Gender::Women).expect("serialize"),
            "\"women\""
        );
        let parsed: Gender = serde_json::from_str("\"kid\"").expect("deserialize");
        assert_eq!(parsed, Gender::Kid);
    }

    #[test]
    fn test_size_serde_is_uppercase() {
        assert_eq!(
            serde_json::to_string(&Size::XXL).expect("serialize"),
            "\"XXL\""
        );
        let parsed: Size = serde_json::from_str("\"XS\"").expect("deserialize");
        assert_eq!(parsed, Size::XS);
    }

    #[test]
    fn test_draft_product() {
        let draft = Product::draft();
        assert!(draft.is_draft());
        assert_eq!(draft.id, NEW_PRODUCT_ID);
        assert_eq!(draft.price, Decimal::ZERO);
        assert!(draft.images.is_empty());
    }

    #[test]
    fn test_product_deserializes_numeric_price() {
        let json = serde_json::json!({
            "id": "p1",
            "title": "Linen Shirt",
            "price": 39.99,
            "description": "A shirt.",
            "slug": "linen_shirt",
            "stock": 12,
            "sizes": ["S", "M"],
            "gender": "men",
            "tags": ["shirt"],
            "images": ["shirt-front.jpg"]
        });

        let product: Product = serde_json::from_value(json).expect("valid product");
        assert_eq!(product.price.to_string(), "39.99");
        assert_eq!(product.sizes, vec![Size::S, Size::M]);
        assert!(product.user.is_none());
    }
}
