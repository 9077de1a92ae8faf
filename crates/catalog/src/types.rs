//! Request/response types specific to the catalog API wire contract.

use driftwood_core::{Gender, Size, User};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A successful auth exchange: the user record plus a bearer token for
/// subsequent authenticated calls.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthSession {
    pub user: User,
    pub token: String,
}

/// Partial product body for create/update calls.
///
/// Every field is optional; update sends only what changed, create fills in
/// the lot. Absent fields are omitted from the JSON body entirely.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProductPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sizes: Option<Vec<Size>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
}

/// An image file queued for upload to the catalog's file endpoint.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    /// Original filename, kept so the server can pick an extension.
    pub filename: String,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}

/// Response body of the file upload endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UploadedFile {
    pub file_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_omits_absent_fields() {
        let payload = ProductPayload {
            title: Some("Linen Shirt".to_string()),
            ..ProductPayload::default()
        };

        let json = serde_json::to_value(&payload).expect("serialize");
        assert_eq!(json, serde_json::json!({ "title": "Linen Shirt" }));
    }

    #[test]
    fn test_payload_serializes_sizes_and_gender() {
        let payload = ProductPayload {
            sizes: Some(vec![Size::S, Size::M]),
            gender: Some(Gender::Kid),
            ..ProductPayload::default()
        };

        let json = serde_json::to_value(&payload).expect("serialize");
        assert_eq!(json["sizes"], serde_json::json!(["S", "M"]));
        assert_eq!(json["gender"], serde_json::json!("kid"));
    }
}
