//! Admin-side flows against the mock catalog API: auth, product
//! creation, and image upload.

use rust_decimal::Decimal;

use driftwood_catalog::{CatalogError, ImageUpload, ProductPayload};
use driftwood_core::{Gender, Size};
use driftwood_integration_tests::{
    ADMIN_EMAIL, ADMIN_PASSWORD, ADMIN_TOKEN, MockCatalog, seed_products,
};

#[tokio::test]
async fn login_round_trip() {
    let mock = MockCatalog::spawn(Vec::new()).await;
    let client = mock.client();

    let session = client
        .login(ADMIN_EMAIL, ADMIN_PASSWORD)
        .await
        .expect("valid credentials");
    assert_eq!(session.token, ADMIN_TOKEN);
    assert!(session.user.is_admin());

    let err = client
        .login(ADMIN_EMAIL, "wrong-password")
        .await
        .expect_err("bad credentials");
    assert!(matches!(err, CatalogError::Unauthorized));
}

#[tokio::test]
async fn check_status_validates_token() {
    let mock = MockCatalog::spawn(Vec::new()).await;
    let client = mock.client();

    let session = client.check_status(ADMIN_TOKEN).await.expect("live token");
    assert!(session.user.is_admin());

    let err = client
        .check_status("bogus-token")
        .await
        .expect_err("dead token");
    assert!(matches!(err, CatalogError::Unauthorized));
}

#[tokio::test]
async fn create_product_then_read_back_without_network() {
    let mock = MockCatalog::spawn(Vec::new()).await;
    let client = mock.client();

    let payload = ProductPayload {
        title: Some("Tidal Hoodie".to_string()),
        description: Some("Heavyweight fleece.".to_string()),
        slug: Some("tidal_hoodie".to_string()),
        price: Some(Decimal::new(8900, 2)),
        stock: Some(15),
        sizes: Some(vec![Size::M, Size::L]),
        gender: Some(Gender::Unisex),
        tags: Some(vec!["hoodie".to_string()]),
        images: Some(vec!["tidal-front.jpg".to_string()]),
    };

    let created = client
        .create_product(ADMIN_TOKEN, &payload)
        .await
        .expect("create");
    assert_eq!(created.title, "Tidal Hoodie");
    assert!(!created.id.is_empty());
    let after_create = mock.requests();

    // The write reconciled the cache: reading the new product by id is local
    let read_back = client.get_product(&created.id).await.expect("read back");
    assert_eq!(read_back, created);
    assert_eq!(mock.requests(), after_create);
}

#[tokio::test]
async fn writes_require_admin_token() {
    let mock = MockCatalog::spawn(seed_products("men", 1, Gender::Men)).await;
    let client = mock.client();

    let err = client
        .create_product("bogus-token", &ProductPayload::default())
        .await
        .expect_err("create without auth");
    assert!(matches!(err, CatalogError::Unauthorized));

    let err = client
        .upload_image(
            "bogus-token",
            ImageUpload {
                filename: "front.jpg".to_string(),
                bytes: vec![0xFF, 0xD8, 0xFF],
            },
        )
        .await
        .expect_err("upload without auth");
    assert!(matches!(err, CatalogError::Unauthorized));
}

#[tokio::test]
async fn upload_image_returns_stored_filename() {
    let mock = MockCatalog::spawn(Vec::new()).await;
    let client = mock.client();

    let stored = client
        .upload_image(
            ADMIN_TOKEN,
            ImageUpload {
                filename: "front.jpg".to_string(),
                bytes: vec![0xFF, 0xD8, 0xFF, 0xE0],
            },
        )
        .await
        .expect("upload");

    // The API keeps the original name reachable inside the stored one
    assert!(stored.ends_with("front.jpg"));
}

#[tokio::test]
async fn upload_batch_preserves_order() {
    let mock = MockCatalog::spawn(Vec::new()).await;
    let client = mock.client();

    let uploads = vec![
        ImageUpload {
            filename: "one.jpg".to_string(),
            bytes: vec![1],
        },
        ImageUpload {
            filename: "two.jpg".to_string(),
            bytes: vec![2],
        },
    ];

    let stored = client
        .upload_images(ADMIN_TOKEN, uploads)
        .await
        .expect("batch upload");
    assert_eq!(stored.len(), 2);
    assert!(stored[0].ends_with("one.jpg"));
    assert!(stored[1].ends_with("two.jpg"));
}
