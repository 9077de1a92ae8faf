//! End-to-end cache behavior for the catalog client.
//!
//! Every test spins up its own mock API and asserts on the request counter:
//! a cache hit is precisely "the counter did not move".

use driftwood_catalog::{CatalogError, ListKey, ProductPayload};
use driftwood_core::Gender;
use driftwood_integration_tests::{ADMIN_TOKEN, MockCatalog, seed_products};

#[tokio::test]
async fn end_to_end_pagination_scenario() {
    let mock = MockCatalog::spawn(seed_products("men", 27, Gender::Men)).await;
    let client = mock.client();

    let key = ListKey::new(9, 0, Some(Gender::Men));
    assert_eq!(key.to_string(), "9-0-men");

    let first = client.list_products(&key).await.expect("first page");
    assert_eq!(first.products.len(), 9);
    assert_eq!(first.total, 27);
    assert_eq!(first.pages, 3);
    assert_eq!(mock.requests(), 1);

    // Same query tuple again: answered from the cache, zero network calls
    let second = client.list_products(&key).await.expect("cached page");
    assert_eq!(second, first);
    assert_eq!(mock.requests(), 1);

    // A different offset is a different key and does hit the network
    let page_three = client
        .list_products(&ListKey::new(9, 18, Some(Gender::Men)))
        .await
        .expect("third page");
    assert_eq!(page_three.products.len(), 9);
    assert_eq!(mock.requests(), 2);
}

#[tokio::test]
async fn distinct_query_tuples_cached_separately() {
    let mut seed = seed_products("men", 3, Gender::Men);
    seed.extend(seed_products("women", 3, Gender::Women));
    let mock = MockCatalog::spawn(seed).await;
    let client = mock.client();

    let all = ListKey::new(9, 0, None);
    let women = ListKey::new(9, 0, Some(Gender::Women));

    assert_eq!(
        client.list_products(&all).await.expect("all").total,
        6
    );
    assert_eq!(
        client.list_products(&women).await.expect("women").total,
        3
    );
    assert_eq!(mock.requests(), 2);

    // Both entries live side by side
    client.list_products(&all).await.expect("all cached");
    client.list_products(&women).await.expect("women cached");
    assert_eq!(mock.requests(), 2);
}

#[tokio::test]
async fn detail_cached_under_fetch_identifier() {
    let mock = MockCatalog::spawn(seed_products("men", 1, Gender::Men)).await;
    let client = mock.client();

    // Fetch by slug, twice
    let by_slug = client.get_product("men_item_1").await.expect("by slug");
    client.get_product("men_item_1").await.expect("cached");
    assert_eq!(mock.requests(), 1);

    // The same record by id is a separate cache entry and fetches again
    let by_id = client.get_product(&by_slug.id).await.expect("by id");
    assert_eq!(by_id, by_slug);
    assert_eq!(mock.requests(), 2);
}

#[tokio::test]
async fn draft_sentinel_never_hits_network() {
    let mock = MockCatalog::spawn(Vec::new()).await;
    let client = mock.client();

    let draft = client.get_product("new").await.expect("draft");
    assert!(draft.is_draft());
    assert_eq!(mock.requests(), 0);
}

#[tokio::test]
async fn failed_fetch_is_not_cached() {
    let mock = MockCatalog::spawn(Vec::new()).await;
    let client = mock.client();

    for _ in 0..2 {
        let err = client.get_product("ghost").await.expect_err("no such product");
        assert!(matches!(err, CatalogError::NotFound(_)));
    }

    // Both misses went to the network; nothing was stored in between
    assert_eq!(mock.requests(), 2);
}

#[tokio::test]
async fn write_reconciles_cached_listings() {
    let mock = MockCatalog::spawn(seed_products("men", 2, Gender::Men)).await;
    let client = mock.client();

    let key = ListKey::new(9, 0, Some(Gender::Men));
    client.list_products(&key).await.expect("listing");
    assert_eq!(mock.requests(), 1);

    let payload = ProductPayload {
        title: Some("Rebranded Jacket".to_string()),
        ..ProductPayload::default()
    };
    client
        .update_product(ADMIN_TOKEN, "men-1", &payload)
        .await
        .expect("update");
    assert_eq!(mock.requests(), 2);

    // The cached listing was rewritten in place: no refetch, fresh title,
    // order and the untouched neighbor preserved
    let listing = client.list_products(&key).await.expect("cached listing");
    assert_eq!(mock.requests(), 2);
    assert_eq!(listing.products[0].id, "men-1");
    assert_eq!(listing.products[0].title, "Rebranded Jacket");
    assert_eq!(listing.products[1].title, "men item 2");

    // The updated record is also readable by id without a network call
    let detail = client.get_product("men-1").await.expect("reconciled detail");
    assert_eq!(detail.title, "Rebranded Jacket");
    assert_eq!(mock.requests(), 2);
}

#[tokio::test]
async fn failed_write_leaves_cache_untouched() {
    let mock = MockCatalog::spawn(seed_products("men", 1, Gender::Men)).await;
    let client = mock.client();

    let key = ListKey::new(9, 0, Some(Gender::Men));
    let before = client.list_products(&key).await.expect("listing");

    let err = client
        .update_product(ADMIN_TOKEN, "missing-id", &ProductPayload::default())
        .await
        .expect_err("unknown id");
    assert!(matches!(err, CatalogError::NotFound(_)));

    let after = client.list_products(&key).await.expect("still cached");
    assert_eq!(after, before);
    // 1 listing + 1 failed write; the second listing read was a cache hit
    assert_eq!(mock.requests(), 2);
}
