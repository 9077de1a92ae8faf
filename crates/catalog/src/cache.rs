//! In-memory cache for catalog API responses.
//!
//! Listing responses are keyed by the exact query tuple (limit, offset,
//! gender); detail responses are keyed by whatever identifier the fetch
//! used - id or slug. Entries never expire and are never evicted: a write
//! through [`CatalogCache::reconcile`] is the only thing that changes a
//! stored value. That trades memory (and cross-session staleness) for
//! zero-latency revisits within a session, which is the cache's whole job.
//!
//! A product fetched once by slug and later by id lives in the map twice;
//! the two copies are reconciled by id on writes, but a slug-keyed copy of
//! a record whose slug was never used in a reconciled write can diverge.
//! That mirrors the id/slug split in the API itself and is deliberately
//! left unfixed here.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use driftwood_core::{Gender, Paginator, Product, ProductsPage};

/// Key identifying one cached product listing.
///
/// Two keys are equal iff all three fields are equal. `Display` renders the
/// delimited `limit-offset-gender` form (empty gender segment for the
/// unfiltered listing) used in log lines.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListKey {
    /// Page capacity, at least 1.
    pub limit: u32,
    /// 0-based row offset.
    pub offset: u32,
    /// Gender filter; `None` lists the whole catalog.
    pub gender: Option<Gender>,
}

impl ListKey {
    /// Create a listing key.
    #[must_use]
    pub const fn new(limit: u32, offset: u32, gender: Option<Gender>) -> Self {
        Self {
            limit,
            offset,
            gender,
        }
    }

    /// Derive the key for a pagination cursor position.
    #[must_use]
    pub const fn for_page(paginator: &Paginator, gender: Option<Gender>) -> Self {
        Self::new(paginator.limit(), paginator.offset(), gender)
    }
}

impl std::fmt::Display for ListKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let gender = self.gender.map_or("", Gender::as_str);
        write!(f, "{}-{}-{}", self.limit, self.offset, gender)
    }
}

/// Session-scoped cache of catalog reads.
///
/// Owned by [`CatalogClient`](crate::CatalogClient), one instance per
/// application context. All lookups clone out of the maps; mutation happens
/// only under the write locks, and the reconcile pass holds them without
/// awaiting so it is atomic with respect to other tasks.
#[derive(Debug, Default)]
pub struct CatalogCache {
    lists: RwLock<HashMap<ListKey, ProductsPage>>,
    products: RwLock<HashMap<String, Product>>,
}

impl CatalogCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a cached listing. Pure read, no side effects.
    #[must_use]
    pub fn list(&self, key: &ListKey) -> Option<ProductsPage> {
        self.lists
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    /// Store a listing response, overwriting any previous entry for the key.
    pub fn store_list(&self, key: ListKey, page: ProductsPage) {
        self.lists
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, page);
    }

    /// Look up a cached product by the identifier it was fetched with.
    #[must_use]
    pub fn product(&self, term: &str) -> Option<Product> {
        self.products
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(term)
            .cloned()
    }

    /// Store a product response, overwriting any previous entry for the key.
    pub fn store_product(&self, term: impl Into<String>, product: Product) {
        self.products
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(term.into(), product);
    }

    /// Fold a just-written product back into every cached view of it.
    ///
    /// Stores the record under its own id, then rewrites each cached listing
    /// in place, swapping any element with a matching id for the new record.
    /// Listing order is preserved; listings without a match are untouched.
    /// The whole pass runs under the write locks with no suspension point.
    pub fn reconcile(&self, product: &Product) {
        self.products
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(product.id.clone(), product.clone());

        let mut lists = self.lists.write().unwrap_or_else(PoisonError::into_inner);
        for page in lists.values_mut() {
            for entry in &mut page.products {
                if entry.id == product.id {
                    *entry = product.clone();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn product(id: &str, title: &str) -> Product {
        Product {
            id: id.to_string(),
            title: title.to_string(),
            price: Decimal::new(2999, 2),
            description: format!("{title} description"),
            slug: title.to_lowercase().replace(' ', "_"),
            stock: 5,
            sizes: vec![],
            gender: Gender::Men,
            tags: vec![],
            images: vec![],
            user: None,
        }
    }

    fn page(products: Vec<Product>, total: u64, pages: u32) -> ProductsPage {
        ProductsPage {
            products,
            total,
            pages,
        }
    }

    #[test]
    fn test_list_key_display() {
        assert_eq!(
            ListKey::new(9, 0, Some(Gender::Men)).to_string(),
            "9-0-men"
        );
        assert_eq!(ListKey::new(9, 18, None).to_string(), "9-18-");
    }

    #[test]
    fn test_list_key_equality_is_field_wise() {
        let key = ListKey::new(9, 0, Some(Gender::Women));
        assert_eq!(key, ListKey::new(9, 0, Some(Gender::Women)));
        assert_ne!(key, ListKey::new(9, 9, Some(Gender::Women)));
        assert_ne!(key, ListKey::new(9, 0, None));
    }

    #[test]
    fn test_list_miss_then_hit() {
        let cache = CatalogCache::new();
        let key = ListKey::new(9, 0, Some(Gender::Men));

        assert!(cache.list(&key).is_none());

        let stored = page(vec![product("p1", "Linen Shirt")], 1, 1);
        cache.store_list(key.clone(), stored.clone());

        assert_eq!(cache.list(&key), Some(stored.clone()));
        // Repeated reads return the same value
        assert_eq!(cache.list(&key), Some(stored));
    }

    #[test]
    fn test_store_list_overwrites() {
        let cache = CatalogCache::new();
        let key = ListKey::new(9, 0, None);

        cache.store_list(key.clone(), page(vec![], 0, 0));
        cache.store_list(key.clone(), page(vec![product("p1", "Cap")], 1, 1));

        let entry = cache.list(&key).expect("entry present");
        assert_eq!(entry.total, 1);
    }

    #[test]
    fn test_product_by_fetch_key() {
        let cache = CatalogCache::new();

        assert!(cache.product("linen_shirt").is_none());

        cache.store_product("linen_shirt", product("p1", "Linen Shirt"));
        let cached = cache.product("linen_shirt").expect("cached by slug");
        assert_eq!(cached.id, "p1");

        // Only the fetch key is indexed, not the other identifier
        assert!(cache.product("p1").is_none());
    }

    #[test]
    fn test_reconcile_replaces_matching_list_entries() {
        let cache = CatalogCache::new();
        let men = ListKey::new(9, 0, Some(Gender::Men));
        let women = ListKey::new(9, 0, Some(Gender::Women));

        cache.store_list(
            men.clone(),
            page(
                vec![product("p1", "Old Title"), product("p2", "Keep Me")],
                2,
                1,
            ),
        );
        cache.store_list(
            women.clone(),
            page(vec![product("p3", "Untouched")], 1, 1),
        );

        let updated = product("p1", "New Title");
        cache.reconcile(&updated);

        let men_page = cache.list(&men).expect("men listing cached");
        assert_eq!(men_page.products[0].title, "New Title");
        assert_eq!(men_page.products[1].title, "Keep Me");
        // Order preserved
        assert_eq!(men_page.products[0].id, "p1");

        let women_page = cache.list(&women).expect("women listing cached");
        assert_eq!(women_page.products[0].title, "Untouched");

        // The record is now readable by id without a fetch
        assert_eq!(cache.product("p1").expect("by id").title, "New Title");
    }

    #[test]
    fn test_reconcile_overwrites_prior_id_entry() {
        let cache = CatalogCache::new();
        cache.store_product("p1", product("p1", "First"));

        cache.reconcile(&product("p1", "Second"));

        assert_eq!(cache.product("p1").expect("present").title, "Second");
    }
}
