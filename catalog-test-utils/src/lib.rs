//! Catalog Test Utilities
//!
//! Shared test infrastructure for the catalog workspace:
//! - In-memory and scripted `CatalogSource` implementations
//! - Proptest generators for products and pages
//! - Fixtures for common scenarios

pub use catalog_core::{
    CatalogSource, FetchError, FetchResult, PageRequest, Product, ProductId, ProductPage,
    PAGE_SIZE,
};

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

// ============================================================================
// MOCK SOURCES
// ============================================================================

/// Serves pages out of a fixed product list, like the real catalog would.
#[derive(Debug)]
pub struct InMemoryCatalog {
    products: Vec<Product>,
    requests: Mutex<Vec<PageRequest>>,
}

impl InMemoryCatalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// A catalog of `count` products with ids `1..=count`.
    pub fn with_len(count: u64) -> Self {
        Self::new(fixtures::products(1..count + 1))
    }

    pub fn requests(&self) -> Vec<PageRequest> {
        self.requests
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl CatalogSource for InMemoryCatalog {
    async fn fetch_page(&self, request: PageRequest) -> FetchResult<ProductPage> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request);
        }
        let products = self
            .products
            .iter()
            .skip(request.skip as usize)
            .take(request.limit as usize)
            .cloned()
            .collect();
        Ok(ProductPage {
            products,
            total: Some(self.products.len() as u32),
            skip: Some(request.skip),
            limit: Some(request.limit),
        })
    }
}

/// Replays a queue of canned results, one per fetch. Once the script runs
/// out every fetch returns an empty page.
#[derive(Debug, Default)]
pub struct ScriptedSource {
    script: Mutex<VecDeque<FetchResult<ProductPage>>>,
    requests: Mutex<Vec<PageRequest>>,
}

impl ScriptedSource {
    pub fn new(script: impl IntoIterator<Item = FetchResult<ProductPage>>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn push(&self, result: FetchResult<ProductPage>) {
        if let Ok(mut script) = self.script.lock() {
            script.push_back(result);
        }
    }

    pub fn requests(&self) -> Vec<PageRequest> {
        self.requests
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().map(|guard| guard.len()).unwrap_or(0)
    }
}

#[async_trait]
impl CatalogSource for ScriptedSource {
    async fn fetch_page(&self, request: PageRequest) -> FetchResult<ProductPage> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request);
        }
        let next = self
            .script
            .lock()
            .ok()
            .and_then(|mut script| script.pop_front());
        next.unwrap_or_else(|| Ok(ProductPage::empty()))
    }
}

// ============================================================================
// PROPTEST GENERATORS
// ============================================================================

pub mod generators {
    //! Proptest strategies for catalog types.

    use super::*;
    use proptest::prelude::*;

    pub fn arb_product_id() -> impl Strategy<Value = ProductId> {
        (1u64..100_000).prop_map(ProductId::new)
    }

    pub fn arb_title() -> impl Strategy<Value = String> {
        prop_oneof![Just(String::new()), "[A-Za-z0-9 '&-]{1,40}"]
    }

    /// Generate a product with the given id and arbitrary display fields.
    pub fn arb_product_with_id(id: ProductId) -> impl Strategy<Value = Product> {
        (
            arb_title(),
            proptest::option::of("[A-Za-z ]{1,16}"),
            "[a-z-]{3,16}",
            0.0f64..5_000.0,
            0.0f64..5.0,
        )
            .prop_map(move |(title, brand, category, price, rating)| Product {
                id,
                title,
                brand,
                category,
                price,
                rating,
            })
    }

    /// A list of products with distinct ids `1..=len`.
    pub fn arb_catalog(max_len: usize) -> impl Strategy<Value = Vec<Product>> {
        (0..=max_len).prop_flat_map(|len| {
            (1..=len as u64)
                .map(|id| arb_product_with_id(ProductId::new(id)))
                .collect::<Vec<_>>()
        })
    }

    pub fn arb_fetch_error() -> impl Strategy<Value = FetchError> {
        prop_oneof![
            "[a-z ]{1,20}".prop_map(FetchError::transport),
            (400u16..600, "[a-z ]{0,20}")
                .prop_map(|(status, body)| FetchError::Status { status, body }),
            "[a-z ]{1,20}".prop_map(FetchError::decode),
        ]
    }
}

// ============================================================================
// TEST FIXTURES
// ============================================================================

pub mod fixtures {
    //! Pre-built fixtures for common testing scenarios.

    use super::*;

    pub fn product(id: u64, title: &str) -> Product {
        Product {
            id: ProductId::new(id),
            title: title.to_string(),
            brand: Some("Essence".to_string()),
            category: "beauty".to_string(),
            price: 9.99,
            rating: 4.94,
        }
    }

    pub fn products(ids: std::ops::Range<u64>) -> Vec<Product> {
        ids.map(|id| product(id, &format!("Product {}", id))).collect()
    }

    /// A page holding products with the given ids.
    pub fn page(ids: std::ops::Range<u64>) -> ProductPage {
        ProductPage::new(products(ids))
    }

    /// Two full pages followed by an empty one.
    pub fn twenty_item_script() -> Vec<FetchResult<ProductPage>> {
        vec![Ok(page(1..11)), Ok(page(11..21)), Ok(ProductPage::empty())]
    }
}
