//! Page request and response shapes for the paginated catalog read

use crate::product::Product;
use serde::{Deserialize, Serialize};

/// Number of products requested per page.
pub const PAGE_SIZE: u32 = 10;

/// Parameters of a single paginated read: `limit` items starting at `skip`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub limit: u32,
    pub skip: u32,
}

impl PageRequest {
    pub fn new(limit: u32, skip: u32) -> Self {
        Self { limit, skip }
    }
}

/// One page of products. An empty `products` list means the catalog has
/// nothing at or beyond the requested offset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPage {
    pub products: Vec<Product>,
    #[serde(default)]
    pub total: Option<u32>,
    #[serde(default)]
    pub skip: Option<u32>,
    #[serde(default)]
    pub limit: Option<u32>,
}

impl ProductPage {
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products,
            total: None,
            skip: None,
            limit: None,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn with_total(mut self, total: u32) -> Self {
        self.total = Some(total);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
