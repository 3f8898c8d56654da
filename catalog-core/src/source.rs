//! The seam between the loader and whatever actually serves pages

use crate::error::FetchResult;
use crate::page::{PageRequest, ProductPage};
use async_trait::async_trait;

/// A paginated, read-only product catalog.
///
/// Implementations report failures through the returned result and never
/// panic on bad responses. No retry happens at this layer.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_page(&self, request: PageRequest) -> FetchResult<ProductPage>;
}
