//! Catalog Page State and the incremental loader transitions.
//!
//! Loading is split in two so the single-flight guard stays observable while
//! a fetch is outstanding: [`CatalogState::begin_load`] claims the guard and
//! hands out a [`LoadTicket`], and [`CatalogState::complete_load`] applies the
//! fetch result for that ticket. [`load_next_page`] chains both around a
//! [`CatalogSource`] for callers that can simply await the fetch.

use crate::error::FetchError;
use crate::page::{PageRequest, ProductPage, PAGE_SIZE};
use crate::product::{Product, ProductId};
use crate::source::CatalogSource;
use crate::trigger::should_load_next;

/// Proof that a load was started. Only the ticket of the outstanding load is
/// accepted by [`CatalogState::complete_load`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    request: PageRequest,
    generation: u64,
}

impl LoadTicket {
    pub fn request(&self) -> PageRequest {
        self.request
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// What a load attempt did to the state.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// Guard was set or the catalog is exhausted; nothing was requested.
    Skipped,
    /// A non-empty page was appended and the cursor advanced.
    Appended { count: usize },
    /// The page came back empty. Terminal.
    Exhausted,
    /// The fetch failed; cursor and exhaustion are untouched.
    Failed(FetchError),
    /// The ticket no longer matches the outstanding load (it was cancelled).
    Stale,
}

/// Catalog Page State: the products fetched so far plus the pagination
/// bookkeeping. Products are append-only in arrival order.
#[derive(Debug, Clone)]
pub struct CatalogState {
    products: Vec<Product>,
    page_size: u32,
    cursor: u32,
    exhausted: bool,
    in_flight: Option<u64>,
    generation: u64,
    total: Option<u32>,
}

impl CatalogState {
    pub fn new(page_size: u32) -> Self {
        Self {
            products: Vec::new(),
            page_size,
            cursor: 0,
            exhausted: false,
            in_flight: None,
            generation: 0,
            total: None,
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn products_mut(&mut self) -> &mut [Product] {
        &mut self.products
    }

    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Offset of the next unfetched item.
    pub fn cursor(&self) -> u32 {
        self.cursor
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// The single-flight guard.
    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Total item count last reported by the remote catalog, if it reports one.
    pub fn total_hint(&self) -> Option<u32> {
        self.total
    }

    /// Claim the single-flight guard and describe the page to fetch.
    ///
    /// Returns `None` without touching anything when a load is already
    /// outstanding or the catalog is exhausted.
    pub fn begin_load(&mut self) -> Option<LoadTicket> {
        if !should_load_next(self.is_loading(), self.exhausted) {
            tracing::trace!(
                loading = self.is_loading(),
                exhausted = self.exhausted,
                "load request suppressed"
            );
            return None;
        }
        self.generation += 1;
        self.in_flight = Some(self.generation);
        let ticket = LoadTicket {
            request: PageRequest::new(self.page_size, self.cursor),
            generation: self.generation,
        };
        tracing::debug!(
            skip = ticket.request.skip,
            limit = ticket.request.limit,
            "loading catalog page"
        );
        Some(ticket)
    }

    /// Apply the result of the fetch started by `ticket`.
    ///
    /// The guard is released on every path. Failures are logged and leave the
    /// cursor in place so the next trigger retries the same offset.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<ProductPage, FetchError>,
    ) -> LoadOutcome {
        if self.in_flight != Some(ticket.generation) {
            tracing::debug!(
                generation = ticket.generation,
                skip = ticket.request.skip,
                "discarding result of a cancelled load"
            );
            return LoadOutcome::Stale;
        }
        self.in_flight = None;

        match result {
            Ok(page) if page.is_empty() => {
                self.exhausted = true;
                tracing::info!(loaded = self.products.len(), "catalog exhausted");
                LoadOutcome::Exhausted
            }
            Ok(page) => {
                let count = page.products.len();
                if page.total.is_some() {
                    self.total = page.total;
                }
                self.products.extend(page.products);
                self.cursor += self.page_size;
                tracing::debug!(
                    count,
                    cursor = self.cursor,
                    loaded = self.products.len(),
                    "catalog page appended"
                );
                LoadOutcome::Appended { count }
            }
            Err(err) => {
                tracing::warn!(
                    skip = ticket.request.skip,
                    error = %err,
                    "error fetching products"
                );
                LoadOutcome::Failed(err)
            }
        }
    }

    /// Release the guard held by an outstanding load and invalidate its ticket.
    pub fn cancel_in_flight(&mut self) -> bool {
        let cancelled = self.in_flight.take().is_some();
        if cancelled {
            tracing::debug!(cursor = self.cursor, "in-flight catalog load cancelled");
        }
        cancelled
    }
}

impl Default for CatalogState {
    fn default() -> Self {
        Self::new(PAGE_SIZE)
    }
}

/// Fetch the next page from `source` and apply it.
pub async fn load_next_page<S>(state: &mut CatalogState, source: &S) -> LoadOutcome
where
    S: CatalogSource + ?Sized,
{
    let Some(ticket) = state.begin_load() else {
        return LoadOutcome::Skipped;
    };
    let result = source.fetch_page(ticket.request()).await;
    state.complete_load(ticket, result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: u64) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Product {}", id),
            brand: Some("Brand".to_string()),
            category: "misc".to_string(),
            price: id as f64,
            rating: 4.0,
        }
    }

    fn page(ids: std::ops::Range<u64>) -> ProductPage {
        ProductPage::new(ids.map(product).collect())
    }

    #[test]
    fn test_new_state_is_empty_and_idle() {
        let state = CatalogState::default();
        assert!(state.is_empty());
        assert_eq!(state.cursor(), 0);
        assert!(!state.is_loading());
        assert!(!state.is_exhausted());
        assert_eq!(state.page_size(), PAGE_SIZE);
    }

    #[test]
    fn test_first_load_requests_from_zero() {
        let mut state = CatalogState::default();
        let ticket = state.begin_load().unwrap();
        assert_eq!(ticket.request(), PageRequest::new(10, 0));
        assert!(state.is_loading());
    }

    #[test]
    fn test_begin_load_is_noop_while_in_flight() {
        let mut state = CatalogState::default();
        let first = state.begin_load();
        assert!(first.is_some());
        assert!(state.begin_load().is_none());
        assert!(state.begin_load().is_none());
        assert_eq!(state.cursor(), 0);
    }

    #[test]
    fn test_full_page_appends_and_advances_cursor() {
        let mut state = CatalogState::default();
        let ticket = state.begin_load().unwrap();
        let outcome = state.complete_load(ticket, Ok(page(1..11).with_total(194)));
        assert_eq!(outcome, LoadOutcome::Appended { count: 10 });
        assert_eq!(state.len(), 10);
        assert_eq!(state.cursor(), 10);
        assert!(!state.is_loading());
        assert_eq!(state.total_hint(), Some(194));
    }

    #[test]
    fn test_short_page_still_advances_by_page_size() {
        let mut state = CatalogState::default();
        let ticket = state.begin_load().unwrap();
        state.complete_load(ticket, Ok(page(1..5)));
        assert_eq!(state.len(), 4);
        assert_eq!(state.cursor(), 10);
    }

    #[test]
    fn test_empty_page_exhausts_without_touching_list() {
        let mut state = CatalogState::default();
        let ticket = state.begin_load().unwrap();
        state.complete_load(ticket, Ok(page(1..11)));

        let ticket = state.begin_load().unwrap();
        let outcome = state.complete_load(ticket, Ok(ProductPage::empty()));

        assert_eq!(outcome, LoadOutcome::Exhausted);
        assert!(state.is_exhausted());
        assert_eq!(state.len(), 10);
        assert_eq!(state.cursor(), 10);
        assert!(state.begin_load().is_none());
    }

    #[test]
    fn test_failure_releases_guard_and_keeps_cursor() {
        let mut state = CatalogState::default();
        let ticket = state.begin_load().unwrap();
        let outcome = state.complete_load(ticket, Err(FetchError::transport("connection reset")));

        assert!(matches!(outcome, LoadOutcome::Failed(FetchError::Transport { .. })));
        assert!(!state.is_loading());
        assert!(!state.is_exhausted());
        assert_eq!(state.cursor(), 0);
        assert!(state.is_empty());

        let retry = state.begin_load().unwrap();
        assert_eq!(retry.request().skip, 0);
    }

    #[test]
    fn test_cancelled_ticket_is_stale() {
        let mut state = CatalogState::default();
        let ticket = state.begin_load().unwrap();
        assert!(state.cancel_in_flight());
        assert!(!state.is_loading());

        let outcome = state.complete_load(ticket, Ok(page(1..11)));
        assert_eq!(outcome, LoadOutcome::Stale);
        assert!(state.is_empty());
        assert_eq!(state.cursor(), 0);
    }

    #[test]
    fn test_old_ticket_cannot_complete_newer_load() {
        let mut state = CatalogState::default();
        let old = state.begin_load().unwrap();
        state.cancel_in_flight();
        let current = state.begin_load().unwrap();

        assert_eq!(state.complete_load(old, Ok(page(1..11))), LoadOutcome::Stale);
        assert!(state.is_loading());
        assert_eq!(
            state.complete_load(current, Ok(page(1..11))),
            LoadOutcome::Appended { count: 10 }
        );
    }

    #[test]
    fn test_cancel_without_load_is_noop() {
        let mut state = CatalogState::default();
        assert!(!state.cancel_in_flight());
    }
}
