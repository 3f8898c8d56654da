//! Background page fetches.
//!
//! Each load runs as its own task and reports back through the event
//! channel. At most one task exists at a time because tickets are only
//! issued by the catalog's single-flight guard. Dropping the fetcher aborts
//! whatever is still running.

use crate::events::TuiEvent;
use catalog_core::{CatalogSource, LoadTicket};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::AbortHandle;

pub struct PageFetcher {
    source: Arc<dyn CatalogSource>,
    sender: mpsc::Sender<TuiEvent>,
    in_flight: Option<AbortHandle>,
}

impl PageFetcher {
    pub fn new(source: Arc<dyn CatalogSource>, sender: mpsc::Sender<TuiEvent>) -> Self {
        Self {
            source,
            sender,
            in_flight: None,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    pub fn spawn(&mut self, ticket: LoadTicket) {
        tracing::debug!(
            generation = ticket.generation(),
            skip = ticket.request().skip,
            "spawning page fetch"
        );
        let source = Arc::clone(&self.source);
        let sender = self.sender.clone();
        let handle = tokio::spawn(async move {
            let result = source.fetch_page(ticket.request()).await;
            if sender
                .send(TuiEvent::PageLoaded { ticket, result })
                .await
                .is_err()
            {
                tracing::debug!("event loop closed before page arrived");
            }
        });
        self.in_flight = Some(handle.abort_handle());
    }

    /// The outstanding fetch has reported back.
    pub fn finished(&mut self) {
        self.in_flight = None;
    }

    pub fn abort(&mut self) -> bool {
        match self.in_flight.take() {
            Some(handle) => {
                handle.abort();
                tracing::debug!("in-flight page fetch aborted");
                true
            }
            None => false,
        }
    }
}

impl Drop for PageFetcher {
    fn drop(&mut self) {
        self.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use catalog_core::{CatalogState, FetchResult, PageRequest, ProductPage};
    use catalog_test_utils::InMemoryCatalog;
    use std::time::Duration;

    struct NeverAnswers;

    #[async_trait]
    impl CatalogSource for NeverAnswers {
        async fn fetch_page(&self, _request: PageRequest) -> FetchResult<ProductPage> {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn delivers_page_for_ticket() {
        let (tx, mut rx) = mpsc::channel(4);
        let mut fetcher = PageFetcher::new(Arc::new(InMemoryCatalog::with_len(12)), tx);
        let mut state = CatalogState::default();
        let ticket = state.begin_load().unwrap();

        fetcher.spawn(ticket);
        match rx.recv().await {
            Some(TuiEvent::PageLoaded {
                ticket: got,
                result: Ok(page),
            }) => {
                assert_eq!(got, ticket);
                assert_eq!(page.products.len(), 10);
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[tokio::test]
    async fn drop_aborts_outstanding_fetch() {
        let (tx, mut rx) = mpsc::channel(4);
        let mut fetcher = PageFetcher::new(Arc::new(NeverAnswers), tx);
        let mut state = CatalogState::default();
        fetcher.spawn(state.begin_load().unwrap());
        assert!(fetcher.is_busy());

        drop(fetcher);

        // The task held the last sender; once aborted the channel closes.
        let closed = tokio::time::timeout(Duration::from_secs(1), rx.recv()).await;
        assert!(matches!(closed, Ok(None)));
    }
}
