//! Catalog Core - browsing state for a remote product catalog
//!
//! Platform-independent pieces of the catalog browser: the product model,
//! the paginated loader with its single-flight guard, the sentinel-driven
//! scroll trigger, and the single-row title editor. Nothing here touches the
//! network or the terminal; the fetch itself sits behind [`CatalogSource`].

pub mod editor;
pub mod error;
pub mod loader;
pub mod page;
pub mod product;
pub mod source;
pub mod trigger;

pub use editor::{CommitOutcome, EditKey, EditOutcome, EditState};
pub use error::{FetchError, FetchResult};
pub use loader::{load_next_page, CatalogState, LoadOutcome, LoadTicket};
pub use page::{PageRequest, ProductPage, PAGE_SIZE};
pub use product::{Product, ProductId};
pub use source::CatalogSource;
pub use trigger::{
    sentinel_visible, should_load_next, ObservationKey, SentinelEvent, SentinelObserver, Viewport,
    SENTINEL_ROWS,
};
