//! Scroll trigger: deciding when the sentinel row should pull the next page.
//!
//! Detecting visibility is the renderer's job. This module only takes the
//! answer ("is the sentinel fully inside the viewport right now?") and turns
//! it into at most one [`SentinelEvent`] per boundary crossing.

use crate::loader::CatalogState;

/// Rows the sentinel occupies directly below the last product.
pub const SENTINEL_ROWS: usize = 1;

/// Whether a sentinel event should start a load.
pub fn should_load_next(in_flight: bool, exhausted: bool) -> bool {
    !in_flight && !exhausted
}

/// The window of list rows currently on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub offset: usize,
    pub height: usize,
}

impl Viewport {
    pub fn new(offset: usize, height: usize) -> Self {
        Self { offset, height }
    }

    /// One past the last visible row.
    pub fn end(&self) -> usize {
        self.offset + self.height
    }

    /// True when every row in `start..start + len` is on screen.
    pub fn fully_contains(&self, start: usize, len: usize) -> bool {
        len > 0 && start >= self.offset && start + len <= self.end()
    }
}

/// Whether the sentinel following `product_count` rows is fully visible.
pub fn sentinel_visible(viewport: Viewport, product_count: usize) -> bool {
    viewport.fully_contains(product_count, SENTINEL_ROWS)
}

/// State the observation is keyed on. Any change re-establishes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObservationKey {
    pub cursor: u32,
    pub exhausted: bool,
    pub in_flight: bool,
}

impl ObservationKey {
    pub fn of(state: &CatalogState) -> Self {
        Self {
            cursor: state.cursor(),
            exhausted: state.is_exhausted(),
            in_flight: state.is_loading(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentinelEvent {
    FullyVisible,
}

/// Edge-triggered observation of the sentinel.
///
/// A freshly established observation reports a sentinel that is already
/// visible, so a short list keeps filling the viewport page by page. Once
/// exhaustion is seen the sentinel is gone and the observer is released for
/// good.
#[derive(Debug, Clone, Default)]
pub struct SentinelObserver {
    key: Option<ObservationKey>,
    was_visible: bool,
    released: bool,
}

impl SentinelObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_observing(&self) -> bool {
        !self.released
    }

    /// Tear the observation down. Nothing is reported afterwards.
    pub fn release(&mut self) {
        if !self.released {
            tracing::debug!("sentinel observation released");
        }
        self.released = true;
        self.key = None;
        self.was_visible = false;
    }

    pub fn observe(&mut self, key: ObservationKey, fully_visible: bool) -> Option<SentinelEvent> {
        if self.released {
            return None;
        }
        if key.exhausted {
            self.release();
            return None;
        }
        if self.key != Some(key) {
            self.key = Some(key);
            self.was_visible = false;
        }
        let crossed = fully_visible && !self.was_visible;
        self.was_visible = fully_visible;
        crossed.then_some(SentinelEvent::FullyVisible)
    }
}
