//! Event types for the TUI event loop.

use catalog_core::{FetchResult, LoadTicket, ProductPage};
use crossterm::event::KeyEvent;

#[derive(Debug, Clone)]
pub enum TuiEvent {
    Input(KeyEvent),
    Resize { width: u16, height: u16 },
    PageLoaded {
        ticket: LoadTicket,
        result: FetchResult<ProductPage>,
    },
}
