//! Terminal product browser: infinite-scroll table over a remote catalog
//! with inline title editing.

pub mod api_client;
pub mod config;
pub mod error;
pub mod events;
pub mod fetcher;
pub mod keys;
pub mod logging;
pub mod notifications;
pub mod state;
pub mod theme;
pub mod views;
pub mod widgets;
