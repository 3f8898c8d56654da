//! Error types for catalog fetches

use thiserror::Error;

/// A failed page fetch.
///
/// Every variant is transient: the loader logs it, leaves the cursor where it
/// was, and lets the next trigger try again.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("Catalog request failed: {reason}")]
    Transport { reason: String },

    #[error("Catalog responded with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode catalog page: {reason}")]
    Decode { reason: String },
}

impl FetchError {
    pub fn transport(reason: impl Into<String>) -> Self {
        Self::Transport {
            reason: reason.into(),
        }
    }

    pub fn decode(reason: impl Into<String>) -> Self {
        Self::Decode {
            reason: reason.into(),
        }
    }
}

pub type FetchResult<T> = Result<T, FetchError>;
