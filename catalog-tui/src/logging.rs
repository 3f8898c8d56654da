//! Structured logging to a file.
//!
//! The terminal belongs to the UI, so log records never go to stdout/stderr.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const DEFAULT_FILTER: &str = "catalog_tui=info,catalog_core=info,warn";

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Failed to open log file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to init subscriber: {0}")]
    Init(String),
}

/// `RUST_LOG` if set and valid, the default directives otherwise.
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

pub fn init(log_path: &Path) -> Result<(), LoggingError> {
    let open_err = |source| LoggingError::Open {
        path: log_path.to_path_buf(),
        source,
    };
    if let Some(parent) = log_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(open_err)?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .map_err(open_err)?;

    tracing_subscriber::registry()
        .with(env_filter())
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init()
        .map_err(|e| LoggingError::Init(e.to_string()))?;

    tracing::info!(log_path = %log_path.display(), "logging initialized");
    Ok(())
}
