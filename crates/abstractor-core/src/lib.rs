use std::path::PathBuf;

use thiserror::Error;

pub mod cache;
pub mod catalog;
pub mod config_file;
pub mod source;

// Re-export for convenience
pub use cache::{ABSTRACT_FIELD, AbstractCache, DetailProvider, NOT_FOUND};
pub use catalog::{Catalog, Record};
pub use source::meeting_api::MeetingApi;
pub use source::{AbstractSource, SourceFuture};

/// Failure to build the catalog from the agenda file. Fatal at startup.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read catalog {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("catalog {} is not valid JSON: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("catalog {} has an unexpected shape: {detail}", path.display())]
    Shape { path: PathBuf, detail: String },
}

/// Failure to resolve an abstract. Recoverable: the search loop reports it
/// and keeps running.
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("lookup service returned HTTP {status}")]
    Status { status: u16 },
    #[error("lookup response is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read cached abstract {}: {source}", path.display())]
    CacheRead {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failure reported by an [`AbstractSource`] implementation that is not
    /// an HTTP, status or decoding error. The message is shown as is.
    #[error("{0}")]
    Other(String),
}
