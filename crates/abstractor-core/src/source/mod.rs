//! Remote lookup service for talk abstracts.

pub mod meeting_api;
pub mod mock;

use std::future::Future;
use std::pin::Pin;

use crate::LookupError;

/// Boxed future returned by [`AbstractSource::fetch`].
pub type SourceFuture<'a> =
    Pin<Box<dyn Future<Output = Result<serde_json::Value, LookupError>> + Send + 'a>>;

/// A service that returns the raw JSON paper record for a presentation key.
pub trait AbstractSource: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Fetch the paper record for `key`. Exactly one request per call.
    fn fetch<'a>(&'a self, key: &'a str) -> SourceFuture<'a>;
}
