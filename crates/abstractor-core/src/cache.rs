//! File-per-key cache of talk abstracts with fetch-on-miss.
//!
//! Each abstract lives in `<dir>/<key>_abstract.txt` as raw text; the presence
//! of the file is the cache hit. Entries never expire and are never rewritten.
//! Only responses carrying [`ABSTRACT_FIELD`] are cached, so a "not found"
//! answer is retried on the next lookup. Transport errors are never cached.

use std::future::Future;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::pin::Pin;

use crate::LookupError;
use crate::source::AbstractSource;

/// Field of the paper record holding the abstract text.
pub const ABSTRACT_FIELD: &str = "RawAbstract";

/// Returned when the paper record has no abstract.
pub const NOT_FOUND: &str = "Abstract not found.";

const FILE_SUFFIX: &str = "_abstract.txt";

/// Resolves a talk key to its abstract text.
pub trait DetailProvider: Send + Sync {
    fn lookup<'a>(
        &'a self,
        key: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String, LookupError>> + Send + 'a>>;
}

/// Cache file name for `key`. Keys are percent-encoded so a key can never
/// name a path outside the cache directory.
pub fn cache_file_name(key: &str) -> String {
    format!("{}{FILE_SUFFIX}", urlencoding::encode(key))
}

/// Disk-backed abstract cache in front of an [`AbstractSource`].
pub struct AbstractCache<S> {
    dir: PathBuf,
    source: S,
}

impl<S: AbstractSource> AbstractCache<S> {
    pub fn new(dir: impl Into<PathBuf>, source: S) -> Self {
        Self {
            dir: dir.into(),
            source,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(cache_file_name(key))
    }

    /// Read the cached abstract for `key`, if there is one.
    pub fn cached(&self, key: &str) -> Result<Option<String>, LookupError> {
        let path = self.entry_path(key);
        match std::fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(LookupError::CacheRead { path, source }),
        }
    }

    /// Write the entry through a temp file in the same directory so readers
    /// never observe a partial file.
    fn store(&self, key: &str, text: &str) -> std::io::Result<PathBuf> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.entry_path(key);
        let mut tmp = tempfile::NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(text.as_bytes())?;
        tmp.persist(&path).map_err(|e| e.error)?;
        Ok(path)
    }
}

impl<S: AbstractSource> DetailProvider for AbstractCache<S> {
    fn lookup<'a>(
        &'a self,
        key: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String, LookupError>> + Send + 'a>> {
        Box::pin(async move {
            if let Some(text) = self.cached(key)? {
                tracing::trace!(key, "abstract cache hit");
                return Ok(text);
            }
            tracing::trace!(key, source = self.source.name(), "abstract cache miss");

            let record = self.source.fetch(key).await?;
            let Some(text) = record.get(ABSTRACT_FIELD).and_then(|v| v.as_str()) else {
                tracing::debug!(key, "paper record has no abstract");
                return Ok(NOT_FOUND.to_string());
            };

            match self.store(key, text) {
                Ok(path) => tracing::debug!(key, path = %path.display(), "cached abstract"),
                Err(e) => tracing::warn!(key, error = %e, "failed to cache abstract"),
            }
            Ok(text.to_string())
        })
    }
}
