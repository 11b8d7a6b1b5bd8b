//! Existence checks against the content cache and the documentation archive.
//!
//! The matcher chain only asks one question: "does this key exist?". It is
//! answered by an [`ExistenceChecker`], which consults two stores in order:
//!
//! 1. the rendered content cache index (cheap, local)
//! 2. the archive of original documentation trees (an object store)
//!
//! ## Key Layout
//!
//! ```text
//! cache:    static_content_1_84_0/libs/algorithm/doc/html/index.html
//! archive:  archives/boost_1_84_0/libs/algorithm/doc/html/index.html
//! ```
//!
//! Backend failures never reach the chain: [`StoreChecker`] logs them and
//! answers `false`, so resolution falls through to the next matcher.

pub mod local;
#[cfg(feature = "s3")]
pub mod s3;
#[cfg(test)]
pub(crate) mod testing;

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::matcher::STATIC_CONTENT_PREFIX;

// Re-export for convenience
pub use local::{LocalArchive, LocalRenderedContentIndex};
#[cfg(feature = "s3")]
pub use s3::S3Archive;

/// Archive key prefix substituted for [`STATIC_CONTENT_PREFIX`].
const ARCHIVE_KEY_PREFIX: &str = "archives/boost_";

/// Translate a cache key into the archive's key scheme.
///
/// `static_content_1_84_0/doc/html/accumulators.html` becomes
/// `archives/boost_1_84_0/doc/html/accumulators.html`.
pub fn archive_key(cache_key: &str) -> String {
    cache_key.replace(STATIC_CONTENT_PREFIX, ARCHIVE_KEY_PREFIX)
}

/// Port consumed by the matcher chain.
#[async_trait]
pub trait ExistenceChecker: Send + Sync {
    /// Has this exact rendered content cache key been stored?
    async fn confirm_db_path_exists(&self, key: &str) -> bool;

    /// Does the archived original for this cache key exist?
    ///
    /// Implementations probe [`archive_key`]`(key)`, not `key` itself.
    async fn confirm_s3_path_exists(&self, key: &str) -> bool;

    /// Cache first, archive only if the cache has no entry.
    async fn confirm_path_exists(&self, key: &str) -> bool {
        self.confirm_db_path_exists(key).await || self.confirm_s3_path_exists(key).await
    }
}

/// Lookup of rendered content cache keys.
#[async_trait]
pub trait RenderedContentIndex: Send + Sync {
    async fn contains_key(&self, cache_key: &str) -> Result<bool>;
}

/// Metadata-only probe of an object store.
#[async_trait]
pub trait ArchiveStore: Send + Sync {
    /// `Ok(false)` when the object is absent; `Err` for any other failure.
    async fn object_exists(&self, key: &str) -> Result<bool>;

    /// Human-readable location of a key, for logs.
    fn location(&self, key: &str) -> String;
}

/// [`ExistenceChecker`] backed by a cache index and an archive store.
#[derive(Clone)]
pub struct StoreChecker {
    index: Arc<dyn RenderedContentIndex>,
    archive: Arc<dyn ArchiveStore>,
}

impl StoreChecker {
    pub fn new(index: Arc<dyn RenderedContentIndex>, archive: Arc<dyn ArchiveStore>) -> Self {
        Self { index, archive }
    }
}

#[async_trait]
impl ExistenceChecker for StoreChecker {
    async fn confirm_db_path_exists(&self, key: &str) -> bool {
        match self.index.contains_key(key).await {
            Ok(found) => {
                log::debug!("RenderedContent match for {key}: {found}");
                found
            }
            Err(e) => {
                log::warn!("Cache lookup failed for {key}: {e}");
                false
            }
        }
    }

    async fn confirm_s3_path_exists(&self, key: &str) -> bool {
        let archive_key = archive_key(key);
        log::debug!("Checking archive for {key} ~ {archive_key}");

        match self.archive.object_exists(&archive_key).await {
            Ok(true) => {
                log::debug!("Archive key exists: {}", self.archive.location(&archive_key));
                true
            }
            Ok(false) => {
                log::debug!("Archive key does not exist: {}", self.archive.location(&archive_key));
                false
            }
            Err(e) => {
                log::warn!(
                    "Archive probe failed for {}: {}",
                    self.archive.location(&archive_key),
                    e
                );
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::testing::{FailingIndex, RecordingArchive};

    const KEY: &str = "static_content_1_84_0/libs/algorithm/doc/html/algorithm/CXX11.html";

    #[test]
    fn test_archive_key_rewrite() {
        let key = archive_key(KEY);
        assert_eq!(
            key,
            "archives/boost_1_84_0/libs/algorithm/doc/html/algorithm/CXX11.html"
        );
        assert!(key.starts_with("archives/"));
    }

    #[tokio::test]
    async fn test_s3_probe_uses_archive_key() {
        let archive = Arc::new(RecordingArchive::empty());
        let checker = StoreChecker::new(
            Arc::new(LocalRenderedContentIndex::default()),
            archive.clone(),
        );

        assert!(!checker.confirm_s3_path_exists(KEY).await);
        assert_eq!(
            archive.probed(),
            vec!["archives/boost_1_84_0/libs/algorithm/doc/html/algorithm/CXX11.html"]
        );
    }

    #[tokio::test]
    async fn test_db_hit_skips_archive() {
        let archive = Arc::new(RecordingArchive::empty());
        let checker = StoreChecker::new(
            Arc::new(LocalRenderedContentIndex::from_keys([KEY])),
            archive.clone(),
        );

        assert!(checker.confirm_path_exists(KEY).await);
        assert!(archive.probed().is_empty());
    }

    #[tokio::test]
    async fn test_db_miss_falls_back_to_archive() {
        let archive = Arc::new(RecordingArchive::new([archive_key(KEY)]));
        let checker = StoreChecker::new(
            Arc::new(LocalRenderedContentIndex::default()),
            archive.clone(),
        );

        assert!(checker.confirm_path_exists(KEY).await);
        assert_eq!(archive.probed().len(), 1);
    }

    #[tokio::test]
    async fn test_backend_errors_become_false() {
        let archive = Arc::new(RecordingArchive::failing("connection reset"));
        let checker = StoreChecker::new(Arc::new(FailingIndex), archive.clone());

        assert!(!checker.confirm_db_path_exists(KEY).await);
        assert!(!checker.confirm_s3_path_exists(KEY).await);
        assert!(!checker.confirm_path_exists(KEY).await);
    }
}
