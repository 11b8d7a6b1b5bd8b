//! Local filesystem storage implementation.
//!
//! Used for development and testing. Production deployments probe the
//! archive through `S3Archive`.
//!
//! ## Storage Layout
//!
//! ```text
//! {root}/
//! ├── config.toml               # Resolver configuration
//! ├── rendered_content.json     # Exported cache rows (RenderedContent[])
//! └── archives/                 # Original documentation trees
//!     └── boost_1_84_0/
//!         └── libs/...
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::{AppError, Result};
use crate::models::RenderedContent;
use crate::storage::{ArchiveStore, RenderedContentIndex};

/// Read bytes, returning None if the file doesn't exist.
async fn read_bytes(path: &Path) -> Result<Option<Vec<u8>>> {
    match tokio::fs::read(path).await {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(AppError::Io(e)),
    }
}

/// Rendered content cache keys held in memory.
#[derive(Debug, Clone, Default)]
pub struct LocalRenderedContentIndex {
    keys: HashSet<String>,
}

impl LocalRenderedContentIndex {
    /// Build an index directly from cache keys.
    pub fn from_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
        }
    }

    /// Load an exported JSON array of [`RenderedContent`] records.
    ///
    /// A missing file yields an empty index, so every lookup falls through
    /// to the archive.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match read_bytes(path).await? {
            Some(bytes) => {
                let records: Vec<RenderedContent> = serde_json::from_slice(&bytes)?;
                log::info!(
                    "Loaded {} rendered content keys from {}",
                    records.len(),
                    path.display()
                );
                Ok(Self::from_keys(records.into_iter().map(|r| r.cache_key)))
            }
            None => {
                log::warn!(
                    "No rendered content index at {}, starting empty",
                    path.display()
                );
                Ok(Self::default())
            }
        }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[async_trait]
impl RenderedContentIndex for LocalRenderedContentIndex {
    async fn contains_key(&self, cache_key: &str) -> Result<bool> {
        Ok(self.keys.contains(cache_key))
    }
}

/// Archive whose objects are files below a root directory.
#[derive(Debug, Clone)]
pub struct LocalArchive {
    root_dir: PathBuf,
}

impl LocalArchive {
    /// Create a new LocalArchive rooted at the given directory.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
        }
    }

    /// Get the full path for a key.
    fn path(&self, key: &str) -> PathBuf {
        self.root_dir.join(key)
    }
}

#[async_trait]
impl ArchiveStore for LocalArchive {
    async fn object_exists(&self, key: &str) -> Result<bool> {
        match tokio::fs::metadata(self.path(key)).await {
            Ok(meta) => Ok(meta.is_file()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(AppError::Io(e)),
        }
    }

    fn location(&self, key: &str) -> String {
        self.path(key).display().to_string()
    }
}
