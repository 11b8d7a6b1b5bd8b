// src/resolver.rs

//! Entry points for resolving legacy documentation paths.

use std::sync::Arc;

use futures::stream::{self, StreamExt};

use crate::error::Result;
use crate::matcher::MatcherChain;
use crate::models::{ArchiveBackend, Config, PathMatchResult, VersionContext};
use crate::storage::{ArchiveStore, ExistenceChecker, LocalArchive, LocalRenderedContentIndex, StoreChecker};
use crate::utils::legacy_doc_path;

/// Resolve `path` against a freshly built production chain.
///
/// `path` is relative and starts with the release directory, e.g.
/// `1_84_0/libs/algorithm/doc/html/index.html`.
pub async fn resolve(
    path: &str,
    version: &VersionContext,
    checker: &dyn ExistenceChecker,
) -> Result<PathMatchResult> {
    MatcherChain::new(version, checker).determine_match(path).await
}

/// Like [`resolve`], returning only the redirect target.
pub async fn determine_latest_url(
    path: &str,
    version: &VersionContext,
    checker: &dyn ExistenceChecker,
) -> Result<String> {
    resolve(path, version, checker)
        .await
        .map(|result| result.latest_path)
}

/// Resolver bound to a version and an existence checker, for repeated use.
#[derive(Clone)]
pub struct Resolver {
    version: VersionContext,
    checker: Arc<dyn ExistenceChecker>,
}

impl Resolver {
    pub fn new(version: VersionContext, checker: Arc<dyn ExistenceChecker>) -> Self {
        Self { version, checker }
    }

    /// Build the stores named in `config` and wire them into a resolver.
    pub async fn from_config(config: &Config) -> Result<Self> {
        let version = config.version.context()?;
        let index = LocalRenderedContentIndex::load(&config.cache.index_file).await?;
        let archive = archive_from_config(config).await?;

        log::info!(
            "Resolver ready: latest={}, cached keys={}",
            version,
            index.len()
        );

        let checker = StoreChecker::new(Arc::new(index), archive);
        Ok(Self::new(version, Arc::new(checker)))
    }

    pub fn version(&self) -> &VersionContext {
        &self.version
    }

    /// Resolve a path already in chain form.
    pub async fn resolve(&self, path: &str) -> Result<PathMatchResult> {
        resolve(path, &self.version, self.checker.as_ref()).await
    }

    /// Normalise an inbound URL or path, then resolve it.
    ///
    /// `latest/` and `release/` aliases are expanded to the latest slug.
    pub async fn resolve_url(&self, input: &str) -> Result<PathMatchResult> {
        let path = self.version.expand_latest_alias(&legacy_doc_path(input));
        log::debug!("Resolving {input:?} as {path:?}");
        self.resolve(&path).await
    }

    /// Resolve many inputs with at most `max_concurrent` in flight.
    ///
    /// Results come back in input order.
    pub async fn resolve_all<I>(
        &self,
        inputs: I,
        max_concurrent: usize,
    ) -> Vec<(String, Result<PathMatchResult>)>
    where
        I: IntoIterator<Item = String>,
    {
        stream::iter(inputs)
            .map(|input| async move {
                let result = self.resolve_url(&input).await;
                (input, result)
            })
            .buffered(max_concurrent.max(1))
            .collect()
            .await
    }
}

async fn archive_from_config(config: &Config) -> Result<Arc<dyn ArchiveStore>> {
    match config.archive.backend {
        ArchiveBackend::Local => Ok(Arc::new(LocalArchive::new(&config.archive.local_dir))),
        #[cfg(feature = "s3")]
        ArchiveBackend::S3 => {
            let archive = crate::storage::S3Archive::from_config(&config.archive).await?;
            Ok(Arc::new(archive))
        }
        #[cfg(not(feature = "s3"))]
        ArchiveBackend::S3 => Err(crate::error::AppError::config(
            "archive.backend = \"s3\" requires the `s3` feature",
        )),
    }
}
