// src/matcher/chain.rs

//! Ordered matcher chain.
//!
//! Each kind is tried in turn:
//! 1. no regex match: move on to the next kind
//! 2. regex match on an index fallback: accept
//! 3. regex match otherwise: accept only if the target key exists in the
//!    cache or the archive, else move on
//!
//! A chain built with [`MatcherChain::new`] ends in the catch-all and always
//! produces a result.

use crate::error::{AppError, Result};
use crate::matcher::MatcherKind;
use crate::models::{PathMatchResult, PathSegments, VersionContext};
use crate::storage::ExistenceChecker;

/// Matchers in priority order, bound to a version and an existence checker.
pub struct MatcherChain<'a> {
    matchers: Vec<MatcherKind>,
    version: &'a VersionContext,
    checker: &'a dyn ExistenceChecker,
}

impl<'a> MatcherChain<'a> {
    /// The production chain, in [`MatcherKind::CHAIN`] order.
    pub fn new(version: &'a VersionContext, checker: &'a dyn ExistenceChecker) -> Self {
        Self::with_matchers(MatcherKind::CHAIN, version, checker)
    }

    /// A chain over an arbitrary sequence of kinds.
    ///
    /// Without a terminal kind, [`determine_match`](Self::determine_match)
    /// can fail with [`AppError::ChainExhausted`].
    pub fn with_matchers(
        matchers: impl IntoIterator<Item = MatcherKind>,
        version: &'a VersionContext,
        checker: &'a dyn ExistenceChecker,
    ) -> Self {
        Self {
            matchers: matchers.into_iter().collect(),
            version,
            checker,
        }
    }

    pub fn matchers(&self) -> &[MatcherKind] {
        &self.matchers
    }

    /// Resolve `path` with the first kind that accepts it.
    pub async fn determine_match(&self, path: &str) -> Result<PathMatchResult> {
        for &kind in &self.matchers {
            if let Some(result) = self.try_matcher(kind, path).await {
                return Ok(result);
            }
        }

        log::warn!("No redirect path match for path={path:?}");
        Err(AppError::chain_exhausted(path))
    }

    async fn try_matcher(&self, kind: MatcherKind, path: &str) -> Option<PathMatchResult> {
        let Some(segments) = kind.segments(path) else {
            log::debug!("no regex match on {kind}");
            return None;
        };

        if kind.is_index_fallback() || self.confirm_path_exists(kind, &segments).await {
            log::debug!("regex match on {kind}");
            return Some(PathMatchResult {
                is_direct_equivalent: kind.has_equivalent(),
                latest_path: kind.generate_latest_url(&segments),
                matcher: kind,
            });
        }

        log::debug!("{kind} matched but its target was not found");
        None
    }

    async fn confirm_path_exists(&self, kind: MatcherKind, segments: &PathSegments) -> bool {
        let s3_path = kind.generate_latest_s3_path(self.version.latest_slug(), segments);
        log::debug!("s3_path={s3_path}");
        self.checker.confirm_path_exists(&s3_path).await
    }
}
