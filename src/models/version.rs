//! The "latest release" descriptor consumed by the resolver.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// URL token standing in for the newest release.
pub const LATEST_RELEASE_URL_PATH_STR: &str = "latest";

/// Older spelling of [`LATEST_RELEASE_URL_PATH_STR`] still found in links.
pub const LEGACY_LATEST_RELEASE_URL_PATH_STR: &str = "release";

const VERSION_SLUG_PREFIX: &str = "boost-";

/// Identifies the newest release, e.g. slug `1_84_0`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VersionContext {
    latest_slug: String,
}

impl VersionContext {
    /// Build from a stripped URL slug such as `1_84_0`.
    pub fn new(latest_slug: impl Into<String>) -> Result<Self> {
        let latest_slug = latest_slug.into();
        let trimmed = latest_slug.trim();
        if trimmed.is_empty() {
            return Err(AppError::validation("latest version slug is empty"));
        }
        if trimmed.contains('/') || trimmed.chars().any(char::is_whitespace) {
            return Err(AppError::validation(format!(
                "latest version slug {trimmed:?} must be a single path segment"
            )));
        }
        Ok(Self {
            latest_slug: trimmed.to_string(),
        })
    }

    /// Build from a release slug as stored for versions.
    ///
    /// `boost-1.84.0` and `boost_1_84_0` both become `1_84_0`; branch names
    /// like `develop` pass through unchanged.
    pub fn from_release_slug(release_slug: &str) -> Result<Self> {
        let url_slug = release_slug.trim().replace(['-', '.'], "_");
        let prefix = VERSION_SLUG_PREFIX.replace('-', "_");
        let stripped = url_slug.strip_prefix(&prefix).unwrap_or(&url_slug);
        Self::new(stripped)
    }

    /// Version fragment used in storage keys (`static_content_{slug}`).
    pub fn latest_slug(&self) -> &str {
        &self.latest_slug
    }

    /// Replace a leading `latest/` or `release/` segment with the slug.
    ///
    /// Paths that do not start with an alias are returned unchanged.
    pub fn expand_latest_alias(&self, path: &str) -> String {
        for alias in [LATEST_RELEASE_URL_PATH_STR, LEGACY_LATEST_RELEASE_URL_PATH_STR] {
            if path == alias {
                return self.latest_slug.clone();
            }
            if let Some(rest) = path.strip_prefix(alias).and_then(|r| r.strip_prefix('/')) {
                return format!("{}/{}", self.latest_slug, rest);
            }
        }
        path.to_string()
    }
}

impl fmt::Display for VersionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.latest_slug)
    }
}

impl TryFrom<String> for VersionContext {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<VersionContext> for String {
    fn from(value: VersionContext) -> Self {
        value.latest_slug
    }
}
