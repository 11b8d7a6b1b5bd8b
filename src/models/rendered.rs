//! Rendered content cache rows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A copy of rendered documentation content, keyed by its cache key.
///
/// Only the key matters for redirect resolution; the remaining fields are
/// carried so index files exported from the content cache load unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderedContent {
    /// Cache key, e.g. `static_content_1_84_0/doc/html/accumulators.html`
    pub cache_key: String,

    /// MIME type of the stored content
    #[serde(default)]
    pub content_type: Option<String>,

    /// When the cached copy was last refreshed
    #[serde(default)]
    pub last_updated_at: Option<DateTime<Utc>>,
}

impl RenderedContent {
    pub fn new(cache_key: impl Into<String>) -> Self {
        Self {
            cache_key: cache_key.into(),
            content_type: None,
            last_updated_at: None,
        }
    }
}
