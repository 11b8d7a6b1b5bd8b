//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::VersionContext;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Latest release descriptor
    #[serde(default)]
    pub version: VersionConfig,

    /// Rendered content cache index
    #[serde(default)]
    pub cache: CacheConfig,

    /// Archived documentation store
    #[serde(default)]
    pub archive: ArchiveConfig,

    /// Resolution behavior
    #[serde(default)]
    pub resolver: ResolverConfig,

    /// Log output
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Override values from environment variables, where set.
    pub fn apply_env(&mut self) {
        if let Ok(slug) = std::env::var("LATEST_VERSION_SLUG") {
            self.version.latest_slug = slug;
        }

        if let Ok(bucket) = std::env::var("STATIC_CONTENT_BUCKET_NAME") {
            self.archive.bucket = bucket;
        }

        if let Ok(concurrent) = std::env::var("MAX_CONCURRENT") {
            if let Ok(n) = concurrent.parse() {
                self.resolver.max_concurrent = n;
            }
        }
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        self.version.context()?;
        if self.cache.index_file.trim().is_empty() {
            return Err(AppError::validation("cache.index_file is empty"));
        }
        match self.archive.backend {
            ArchiveBackend::Local => {
                if self.archive.local_dir.trim().is_empty() {
                    return Err(AppError::validation("archive.local_dir is empty"));
                }
            }
            ArchiveBackend::S3 => {
                if self.archive.bucket.trim().is_empty() {
                    return Err(AppError::validation("archive.bucket is empty"));
                }
                if self.archive.region.trim().is_empty() {
                    return Err(AppError::validation("archive.region is empty"));
                }
            }
        }
        if self.resolver.max_concurrent == 0 {
            return Err(AppError::validation("resolver.max_concurrent must be > 0"));
        }
        Ok(())
    }
}

/// Latest release settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionConfig {
    /// Stripped slug of the newest release, e.g. `1_84_0`
    #[serde(default = "defaults::latest_slug")]
    pub latest_slug: String,
}

impl VersionConfig {
    /// Validated version context for the resolver.
    pub fn context(&self) -> Result<VersionContext> {
        VersionContext::new(self.latest_slug.as_str())
    }
}

impl Default for VersionConfig {
    fn default() -> Self {
        Self {
            latest_slug: defaults::latest_slug(),
        }
    }
}

/// Rendered content cache settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// JSON file listing cached rendered content records
    #[serde(default = "defaults::index_file")]
    pub index_file: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            index_file: defaults::index_file(),
        }
    }
}

/// Which store holds the archived documentation trees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArchiveBackend {
    #[default]
    Local,
    S3,
}

/// Archive store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveConfig {
    #[serde(default)]
    pub backend: ArchiveBackend,

    /// Root directory for the local backend
    #[serde(default = "defaults::local_dir")]
    pub local_dir: String,

    /// Bucket name for the S3 backend
    #[serde(default = "defaults::bucket")]
    pub bucket: String,

    /// AWS region for the S3 backend
    #[serde(default = "defaults::region")]
    pub region: String,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            backend: ArchiveBackend::default(),
            local_dir: defaults::local_dir(),
            bucket: defaults::bucket(),
            region: defaults::region(),
        }
    }
}

/// Resolution settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Maximum paths resolved concurrently in batch mode
    #[serde(default = "defaults::max_concurrent")]
    pub max_concurrent: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            max_concurrent: defaults::max_concurrent(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "defaults::log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::log_level(),
        }
    }
}

mod defaults {
    pub fn latest_slug() -> String {
        "1_84_0".into()
    }
    pub fn index_file() -> String {
        "storage/rendered_content.json".into()
    }
    pub fn local_dir() -> String {
        "storage".into()
    }
    pub fn bucket() -> String {
        "stage.boost.org.v2".into()
    }
    pub fn region() -> String {
        "us-east-1".into()
    }
    pub fn max_concurrent() -> usize {
        8
    }
    pub fn log_level() -> String {
        "info".into()
    }
}
