// src/models/mod.rs

//! Domain models for the redirect resolver.
//!
//! This module contains the data structures shared by the matcher chain,
//! the storage backends, and the entry points.

mod config;
mod path;
mod rendered;
mod version;

// Re-export all public types
pub use config::{
    ArchiveBackend, ArchiveConfig, CacheConfig, Config, LoggingConfig, ResolverConfig,
    VersionConfig,
};
pub use path::{PathMatchResult, PathSegments};
pub use rendered::RenderedContent;
pub use version::{LATEST_RELEASE_URL_PATH_STR, LEGACY_LATEST_RELEASE_URL_PATH_STR, VersionContext};
