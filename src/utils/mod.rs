//! Utility functions and helpers.

pub mod url;

pub use url::legacy_doc_path;
