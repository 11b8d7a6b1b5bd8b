//! Values produced while resolving a legacy documentation path.

use serde::Serialize;

use crate::matcher::MatcherKind;

/// Regex groups extracted by a matcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSegments {
    /// Library identifier captured from the path (e.g. `algorithm`)
    pub library_name: String,

    /// Remainder of the path below the library segment
    pub content_path: String,
}

impl PathSegments {
    pub fn new(library_name: impl Into<String>, content_path: impl Into<String>) -> Self {
        Self {
            library_name: library_name.into(),
            content_path: content_path.into(),
        }
    }
}

/// Final outcome of a resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathMatchResult {
    /// True only when the path needed nothing but a version substitution
    pub is_direct_equivalent: bool,

    /// Relative redirect target, `/`-joined, without a leading slash
    pub latest_path: String,

    /// Matcher that produced the result
    pub matcher: MatcherKind,
}

impl PathMatchResult {
    /// Absolute redirect target suitable for a `Location` header.
    pub fn redirect_location(&self) -> String {
        format!("/{}", self.latest_path)
    }
}
