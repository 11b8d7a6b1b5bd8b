// src/matcher/mod.rs

//! Historical documentation URL shapes.
//!
//! Each [`MatcherKind`] recognises one layout that Boost documentation has
//! used over the years and knows two things about it:
//!
//! - which storage key must exist for the path to have a counterpart in the
//!   latest release (`generate_latest_s3_path`)
//! - where the browser should be sent instead (`generate_latest_url`)
//!
//! Kinds are tried in [`MatcherKind::CHAIN`] order by [`MatcherChain`], from
//! the most faithful rewrite down to the library listing.

pub mod chain;

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Serialize, Serializer};

use crate::models::{LATEST_RELEASE_URL_PATH_STR, PathSegments};

pub use chain::MatcherChain;

/// Release directory every versioned path starts with, e.g. `1_84_0`.
const VERSION_PATTERN: &str = r"^(?:\d+_\d+_\d+(?:_(?:beta|rc)\d+)?|develop|master)";

/// Key prefix of rendered content in the cache, followed by the slug.
pub const STATIC_CONTENT_PREFIX: &str = "static_content_";

fn versioned(rest: &str) -> Regex {
    Regex::new(&format!("{VERSION_PATTERN}/{rest}")).expect("valid matcher pattern")
}

static DIRECT_RE: LazyLock<Regex> =
    LazyLock::new(|| versioned(r"(?P<content_path>(?P<library_name>\S+))"));

static LIBS_PATH_RE: LazyLock<Regex> =
    LazyLock::new(|| versioned(r"libs/(?P<library_name>\w+)/(?P<content_path>\S+)"));

// Only Boost.URL has moved to Antora so far. Widening this to `\w+` is enough
// once more libraries follow.
static LIBS_ANTORA_RE: LazyLock<Regex> =
    LazyLock::new(|| versioned(r"libs/(?P<library_name>url)/(?P<content_path>\S+)"));

static DOC_HTML_BOOST_PATH_RE: LazyLock<Regex> = LazyLock::new(|| {
    versioned(r"doc/html/boost_(?P<library_name>\w+)/(?P<content_path>\S+)")
});

// `boost_` names are excluded in `MatcherKind::segments`; the regex engine
// has no lookahead.
static DOC_HTML_PATH_RE: LazyLock<Regex> =
    LazyLock::new(|| versioned(r"(?P<content_path>doc/html/(?P<library_name>\w+.html))"));

static DOC_HTML_BOOST_HTML_RE: LazyLock<Regex> =
    LazyLock::new(|| versioned(r"(?P<content_path>doc/html)/boost_(?P<library_name>\w+).html"));

static ANY_PATH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^(?P<content_path>(?P<library_name>.*))").expect("valid matcher pattern")
});

/// One historical documentation URL shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MatcherKind {
    /// `{ver}/{anything}`, same file in the latest tree
    Direct,
    /// `{ver}/libs/{lib}/{path}`
    LibsPathToLatestDirect,
    /// `{ver}/libs/url/{path}`, moved to the Antora layout
    LibsToAntoraPathDirect,
    /// `{ver}/libs/{lib}/{path}`, falls back to the library index
    LibsPathToLatestFallback,
    /// `{ver}/doc/html/boost_{lib}/{path}`
    DocHtmlBoostPathToFallback,
    /// `{ver}/doc/html/{name}.html`
    DocHtmlPathToDirect,
    /// `{ver}/doc/html/boost_{lib}.html`
    DocHtmlBoostHtmlFallbackPath,
    /// Anything else, sent to the library listing
    ToLibsLatestRootFallback,
}

impl MatcherKind {
    /// Production chain order, highest priority first.
    pub const CHAIN: [MatcherKind; 8] = [
        MatcherKind::Direct,
        MatcherKind::LibsPathToLatestDirect,
        MatcherKind::LibsToAntoraPathDirect,
        MatcherKind::LibsPathToLatestFallback,
        MatcherKind::DocHtmlBoostPathToFallback,
        MatcherKind::DocHtmlPathToDirect,
        MatcherKind::DocHtmlBoostHtmlFallbackPath,
        MatcherKind::ToLibsLatestRootFallback,
    ];

    /// Stable matcher name reported in results.
    pub fn name(self) -> &'static str {
        match self {
            MatcherKind::Direct => "DirectMatcher",
            MatcherKind::LibsPathToLatestDirect => "LibsPathToLatestDirectMatcher",
            MatcherKind::LibsToAntoraPathDirect => "LibsToAntoraPathDirectMatcher",
            MatcherKind::LibsPathToLatestFallback => "LibsPathToLatestFallbackMatcher",
            MatcherKind::DocHtmlBoostPathToFallback => "DocHtmlBoostPathToFallbackMatcher",
            MatcherKind::DocHtmlPathToDirect => "DocHtmlPathToDirectMatcher",
            MatcherKind::DocHtmlBoostHtmlFallbackPath => "DocHtmlBoostHtmlFallbackPathMatcher",
            MatcherKind::ToLibsLatestRootFallback => "ToLibsLatestRootFallbackMatcher",
        }
    }

    /// True if a match is byte-for-byte relocatable into the latest tree.
    pub fn has_equivalent(self) -> bool {
        matches!(self, MatcherKind::Direct)
    }

    /// True if a match is accepted without confirming the target exists.
    pub fn is_index_fallback(self) -> bool {
        matches!(
            self,
            MatcherKind::LibsPathToLatestFallback
                | MatcherKind::DocHtmlBoostPathToFallback
                | MatcherKind::DocHtmlBoostHtmlFallbackPath
                | MatcherKind::ToLibsLatestRootFallback
        )
    }

    /// True for the catch-all that terminates every well-formed chain.
    pub fn is_terminal(self) -> bool {
        matches!(self, MatcherKind::ToLibsLatestRootFallback)
    }

    /// Pattern with `library_name` and `content_path` groups.
    pub fn path_re(self) -> &'static Regex {
        match self {
            MatcherKind::Direct => &DIRECT_RE,
            MatcherKind::LibsPathToLatestDirect | MatcherKind::LibsPathToLatestFallback => {
                &LIBS_PATH_RE
            }
            MatcherKind::LibsToAntoraPathDirect => &LIBS_ANTORA_RE,
            MatcherKind::DocHtmlBoostPathToFallback => &DOC_HTML_BOOST_PATH_RE,
            MatcherKind::DocHtmlPathToDirect => &DOC_HTML_PATH_RE,
            MatcherKind::DocHtmlBoostHtmlFallbackPath => &DOC_HTML_BOOST_HTML_RE,
            MatcherKind::ToLibsLatestRootFallback => &ANY_PATH_RE,
        }
    }

    /// Extract the path segments, or `None` if this kind does not apply.
    ///
    /// Both groups must be non-empty, except for the catch-all which accepts
    /// any input.
    pub fn segments(self, path: &str) -> Option<PathSegments> {
        let caps = self.path_re().captures(path)?;
        let library_name = caps.name("library_name").map_or("", |m| m.as_str());
        let content_path = caps.name("content_path").map_or("", |m| m.as_str());

        if self == MatcherKind::DocHtmlPathToDirect && library_name.starts_with("boost_") {
            return None;
        }
        if !self.is_terminal() && (library_name.is_empty() || content_path.is_empty()) {
            return None;
        }

        Some(PathSegments::new(library_name, content_path))
    }

    /// Cache key that must exist for this match to be accepted.
    ///
    /// e.g. `static_content_1_84_0/libs/algorithm/doc/html/index.html`
    pub fn generate_latest_s3_path(self, latest_slug: &str, segments: &PathSegments) -> String {
        let root = format!("{STATIC_CONTENT_PREFIX}{latest_slug}");
        let lib = segments.library_name.as_str();
        let content = segments.content_path.as_str();

        match self {
            MatcherKind::Direct | MatcherKind::DocHtmlPathToDirect => join(&[&root, content]),
            MatcherKind::LibsPathToLatestDirect => join(&[&root, "libs", lib, content]),
            MatcherKind::LibsToAntoraPathDirect => {
                join(&[&root, "doc", "antora", &strip_doc_html(content)])
            }
            MatcherKind::LibsPathToLatestFallback | MatcherKind::DocHtmlBoostPathToFallback => {
                join(&[&root, "libs", lib, "index.html"])
            }
            MatcherKind::DocHtmlBoostHtmlFallbackPath => {
                join(&[&root, "libs", lib, content, "index.html"])
            }
            MatcherKind::ToLibsLatestRootFallback => join(&[&root, "libs"]),
        }
    }

    /// Redirect target, relative and without a leading slash.
    pub fn generate_latest_url(self, segments: &PathSegments) -> String {
        let lib = segments.library_name.as_str();
        let content = segments.content_path.as_str();

        match self {
            MatcherKind::Direct | MatcherKind::DocHtmlPathToDirect => latest_docs(&[content]),
            MatcherKind::LibsPathToLatestDirect => latest_docs(&["libs", lib, content]),
            MatcherKind::LibsToAntoraPathDirect => {
                latest_docs(&["doc", "antora", &strip_doc_html(content)])
            }
            MatcherKind::LibsPathToLatestFallback | MatcherKind::DocHtmlBoostPathToFallback => {
                latest_docs(&["libs", lib, "index.html"])
            }
            MatcherKind::DocHtmlBoostHtmlFallbackPath => {
                latest_docs(&["libs", lib, content, "index.html"])
            }
            // trailing slash saves a redirect
            MatcherKind::ToLibsLatestRootFallback => {
                format!("libraries/{LATEST_RELEASE_URL_PATH_STR}/")
            }
        }
    }
}

impl fmt::Display for MatcherKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for MatcherKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

fn join(parts: &[&str]) -> String {
    parts.join("/")
}

fn latest_docs(parts: &[&str]) -> String {
    format!("doc/libs/{LATEST_RELEASE_URL_PATH_STR}/{}", join(parts))
}

/// Antora trees drop the `doc/html/` level; the library name stays in the path.
fn strip_doc_html(content_path: &str) -> String {
    content_path.replace("doc/html/", "")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s3_key(kind: MatcherKind, path: &str) -> String {
        let segments = kind.segments(path).expect("path should match");
        kind.generate_latest_s3_path("1_79_0", &segments)
    }

    fn latest_url(kind: MatcherKind, path: &str) -> String {
        let segments = kind.segments(path).expect("path should match");
        kind.generate_latest_url(&segments)
    }

    #[test]
    fn test_chain_ends_with_catch_all() {
        assert_eq!(MatcherKind::CHAIN.len(), 8);
        assert!(MatcherKind::CHAIN.last().unwrap().is_terminal());
        assert_eq!(
            MatcherKind::CHAIN.iter().filter(|k| k.is_terminal()).count(),
            1
        );
    }

    #[test]
    fn test_flags() {
        assert!(MatcherKind::Direct.has_equivalent());
        assert!(
            MatcherKind::CHAIN
                .iter()
                .filter(|k| **k != MatcherKind::Direct)
                .all(|k| !k.has_equivalent())
        );

        assert!(!MatcherKind::Direct.is_index_fallback());
        assert!(!MatcherKind::LibsPathToLatestDirect.is_index_fallback());
        assert!(!MatcherKind::LibsToAntoraPathDirect.is_index_fallback());
        assert!(!MatcherKind::DocHtmlPathToDirect.is_index_fallback());
        assert!(MatcherKind::LibsPathToLatestFallback.is_index_fallback());
        assert!(MatcherKind::DocHtmlBoostPathToFallback.is_index_fallback());
        assert!(MatcherKind::DocHtmlBoostHtmlFallbackPath.is_index_fallback());
        assert!(MatcherKind::ToLibsLatestRootFallback.is_index_fallback());
    }

    #[test]
    fn test_direct() {
        let path = "1_84_0/libs/algorithm/doc/html/algorithm/CXX11.html";
        assert_eq!(
            s3_key(MatcherKind::Direct, path),
            "static_content_1_79_0/libs/algorithm/doc/html/algorithm/CXX11.html"
        );
        assert_eq!(
            latest_url(MatcherKind::Direct, path),
            "doc/libs/latest/libs/algorithm/doc/html/algorithm/CXX11.html"
        );
    }

    #[test]
    fn test_libs_path_to_latest_direct() {
        let path = "1_84_0/libs/algorithm/doc/html/algorithm/CXX11.html";
        let segments = MatcherKind::LibsPathToLatestDirect.segments(path).unwrap();
        assert_eq!(segments.library_name, "algorithm");
        assert_eq!(segments.content_path, "doc/html/algorithm/CXX11.html");
        assert_eq!(
            s3_key(MatcherKind::LibsPathToLatestDirect, path),
            "static_content_1_79_0/libs/algorithm/doc/html/algorithm/CXX11.html"
        );
        assert_eq!(
            latest_url(MatcherKind::LibsPathToLatestDirect, path),
            "doc/libs/latest/libs/algorithm/doc/html/algorithm/CXX11.html"
        );
    }

    #[test]
    fn test_libs_path_to_latest_fallback() {
        let path = "1_78_0/libs/algorithm/doc/html/header/boost/algorithm/string_regex_hpp.html";
        assert_eq!(
            s3_key(MatcherKind::LibsPathToLatestFallback, path),
            "static_content_1_79_0/libs/algorithm/index.html"
        );
        assert_eq!(
            latest_url(MatcherKind::LibsPathToLatestFallback, path),
            "doc/libs/latest/libs/algorithm/index.html"
        );
    }

    #[test]
    fn test_libs_to_antora_only_matches_url() {
        let path = "1_85_0/libs/url/doc/html/url/urls/segments.html";
        assert_eq!(
            s3_key(MatcherKind::LibsToAntoraPathDirect, path),
            "static_content_1_79_0/doc/antora/url/urls/segments.html"
        );
        assert_eq!(
            latest_url(MatcherKind::LibsToAntoraPathDirect, path),
            "doc/libs/latest/doc/antora/url/urls/segments.html"
        );

        assert!(
            MatcherKind::LibsToAntoraPathDirect
                .segments("1_85_0/libs/json/doc/html/index.html")
                .is_none()
        );
        assert!(
            MatcherKind::LibsToAntoraPathDirect
                .segments("1_85_0/libs/urlx/doc/html/index.html")
                .is_none()
        );
    }

    #[test]
    fn test_doc_html_boost_path_to_fallback() {
        let path = "1_64_0/doc/html/boost_process/acknowledgements.html";
        assert_eq!(
            s3_key(MatcherKind::DocHtmlBoostPathToFallback, path),
            "static_content_1_79_0/libs/process/index.html"
        );
        assert_eq!(
            latest_url(MatcherKind::DocHtmlBoostPathToFallback, path),
            "doc/libs/latest/libs/process/index.html"
        );
    }

    #[test]
    fn test_doc_html_path_to_direct() {
        let path = "1_35_0/doc/html/interprocess.html";
        assert_eq!(
            s3_key(MatcherKind::DocHtmlPathToDirect, path),
            "static_content_1_79_0/doc/html/interprocess.html"
        );
        assert_eq!(
            latest_url(MatcherKind::DocHtmlPathToDirect, path),
            "doc/libs/latest/doc/html/interprocess.html"
        );
    }

    #[test]
    fn test_doc_html_path_to_direct_excludes_boost_prefix() {
        assert!(
            MatcherKind::DocHtmlPathToDirect
                .segments("1_34_0/doc/html/boost_math.html")
                .is_none()
        );
        assert!(
            MatcherKind::DocHtmlPathToDirect
                .segments("1_34_0/doc/html/boostbook.html")
                .is_some()
        );
    }

    #[test]
    fn test_doc_html_boost_html_fallback() {
        let path = "1_34_0/doc/html/boost_math.html";
        let segments = MatcherKind::DocHtmlBoostHtmlFallbackPath
            .segments(path)
            .unwrap();
        assert_eq!(segments.library_name, "math");
        assert_eq!(segments.content_path, "doc/html");
        assert_eq!(
            s3_key(MatcherKind::DocHtmlBoostHtmlFallbackPath, path),
            "static_content_1_79_0/libs/math/doc/html/index.html"
        );
        assert_eq!(
            latest_url(MatcherKind::DocHtmlBoostHtmlFallbackPath, path),
            "doc/libs/latest/libs/math/doc/html/index.html"
        );
    }

    #[test]
    fn test_root_fallback_accepts_anything() {
        let path = "1_33_1/doc/html/BOOST_VARIANT_LIMIT_TYPES.html";
        assert_eq!(
            s3_key(MatcherKind::ToLibsLatestRootFallback, path),
            "static_content_1_79_0/libs"
        );
        assert_eq!(
            latest_url(MatcherKind::ToLibsLatestRootFallback, path),
            "libraries/latest/"
        );

        for path in ["", " ", "  leading space", "no-version-here"] {
            assert!(MatcherKind::ToLibsLatestRootFallback.segments(path).is_some());
        }
    }

    #[test]
    fn test_versioned_matchers_require_version_prefix() {
        let path = "1_XX_Y/does/not/exist";
        for kind in MatcherKind::CHAIN.iter().filter(|k| !k.is_terminal()) {
            assert!(kind.segments(path).is_none(), "{kind} should not match");
        }

        assert!(MatcherKind::Direct.segments("develop/libs/any/index.html").is_some());
        assert!(MatcherKind::Direct.segments("1_86_0_beta1/index.html").is_some());
        assert!(MatcherKind::Direct.segments("x1_84_0/index.html").is_none());
    }

    #[test]
    fn test_empty_groups_do_not_match() {
        assert!(MatcherKind::Direct.segments("1_84_0/").is_none());
        assert!(MatcherKind::LibsPathToLatestDirect.segments("1_84_0/libs/any/").is_none());
    }

    #[test]
    fn test_content_path_stops_at_whitespace() {
        let segments = MatcherKind::Direct
            .segments("1_84_0/libs/any/index.html trailing")
            .unwrap();
        assert_eq!(segments.content_path, "libs/any/index.html");
    }
}
