// src/utils/url.rs

//! Inbound URL normalisation.

/// Prefix under which versioned documentation is served.
const DOC_LIBS_PREFIX: &str = "doc/libs/";

/// Reduce an inbound URL or path to the form the matcher chain expects.
///
/// Scheme, host, query and fragment are dropped, as are leading slashes and
/// the `doc/libs/` prefix. An archive-style `boost_` in front of a version
/// number is dropped too.
///
/// # Examples
/// ```
/// use docs_redirect::utils::url::legacy_doc_path;
///
/// assert_eq!(
///     legacy_doc_path("https://www.boost.org/doc/libs/1_84_0/libs/any/index.html"),
///     "1_84_0/libs/any/index.html"
/// );
/// ```
pub fn legacy_doc_path(input: &str) -> String {
    let input = input.trim();

    let path = match url::Url::parse(input) {
        Ok(parsed) if parsed.has_host() => parsed.path().to_string(),
        _ => strip_query_and_fragment(input).to_string(),
    };

    let path = path.trim_start_matches('/');
    let path = path.strip_prefix(DOC_LIBS_PREFIX).unwrap_or(path);

    match path.strip_prefix("boost_") {
        Some(rest) if rest.starts_with(|c: char| c.is_ascii_digit()) => rest.to_string(),
        _ => path.to_string(),
    }
}

fn strip_query_and_fragment(path: &str) -> &str {
    match path.find(['?', '#']) {
        Some(idx) => &path[..idx],
        None => path,
    }
}
