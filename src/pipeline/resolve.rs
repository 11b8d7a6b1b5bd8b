// src/pipeline/resolve.rs

use crate::error::Result;
use crate::models::PathMatchResult;
use crate::resolver::Resolver;

/// Resolve each input in order, stopping at the first failure.
pub async fn run_resolve(
    resolver: &Resolver,
    inputs: &[String],
) -> Result<Vec<(String, PathMatchResult)>> {
    let mut resolved = Vec::with_capacity(inputs.len());
    for input in inputs {
        let result = resolver.resolve_url(input).await?;
        log::debug!("{input} resolved by {}", result.matcher);
        resolved.push((input.clone(), result));
    }
    Ok(resolved)
}

/// `<input> -> /<latest_path> [<matcher>]`
pub fn format_line(input: &str, result: &PathMatchResult) -> String {
    format!(
        "{input} -> {} [{}]",
        result.redirect_location(),
        result.matcher
    )
}
