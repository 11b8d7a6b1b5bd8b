// src/lambda/mod.rs

//! AWS Lambda handler for documentation redirects.
//!
//! Each invocation carries one legacy path. The response is either a 301
//! pointing at the latest release or a 404 when no redirect is available.

use lambda_runtime::{Error as LambdaError, LambdaEvent};

use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};

use crate::error::Result;
use crate::models::{ArchiveBackend, Config, PathMatchResult};
use crate::resolver::Resolver;

/// Status code of a successful redirect.
pub const MOVED_PERMANENTLY: u16 = 301;

/// Status code when no redirect is available.
pub const NOT_FOUND: u16 = 404;

/// Lambda invocation payload.
#[derive(Debug, Deserialize)]
pub struct RedirectRequest {
    /// Legacy path or URL, e.g. `/doc/libs/1_84_0/libs/any/index.html`
    pub path: String,
}

/// Lambda response payload.
#[derive(Debug, Default, Serialize)]
pub struct RedirectResponse {
    pub status_code: u16,

    /// Absolute redirect target
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// Name of the matcher that produced the target
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matcher: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_direct_equivalent: Option<bool>,

    /// Error message if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RedirectResponse {
    pub fn redirect(result: &PathMatchResult) -> Self {
        Self {
            status_code: MOVED_PERMANENTLY,
            location: Some(result.redirect_location()),
            matcher: Some(result.matcher.name().to_string()),
            is_direct_equivalent: Some(result.is_direct_equivalent),
            error: None,
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            status_code: NOT_FOUND,
            error: Some(message.into()),
            ..Default::default()
        }
    }
}

/// Main Lambda handler function.
#[instrument(skip(resolver, event))]
pub async fn handler(
    resolver: &Resolver,
    event: LambdaEvent<RedirectRequest>,
) -> std::result::Result<RedirectResponse, LambdaError> {
    let (request, _context) = event.into_parts();
    Ok(respond(resolver, &request).await)
}

/// Resolve one request into a response; resolution errors become a 404.
pub async fn respond(resolver: &Resolver, request: &RedirectRequest) -> RedirectResponse {
    match resolver.resolve_url(&request.path).await {
        Ok(result) => {
            info!(
                "Redirecting {} to {} via {}",
                request.path, result.latest_path, result.matcher
            );
            RedirectResponse::redirect(&result)
        }
        Err(e) => {
            error!("Redirect failed for {}: {}", request.path, e);
            RedirectResponse::unavailable(e.to_string())
        }
    }
}

/// Configuration suitable for the Lambda environment: S3 archive plus
/// environment overrides.
pub fn load_lambda_config() -> Config {
    let mut config = Config::default();
    config.archive.backend = ArchiveBackend::S3;
    config.apply_env();
    config
}

/// Build the resolver shared across invocations.
pub async fn build_resolver() -> Result<Resolver> {
    let config = load_lambda_config();
    config.validate()?;
    Resolver::from_config(&config).await
}
