//! AWS Lambda entry point for the docs redirect resolver
//!
//! Deploy with `cargo lambda build --release --features lambda`.

use docs_redirect::lambda;
use lambda_runtime::{Error as LambdaError, LambdaEvent, service_fn};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the AWS Lambda function.
#[tokio::main]
async fn main() -> Result<(), LambdaError> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    info!("Docs redirect Lambda starting...");
    let resolver = lambda::build_resolver().await?;
    info!("Latest release: {}", resolver.version());

    let resolver = &resolver;
    lambda_runtime::run(service_fn(
        move |event: LambdaEvent<lambda::RedirectRequest>| async move {
            lambda::handler(resolver, event).await
        },
    ))
    .await
}
