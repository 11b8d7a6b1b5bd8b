// src/pipeline/validate.rs

use crate::error::Result;
use crate::models::Config;
use crate::storage::LocalRenderedContentIndex;

/// What a successful validation found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationSummary {
    pub latest_slug: String,
    pub cached_keys: usize,
}

/// Validate configuration and check that the cache index loads.
pub async fn run_validate(config: &Config) -> Result<ValidationSummary> {
    log::info!("Validating configuration...");

    if let Err(e) = config.validate() {
        log::error!("Config validation failed: {e}");
        return Err(e);
    }
    log::info!("Config OK");
    log::info!("  latest_slug: {}", config.version.latest_slug);
    log::info!("  archive backend: {:?}", config.archive.backend);
    log::info!("  max_concurrent: {}", config.resolver.max_concurrent);

    let index = match LocalRenderedContentIndex::load(&config.cache.index_file).await {
        Ok(index) => index,
        Err(e) => {
            log::error!("Cache index {} failed to load: {e}", config.cache.index_file);
            return Err(e);
        }
    };
    log::info!("Cache index OK ({} keys)", index.len());

    Ok(ValidationSummary {
        latest_slug: config.version.latest_slug.clone(),
        cached_keys: index.len(),
    })
}
