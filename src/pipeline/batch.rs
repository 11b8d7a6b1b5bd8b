// src/pipeline/batch.rs

//! Bulk resolution of a path list into a JSON report.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::Result;
use crate::resolver::Resolver;

/// One successfully resolved input.
#[derive(Debug, Clone, Serialize)]
pub struct BatchEntry {
    pub input: String,
    pub location: String,
    pub matcher: String,
    pub is_direct_equivalent: bool,
}

/// One input that could not be resolved.
#[derive(Debug, Clone, Serialize)]
pub struct BatchFailure {
    pub input: String,
    pub error: String,
}

/// Result of a batch run.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub generated_at: DateTime<Utc>,
    pub latest_slug: String,
    pub total: usize,
    /// Entry count per matcher name
    pub by_matcher: BTreeMap<String, usize>,
    pub entries: Vec<BatchEntry>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<BatchFailure>,
}

impl BatchReport {
    pub fn direct_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_direct_equivalent).count()
    }

    /// Write the report as pretty JSON.
    pub async fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let json = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }
}

/// One path per line; blank lines and `#` comments are skipped.
pub fn read_inputs(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Resolve every path listed in `input` with bounded concurrency.
pub async fn run_batch(
    resolver: &Resolver,
    input: impl AsRef<Path>,
    max_concurrent: usize,
) -> Result<BatchReport> {
    let input = input.as_ref();
    let content = tokio::fs::read_to_string(input).await?;
    let inputs = read_inputs(&content);

    log::info!(
        "Resolving {} paths from {} (max_concurrent={})",
        inputs.len(),
        input.display(),
        max_concurrent
    );

    let total = inputs.len();
    let mut by_matcher = BTreeMap::new();
    let mut entries = Vec::with_capacity(total);
    let mut failures = Vec::new();

    for (input, result) in resolver.resolve_all(inputs, max_concurrent).await {
        match result {
            Ok(result) => {
                let matcher = result.matcher.name().to_string();
                *by_matcher.entry(matcher.clone()).or_insert(0) += 1;
                entries.push(BatchEntry {
                    location: result.redirect_location(),
                    is_direct_equivalent: result.is_direct_equivalent,
                    matcher,
                    input,
                });
            }
            Err(e) => {
                log::warn!("Failed to resolve {input:?}: {e}");
                failures.push(BatchFailure {
                    input,
                    error: e.to_string(),
                });
            }
        }
    }

    let report = BatchReport {
        generated_at: Utc::now(),
        latest_slug: resolver.version().latest_slug().to_string(),
        total,
        by_matcher,
        entries,
        failures,
    };

    log::info!(
        "Resolved {} paths ({} direct, {} failed)",
        report.entries.len(),
        report.direct_count(),
        report.failures.len()
    );

    Ok(report)
}
