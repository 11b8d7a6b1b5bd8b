//! AWS S3 archive implementation.
//!
//! Archived documentation lives under `{bucket}/archives/boost_{slug}/...`.
//! Only metadata is fetched (`HeadObject`); object bodies are never read.

use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::error::DisplayErrorContext;

use crate::error::{AppError, Result};
use crate::models::ArchiveConfig;
use crate::storage::ArchiveStore;

/// S3-backed archive store.
pub struct S3Archive {
    client: Client,
    bucket: String,
}

impl S3Archive {
    /// Create a new S3 archive instance.
    pub fn new(client: Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    /// Create S3 archive from configuration, using the default credential chain.
    pub async fn from_config(config: &ArchiveConfig) -> Result<Self> {
        if config.bucket.trim().is_empty() {
            return Err(AppError::config("archive.bucket is empty"));
        }

        let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .load()
            .await;
        let client = Client::new(&sdk_config);

        Ok(Self::new(client, config.bucket.clone()))
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }
}

#[async_trait]
impl ArchiveStore for S3Archive {
    async fn object_exists(&self, key: &str) -> Result<bool> {
        let result = self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await;

        match result {
            Ok(_) => Ok(true),
            Err(err) => {
                // Check if it's a "not found" error
                if err.as_service_error().is_some_and(|e| e.is_not_found()) {
                    Ok(false)
                } else {
                    Err(AppError::s3(DisplayErrorContext(&err)))
                }
            }
        }
    }

    fn location(&self, key: &str) -> String {
        format!("s3://{}/{}", self.bucket, key)
    }
}
