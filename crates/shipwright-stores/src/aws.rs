//! AWS: S3 uploads and CloudFront invalidation through the `aws` CLI

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use shipwright_core::{ToolInvocation, ToolRunner};
use tracing::{debug, info};

use crate::error::{Result, StoreError};
use crate::traits::{CdnInvalidator, ObjectStore};

/// S3 bucket
pub struct S3Store {
    bucket: String,
    runner: Arc<dyn ToolRunner>,
}

impl S3Store {
    pub fn new(bucket: impl Into<String>, runner: Arc<dyn ToolRunner>) -> Self {
        Self {
            bucket: bucket.into(),
            runner,
        }
    }

    fn object_url(&self, key: &str) -> String {
        format!("s3://{}/{}", self.bucket, key)
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    fn destination(&self) -> String {
        format!("s3://{}", self.bucket)
    }

    async fn upload(&self, local: &Path, key: &str) -> Result<()> {
        debug!(bucket = %self.bucket, key, "uploading to S3");
        let invocation = ToolInvocation::new("aws")
            .args(["s3", "cp"])
            .arg(local.to_string_lossy())
            .arg(self.object_url(key));

        self.runner
            .run(&invocation)
            .await
            .map_err(|source| StoreError::UploadFailed {
                key: key.to_string(),
                destination: self.destination(),
                source,
            })
    }
}

/// CloudFront distribution
pub struct CloudFrontInvalidator {
    distribution_id: String,
    runner: Arc<dyn ToolRunner>,
}

impl CloudFrontInvalidator {
    pub fn new(distribution_id: impl Into<String>, runner: Arc<dyn ToolRunner>) -> Self {
        Self {
            distribution_id: distribution_id.into(),
            runner,
        }
    }
}

#[async_trait]
impl CdnInvalidator for CloudFrontInvalidator {
    fn target(&self) -> String {
        format!("CloudFront distribution {}", self.distribution_id)
    }

    async fn invalidate_all(&self) -> Result<()> {
        info!(distribution_id = %self.distribution_id, "creating CloudFront invalidation");
        let invocation = ToolInvocation::new("aws")
            .args(["cloudfront", "create-invalidation", "--distribution-id"])
            .arg(&self.distribution_id)
            .args(["--paths", "/*"]);

        self.runner
            .run(&invocation)
            .await
            .map_err(|source| StoreError::InvalidationFailed {
                target: self.target(),
                source,
            })
    }
}
