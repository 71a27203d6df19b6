//! Google Cloud Storage through the `gcloud` CLI

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use shipwright_core::{ToolInvocation, ToolRunner};
use tracing::debug;

use crate::error::{Result, StoreError};
use crate::traits::ObjectStore;

/// Cloud Storage bucket
pub struct GcsStore {
    bucket: String,
    runner: Arc<dyn ToolRunner>,
}

impl GcsStore {
    pub fn new(bucket: impl Into<String>, runner: Arc<dyn ToolRunner>) -> Self {
        Self {
            bucket: bucket.into(),
            runner,
        }
    }
}

#[async_trait]
impl ObjectStore for GcsStore {
    fn destination(&self) -> String {
        format!("gs://{}", self.bucket)
    }

    async fn upload(&self, local: &Path, key: &str) -> Result<()> {
        debug!(bucket = %self.bucket, key, "uploading to Cloud Storage");
        let invocation = ToolInvocation::new("gcloud")
            .args(["storage", "cp"])
            .arg(local.to_string_lossy())
            .arg(format!("gs://{}/{}", self.bucket, key));

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
