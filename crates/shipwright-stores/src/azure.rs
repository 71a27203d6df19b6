//! Azure Blob Storage through the `az` CLI
//!
//! The connection string travels in `AZURE_STORAGE_CONNECTION_STRING` so it
//! never shows up in logged command lines.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use shipwright_core::{ToolInvocation, ToolRunner};
use tracing::debug;

use crate::error::{Result, StoreError};
use crate::traits::ObjectStore;

const CONNECTION_STRING_VAR: &str = "AZURE_STORAGE_CONNECTION_STRING";

/// Blob container
pub struct AzureBlobStore {
    connection_string: String,
    container: String,
    runner: Arc<dyn ToolRunner>,
}

impl AzureBlobStore {
    pub fn new(
        connection_string: impl Into<String>,
        container: impl Into<String>,
        runner: Arc<dyn ToolRunner>,
    ) -> Self {
        Self {
            connection_string: connection_string.into(),
            container: container.into(),
            runner,
        }
    }
}

#[async_trait]
impl ObjectStore for AzureBlobStore {
    fn destination(&self) -> String {
        format!("azure blob container '{}'", self.container)
    }

    async fn upload(&self, local: &Path, key: &str) -> Result<()> {
        debug!(container = %self.container, key, "uploading blob");
        let invocation = ToolInvocation::new("az")
            .args(["storage", "blob", "upload", "--container-name"])
            .arg(&self.container)
            .args(["--name", key, "--file"])
            .arg(local.to_string_lossy())
            .arg("--overwrite")
            .env(CONNECTION_STRING_VAR, &self.connection_string);

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
