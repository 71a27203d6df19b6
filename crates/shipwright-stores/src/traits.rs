//! Deployment destination traits

use std::path::Path;

use async_trait::async_trait;
use shipwright_core::DeploymentConfig;

use crate::error::Result;

/// Object storage that accepts one file per call
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Human-readable destination, e.g. `s3://my-bucket`
    fn destination(&self) -> String;

    /// Upload `local` under `key`, replacing any existing object
    async fn upload(&self, local: &Path, key: &str) -> Result<()>;
}

/// CDN cache that can be purged after an upload
#[async_trait]
pub trait CdnInvalidator: Send + Sync {
    /// What is being invalidated, e.g. the distribution id
    fn target(&self) -> String;

    /// Invalidate every cached path
    async fn invalidate_all(&self) -> Result<()>;
}

/// Outcome of the schema-update step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaUpdate {
    Applied(String),
    Skipped(String),
}

/// Brings the application database up to date before a deploy
#[async_trait]
pub trait SchemaUpdater: Send + Sync {
    async fn update(&self, config: &DeploymentConfig) -> Result<SchemaUpdate>;
}
