//! Database schema step
//!
//! There are no migrations to apply yet; the step is recorded as skipped so
//! the gap is visible in every deploy report.

use async_trait::async_trait;
use shipwright_core::DeploymentConfig;
use tracing::{debug, info};

use crate::error::Result;
use crate::traits::{SchemaUpdate, SchemaUpdater};

/// Schema updater that never changes anything
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSchemaUpdater;

#[async_trait]
impl SchemaUpdater for NoopSchemaUpdater {
    async fn update(&self, config: &DeploymentConfig) -> Result<SchemaUpdate> {
        if config.database_url.is_some() {
            debug!("database_url configured, but no migrations are defined");
        }
        info!("database schema update skipped");
        Ok(SchemaUpdate::Skipped("no schema migrations defined".to_string()))
    }
}
