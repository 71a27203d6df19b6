//! Environment hooks around integration and end-to-end suites

use async_trait::async_trait;
use shipwright_core::{Platform, TestCategory};
use tracing::debug;

use crate::error::Result;

/// Prepares and cleans up whatever a suite needs (databases, running apps)
#[async_trait]
pub trait TestEnvironment: Send + Sync {
    async fn setup(&self, platform: Platform, category: TestCategory) -> Result<()>;

    /// Runs after a successful setup, whether or not the suite passed
    async fn teardown(&self, platform: Platform, category: TestCategory) -> Result<()>;
}

/// Environment with nothing to prepare
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopEnvironment;

#[async_trait]
impl TestEnvironment for NoopEnvironment {
    async fn setup(&self, platform: Platform, category: TestCategory) -> Result<()> {
        debug!(%platform, %category, "no test environment to set up");
        Ok(())
    }

    async fn teardown(&self, platform: Platform, category: TestCategory) -> Result<()> {
        debug!(%platform, %category, "no test environment to tear down");
        Ok(())
    }
}
