//! On-premises desktop deployment through local scripts
//!
//! - windows: `powershell -File <scripts>/deploy_windows.ps1 <server>`
//! - macos: `bash <scripts>/deploy_macos.sh <server>`

use std::path::PathBuf;
use std::sync::Arc;

use shipwright_core::{Platform, ToolInvocation, ToolRunner};
use tracing::info;

use crate::error::{Result, StoreError};

/// Runs the deployment script for a desktop platform
pub struct OnPremisesDeployer {
    scripts_dir: PathBuf,
    runner: Arc<dyn ToolRunner>,
}

impl OnPremisesDeployer {
    pub fn new(scripts_dir: impl Into<PathBuf>, runner: Arc<dyn ToolRunner>) -> Self {
        Self {
            scripts_dir: scripts_dir.into(),
            runner,
        }
    }

    /// Deployment script for `platform`; web has none
    pub fn script_path(&self, platform: Platform) -> Option<PathBuf> {
        let name = match platform {
            Platform::Windows => "deploy_windows.ps1",
            Platform::MacOs => "deploy_macos.sh",
            Platform::Web => return None,
        };
        Some(self.scripts_dir.join(name))
    }

    pub fn invocation(&self, platform: Platform, target_server: &str) -> Option<ToolInvocation> {
        let script = self.script_path(platform)?.to_string_lossy().into_owned();
        let invocation = match platform {
            Platform::Windows => ToolInvocation::new("powershell").arg("-File").arg(script),
            Platform::MacOs => ToolInvocation::new("bash").arg(script),
            Platform::Web => return None,
        };
        Some(invocation.arg(target_server))
    }

    pub async fn deploy(&self, platform: Platform, target_server: &str) -> Result<()> {
        let (Some(script), Some(invocation)) = (
            self.script_path(platform),
            self.invocation(platform, target_server),
        ) else {
            return Err(StoreError::Other(format!(
                "{} has no on-premises deployment",
                platform
            )));
        };

        info!(%platform, target_server, script = %script.display(), "running deployment script");
        self.runner
            .run(&invocation)
            .await
            .map_err(|source| StoreError::DeployScriptFailed { script, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shipwright_core::RecordingRunner;

    #[test]
    fn test_script_invocations() {
        let deployer = OnPremisesDeployer::new("/app/src/scripts", Arc::new(RecordingRunner::new()));

        let windows = deployer.invocation(Platform::Windows, "win-srv-01").unwrap();
        assert_eq!(
            windows.command_line(),
            "powershell -File /app/src/scripts/deploy_windows.ps1 win-srv-01"
        );

        let macos = deployer.invocation(Platform::MacOs, "mac-srv-01").unwrap();
        assert_eq!(
            macos.command_line(),
            "bash /app/src/scripts/deploy_macos.sh mac-srv-01"
        );

        assert!(deployer.invocation(Platform::Web, "srv").is_none());
    }

    #[tokio::test]
    async fn test_script_failure() {
        let runner = Arc::new(RecordingRunner::new().fail_when("deploy_macos.sh", 2));
        let deployer = OnPremisesDeployer::new("/app/src/scripts", runner);

        let err = deployer.deploy(Platform::MacOs, "mac-srv-01").await.unwrap_err();
        match &err {
            StoreError::DeployScriptFailed { script, .. } => {
                assert_eq!(script, &PathBuf::from("/app/src/scripts/deploy_macos.sh"))
            }
            other => panic!("unexpected error {other}"),
        }
        assert_eq!(err.exit_code(), 20);
    }
}
