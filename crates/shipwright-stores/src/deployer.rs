//! Deployment orchestration
//!
//! A deploy loads the environment's configuration, resolves it into a
//! [`DeploymentPlan`] for the target, runs the schema step and then the
//! platform step. Configuration problems surface while resolving the plan,
//! before anything is uploaded or executed.
//!
//! Uploads are best-effort: a failure stops the deploy, objects uploaded
//! before it stay in place, and the report lists them.

use std::sync::Arc;

use serde::Serialize;
use shipwright_core::config::load_deployment_config;
use shipwright_core::fs::list_files;
use shipwright_core::{
    DeploymentConfig, DesktopDeployment, Environment, Platform, ProjectLayout, StageReport,
    ToolRunner, WebProvider,
};
use tracing::{info, instrument, warn};

use crate::aws::{CloudFrontInvalidator, S3Store};
use crate::azure::AzureBlobStore;
use crate::database::NoopSchemaUpdater;
use crate::error::{Result, StoreError};
use crate::gcp::GcsStore;
use crate::on_premises::OnPremisesDeployer;
use crate::traits::{CdnInvalidator, ObjectStore, SchemaUpdate, SchemaUpdater};

/// What a deploy will do, resolved from configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeploymentPlan {
    Web(WebProvider),
    Desktop {
        platform: Platform,
        deployment: DesktopDeployment,
    },
}

impl DeploymentPlan {
    /// Resolve the plan for `platform`, validating every key it needs
    pub fn resolve(config: &DeploymentConfig, platform: Platform) -> Result<Self> {
        let plan = match platform {
            Platform::Web => Self::Web(config.web_provider()?),
            Platform::Windows | Platform::MacOs => Self::Desktop {
                platform,
                deployment: config.desktop_deployment()?,
            },
        };
        Ok(plan)
    }

    /// Short description for logs and reports
    pub fn describe(&self) -> String {
        match self {
            Self::Web(provider) => format!("web to {}", provider.provider().as_str()),
            Self::Desktop {
                platform,
                deployment: DesktopDeployment::OnPremises { target_server },
            } => format!("{} to on-premises server {}", platform, target_server),
            Self::Desktop {
                platform,
                deployment: DesktopDeployment::Cloud,
            } => format!("{} to cloud", platform),
        }
    }
}

/// Result of one deploy invocation
#[derive(Debug, Clone, Serialize)]
pub struct DeployOutcome {
    pub report: StageReport,
    /// Object keys uploaded, in upload order (also on failure)
    pub uploaded: Vec<String>,
}

impl DeployOutcome {
    pub fn success(&self) -> bool {
        self.report.success
    }

    pub fn exit_code(&self) -> i32 {
        self.report.exit_code
    }
}

/// Deploys staged build output
pub struct Deployer {
    runner: Arc<dyn ToolRunner>,
    layout: ProjectLayout,
    schema: Arc<dyn SchemaUpdater>,
    dry_run: bool,
}

impl Deployer {
    pub fn new(runner: Arc<dyn ToolRunner>, layout: ProjectLayout) -> Self {
        Self {
            runner,
            layout,
            schema: Arc::new(NoopSchemaUpdater),
            dry_run: false,
        }
    }

    pub fn with_schema_updater(mut self, schema: Arc<dyn SchemaUpdater>) -> Self {
        self.schema = schema;
        self
    }

    /// Record provider steps as skipped; the runner decides whether tools run
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Deploy `platform` to `environment`.
    ///
    /// Errors end up in the report together with their exit code.
    #[instrument(skip(self), fields(environment = %environment, platform = %platform))]
    pub async fn deploy(&self, environment: Environment, platform: Platform) -> DeployOutcome {
        let mut report = StageReport::begin("deploy", format!("{} {}", platform, environment));
        let mut uploaded = Vec::new();

        match self
            .execute(environment, platform, &mut report, &mut uploaded)
            .await
        {
            Ok(()) => info!(
                %environment,
                %platform,
                uploaded = uploaded.len(),
                "deployment completed"
            ),
            Err(e) => {
                warn!(%environment, %platform, error = %e, uploaded = uploaded.len(), "deployment failed");
                report.abort(&e, e.exit_code());
            }
        }

        DeployOutcome {
            report: report.finish(),
            uploaded,
        }
    }

    async fn execute(
        &self,
        environment: Environment,
        platform: Platform,
        report: &mut StageReport,
        uploaded: &mut Vec<String>,
    ) -> Result<()> {
        let (config, plan) = match self.resolve(environment, platform) {
            Ok(resolved) => resolved,
            Err(e) => {
                report.failed("load configuration", e.to_string());
                return Err(e);
            }
        };
        report.succeeded("load configuration", Some(plan.describe()));
        info!(plan = %plan.describe(), "resolved deployment plan");

        match self.schema.update(&config).await {
            Ok(SchemaUpdate::Applied(detail)) => report.succeeded("database", Some(detail)),
            Ok(SchemaUpdate::Skipped(reason)) => report.skipped("database", reason),
            Err(e) => {
                report.failed("database", e.to_string());
                return Err(e);
            }
        }

        match plan {
            DeploymentPlan::Web(provider) => self.deploy_web(provider, report, uploaded).await,
            DeploymentPlan::Desktop {
                platform,
                deployment: DesktopDeployment::OnPremises { target_server },
            } => {
                let step = format!("deploy {} to {}", platform, target_server);
                let deployer = OnPremisesDeployer::new(&self.layout.scripts_dir, self.runner.clone());
                match deployer.deploy(platform, &target_server).await {
                    Ok(()) => {
                        self.completed(report, step);
                        Ok(())
                    }
                    Err(e) => {
                        report.failed(step, e.to_string());
                        Err(e)
                    }
                }
            }
            DeploymentPlan::Desktop {
                platform,
                deployment: DesktopDeployment::Cloud,
            } => {
                warn!(%platform, "cloud deployment for desktop platforms is not supported, skipping");
                report.skipped(
                    format!("deploy {} to cloud", platform),
                    "cloud deployment for desktop platforms is not supported",
                );
                Ok(())
            }
        }
    }

    fn resolve(
        &self,
        environment: Environment,
        platform: Platform,
    ) -> Result<(DeploymentConfig, DeploymentPlan)> {
        let config = load_deployment_config(&self.layout.config_dir, environment)?;
        let plan = DeploymentPlan::resolve(&config, platform)?;
        Ok((config, plan))
    }

    async fn deploy_web(
        &self,
        provider: WebProvider,
        report: &mut StageReport,
        uploaded: &mut Vec<String>,
    ) -> Result<()> {
        let build_root = &self.layout.build_dir;
        let files = list_files(build_root).map_err(|e| {
            let err = if e.kind() == std::io::ErrorKind::NotFound {
                StoreError::ArtifactsMissing {
                    path: build_root.clone(),
                }
            } else {
                StoreError::Io(e)
            };
            report.failed("list artifacts", err.to_string());
            err
        })?;
        if files.is_empty() {
            warn!(build_root = %build_root.display(), "build output is empty, nothing to upload");
        }

        let (store, cdn) = self.web_destination(&provider, report);
        info!(destination = %store.destination(), files = files.len(), "uploading build output");

        for file in &files {
            let step = format!("upload {}", file.key);
            if let Err(e) = store.upload(&file.path, &file.key).await {
                report.failed(step, e.to_string());
                return Err(e);
            }
            if self.completed(report, step) {
                uploaded.push(file.key.clone());
            }
        }

        if let Some(cdn) = cdn {
            let step = format!("invalidate {}", cdn.target());
            if let Err(e) = cdn.invalidate_all().await {
                report.failed(step, e.to_string());
                return Err(e);
            }
            self.completed(report, step);
        }

        Ok(())
    }

    /// Record a finished provider step; false when it only ran as a dry run
    fn completed(&self, report: &mut StageReport, step: String) -> bool {
        if self.dry_run {
            report.skipped(step, "dry run");
            false
        } else {
            report.succeeded(step, None);
            true
        }
    }

    /// Store and optional CDN for a provider. Unsupported CDN refreshes are
    /// recorded as skipped steps.
    fn web_destination(
        &self,
        provider: &WebProvider,
        report: &mut StageReport,
    ) -> (Box<dyn ObjectStore>, Option<Box<dyn CdnInvalidator>>) {
        let runner = self.runner.clone();
        match provider {
            WebProvider::Aws {
                bucket,
                distribution_id,
            } => {
                let cdn = distribution_id.as_ref().map(|id| {
                    Box::new(CloudFrontInvalidator::new(id, runner.clone())) as Box<dyn CdnInvalidator>
                });
                (Box::new(S3Store::new(bucket, runner)), cdn)
            }
            WebProvider::Azure {
                connection_string,
                container,
                cdn_endpoint,
            } => {
                if let Some(endpoint) = cdn_endpoint {
                    skip_cdn_refresh(report, "Azure CDN", endpoint);
                }
                (
                    Box::new(AzureBlobStore::new(connection_string, container, runner)),
                    None,
                )
            }
            WebProvider::Gcp { bucket, cdn_url } => {
                if let Some(url) = cdn_url {
                    skip_cdn_refresh(report, "Cloud CDN", url);
                }
                (Box::new(GcsStore::new(bucket, runner)), None)
            }
        }
    }
}

fn skip_cdn_refresh(report: &mut StageReport, cdn: &str, target: &str) {
    warn!(cdn, target, "CDN refresh is not supported for this provider, skipping");
    report.skipped(
        format!("refresh {} {}", cdn, target),
        format!("{} refresh is not supported", cdn),
    );
}
