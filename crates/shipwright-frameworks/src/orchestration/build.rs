//! Build orchestration

use std::sync::Arc;

use serde::Serialize;
use shipwright_core::fs::{copy_dir_all, reset_dir};
use shipwright_core::{StageReport, ToolRunner};
use tracing::{info, instrument, warn};

use crate::artifacts::BuildArtifact;
use crate::context::BuildContext;
use crate::error::{FrameworkError, Result};
use crate::registry::BuilderRegistry;
use crate::traits::{BuildStep, PrerequisiteStatus};

/// Result of one build invocation
#[derive(Debug, Clone, Serialize)]
pub struct BuildOutcome {
    pub report: StageReport,
    /// `None` on failure and on dry runs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifact: Option<BuildArtifact>,
}

impl BuildOutcome {
    pub fn success(&self) -> bool {
        self.report.success
    }

    pub fn exit_code(&self) -> i32 {
        self.report.exit_code
    }
}

/// Build-specific orchestrator
pub struct BuildOrchestrator {
    runner: Arc<dyn ToolRunner>,
    registry: BuilderRegistry,
    check_prerequisites: bool,
}

impl BuildOrchestrator {
    pub fn new(runner: Arc<dyn ToolRunner>) -> Self {
        Self {
            runner,
            registry: BuilderRegistry::new(),
            check_prerequisites: true,
        }
    }

    /// Enable or disable the `PATH` check for required tools
    pub fn with_prerequisite_check(mut self, enabled: bool) -> Self {
        self.check_prerequisites = enabled;
        self
    }

    /// Build one platform.
    ///
    /// Errors never escape; they end up in the report with their exit code.
    #[instrument(skip(self, ctx), fields(platform = %ctx.platform, build_type = %ctx.build_type, dry_run = ctx.dry_run))]
    pub async fn build(&self, ctx: &BuildContext) -> BuildOutcome {
        let mut report = StageReport::begin("build", ctx.label());

        let artifact = match self.execute(ctx, &mut report).await {
            Ok(artifact) => {
                info!(
                    platform = %ctx.platform,
                    files = artifact.as_ref().map(|a| a.file_count),
                    "build completed"
                );
                artifact
            }
            Err(e) => {
                warn!(platform = %ctx.platform, error = %e, "build failed");
                report.abort(&e, e.exit_code());
                None
            }
        };

        BuildOutcome {
            report: report.finish(),
            artifact,
        }
    }

    async fn execute(
        &self,
        ctx: &BuildContext,
        report: &mut StageReport,
    ) -> Result<Option<BuildArtifact>> {
        let builder = self.registry.for_platform(ctx.platform);
        let build_root = &ctx.layout.build_dir;

        reset_dir(build_root).map_err(|e| {
            report.failed("clean build root", e.to_string());
            FrameworkError::build_io(ctx.platform.as_str(), "could not reset build root", e)
        })?;
        report.succeeded("clean build root", Some(build_root.display().to_string()));

        if self.check_prerequisites {
            let status = builder.check_prerequisites();
            if !status.satisfied {
                let err = prerequisites_error(&status);
                report.failed("check prerequisites", err.to_string());
                return Err(err);
            }
            report.succeeded("check prerequisites", None);
        } else {
            report.skipped("check prerequisites", "disabled");
        }

        info!(builder = builder.name(), "building {}", ctx.label());
        for step in builder.plan(ctx) {
            let name = step.to_string();
            if let Err(e) = self.execute_step(ctx, &step).await {
                report.failed(&name, e.to_string());
                return Err(e);
            }
            if ctx.dry_run && matches!(step, BuildStep::Stage { .. }) {
                report.skipped(name, "dry run");
            } else {
                report.succeeded(name, None);
            }
        }

        if ctx.dry_run {
            report.skipped("verify artifacts", "dry run");
            return Ok(None);
        }

        let output = ctx.layout.platform_output(ctx.platform);
        let artifact = BuildArtifact::inspect(ctx.platform, ctx.build_type, &output).map_err(|e| {
            report.failed("verify artifacts", e.to_string());
            e
        })?;
        report.succeeded(
            "verify artifacts",
            Some(format!(
                "{} files, {} bytes, sha256 {}",
                artifact.file_count, artifact.total_bytes, artifact.sha256
            )),
        );

        Ok(Some(artifact))
    }

    async fn execute_step(&self, ctx: &BuildContext, step: &BuildStep) -> Result<()> {
        match step {
            BuildStep::Run(invocation) => Ok(self.runner.run(invocation).await?),
            BuildStep::Stage { from, to } if ctx.dry_run => {
                info!(from = %from.display(), to = %to.display(), "dry run: skipping copy");
                Ok(())
            }
            BuildStep::Stage { from, to } => match copy_dir_all(from, to) {
                Ok(_) => Ok(()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    Err(FrameworkError::ArtifactNotFound {
                        expected_path: from.clone(),
                    })
                }
                Err(e) => Err(FrameworkError::build_io(
                    ctx.platform.as_str(),
                    format!("could not copy {}", from.display()),
                    e,
                )),
            },
        }
    }
}

fn prerequisites_error(status: &PrerequisiteStatus) -> FrameworkError {
    let details = status
        .missing()
        .map(|t| format!("  - {}: {}", t.name, t.install_hint))
        .collect::<Vec<_>>()
        .join("\n");

    FrameworkError::MissingTools { details }
}
