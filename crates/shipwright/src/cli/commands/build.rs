//! Build command - build one platform into the build-output directory

use clap::{Args, ValueEnum};
use console::style;
use tracing::info;

use shipwright_core::{BuildType, Platform};
use shipwright_frameworks::{BuildContext, BuildOrchestrator};

use super::PlatformArg;
use crate::cli::{output, Cli, OutputFormat};

/// Build a project for one platform
#[derive(Debug, Args)]
pub struct BuildCommand {
    /// Target platform
    #[arg(short, long, value_enum)]
    pub target: PlatformArg,

    /// Build type
    #[arg(long, value_enum, default_value = "release")]
    pub build_type: BuildTypeArg,

    /// Log tool invocations without running them
    #[arg(long)]
    pub dry_run: bool,

    /// Skip prerequisite checks
    #[arg(long)]
    pub skip_checks: bool,
}

/// Build type argument
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum BuildTypeArg {
    /// Debug build
    Debug,
    /// Optimized release build
    #[default]
    Release,
}

impl From<BuildTypeArg> for BuildType {
    fn from(arg: BuildTypeArg) -> Self {
        match arg {
            BuildTypeArg::Debug => BuildType::Debug,
            BuildTypeArg::Release => BuildType::Release,
        }
    }
}

impl BuildCommand {
    /// Execute the build command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<i32> {
        info!(platform = ?self.target, build_type = ?self.build_type, dry_run = self.dry_run, "executing build command");
        let runtime = tokio::runtime::Runtime::new()?;
        runtime.block_on(self.execute_async(cli))
    }

    async fn execute_async(&self, cli: &Cli) -> anyhow::Result<i32> {
        let (_, layout) = match cli.project() {
            Ok(project) => project,
            Err(e) => {
                output::error(&e.to_string());
                return Ok(e.exit_code());
            }
        };

        let platform: Platform = self.target.into();
        let build_type: BuildType = self.build_type.into();

        if cli.text_output() {
            println!();
            println!("{}", style("Building project...").bold());
            println!("{}", output::key_value("Platform", &platform.to_string()));
            println!("{}", output::key_value("Build type", build_type.as_str()));
            println!(
                "{}",
                output::key_value(
                    "Output",
                    &output::path_style()
                        .apply_to(layout.platform_output(platform).display())
                        .to_string()
                )
            );
            if self.dry_run {
                println!("  {}", style("DRY RUN").yellow().bold());
            }
        }

        let ctx = BuildContext::new(layout, platform)
            .with_build_type(build_type)
            .with_dry_run(self.dry_run);
        let orchestrator =
            BuildOrchestrator::new(cli.runner(self.dry_run)).with_prerequisite_check(!self.skip_checks);

        let outcome = orchestrator.build(&ctx).await;

        match cli.format {
            OutputFormat::Json => output::print_json(&outcome)?,
            OutputFormat::Text if !cli.quiet => {
                output::print_report(&outcome.report);
                if let Some(ref artifact) = outcome.artifact {
                    println!(
                        "{}",
                        output::key_value("Artifact", &artifact.path.display().to_string())
                    );
                    println!("{}", output::key_value("SHA256", &artifact.sha256));
                }
            }
            OutputFormat::Text => {
                if let Some(ref message) = outcome.report.error {
                    output::error(message);
                }
            }
        }

        Ok(outcome.exit_code())
    }
}
