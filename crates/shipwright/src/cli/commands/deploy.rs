//! Deploy command - push build output to an environment

use clap::{Args, ValueEnum};
use console::style;
use tracing::info;

use shipwright_core::{Environment, Platform};
use shipwright_stores::Deployer;

use super::PlatformArg;
use crate::cli::{output, Cli, OutputFormat};

/// Deploy build output for one platform
#[derive(Debug, Args)]
pub struct DeployCommand {
    /// Target environment; selects config/<environment>.json
    #[arg(value_enum)]
    pub environment: EnvironmentArg,

    /// Platform to deploy
    #[arg(value_enum)]
    pub target: PlatformArg,

    /// Show the upload plan without invoking provider tools
    #[arg(long)]
    pub dry_run: bool,
}

/// Deployment environment argument
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum EnvironmentArg {
    Dev,
    Staging,
    Prod,
}

impl From<EnvironmentArg> for Environment {
    fn from(arg: EnvironmentArg) -> Self {
        match arg {
            EnvironmentArg::Dev => Environment::Dev,
            EnvironmentArg::Staging => Environment::Staging,
            EnvironmentArg::Prod => Environment::Prod,
        }
    }
}

impl DeployCommand {
    /// Execute the deploy command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<i32> {
        info!(environment = ?self.environment, platform = ?self.target, dry_run = self.dry_run, "executing deploy command");
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

        let environment: Environment = self.environment.into();
        let platform: Platform = self.target.into();

        if cli.text_output() {
            output::info(&format!(
                "Deploying {} to {}",
                style(platform).cyan(),
                style(environment).cyan()
            ));
            if self.dry_run {
                output::warning("Dry run - provider tools will not be invoked");
            }
        }

        let deployer = Deployer::new(cli.runner(self.dry_run), layout).with_dry_run(self.dry_run);
        let outcome = deployer.deploy(environment, platform).await;

        match cli.format {
            OutputFormat::Json => output::print_json(&outcome)?,
            OutputFormat::Text if !cli.quiet => {
                output::print_report(&outcome.report);
                if !outcome.success() && !outcome.uploaded.is_empty() {
                    output::warning(&format!(
                        "{} object(s) were uploaded before the failure and remain at the destination",
                        outcome.uploaded.len()
                    ));
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
