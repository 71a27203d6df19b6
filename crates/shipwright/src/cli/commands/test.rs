//! Test command - run a test category for one or all platforms

use std::sync::Arc;

use clap::{Args, ValueEnum};
use tracing::info;

use shipwright_core::{PlatformSelection, SystemRunner, TestCategory};
use shipwright_frameworks::{TestRunSpec, TestRunner};

use super::PlatformArg;
use crate::cli::{output, Cli, OutputFormat};
use crate::exit_codes;

/// Run tests
#[derive(Debug, Args)]
pub struct TestCommand {
    /// Test category
    #[arg(value_enum)]
    pub category: CategoryArg,

    /// Platform, or `all` for every platform
    #[arg(value_enum)]
    pub target: TargetArg,

    /// File name glob for test discovery (default from project config, `*test*`)
    #[arg(long)]
    pub pattern: Option<String>,
}

/// Test category argument
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CategoryArg {
    Unit,
    Integration,
    E2e,
}

impl From<CategoryArg> for TestCategory {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::Unit => TestCategory::Unit,
            CategoryArg::Integration => TestCategory::Integration,
            CategoryArg::E2e => TestCategory::E2e,
        }
    }
}

/// Platform selection argument
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TargetArg {
    Web,
    Windows,
    #[value(name = "macos")]
    MacOs,
    All,
}

impl From<TargetArg> for PlatformSelection {
    fn from(arg: TargetArg) -> Self {
        match arg {
            TargetArg::Web => PlatformSelection::One(PlatformArg::Web.into()),
            TargetArg::Windows => PlatformSelection::One(PlatformArg::Windows.into()),
            TargetArg::MacOs => PlatformSelection::One(PlatformArg::MacOs.into()),
            TargetArg::All => PlatformSelection::All,
        }
    }
}

impl TestCommand {
    /// Execute the test command; the exit code is always 0 or 1
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<i32> {
        info!(category = ?self.category, platform = ?self.target, pattern = ?self.pattern, "executing test command");
        let runtime = tokio::runtime::Runtime::new()?;
        runtime.block_on(self.execute_async(cli))
    }

    async fn execute_async(&self, cli: &Cli) -> anyhow::Result<i32> {
        let (config, layout) = match cli.project() {
            Ok(project) => project,
            Err(e) => {
                output::error(&e.to_string());
                return Ok(exit_codes::ERROR);
            }
        };

        let pattern = self
            .pattern
            .clone()
            .unwrap_or(config.test.default_pattern);
        let spec = TestRunSpec::new(self.category.into(), self.target.into(), pattern);

        if cli.text_output() {
            output::info(&format!(
                "Running {} tests for {} (pattern {})",
                spec.category, spec.selection, spec.pattern
            ));
        }

        let runner = TestRunner::new(Arc::new(SystemRunner), layout);
        let result = match runner.run(&spec).await {
            Ok(result) => result,
            Err(e) => {
                output::error(&e.to_string());
                return Ok(exit_codes::ERROR);
            }
        };

        match cli.format {
            OutputFormat::Json => output::print_json(&result)?,
            OutputFormat::Text if !cli.quiet => {
                output::print_report(&result.report);
                if result.success() {
                    output::success("All tests passed");
                } else {
                    let failed: Vec<_> = result
                        .outcomes
                        .iter()
                        .filter(|o| !o.passed)
                        .map(|o| o.platform.as_str())
                        .collect();
                    output::error(&format!("Tests failed on: {}", failed.join(", ")));
                }
            }
            OutputFormat::Text => {}
        }

        Ok(result.exit_code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shipwright_core::Platform;

    #[test]
    fn test_target_conversion() {
        assert_eq!(PlatformSelection::from(TargetArg::All), PlatformSelection::All);
        assert_eq!(
            PlatformSelection::from(TargetArg::MacOs),
            PlatformSelection::One(Platform::MacOs)
        );
        assert_eq!(TestCategory::from(CategoryArg::E2e), TestCategory::E2e);
    }
}
