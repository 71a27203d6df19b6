//! CLI definition and command handling

pub mod commands;
pub mod output;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use shipwright_core::config::discover_project;
use shipwright_core::{DryRunRunner, ProjectConfig, ProjectLayout, ShipwrightError, SystemRunner, ToolRunner};

use commands::{BuildCommand, CompletionsCommand, DeployCommand, TestCommand};

/// Shipwright - build, deploy and test orchestration for web, Windows and macOS
#[derive(Debug, Parser)]
#[command(name = "shipwright")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Project directory (defaults to the current directory)
    #[arg(short = 'C', long, global = true, env = "SHIPWRIGHT_PROJECT_DIR")]
    pub directory: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for CLI
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output
    Json,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Build one platform into the build-output directory
    Build(BuildCommand),

    /// Deploy build output to an environment
    Deploy(DeployCommand),

    /// Run unit, integration or end-to-end tests
    Test(TestCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

impl Cli {
    /// Execute the CLI command and return the process exit code
    pub fn execute(&self) -> anyhow::Result<i32> {
        match &self.command {
            Commands::Build(cmd) => cmd.execute(self),
            Commands::Deploy(cmd) => cmd.execute(self),
            Commands::Test(cmd) => cmd.execute(self),
            Commands::Completions(cmd) => cmd.execute(self),
        }
    }

    /// Resolve the project from `--directory` or the current directory
    pub fn project(&self) -> Result<(ProjectConfig, ProjectLayout), ShipwrightError> {
        let cwd = std::env::current_dir()?;
        let start = match &self.directory {
            Some(dir) => cwd.join(dir),
            None => cwd,
        };
        Ok(discover_project(&start)?)
    }

    /// Real tool runner, or one that only logs for dry runs
    pub fn runner(&self, dry_run: bool) -> Arc<dyn ToolRunner> {
        if dry_run {
            Arc::new(DryRunRunner::new())
        } else {
            Arc::new(SystemRunner)
        }
    }

    /// Whether human-readable output should be printed
    pub fn text_output(&self) -> bool {
        self.format == OutputFormat::Text && !self.quiet
    }
}
