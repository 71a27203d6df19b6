//! Shipwright Core - Shared foundation for build, deploy and test orchestration
//!
//! This crate provides the domain types, error handling, configuration loading,
//! subprocess plumbing and structured stage reports used by the Shipwright
//! builder, deployer and test runner.

pub mod config;
pub mod error;
pub mod fs;
pub mod process;
pub mod report;
pub mod types;

pub use config::{DeploymentConfig, DesktopDeployment, ProjectConfig, ProjectLayout, WebProvider};
pub use error::{ConfigError, Result, ShipwrightError, ToolError};
pub use process::{DryRunRunner, RecordingRunner, SystemRunner, ToolInvocation, ToolRunner};
pub use report::{StageReport, StepRecord, StepStatus};
pub use types::{
    BuildType, CloudProvider, DeploymentType, Environment, Platform, PlatformSelection,
    TestCategory,
};
