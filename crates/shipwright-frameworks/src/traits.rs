//! Core traits for platform builders
//!
//! A builder does not run anything itself. It describes the ordered steps
//! for a build context and the orchestrator executes them, which keeps dry
//! runs and tests free of real toolchains.

use std::fmt;
use std::path::PathBuf;

use shipwright_core::{Platform, ToolInvocation};

use crate::context::BuildContext;

/// Build adapter for one platform
pub trait PlatformBuilder: Send + Sync {
    /// Unique identifier (e.g. "npm", "dotnet", "xcodebuild")
    fn id(&self) -> &'static str;

    /// Human-readable name
    fn name(&self) -> &'static str;

    /// The platform this builder produces
    fn platform(&self) -> Platform;

    /// Tools that must be on `PATH`
    fn required_tools(&self) -> Vec<ToolRequirement>;

    /// Ordered steps that build `ctx` into its platform output directory
    fn plan(&self, ctx: &BuildContext) -> Vec<BuildStep>;

    /// Check that required tools are installed
    fn check_prerequisites(&self) -> PrerequisiteStatus {
        self.required_tools()
            .into_iter()
            .fold(PrerequisiteStatus::ok(), |status, tool| {
                let found = which::which(tool.program).is_ok();
                status.with_tool(if found {
                    ToolStatus::found(tool.program)
                } else {
                    ToolStatus::missing(tool.program, tool.install_hint)
                })
            })
    }
}

/// A single build step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildStep {
    /// Invoke an external tool
    Run(ToolInvocation),
    /// Copy a toolchain output directory into the build-output root
    Stage { from: PathBuf, to: PathBuf },
}

impl BuildStep {
    pub fn run(invocation: ToolInvocation) -> Self {
        Self::Run(invocation)
    }

    pub fn stage(from: impl Into<PathBuf>, to: impl Into<PathBuf>) -> Self {
        Self::Stage {
            from: from.into(),
            to: to.into(),
        }
    }
}

impl fmt::Display for BuildStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Run(invocation) => write!(f, "{}", invocation),
            Self::Stage { from, to } => write!(f, "stage {} -> {}", from.display(), to.display()),
        }
    }
}

/// A tool a builder depends on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolRequirement {
    pub program: &'static str,
    pub install_hint: &'static str,
}

impl ToolRequirement {
    pub const fn new(program: &'static str, install_hint: &'static str) -> Self {
        Self {
            program,
            install_hint,
        }
    }
}

/// Status of prerequisites check
#[derive(Debug, Clone)]
pub struct PrerequisiteStatus {
    pub satisfied: bool,
    pub tools: Vec<ToolStatus>,
}

impl PrerequisiteStatus {
    pub fn ok() -> Self {
        Self {
            satisfied: true,
            tools: Vec::new(),
        }
    }

    pub fn with_tool(mut self, tool: ToolStatus) -> Self {
        if !tool.available {
            self.satisfied = false;
        }
        self.tools.push(tool);
        self
    }

    pub fn missing(&self) -> impl Iterator<Item = &ToolStatus> {
        self.tools.iter().filter(|t| !t.available)
    }
}

/// Status of a required tool
#[derive(Debug, Clone)]
pub struct ToolStatus {
    pub name: String,
    pub available: bool,
    pub install_hint: String,
}

impl ToolStatus {
    pub fn found(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            available: true,
            install_hint: String::new(),
        }
    }

    pub fn missing(name: impl Into<String>, install_hint: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            available: false,
            install_hint: install_hint.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prerequisite_status() {
        let status = PrerequisiteStatus::ok()
            .with_tool(ToolStatus::found("npm"))
            .with_tool(ToolStatus::missing("dotnet", "Install the .NET SDK"));

        assert!(!status.satisfied);
        assert_eq!(status.tools.len(), 2);
        assert_eq!(status.missing().count(), 1);
    }

    #[test]
    fn test_step_display() {
        let step = BuildStep::run(ToolInvocation::new("npm").arg("install"));
        assert_eq!(step.to_string(), "npm install");

        let step = BuildStep::stage("src/web/build", "build/web");
        assert_eq!(step.to_string(), "stage src/web/build -> build/web");
    }

    struct MissingToolBuilder;

    impl PlatformBuilder for MissingToolBuilder {
        fn id(&self) -> &'static str {
            "missing"
        }

        fn name(&self) -> &'static str {
            "Missing"
        }

        fn platform(&self) -> Platform {
            Platform::Web
        }

        fn required_tools(&self) -> Vec<ToolRequirement> {
            vec![ToolRequirement::new("definitely-not-a-real-tool-xyz", "nothing to install")]
        }

        fn plan(&self, _ctx: &BuildContext) -> Vec<BuildStep> {
            Vec::new()
        }
    }

    #[test]
    fn test_default_prerequisite_check() {
        let status = MissingToolBuilder.check_prerequisites();
        assert!(!status.satisfied);
        assert_eq!(status.tools[0].install_hint, "nothing to install");
    }
}
