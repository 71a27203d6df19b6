//! Windows builder
//!
//! .NET project under `src/windows`. `dotnet publish` writes straight into the
//! platform output directory, so there is no staging copy.

use shipwright_core::{BuildType, Platform, ToolInvocation};

use crate::context::BuildContext;
use crate::traits::{BuildStep, PlatformBuilder, ToolRequirement};

/// .NET CLI builder
#[derive(Debug, Default, Clone, Copy)]
pub struct WindowsBuilder;

impl WindowsBuilder {
    pub fn new() -> Self {
        Self
    }
}

impl PlatformBuilder for WindowsBuilder {
    fn id(&self) -> &'static str {
        "dotnet"
    }

    fn name(&self) -> &'static str {
        "Windows (.NET)"
    }

    fn platform(&self) -> Platform {
        Platform::Windows
    }

    fn required_tools(&self) -> Vec<ToolRequirement> {
        vec![ToolRequirement::new(
            "dotnet",
            "Install the .NET SDK from https://dotnet.microsoft.com/download",
        )]
    }

    fn plan(&self, ctx: &BuildContext) -> Vec<BuildStep> {
        let source = ctx.layout.platform_source(Platform::Windows);
        let output = ctx.layout.platform_output(Platform::Windows);
        let release = ctx.build_type == BuildType::Release;

        let mut build = ToolInvocation::new("dotnet").arg("build").current_dir(&source);
        let mut publish = ToolInvocation::new("dotnet")
            .arg("publish")
            .arg("-o")
            .arg(output.to_string_lossy())
            .current_dir(&source);
        if release {
            build = build.args(["-c", "Release"]);
            publish = publish.args(["-c", "Release"]);
        }

        vec![
            BuildStep::run(ToolInvocation::new("dotnet").arg("restore").current_dir(&source)),
            BuildStep::run(build),
            BuildStep::run(publish),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shipwright_core::ProjectLayout;

    #[test]
    fn test_release_plan() {
        let ctx = BuildContext::new(ProjectLayout::new("/app"), Platform::Windows);
        let lines: Vec<_> = WindowsBuilder.plan(&ctx).iter().map(|s| s.to_string()).collect();

        assert_eq!(
            lines,
            vec![
                "dotnet restore",
                "dotnet build -c Release",
                "dotnet publish -o /app/build/windows -c Release",
            ]
        );
    }

    #[test]
    fn test_debug_plan_has_no_configuration() {
        let ctx = BuildContext::new(ProjectLayout::new("/app"), Platform::Windows)
            .with_build_type(BuildType::Debug);
        let lines: Vec<_> = WindowsBuilder.plan(&ctx).iter().map(|s| s.to_string()).collect();

        assert_eq!(lines[1], "dotnet build");
        assert_eq!(lines[2], "dotnet publish -o /app/build/windows");
    }
}
