//! Web builder
//!
//! npm project under `src/web`; `npm run build` writes to `src/web/build`,
//! which is then staged into the build-output root.

use shipwright_core::{BuildType, Platform, ToolInvocation};

use crate::context::BuildContext;
use crate::traits::{BuildStep, PlatformBuilder, ToolRequirement};

/// npm-based web builder
#[derive(Debug, Default, Clone, Copy)]
pub struct WebBuilder;

impl WebBuilder {
    pub fn new() -> Self {
        Self
    }
}

impl PlatformBuilder for WebBuilder {
    fn id(&self) -> &'static str {
        "npm"
    }

    fn name(&self) -> &'static str {
        "Web (npm)"
    }

    fn platform(&self) -> Platform {
        Platform::Web
    }

    fn required_tools(&self) -> Vec<ToolRequirement> {
        vec![ToolRequirement::new(
            "npm",
            "Install Node.js from https://nodejs.org",
        )]
    }

    fn plan(&self, ctx: &BuildContext) -> Vec<BuildStep> {
        let source = ctx.layout.platform_source(Platform::Web);

        let mut build = ToolInvocation::new("npm")
            .args(["run", "build"])
            .current_dir(&source);
        if ctx.build_type == BuildType::Debug {
            build = build.arg("--debug");
        }

        vec![
            BuildStep::run(ToolInvocation::new("npm").arg("install").current_dir(&source)),
            BuildStep::run(build),
            BuildStep::stage(
                source.join("build"),
                ctx.layout.platform_output(Platform::Web),
            ),
        ]
    }
}
