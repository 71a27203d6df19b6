//! macOS builder
//!
//! Xcode project under `src/macos`; xcodebuild leaves its products in
//! `src/macos/build/<Configuration>`.

use shipwright_core::{Platform, ToolInvocation};

use crate::context::BuildContext;
use crate::traits::{BuildStep, PlatformBuilder, ToolRequirement};

/// xcodebuild builder
#[derive(Debug, Default, Clone, Copy)]
pub struct MacOsBuilder;

impl MacOsBuilder {
    pub fn new() -> Self {
        Self
    }
}

impl PlatformBuilder for MacOsBuilder {
    fn id(&self) -> &'static str {
        "xcodebuild"
    }

    fn name(&self) -> &'static str {
        "macOS (Xcode)"
    }

    fn platform(&self) -> Platform {
        Platform::MacOs
    }

    fn required_tools(&self) -> Vec<ToolRequirement> {
        vec![ToolRequirement::new(
            "xcodebuild",
            "Install Xcode from the Mac App Store, then run: xcode-select --install",
        )]
    }

    fn plan(&self, ctx: &BuildContext) -> Vec<BuildStep> {
        let source = ctx.layout.platform_source(Platform::MacOs);
        let configuration = ctx.build_type.configuration_name();

        vec![
            BuildStep::run(
                ToolInvocation::new("xcodebuild")
                    .args(["-configuration", configuration])
                    .current_dir(&source),
            ),
            BuildStep::stage(
                source.join("build").join(configuration),
                ctx.layout.platform_output(Platform::MacOs),
            ),
        ]
    }
}
