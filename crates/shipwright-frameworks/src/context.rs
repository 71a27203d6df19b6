//! Execution contexts for build and test operations

use shipwright_core::{BuildType, Platform, PlatformSelection, ProjectLayout, TestCategory};

/// Build context - everything needed to build one platform
#[derive(Debug, Clone)]
pub struct BuildContext {
    /// Resolved project directories
    pub layout: ProjectLayout,

    /// Target platform
    pub platform: Platform,

    /// Debug or release
    pub build_type: BuildType,

    /// Log tool invocations and file copies without performing them
    pub dry_run: bool,
}

impl BuildContext {
    pub fn new(layout: ProjectLayout, platform: Platform) -> Self {
        Self {
            layout,
            platform,
            build_type: BuildType::Release,
            dry_run: false,
        }
    }

    pub fn with_build_type(mut self, build_type: BuildType) -> Self {
        self.build_type = build_type;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// `web (release)` style label for logs and reports
    pub fn label(&self) -> String {
        format!("{} ({})", self.platform, self.build_type)
    }
}

/// What the test runner should execute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestRunSpec {
    pub category: TestCategory,
    pub selection: PlatformSelection,
    /// File name glob
    pub pattern: String,
}

impl TestRunSpec {
    pub fn new(category: TestCategory, selection: PlatformSelection, pattern: impl Into<String>) -> Self {
        Self {
            category,
            selection,
            pattern: pattern.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_context_defaults() {
        let ctx = BuildContext::new(ProjectLayout::new("/app"), Platform::Windows);
        assert_eq!(ctx.build_type, BuildType::Release);
        assert!(!ctx.dry_run);
        assert_eq!(ctx.label(), "windows (release)");

        let ctx = ctx.with_build_type(BuildType::Debug).with_dry_run(true);
        assert_eq!(ctx.label(), "windows (debug)");
        assert!(ctx.dry_run);
    }
}
