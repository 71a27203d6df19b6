//! Test runner orchestration
//!
//! Runs one category of tests for one platform or for all of them. With
//! `all`, every platform runs even after an earlier one failed.

use std::sync::Arc;

use serde::Serialize;
use shipwright_core::{Platform, ProjectLayout, StageReport, TestCategory, ToolError, ToolRunner};
use tracing::{info, instrument, warn};

use super::discovery::{discover_tests, selection_expression, TestPattern};
use super::environment::{NoopEnvironment, TestEnvironment};
use super::toolchains::{toolchain_for, TestToolchain};
use crate::context::TestRunSpec;
use crate::error::Result;

/// Result for one platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlatformOutcome {
    pub platform: Platform,
    pub passed: bool,
    /// Matching unit test files; `None` for directory-level suites
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discovered: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl PlatformOutcome {
    fn passed(platform: Platform, discovered: Option<usize>, detail: Option<String>) -> Self {
        Self {
            platform,
            passed: true,
            discovered,
            detail,
        }
    }

    fn failed(platform: Platform, discovered: Option<usize>, detail: String) -> Self {
        Self {
            platform,
            passed: false,
            discovered,
            detail: Some(detail),
        }
    }
}

/// Aggregated result of a test invocation
#[derive(Debug, Clone, Serialize)]
pub struct TestRunReport {
    pub category: TestCategory,
    pub pattern: String,
    pub outcomes: Vec<PlatformOutcome>,
    pub report: StageReport,
}

impl TestRunReport {
    /// True only when every selected platform passed
    pub fn success(&self) -> bool {
        self.outcomes.iter().all(|o| o.passed)
    }

    /// 0 or 1, nothing else
    pub fn exit_code(&self) -> i32 {
        if self.success() {
            0
        } else {
            1
        }
    }
}

/// Runs test categories through each platform's test tool
pub struct TestRunner {
    runner: Arc<dyn ToolRunner>,
    layout: ProjectLayout,
    environment: Arc<dyn TestEnvironment>,
}

impl TestRunner {
    pub fn new(runner: Arc<dyn ToolRunner>, layout: ProjectLayout) -> Self {
        Self {
            runner,
            layout,
            environment: Arc::new(NoopEnvironment),
        }
    }

    pub fn with_environment(mut self, environment: Arc<dyn TestEnvironment>) -> Self {
        self.environment = environment;
        self
    }

    /// Run `spec` for every selected platform, in platform order.
    ///
    /// Only an invalid pattern is an error; everything that goes wrong inside
    /// a platform is recorded as that platform failing.
    #[instrument(skip(self, spec), fields(category = %spec.category, selection = %spec.selection, pattern = %spec.pattern))]
    pub async fn run(&self, spec: &TestRunSpec) -> Result<TestRunReport> {
        let pattern = TestPattern::new(&spec.pattern)?;
        let mut report = StageReport::begin("test", format!("{} {}", spec.category, spec.selection));
        let mut outcomes = Vec::new();

        for platform in spec.selection.platforms() {
            info!(%platform, category = %spec.category, "running tests");
            let outcome = self.run_platform(platform, spec.category, &pattern).await;

            if outcome.passed {
                info!(%platform, "tests passed");
                report.succeeded(platform.as_str(), outcome.detail.clone());
            } else {
                warn!(%platform, detail = outcome.detail.as_deref(), "tests failed");
                report.failed(
                    platform.as_str(),
                    outcome.detail.clone().unwrap_or_default(),
                );
            }
            outcomes.push(outcome);
        }

        Ok(TestRunReport {
            category: spec.category,
            pattern: spec.pattern.clone(),
            outcomes,
            report: report.finish(),
        })
    }

    async fn run_platform(
        &self,
        platform: Platform,
        category: TestCategory,
        pattern: &TestPattern,
    ) -> PlatformOutcome {
        match category {
            TestCategory::Unit => self.run_unit(platform, pattern).await,
            TestCategory::Integration | TestCategory::E2e => {
                self.run_suite(platform, category, pattern).await
            }
        }
    }

    async fn run_unit(&self, platform: Platform, pattern: &TestPattern) -> PlatformOutcome {
        let dir = self.layout.test_dir(platform, TestCategory::Unit);
        let files = match discover_tests(&dir, pattern) {
            Ok(files) => files,
            Err(e) => return PlatformOutcome::failed(platform, None, e.to_string()),
        };

        if files.is_empty() {
            warn!(%platform, dir = %dir.display(), pattern = pattern.as_str(), "no unit tests matched");
            return PlatformOutcome::passed(platform, Some(0), Some("no tests matched".to_string()));
        }

        let toolchain = toolchain_for(platform);
        let invocation = toolchain.unit(&self.layout.root, &dir, &files);
        match self.runner.run(&invocation).await {
            Ok(()) => PlatformOutcome::passed(platform, Some(files.len()), None),
            Err(e) => PlatformOutcome::failed(
                platform,
                Some(files.len()),
                failure_detail(toolchain.as_ref(), &e),
            ),
        }
    }

    async fn run_suite(
        &self,
        platform: Platform,
        category: TestCategory,
        pattern: &TestPattern,
    ) -> PlatformOutcome {
        let dir = self.layout.test_dir(platform, category);
        if !dir.is_dir() {
            warn!(%platform, dir = %dir.display(), "no {} tests found", category);
            return PlatformOutcome::passed(platform, None, Some("no test directory".to_string()));
        }

        if let Err(e) = self.environment.setup(platform, category).await {
            return PlatformOutcome::failed(platform, None, format!("environment setup failed: {e}"));
        }

        let toolchain = toolchain_for(platform);
        let expression = selection_expression(pattern.as_str());
        let invocation = toolchain.suite(&self.layout.root, &dir, expression.as_deref());
        let result = self.runner.run(&invocation).await;

        let teardown = self.environment.teardown(platform, category).await;

        match (result, teardown) {
            (Err(e), _) => {
                PlatformOutcome::failed(platform, None, failure_detail(toolchain.as_ref(), &e))
            }
            (Ok(()), Err(e)) => {
                PlatformOutcome::failed(platform, None, format!("environment teardown failed: {e}"))
            }
            (Ok(()), Ok(())) => PlatformOutcome::passed(platform, None, None),
        }
    }
}

/// Tool error text, with an install hint when the test tool is not installed
fn failure_detail(toolchain: &dyn TestToolchain, error: &ToolError) -> String {
    match error {
        ToolError::Spawn { .. } => {
            let requirement = toolchain.requirement();
            format!("{} ({}: {})", error, requirement.program, requirement.install_hint)
        }
        ToolError::Failed { .. } => error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use shipwright_core::{PlatformSelection, RecordingRunner};
    use tempfile::TempDir;

    use crate::error::FrameworkError;

    fn touch(path: &Path) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, "").unwrap();
    }

    fn runner(layout: &ProjectLayout, tools: RecordingRunner) -> (TestRunner, Arc<RecordingRunner>) {
        let tools = Arc::new(tools);
        (TestRunner::new(tools.clone(), layout.clone()), tools)
    }

    #[tokio::test]
    async fn test_all_runs_every_platform_despite_failure() {
        let temp = TempDir::new().unwrap();
        let layout = ProjectLayout::new(temp.path());
        touch(&layout.test_dir(Platform::Web, TestCategory::Unit).join("editor.test.js"));
        touch(&layout.test_dir(Platform::Windows, TestCategory::Unit).join("DocumentTests.cs"));
        touch(&layout.test_dir(Platform::MacOs, TestCategory::Unit).join("DocumentTests.swift"));

        let (runner, tools) = runner(&layout, RecordingRunner::new().fail_when("jest", 1));
        let spec = TestRunSpec::new(TestCategory::Unit, PlatformSelection::All, "*test*");
        let result = runner.run(&spec).await.unwrap();

        assert!(!result.success());
        assert_eq!(result.exit_code(), 1);
        assert_eq!(result.outcomes.len(), 3);
        assert_eq!(
            result.outcomes.iter().map(|o| o.passed).collect::<Vec<_>>(),
            vec![false, true, true]
        );

        let programs: Vec<_> = tools.invocations().into_iter().map(|i| i.program).collect();
        assert_eq!(programs, vec!["npx", "dotnet", "swift"]);
        assert_eq!(result.report.failures().count(), 1);
        assert_eq!(result.report.exit_code, 1);
    }

    #[tokio::test]
    async fn test_only_matching_files_are_passed() {
        let temp = TempDir::new().unwrap();
        let layout = ProjectLayout::new(temp.path());
        let dir = layout.test_dir(Platform::Web, TestCategory::Unit);
        touch(&dir.join("login.spec.js"));
        touch(&dir.join("editor.spec.js"));
        touch(&dir.join("helpers.js"));

        let (runner, tools) = runner(&layout, RecordingRunner::new());
        let spec = TestRunSpec::new(TestCategory::Unit, PlatformSelection::One(Platform::Web), "*.SPEC.js");
        let result = runner.run(&spec).await.unwrap();

        assert!(result.success());
        assert_eq!(result.outcomes[0].discovered, Some(2));
        let args = &tools.invocations()[0].args;
        assert!(args.iter().any(|a| a.ends_with("editor.spec.js")));
        assert!(args.iter().any(|a| a.ends_with("login.spec.js")));
        assert!(!args.iter().any(|a| a.ends_with("helpers.js")));
    }

    #[tokio::test]
    async fn test_no_unit_tests_is_a_vacuous_pass() {
        let temp = TempDir::new().unwrap();
        let layout = ProjectLayout::new(temp.path());

        let (runner, tools) = runner(&layout, RecordingRunner::new());
        let spec = TestRunSpec::new(TestCategory::Unit, PlatformSelection::One(Platform::MacOs), "*test*");
        let result = runner.run(&spec).await.unwrap();

        assert!(result.success());
        assert_eq!(result.outcomes[0].discovered, Some(0));
        assert!(tools.invocations().is_empty());
    }

    #[tokio::test]
    async fn test_missing_test_tool_carries_install_hint() {
        let temp = TempDir::new().unwrap();
        let layout = ProjectLayout::new(temp.path());
        touch(&layout.test_dir(Platform::MacOs, TestCategory::Unit).join("ParserTests.swift"));

        let (runner, _) = runner(&layout, RecordingRunner::new().missing_when("swift"));
        let spec = TestRunSpec::new(TestCategory::Unit, PlatformSelection::One(Platform::MacOs), "*test*");
        let result = runner.run(&spec).await.unwrap();

        assert_eq!(result.exit_code(), 1);
        let detail = result.outcomes[0].detail.as_deref().unwrap();
        assert!(detail.contains("swift: Install Xcode"), "{detail}");
    }

    #[tokio::test]
    async fn test_invalid_pattern_is_an_error() {
        let temp = TempDir::new().unwrap();
        let (runner, _) = runner(&ProjectLayout::new(temp.path()), RecordingRunner::new());
        let spec = TestRunSpec::new(TestCategory::Unit, PlatformSelection::All, "[abc");

        let err = runner.run(&spec).await.unwrap_err();
        assert!(matches!(err, FrameworkError::InvalidPattern { .. }));
    }

    #[derive(Default)]
    struct TrackingEnvironment {
        calls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl TestEnvironment for TrackingEnvironment {
        async fn setup(&self, platform: Platform, _category: TestCategory) -> Result<()> {
            self.calls.lock().unwrap().push(format!("setup {platform}"));
            Ok(())
        }

        async fn teardown(&self, platform: Platform, _category: TestCategory) -> Result<()> {
            self.calls.lock().unwrap().push(format!("teardown {platform}"));
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_teardown_runs_after_failed_suite() {
        let temp = TempDir::new().unwrap();
        let layout = ProjectLayout::new(temp.path());
        touch(&layout.test_dir(Platform::Windows, TestCategory::Integration).join("ApiTests.cs"));

        let environment = Arc::new(TrackingEnvironment::default());
        let (runner, tools) = runner(&layout, RecordingRunner::new().fail_when("dotnet test", 1));
        let runner = runner.with_environment(environment.clone());

        let spec = TestRunSpec::new(
            TestCategory::Integration,
            PlatformSelection::One(Platform::Windows),
            "*api*",
        );
        let result = runner.run(&spec).await.unwrap();

        assert!(!result.success());
        assert_eq!(*environment.calls.lock().unwrap(), vec!["setup windows", "teardown windows"]);

        let line = tools.command_lines().remove(0);
        assert!(line.ends_with("--filter FullyQualifiedName~api"), "{line}");
    }

    #[tokio::test]
    async fn test_missing_suite_directory_passes() {
        let temp = TempDir::new().unwrap();
        let layout = ProjectLayout::new(temp.path());

        let (runner, tools) = runner(&layout, RecordingRunner::new());
        let spec = TestRunSpec::new(TestCategory::E2e, PlatformSelection::All, "*test*");
        let result = runner.run(&spec).await.unwrap();

        assert!(result.success());
        assert_eq!(result.outcomes.len(), 3);
        assert!(tools.invocations().is_empty());
    }
}
