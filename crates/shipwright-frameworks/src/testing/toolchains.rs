//! Per-platform test tools
//!
//! - web: Jest through `npx`
//! - windows: `dotnet test`
//! - macos: `swift test`

use std::path::Path;

use shipwright_core::{Platform, ToolInvocation};

use super::discovery::TestFile;
use crate::traits::ToolRequirement;

/// Builds the invocations for one platform's test tool
pub trait TestToolchain: Send + Sync {
    fn platform(&self) -> Platform;

    fn requirement(&self) -> ToolRequirement;

    /// Run exactly the discovered unit test files
    fn unit(&self, root: &Path, dir: &Path, files: &[TestFile]) -> ToolInvocation;

    /// Run the suite in `dir`, optionally filtered by test name
    fn suite(&self, root: &Path, dir: &Path, expression: Option<&str>) -> ToolInvocation;
}

/// The test tool for `platform`
pub fn toolchain_for(platform: Platform) -> Box<dyn TestToolchain> {
    match platform {
        Platform::Web => Box::new(JestTest),
        Platform::Windows => Box::new(DotnetTest),
        Platform::MacOs => Box::new(SwiftTest),
    }
}

/// Jest
#[derive(Debug, Default, Clone, Copy)]
pub struct JestTest;

impl TestToolchain for JestTest {
    fn platform(&self) -> Platform {
        Platform::Web
    }

    fn requirement(&self) -> ToolRequirement {
        ToolRequirement::new("npx", "Install Node.js from https://nodejs.org")
    }

    fn unit(&self, root: &Path, _dir: &Path, files: &[TestFile]) -> ToolInvocation {
        ToolInvocation::new("npx")
            .args(["jest", "--ci", "--runTestsByPath"])
            .args(files.iter().map(|f| f.path.to_string_lossy().into_owned()))
            .current_dir(root)
    }

    fn suite(&self, root: &Path, dir: &Path, expression: Option<&str>) -> ToolInvocation {
        let mut inv = ToolInvocation::new("npx")
            .args(["jest", "--ci", "--rootDir"])
            .arg(dir.to_string_lossy())
            .current_dir(root);
        if let Some(expression) = expression {
            inv = inv.args(["-t", expression]);
        }
        inv
    }
}

/// `dotnet test` with a `FullyQualifiedName~` filter
#[derive(Debug, Default, Clone, Copy)]
pub struct DotnetTest;

impl DotnetTest {
    fn filter<'a>(names: impl IntoIterator<Item = &'a str>) -> String {
        names
            .into_iter()
            .map(|n| format!("FullyQualifiedName~{n}"))
            .collect::<Vec<_>>()
            .join("|")
    }
}

impl TestToolchain for DotnetTest {
    fn platform(&self) -> Platform {
        Platform::Windows
    }

    fn requirement(&self) -> ToolRequirement {
        ToolRequirement::new(
            "dotnet",
            "Install the .NET SDK from https://dotnet.microsoft.com/download",
        )
    }

    fn unit(&self, root: &Path, dir: &Path, files: &[TestFile]) -> ToolInvocation {
        self.suite(root, dir, None)
            .arg("--filter")
            .arg(Self::filter(files.iter().map(|f| f.stem.as_str())))
    }

    fn suite(&self, root: &Path, dir: &Path, expression: Option<&str>) -> ToolInvocation {
        let mut inv = ToolInvocation::new("dotnet")
            .arg("test")
            .arg(dir.to_string_lossy())
            .current_dir(root);
        if let Some(expression) = expression {
            inv = inv.arg("--filter").arg(Self::filter([expression]));
        }
        inv
    }
}

/// SwiftPM; `--filter` takes a regular expression
#[derive(Debug, Default, Clone, Copy)]
pub struct SwiftTest;

impl TestToolchain for SwiftTest {
    fn platform(&self) -> Platform {
        Platform::MacOs
    }

    fn requirement(&self) -> ToolRequirement {
        ToolRequirement::new(
            "swift",
            "Install Xcode from the Mac App Store, then run: xcode-select --install",
        )
    }

    fn unit(&self, root: &Path, dir: &Path, files: &[TestFile]) -> ToolInvocation {
        let alternatives = files
            .iter()
            .map(|f| regex::escape(&f.stem))
            .collect::<Vec<_>>()
            .join("|");
        self.suite(root, dir, None)
            .arg("--filter")
            .arg(format!("({alternatives})"))
    }

    fn suite(&self, root: &Path, dir: &Path, expression: Option<&str>) -> ToolInvocation {
        let mut inv = ToolInvocation::new("swift")
            .args(["test", "--package-path"])
            .arg(dir.to_string_lossy())
            .current_dir(root);
        if let Some(expression) = expression {
            inv = inv.arg("--filter").arg(regex::escape(expression));
        }
        inv
    }
}
