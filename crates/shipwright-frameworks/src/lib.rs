//! Shipwright Frameworks - Platform build and test adapters
//!
//! This crate turns a build or test request into the toolchain invocations
//! each platform needs and runs them through a [`ToolRunner`].
//!
//! ## Platforms
//!
//! - **Web**: npm for builds, Jest for tests
//! - **Windows**: the .NET CLI for builds and tests
//! - **macOS**: xcodebuild for builds, SwiftPM for tests
//!
//! Builds stage their output into one directory per platform under the
//! build-output root, which is cleared at the start of every build.
//!
//! [`ToolRunner`]: shipwright_core::ToolRunner

pub mod artifacts;
pub mod builders;
pub mod context;
pub mod error;
pub mod orchestration;
pub mod registry;
pub mod testing;
pub mod traits;

pub use artifacts::BuildArtifact;
pub use context::{BuildContext, TestRunSpec};
pub use error::{FrameworkError, Result};
pub use orchestration::{BuildOrchestrator, BuildOutcome};
pub use registry::BuilderRegistry;
pub use testing::{PlatformOutcome, TestRunReport, TestRunner};
pub use traits::{BuildStep, PlatformBuilder, PrerequisiteStatus, ToolRequirement, ToolStatus};
