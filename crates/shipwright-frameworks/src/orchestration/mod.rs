//! Workflow orchestration for builds
//!
//! The orchestrator clears the build-output root, checks prerequisites, runs
//! a builder's plan through a [`ToolRunner`](shipwright_core::ToolRunner) and
//! verifies what was staged.

mod build;

pub use build::{BuildOrchestrator, BuildOutcome};
