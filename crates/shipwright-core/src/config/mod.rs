//! Configuration system for Shipwright
//!
//! Two kinds of configuration exist: the optional project file that adjusts
//! the directory layout, and the per-environment deployment configuration
//! read by the deployer.

pub mod defaults;
mod deployment;
mod project;

pub use defaults::*;
pub use deployment::*;
pub use project::*;
