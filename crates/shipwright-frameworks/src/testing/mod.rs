//! Test running across platforms
//!
//! Tests live under `tests/<platform>/<category>`. Unit tests are discovered
//! by file name and handed to the platform's test tool explicitly; integration
//! and end-to-end suites run as a directory with a name filter derived from
//! the pattern, wrapped in environment setup and teardown.

mod discovery;
mod environment;
mod runner;
mod toolchains;

pub use discovery::{discover_tests, selection_expression, TestFile, TestPattern};
pub use environment::{NoopEnvironment, TestEnvironment};
pub use runner::{PlatformOutcome, TestRunReport, TestRunner};
pub use toolchains::{toolchain_for, DotnetTest, JestTest, SwiftTest, TestToolchain};
