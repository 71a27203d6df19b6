//! CLI commands

mod build;
mod completions;
mod deploy;
mod test;

pub use build::BuildCommand;
pub use completions::CompletionsCommand;
pub use deploy::DeployCommand;
pub use test::TestCommand;

use clap::ValueEnum;
use shipwright_core::Platform;

/// Target platform argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PlatformArg {
    /// Web (browser)
    Web,
    /// Windows desktop
    Windows,
    /// macOS desktop
    #[value(name = "macos")]
    MacOs,
}

impl From<PlatformArg> for Platform {
    fn from(arg: PlatformArg) -> Self {
        match arg {
            PlatformArg::Web => Platform::Web,
            PlatformArg::Windows => Platform::Windows,
            PlatformArg::MacOs => Platform::MacOs,
        }
    }
}
