//! Platform builder implementations
//!
//! Each builder knows the toolchain commands for one platform and where that
//! toolchain leaves its output.

pub mod macos;
pub mod web;
pub mod windows;

pub use macos::MacOsBuilder;
pub use web::WebBuilder;
pub use windows::WindowsBuilder;
