//! Builder registry
//!
//! Maps each platform to its builder. The mapping is a closed `match`, so a
//! new platform variant cannot be added without a builder.

use std::sync::Arc;

use shipwright_core::Platform;
use tracing::debug;

use crate::builders::{MacOsBuilder, WebBuilder, WindowsBuilder};
use crate::traits::PlatformBuilder;

/// Resolves platform builders
#[derive(Debug, Default, Clone, Copy)]
pub struct BuilderRegistry;

impl BuilderRegistry {
    pub fn new() -> Self {
        Self
    }

    /// The builder for `platform`
    pub fn for_platform(&self, platform: Platform) -> Arc<dyn PlatformBuilder> {
        let builder: Arc<dyn PlatformBuilder> = match platform {
            Platform::Web => Arc::new(WebBuilder::new()),
            Platform::Windows => Arc::new(WindowsBuilder::new()),
            Platform::MacOs => Arc::new(MacOsBuilder::new()),
        };
        debug!(platform = %platform, builder = builder.id(), "resolved builder");
        builder
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_platform_has_a_builder() {
        let registry = BuilderRegistry::new();
        for platform in Platform::ALL {
            assert_eq!(registry.for_platform(platform).platform(), platform);
        }

        let ids: Vec<_> = Platform::ALL
            .iter()
            .map(|p| registry.for_platform(*p).id())
            .collect();
        assert_eq!(ids, vec!["npm", "dotnet", "xcodebuild"]);
    }
}
