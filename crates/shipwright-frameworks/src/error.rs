//! Error types for build and test adapters

use std::path::PathBuf;

use shipwright_core::ToolError;
use thiserror::Error;

/// Result type for framework operations
pub type Result<T> = std::result::Result<T, FrameworkError>;

/// Build and test errors
#[derive(Error, Debug)]
pub enum FrameworkError {
    /// Required tools are not installed
    #[error("Missing required tools:\n{details}")]
    MissingTools { details: String },

    /// An external tool could not be started or failed
    #[error(transparent)]
    Tool(#[from] ToolError),

    /// Build failed outside of a tool invocation
    #[error("Build failed for {platform}: {message}")]
    BuildFailed {
        platform: String,
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Artifact directory missing or empty after build
    #[error("Expected build artifacts not found at {expected_path}")]
    ArtifactNotFound { expected_path: PathBuf },

    /// Test file pattern could not be compiled
    #[error("Invalid test pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl FrameworkError {
    /// Create a build failed error caused by an IO error
    pub fn build_io(platform: impl Into<String>, message: impl Into<String>, source: std::io::Error) -> Self {
        Self::BuildFailed {
            platform: platform.into(),
            message: message.into(),
            source: Some(source),
        }
    }

    /// Get exit code for CLI
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::MissingTools { .. } => 3,
            Self::Tool(e) => e.exit_code(),
            Self::BuildFailed { .. } => 10,
            Self::ArtifactNotFound { .. } => 13,
            Self::InvalidPattern { .. } => 4,
            Self::Io(_) => 7,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let err = FrameworkError::ArtifactNotFound {
            expected_path: PathBuf::from("build/web"),
        };
        assert_eq!(err.exit_code(), 13);

        let err: FrameworkError = ToolError::Failed {
            command: "npm run build".to_string(),
            exit_code: Some(1),
        }
        .into();
        assert_eq!(err.exit_code(), 10);
        assert_eq!(err.to_string(), "Command `npm run build` failed with exit code 1");
    }
}
