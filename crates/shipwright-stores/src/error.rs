//! Store error types

use std::path::PathBuf;

use shipwright_core::{ConfigError, ToolError};
use thiserror::Error;

/// Deployment errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Deployment configuration missing, malformed or incomplete
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Nothing to deploy
    #[error("Build output not found at {path}; run `shipwright build` first")]
    ArtifactsMissing { path: PathBuf },

    /// Upload of a single object failed
    #[error("Upload of '{key}' to {destination} failed: {source}")]
    UploadFailed {
        key: String,
        destination: String,
        #[source]
        source: ToolError,
    },

    /// CDN invalidation failed
    #[error("CDN invalidation failed for {target}: {source}")]
    InvalidationFailed {
        target: String,
        #[source]
        source: ToolError,
    },

    /// On-premises deployment script failed
    #[error("Deployment script {script} failed: {source}")]
    DeployScriptFailed {
        script: PathBuf,
        #[source]
        source: ToolError,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl StoreError {
    /// Get exit code for CLI
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 2,
            Self::ArtifactsMissing { .. } => 13,
            Self::UploadFailed { source, .. }
            | Self::InvalidationFailed { source, .. }
            | Self::DeployScriptFailed { source, .. } => match source {
                ToolError::Spawn { .. } => source.exit_code(),
                ToolError::Failed { .. } => 20,
            },
            Self::Io(_) => 7,
            Self::Other(_) => 1,
        }
    }
}

/// Result type for store operations
pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let failed = ToolError::Failed {
            command: "aws s3 cp".to_string(),
            exit_code: Some(1),
        };
        let err = StoreError::UploadFailed {
            key: "web/index.html".to_string(),
            destination: "s3://site".to_string(),
            source: failed,
        };
        assert_eq!(err.exit_code(), 20);

        let missing = ToolError::Spawn {
            command: "az storage blob upload".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        let err = StoreError::UploadFailed {
            key: "a.txt".to_string(),
            destination: "azure://site".to_string(),
            source: missing,
        };
        assert_eq!(err.exit_code(), 3);

        assert_eq!(
            StoreError::from(ConfigError::MissingField("s3_bucket".to_string())).exit_code(),
            2
        );
    }
}
