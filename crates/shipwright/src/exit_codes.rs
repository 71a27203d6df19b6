//! Exit codes for the CLI
//!
//! Build and deploy exit with the code of the error that stopped them;
//! `test` only ever exits with [`SUCCESS`] or [`ERROR`].

#![allow(dead_code)]

/// Success
pub const SUCCESS: i32 = 0;

/// General error, and any test failure
pub const ERROR: i32 = 1;

/// Configuration missing or invalid
pub const CONFIG_ERROR: i32 = 2;

/// Required tool not installed
pub const TOOL_MISSING: i32 = 3;

/// Test pattern could not be compiled
pub const INVALID_PATTERN: i32 = 4;

/// Filesystem error
pub const IO_ERROR: i32 = 7;

/// External tool exited unsuccessfully
pub const TOOL_FAILED: i32 = 10;

/// Build output missing
pub const ARTIFACTS_MISSING: i32 = 13;

/// Upload, invalidation or deployment script failed
pub const DEPLOY_FAILED: i32 = 20;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use shipwright_core::{ConfigError, ShipwrightError, ToolError};
    use shipwright_frameworks::FrameworkError;
    use shipwright_stores::StoreError;

    #[test]
    fn test_error_types_agree_on_codes() {
        let config = ConfigError::MissingField("s3_bucket".to_string());
        assert_eq!(ShipwrightError::from(config).exit_code(), CONFIG_ERROR);

        let missing = || ToolError::Spawn {
            command: "dotnet restore".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(FrameworkError::from(missing()).exit_code(), TOOL_MISSING);

        let failed = || ToolError::Failed {
            command: "xcodebuild".to_string(),
            exit_code: Some(65),
        };
        assert_eq!(FrameworkError::from(failed()).exit_code(), TOOL_FAILED);

        let artifacts = FrameworkError::ArtifactNotFound {
            expected_path: PathBuf::from("build/web"),
        };
        assert_eq!(artifacts.exit_code(), ARTIFACTS_MISSING);

        let upload = StoreError::UploadFailed {
            key: "index.html".to_string(),
            destination: "gs://site".to_string(),
            source: failed(),
        };
        assert_eq!(upload.exit_code(), DEPLOY_FAILED);

        let nothing = StoreError::ArtifactsMissing {
            path: PathBuf::from("build"),
        };
        assert_eq!(nothing.exit_code(), ARTIFACTS_MISSING);
    }
}
