//! Build artifacts - the staged output directory of one platform
//!
//! Every platform ends up as a directory under the build-output root, so the
//! artifact is described by its file count, total size and a digest over the
//! whole tree.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use shipwright_core::fs::list_files;
use shipwright_core::{BuildType, Platform};

use crate::error::{FrameworkError, Result};

/// A staged platform output directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildArtifact {
    /// Target platform
    pub platform: Platform,

    /// Debug or release
    pub build_type: BuildType,

    /// `<build root>/<platform>`
    pub path: PathBuf,

    /// Number of regular files in the tree
    pub file_count: usize,

    /// Sum of file sizes in bytes
    pub total_bytes: u64,

    /// SHA256 over every relative key and file content, in key order (hex encoded)
    pub sha256: String,
}

impl BuildArtifact {
    /// Describe the directory at `path`.
    ///
    /// A missing or empty directory is reported as [`FrameworkError::ArtifactNotFound`].
    pub fn inspect(platform: Platform, build_type: BuildType, path: &Path) -> Result<Self> {
        let files = match list_files(path) {
            Ok(files) => files,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(FrameworkError::ArtifactNotFound {
                    expected_path: path.to_path_buf(),
                })
            }
            Err(e) => return Err(e.into()),
        };

        if files.is_empty() {
            return Err(FrameworkError::ArtifactNotFound {
                expected_path: path.to_path_buf(),
            });
        }

        let mut hasher = Sha256::new();
        let mut total_bytes = 0;
        for file in &files {
            let content = std::fs::read(&file.path)?;
            total_bytes += content.len() as u64;
            hasher.update(file.key.as_bytes());
            hasher.update([0]);
            hasher.update(&content);
        }

        Ok(Self {
            platform,
            build_type,
            path: path.to_path_buf(),
            file_count: files.len(),
            total_bytes,
            sha256: format!("{:x}", hasher.finalize()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_inspect_tree() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("web");
        std::fs::create_dir_all(dir.join("static")).unwrap();
        std::fs::write(dir.join("index.html"), "<html>").unwrap();
        std::fs::write(dir.join("static/app.js"), "run()").unwrap();

        let artifact = BuildArtifact::inspect(Platform::Web, BuildType::Release, &dir).unwrap();
        assert_eq!(artifact.file_count, 2);
        assert_eq!(artifact.total_bytes, 11);
        assert_eq!(artifact.sha256.len(), 64);

        // Same content gives the same digest; changed content does not
        let again = BuildArtifact::inspect(Platform::Web, BuildType::Release, &dir).unwrap();
        assert_eq!(artifact.sha256, again.sha256);

        std::fs::write(dir.join("static/app.js"), "run(1)").unwrap();
        let changed = BuildArtifact::inspect(Platform::Web, BuildType::Release, &dir).unwrap();
        assert_ne!(artifact.sha256, changed.sha256);
    }

    #[test]
    fn test_missing_or_empty_dir() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("windows");

        let err = BuildArtifact::inspect(Platform::Windows, BuildType::Debug, &dir).unwrap_err();
        assert!(matches!(err, FrameworkError::ArtifactNotFound { .. }));

        std::fs::create_dir_all(dir.join("empty")).unwrap();
        let err = BuildArtifact::inspect(Platform::Windows, BuildType::Debug, &dir).unwrap_err();
        assert_eq!(err.exit_code(), 13);
    }
}
