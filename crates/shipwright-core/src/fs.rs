//! Filesystem helpers shared by the builder and the deployer

use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

/// A file found under a root directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelativeFile {
    /// Absolute (or root-joined) path on disk
    pub path: PathBuf,
    /// Path relative to the root, always `/`-separated
    pub key: String,
}

/// Delete `dir` if present and recreate it empty
pub fn reset_dir(dir: &Path) -> io::Result<()> {
    if dir.exists() {
        debug!(dir = %dir.display(), "removing directory");
        std::fs::remove_dir_all(dir)?;
    }
    std::fs::create_dir_all(dir)
}

/// Recursively copy `src` into `dest`, creating `dest` and its parents
pub fn copy_dir_all(src: &Path, dest: &Path) -> io::Result<u64> {
    if !src.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("source directory {} does not exist", src.display()),
        ));
    }

    let mut copied = 0;
    for entry in WalkDir::new(src).follow_links(true) {
        let entry = entry.map_err(io::Error::other)?;
        let relative = entry
            .path()
            .strip_prefix(src)
            .map_err(io::Error::other)?;
        let target = dest.join(relative);

        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }

    debug!(src = %src.display(), dest = %dest.display(), files = copied, "copied directory");
    Ok(copied)
}

/// List every regular file under `root`, sorted by key.
///
/// Fails with `NotFound` when `root` does not exist.
pub fn list_files(root: &Path) -> io::Result<Vec<RelativeFile>> {
    if !root.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("directory {} does not exist", root.display()),
        ));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
        let entry = entry.map_err(io::Error::other)?;
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = entry
            .path()
            .strip_prefix(root)
            .map_err(io::Error::other)?;
        files.push(RelativeFile {
            path: entry.path().to_path_buf(),
            key: to_key(relative),
        });
    }

    files.sort_by(|a, b| a.key.cmp(&b.key));
    Ok(files)
}

/// Join path components with `/` regardless of host separator
pub fn to_key(relative: &Path) -> String {
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_reset_dir_removes_content() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("build");
        std::fs::create_dir_all(dir.join("web")).unwrap();
        std::fs::write(dir.join("web/stale.js"), "old").unwrap();

        reset_dir(&dir).unwrap();
        assert!(dir.is_dir());
        assert_eq!(std::fs::read_dir(&dir).unwrap().count(), 0);
    }

    #[test]
    fn test_copy_dir_all() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src");
        std::fs::create_dir_all(src.join("static/css")).unwrap();
        std::fs::write(src.join("index.html"), "<html>").unwrap();
        std::fs::write(src.join("static/css/app.css"), "body{}").unwrap();

        let dest = temp.path().join("out/web");
        let copied = copy_dir_all(&src, &dest).unwrap();
        assert_eq!(copied, 2);
        assert!(dest.join("static/css/app.css").is_file());
    }

    #[test]
    fn test_copy_missing_source() {
        let temp = TempDir::new().unwrap();
        let err = copy_dir_all(&temp.path().join("nope"), &temp.path().join("out")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_list_files_keys() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(temp.path().join("sub")).unwrap();
        std::fs::write(temp.path().join("a.txt"), "a").unwrap();
        std::fs::write(temp.path().join("sub/b.txt"), "b").unwrap();

        let keys: Vec<_> = list_files(temp.path())
            .unwrap()
            .into_iter()
            .map(|f| f.key)
            .collect();
        assert_eq!(keys, vec!["a.txt", "sub/b.txt"]);
    }

    #[test]
    fn test_list_files_missing_root() {
        let temp = TempDir::new().unwrap();
        let err = list_files(&temp.path().join("build")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
