//! Test file discovery

use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobMatcher};
use tracing::debug;
use walkdir::WalkDir;

use crate::error::{FrameworkError, Result};

/// Compiled file name pattern, matched case-insensitively
#[derive(Debug, Clone)]
pub struct TestPattern {
    source: String,
    matcher: GlobMatcher,
}

impl TestPattern {
    pub fn new(pattern: &str) -> Result<Self> {
        let glob = GlobBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| FrameworkError::InvalidPattern {
                pattern: pattern.to_string(),
                message: e.kind().to_string(),
            })?;

        Ok(Self {
            source: pattern.to_string(),
            matcher: glob.compile_matcher(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Match against the file name only, never the directory part
    pub fn matches(&self, path: &Path) -> bool {
        path.file_name()
            .is_some_and(|name| self.matcher.is_match(Path::new(name)))
    }
}

/// A discovered test file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestFile {
    pub path: PathBuf,
    /// File name up to the first `.`, e.g. `LoginTests` for `LoginTests.swift`
    pub stem: String,
}

impl TestFile {
    fn new(path: PathBuf) -> Self {
        let stem = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .and_then(|n| n.split('.').next().map(str::to_string))
            .unwrap_or_default();
        Self { path, stem }
    }
}

/// Find files under `dir` whose name matches `pattern`, sorted by path.
///
/// A missing directory yields no files.
pub fn discover_tests(dir: &Path, pattern: &TestPattern) -> Result<Vec<TestFile>> {
    if !dir.is_dir() {
        debug!(dir = %dir.display(), "test directory does not exist");
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|e| FrameworkError::Io(e.into()))?;
        if entry.file_type().is_file() && pattern.matches(entry.path()) {
            files.push(TestFile::new(entry.into_path()));
        }
    }

    debug!(dir = %dir.display(), pattern = pattern.as_str(), count = files.len(), "discovered tests");
    Ok(files)
}

/// Name filter for suite runners, derived from a file name pattern.
///
/// Wildcards and whole `[...]`/`{...}` groups are dropped and anything from
/// the first `.` on is treated as an extension, so `*login*.spec.js` selects
/// `login`. Returns `None` when nothing literal remains.
pub fn selection_expression(pattern: &str) -> Option<String> {
    let mut literal = String::new();
    let mut group: Option<char> = None;
    for c in pattern.chars() {
        match (group, c) {
            (Some(close), _) if c == close => group = None,
            (Some(_), _) => {}
            (None, '[') => group = Some(']'),
            (None, '{') => group = Some('}'),
            (None, '*' | '?') => {}
            (None, _) => literal.push(c),
        }
    }
    let name = literal.split('.').next().unwrap_or_default().trim();

    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, "").unwrap();
    }

    #[test]
    fn test_discovery_is_recursive_sorted_and_case_insensitive() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path();
        touch(&dir.join("LoginTests.swift"));
        touch(&dir.join("editor/DocumentTest.swift"));
        touch(&dir.join("helpers.swift"));
        touch(&dir.join("test_data/fixture.json"));

        let pattern = TestPattern::new("*test*").unwrap();
        let files = discover_tests(dir, &pattern).unwrap();
        let stems: Vec<_> = files.iter().map(|f| f.stem.as_str()).collect();

        assert_eq!(stems, vec!["LoginTests", "DocumentTest"]);
    }

    #[test]
    fn test_missing_dir_is_empty() {
        let temp = TempDir::new().unwrap();
        let pattern = TestPattern::new("*test*").unwrap();
        let files = discover_tests(&temp.path().join("tests/web/unit"), &pattern).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_invalid_pattern() {
        let err = TestPattern::new("test[").unwrap_err();
        assert!(matches!(err, FrameworkError::InvalidPattern { .. }));
    }

    #[test]
    fn test_selection_expression() {
        assert_eq!(selection_expression("*test*").as_deref(), Some("test"));
        assert_eq!(selection_expression("*login*.spec.js").as_deref(), Some("login"));
        assert_eq!(selection_expression("test*.py").as_deref(), Some("test"));
        assert_eq!(selection_expression("*"), None);
        assert_eq!(selection_expression("*.js"), None);
        assert_eq!(selection_expression("[!a]*test*").as_deref(), Some("test"));
        assert_eq!(selection_expression("*{login,signup}*").as_deref(), None);
        assert_eq!(selection_expression("api[0-9]*.cs").as_deref(), Some("api"));
    }
}
