//! Project configuration and directory layout

use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::ConfigError;
use crate::types::{Platform, TestCategory};

use super::defaults::*;

/// Contents of `shipwright.toml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Directory overrides
    pub layout: LayoutConfig,

    /// Test runner settings
    pub test: TestConfig,
}

/// Directory layout, each entry relative to the project root
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub source_dir: PathBuf,
    pub build_dir: PathBuf,
    pub config_dir: PathBuf,
    pub tests_dir: PathBuf,
    pub scripts_dir: PathBuf,
}

impl LayoutConfig {
    /// Reject a `build_dir` whose reset would delete anything but build output.
    ///
    /// The build-output root must be a proper subdirectory of the project root
    /// and must neither equal nor contain another configured directory.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let build = normalize(&self.build_dir).ok_or_else(|| {
            ConfigError::invalid(
                "layout.build_dir",
                format!("'{}' must be a relative path inside the project", self.build_dir.display()),
            )
        })?;
        if build.is_empty() {
            return Err(ConfigError::invalid(
                "layout.build_dir",
                format!("'{}' resolves to the project root", self.build_dir.display()),
            ));
        }

        let others = [
            ("layout.source_dir", &self.source_dir),
            ("layout.config_dir", &self.config_dir),
            ("layout.tests_dir", &self.tests_dir),
            ("layout.scripts_dir", &self.scripts_dir),
        ];
        for (field, dir) in others {
            if normalize(dir).is_some_and(|other| other.starts_with(&build)) {
                return Err(ConfigError::invalid(
                    "layout.build_dir",
                    format!(
                        "'{}' would remove {} '{}' when the build root is reset",
                        self.build_dir.display(),
                        field,
                        dir.display()
                    ),
                ));
            }
        }

        Ok(())
    }
}

/// Lexically normalized components of a relative path; `None` if the path is
/// absolute or climbs above its base
fn normalize(path: &Path) -> Option<Vec<String>> {
    let mut parts: Vec<String> = Vec::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_string_lossy().into_owned()),
            Component::CurDir => {}
            Component::ParentDir => {
                parts.pop()?;
            }
            Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    Some(parts)
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from(DEFAULT_SOURCE_DIR),
            build_dir: PathBuf::from(DEFAULT_BUILD_DIR),
            config_dir: PathBuf::from(DEFAULT_CONFIG_DIR),
            tests_dir: PathBuf::from(DEFAULT_TESTS_DIR),
            scripts_dir: PathBuf::from(DEFAULT_SCRIPTS_DIR),
        }
    }
}

/// Test runner settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TestConfig {
    /// File name glob used when no pattern is given on the command line
    pub default_pattern: String,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            default_pattern: DEFAULT_TEST_PATTERN.to_string(),
        }
    }
}

/// Absolute paths for one project.
///
/// Every component receives its paths from here instead of relying on the
/// process working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    pub root: PathBuf,
    pub source_dir: PathBuf,
    pub build_dir: PathBuf,
    pub config_dir: PathBuf,
    pub tests_dir: PathBuf,
    pub scripts_dir: PathBuf,
}

impl ProjectLayout {
    /// Layout with default directory names under `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::resolve(root.into(), &LayoutConfig::default())
    }

    /// Layout from a validated [`LayoutConfig`]
    pub fn from_config(root: impl Into<PathBuf>, layout: &LayoutConfig) -> Result<Self, ConfigError> {
        layout.validate()?;
        Ok(Self::resolve(root.into(), layout))
    }

    fn resolve(root: PathBuf, layout: &LayoutConfig) -> Self {
        Self {
            source_dir: root.join(&layout.source_dir),
            build_dir: root.join(&layout.build_dir),
            config_dir: root.join(&layout.config_dir),
            tests_dir: root.join(&layout.tests_dir),
            scripts_dir: root.join(&layout.scripts_dir),
            root,
        }
    }

    /// Source tree of one platform, e.g. `src/web`
    pub fn platform_source(&self, platform: Platform) -> PathBuf {
        self.source_dir.join(platform.as_str())
    }

    /// Artifact directory of one platform inside the build-output root
    pub fn platform_output(&self, platform: Platform) -> PathBuf {
        self.build_dir.join(platform.as_str())
    }

    /// Test tree for a platform and category, e.g. `tests/web/unit`
    pub fn test_dir(&self, platform: Platform, category: TestCategory) -> PathBuf {
        self.tests_dir
            .join(platform.as_str())
            .join(category.dir_name())
    }
}

/// Load a project configuration file (TOML or YAML by extension)
pub fn load_project_config(path: &Path) -> Result<ProjectConfig, ConfigError> {
    let is_toml = path.extension().is_some_and(|e| e == "toml");
    let format = if is_toml { "TOML" } else { "YAML" };
    info!(path = %path.display(), format, "loading project config");

    let content = std::fs::read_to_string(path)?;
    let config = if is_toml {
        toml::from_str(&content).map_err(|e| ConfigError::parse(path, e))?
    } else {
        serde_yaml::from_str(&content).map_err(|e| ConfigError::parse(path, e))?
    };

    Ok(config)
}

/// Find the project configuration file in `start_dir` or one of its parents.
///
/// The first match wins; within a directory TOML is preferred over YAML.
pub fn find_project_config(start_dir: &Path) -> Option<PathBuf> {
    debug!(start_dir = %start_dir.display(), "searching for project config");
    let mut current = start_dir.to_path_buf();

    loop {
        for name in config_file_names() {
            let candidate = current.join(name);
            if candidate.is_file() {
                info!(path = %candidate.display(), "found project config");
                return Some(candidate);
            }
        }

        if !current.pop() {
            break;
        }
    }

    debug!("no project config found");
    None
}

/// Resolve the project layout starting at `dir`.
///
/// When a project file is found its directory becomes the project root;
/// otherwise `dir` itself is the root and defaults apply.
pub fn discover_project(dir: &Path) -> Result<(ProjectConfig, ProjectLayout), ConfigError> {
    match find_project_config(dir) {
        Some(path) => {
            let config = load_project_config(&path)?;
            let root = path.parent().unwrap_or(dir).to_path_buf();
            let layout = ProjectLayout::from_config(root, &config.layout)?;
            Ok((config, layout))
        }
        None => {
            warn!(dir = %dir.display(), "no shipwright config found, using default layout");
            Ok((ProjectConfig::default(), ProjectLayout::new(dir)))
        }
    }
}
