//! Default configuration values

/// Default project configuration file name (TOML)
pub const DEFAULT_CONFIG_TOML: &str = "shipwright.toml";

/// Default project configuration file name (YAML)
pub const DEFAULT_CONFIG_YAML: &str = "shipwright.yaml";

/// Platform source trees, relative to the project root
pub const DEFAULT_SOURCE_DIR: &str = "src";

/// Build-output root, relative to the project root
pub const DEFAULT_BUILD_DIR: &str = "build";

/// Environment configurations, relative to the project root
pub const DEFAULT_CONFIG_DIR: &str = "config";

/// Test trees, relative to the project root
pub const DEFAULT_TESTS_DIR: &str = "tests";

/// On-premises deployment scripts, relative to the project root
pub const DEFAULT_SCRIPTS_DIR: &str = "src/scripts";

/// Test file name glob used when `--pattern` is not given
pub const DEFAULT_TEST_PATTERN: &str = "*test*";

/// Extensions tried, in order, for `config/<environment>.<ext>`
pub const DEPLOYMENT_CONFIG_EXTENSIONS: &[&str] = &["json", "toml", "yaml", "yml"];

/// Get list of project config file names to search for
pub fn config_file_names() -> Vec<&'static str> {
    vec![
        DEFAULT_CONFIG_TOML,
        DEFAULT_CONFIG_YAML,
        ".shipwright.toml",
        ".shipwright.yaml",
    ]
}
