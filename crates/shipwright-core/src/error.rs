//! Error types for Shipwright

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using ShipwrightError
pub type Result<T> = std::result::Result<T, ShipwrightError>;

/// Main error type for core operations
#[derive(Debug, Error)]
pub enum ShipwrightError {
    /// Configuration-related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// External tool errors
    #[error(transparent)]
    Tool(#[from] ToolError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ShipwrightError {
    /// Get exit code for CLI
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 2,
            Self::Tool(e) => e.exit_code(),
            Self::Io(_) => 7,
        }
    }
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found at {0}")]
    NotFound(PathBuf),

    /// Failed to parse configuration
    #[error("Failed to parse configuration {path}: {message}")]
    Parse { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration: {field} - {message}")]
    InvalidValue { field: String, message: String },

    /// Missing required field
    #[error("Missing required configuration field: {0}")]
    MissingField(String),

    /// IO error
    #[error("IO error reading config: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    pub fn parse(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::Parse {
            path: path.into(),
            message: message.to_string(),
        }
    }

    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Errors raised while invoking an external tool
#[derive(Debug, Error)]
pub enum ToolError {
    /// The process could not be started (tool missing, bad cwd, ...)
    #[error("Failed to start `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The process ran and exited unsuccessfully
    #[error("Command `{command}` failed with {}", exit_status_text(.exit_code))]
    Failed {
        command: String,
        exit_code: Option<i32>,
    },
}

impl ToolError {
    /// The command line that failed
    pub fn command(&self) -> &str {
        match self {
            Self::Spawn { command, .. } | Self::Failed { command, .. } => command,
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Spawn { .. } => 3,
            Self::Failed { .. } => 10,
        }
    }
}

fn exit_status_text(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "no exit code (terminated by signal)".to_string(),
    }
}
