//! Per-environment deployment configuration
//!
//! The file is a flat key/value document (`config/<environment>.json`). Keys
//! relevant to the chosen provider are validated when a deployment plan is
//! resolved, so a broken file aborts the deployment before anything runs.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ConfigError;
use crate::types::{CloudProvider, DeploymentType, Environment};

use super::defaults::DEPLOYMENT_CONFIG_EXTENSIONS;

/// Deployment parameters for one environment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeploymentConfig {
    /// Cloud provider for web deployments (`aws`, `azure`, `gcp`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub s3_bucket: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cloudfront_distribution_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub azure_connection_string: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub azure_container: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub azure_cdn_endpoint: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gcs_bucket: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gcp_cdn_url: Option<String>,

    /// Deployment mode for desktop platforms (`on-premises`, `cloud`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deployment_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_server: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_url: Option<String>,

    /// Keys not interpreted by Shipwright
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Resolved destination for web artifacts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebProvider {
    Aws {
        bucket: String,
        distribution_id: Option<String>,
    },
    Azure {
        connection_string: String,
        container: String,
        cdn_endpoint: Option<String>,
    },
    Gcp {
        bucket: String,
        cdn_url: Option<String>,
    },
}

impl WebProvider {
    pub fn provider(&self) -> CloudProvider {
        match self {
            Self::Aws { .. } => CloudProvider::Aws,
            Self::Azure { .. } => CloudProvider::Azure,
            Self::Gcp { .. } => CloudProvider::Gcp,
        }
    }
}

/// Resolved deployment mode for desktop artifacts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DesktopDeployment {
    OnPremises { target_server: String },
    Cloud,
}

impl DeploymentConfig {
    /// Resolve the web destination from `platform` and its provider keys
    pub fn web_provider(&self) -> Result<WebProvider, ConfigError> {
        let name = required(&self.platform, "platform")?;
        let provider = CloudProvider::parse(name).ok_or_else(|| {
            ConfigError::invalid("platform", format!("unknown provider '{}' (expected aws, azure or gcp)", name))
        })?;

        let resolved = match provider {
            CloudProvider::Aws => WebProvider::Aws {
                bucket: required(&self.s3_bucket, "s3_bucket")?.to_string(),
                distribution_id: optional(&self.cloudfront_distribution_id),
            },
            CloudProvider::Azure => WebProvider::Azure {
                connection_string: required(&self.azure_connection_string, "azure_connection_string")?
                    .to_string(),
                container: required(&self.azure_container, "azure_container")?.to_string(),
                cdn_endpoint: optional(&self.azure_cdn_endpoint),
            },
            CloudProvider::Gcp => WebProvider::Gcp {
                bucket: required(&self.gcs_bucket, "gcs_bucket")?.to_string(),
                cdn_url: optional(&self.gcp_cdn_url),
            },
        };

        Ok(resolved)
    }

    /// Resolve the desktop deployment mode from `deployment_type`
    pub fn desktop_deployment(&self) -> Result<DesktopDeployment, ConfigError> {
        let name = required(&self.deployment_type, "deployment_type")?;
        let kind = DeploymentType::parse(name).ok_or_else(|| {
            ConfigError::invalid(
                "deployment_type",
                format!("unknown deployment type '{}' (expected on-premises or cloud)", name),
            )
        })?;

        match kind {
            DeploymentType::OnPremises => Ok(DesktopDeployment::OnPremises {
                target_server: required(&self.target_server, "target_server")?.to_string(),
            }),
            DeploymentType::Cloud => Ok(DesktopDeployment::Cloud),
        }
    }
}

fn required<'a>(value: &'a Option<String>, field: &str) -> Result<&'a str, ConfigError> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ConfigError::MissingField(field.to_string())),
    }
}

fn optional(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Locate `<config_dir>/<environment>.{json,toml,yaml,yml}`
pub fn find_deployment_config(config_dir: &Path, environment: Environment) -> Option<PathBuf> {
    DEPLOYMENT_CONFIG_EXTENSIONS
        .iter()
        .map(|ext| config_dir.join(format!("{}.{}", environment.as_str(), ext)))
        .find(|path| path.is_file())
}

/// Load the deployment configuration for an environment
pub fn load_deployment_config(
    config_dir: &Path,
    environment: Environment,
) -> Result<DeploymentConfig, ConfigError> {
    let path = find_deployment_config(config_dir, environment).ok_or_else(|| {
        ConfigError::NotFound(config_dir.join(format!("{}.json", environment.as_str())))
    })?;

    info!(path = %path.display(), environment = %environment, "loading deployment config");
    let content = std::fs::read_to_string(&path)?;

    let config: DeploymentConfig = match path.extension().and_then(|e| e.to_str()) {
        Some("toml") => toml::from_str(&content).map_err(|e| ConfigError::parse(&path, e))?,
        Some("yaml") | Some("yml") => {
            serde_yaml::from_str(&content).map_err(|e| ConfigError::parse(&path, e))?
        }
        _ => serde_json::from_str(&content).map_err(|e| ConfigError::parse(&path, e))?,
    };

    debug!(extra_keys = config.extra.len(), "deployment config loaded");
    Ok(config)
}
