//! Deployment destinations for Shipwright
//!
//! Uploads staged build output to object storage, refreshes CDNs and runs
//! on-premises deployment scripts. Every provider is driven through its
//! official command line tool via a [`ToolRunner`], so credentials come from
//! the usual provider profiles and environment.
//!
//! ## Destinations
//!
//! - **AWS**: S3 (`aws s3 cp`) and CloudFront invalidation
//! - **Azure**: Blob Storage (`az storage blob upload`)
//! - **Google Cloud**: Cloud Storage (`gcloud storage cp`)
//! - **On-premises**: PowerShell / Bash deployment scripts
//!
//! [`ToolRunner`]: shipwright_core::ToolRunner

pub mod aws;
pub mod azure;
pub mod database;
pub mod deployer;
pub mod error;
pub mod gcp;
pub mod on_premises;
pub mod traits;

pub use deployer::{DeployOutcome, Deployer, DeploymentPlan};
pub use error::{Result, StoreError};
pub use traits::{CdnInvalidator, ObjectStore, SchemaUpdate, SchemaUpdater};
