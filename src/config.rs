//! Configuration structures for cloning a distribution.

use crate::error::{CloneError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// ACM certificates attached to CloudFront must live in us-east-1
pub const ACM_REGION: &str = "us-east-1";

/// Page size requested from ACM `ListCertificates`
pub const CERTIFICATE_PAGE_SIZE: i32 = 1000;

/// Appended to the log bucket name to form the S3 bucket domain
pub const LOG_BUCKET_SUFFIX: &str = ".s3.amazonaws.com";

/// Config file looked up under the user config directory
pub const DEFAULT_CONFIG_FILE: &str = "cdn_clone/clone.toml";

/// Parameters as read from a TOML file or the command line.
///
/// Every field is optional here; [`CloneConfig::into_request`] enforces
/// which ones a run actually needs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CloneConfig {
    pub domain: Option<String>,
    pub origin: Option<String>,
    pub dist_ref: Option<String>,
    pub log_bucket: Option<String>,
    pub log_prefix: Option<String>,
    pub profile: Option<String>,

    /// Stop after transforming, print the derived config
    pub dry_run: bool,
}

/// A complete, validated set of parameters for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloneRequest {
    pub domain: String,
    pub origin: String,
    pub dist_ref: String,
    pub log_bucket: String,
    pub log_prefix: String,
    pub profile: String,
    pub dry_run: bool,
}

impl CloneConfig {
    /// Read a TOML config file.
    pub async fn load(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path).await?;
        let config: Self = toml::from_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }

    /// `<config_dir>/cdn_clone/clone.toml`, if the platform has a config dir.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(DEFAULT_CONFIG_FILE))
    }

    /// Layer `overrides` on top of `self`; set fields in `overrides` win.
    #[must_use]
    pub fn merge(self, overrides: CloneConfig) -> CloneConfig {
        CloneConfig {
            domain: overrides.domain.or(self.domain),
            origin: overrides.origin.or(self.origin),
            dist_ref: overrides.dist_ref.or(self.dist_ref),
            log_bucket: overrides.log_bucket.or(self.log_bucket),
            log_prefix: overrides.log_prefix.or(self.log_prefix),
            profile: overrides.profile.or(self.profile),
            dry_run: overrides.dry_run || self.dry_run,
        }
    }

    /// Check required parameters are present and non-empty.
    pub fn into_request(self) -> Result<CloneRequest> {
        Ok(CloneRequest {
            domain: required(self.domain, "--domain")?,
            origin: required(self.origin, "--origin")?,
            dist_ref: required(self.dist_ref, "--dist_ref")?,
            log_bucket: required(self.log_bucket, "--log_bucket")?,
            log_prefix: self.log_prefix.unwrap_or_default(),
            profile: required(self.profile, "--profile")?,
            dry_run: self.dry_run,
        })
    }
}

fn required(value: Option<String>, flag: &str) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        Some(_) => Err(CloneError::InvalidConfig(format!("{flag} must not be empty"))),
        None => Err(CloneError::MissingConfig(flag.to_string())),
    }
}
