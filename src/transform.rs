//! Derive a new distribution config from a reference one

use crate::config::LOG_BUCKET_SUFFIX;
use crate::error::{CloneError, Result};
use crate::record::DistributionRecord;
use std::time::{SystemTime, UNIX_EPOCH};

/// Values substituted into the cloned config.
#[derive(Debug, Clone, Copy)]
pub struct Substitution<'a> {
    pub domain: &'a str,
    pub origin: &'a str,
    pub certificate_arn: &'a str,
    pub log_bucket: &'a str,
    pub log_prefix: &'a str,
}

/// Copy `reference` and apply `sub` to the copy.
///
/// Aliases are always cleared, even though the new domain is known: the
/// clone answers on its CloudFront host name only.
///
/// The certificate is swapped only when the reference already serves a
/// custom certificate; a reference on the CloudFront default certificate
/// keeps it. Logging is redirected only when the reference logs at all.
pub fn derive_config<R: DistributionRecord>(
    reference: &R,
    sub: &Substitution<'_>,
    now: SystemTime,
) -> Result<R> {
    let mut config = reference.clone();

    config.clear_aliases()?;
    config.set_caller_reference(&caller_reference(now)?)?;
    config.set_primary_origin(sub.origin)?;
    config.set_default_target_origin(sub.origin)?;
    config.set_comment(sub.domain)?;

    if config.uses_custom_certificate() {
        config.set_acm_certificate(sub.certificate_arn)?;
    } else {
        tracing::debug!("reference uses the CloudFront default certificate, keeping it");
    }

    if config.logging_enabled() {
        let bucket = format!("{}{LOG_BUCKET_SUFFIX}", sub.log_bucket);
        config.set_logging_target(&bucket, sub.log_prefix)?;
    }

    Ok(config)
}

/// Unique-per-run token: seconds since the epoch with the fractional part.
///
/// Whole seconds keep a trailing `.0`, e.g. `1629800000.0`.
pub fn caller_reference(now: SystemTime) -> Result<String> {
    let elapsed = now
        .duration_since(UNIX_EPOCH)
        .map_err(|e| CloneError::InvalidConfig(format!("system clock before 1970: {e}")))?;
    Ok(format!("{:?}", elapsed.as_secs_f64()))
}
