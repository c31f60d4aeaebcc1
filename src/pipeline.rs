//! The clone run: fetch, resolve, transform, create

use crate::certificates::CertificateDirectory;
use crate::config::CloneRequest;
use crate::console::Console;
use crate::error::Result;
use crate::record::DistributionRecord;
use crate::remote::DistributionService;
use crate::transform::{Substitution, derive_config};
use std::time::SystemTime;

/// How a successful run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A new distribution was provisioned
    Created { distribution_id: String },
    /// Dry run: the config that would have been submitted
    Planned { rendered: String },
}

/// Fetch the configuration of the distribution being cloned.
pub async fn fetch_reference_config<S: DistributionService>(
    service: &S,
    console: &Console,
    dist_ref: &str,
) -> Result<S::Record> {
    tracing::info!(dist_ref, "fetching reference distribution config");
    service
        .fetch_distribution_config(dist_ref)
        .await
        .inspect_err(|e| {
            tracing::error!(dist_ref, error = %e, "fetching reference config failed");
            console.error(
                &format!("Failed to fetch config of distribution {dist_ref}"),
                Some(e.to_string().as_str()),
            );
        })
}

/// Build the certificate directory and pick the certificate for `domain`.
pub async fn resolve_certificate<S: DistributionService>(
    service: &S,
    console: &Console,
    domain: &str,
) -> Result<String> {
    let directory = CertificateDirectory::fetch(service, console).await?;
    let arn = directory.resolve(domain)?.to_string();

    tracing::info!(domain, certificate_arn = %arn, "certificate resolved");
    console.info(&format!("Use ACM certificate for domain '{domain}': {arn}."));
    Ok(arn)
}

/// Submit the derived config and return the new distribution id.
pub async fn create_distribution<S: DistributionService>(
    service: &S,
    console: &Console,
    config: S::Record,
) -> Result<String> {
    let distribution_id = service.create_distribution(config).await.inspect_err(|e| {
        tracing::error!(error = %e, "creating distribution failed");
        console.error("Failed to create distribution", Some(e.to_string().as_str()));
    })?;

    tracing::info!(%distribution_id, "distribution created");
    console.success(&format!("Done! Created distribution {distribution_id}."));
    Ok(distribution_id)
}

/// Run every step in order, stopping at the first failure.
///
/// `now` seeds the caller reference, so two runs with different clocks
/// never collide on the CloudFront side.
pub async fn run<S: DistributionService>(
    service: &S,
    console: &Console,
    request: &CloneRequest,
    now: SystemTime,
) -> Result<Outcome> {
    let reference = fetch_reference_config(service, console, &request.dist_ref).await?;
    let certificate_arn = resolve_certificate(service, console, &request.domain).await?;

    let substitution = Substitution {
        domain: &request.domain,
        origin: &request.origin,
        certificate_arn: &certificate_arn,
        log_bucket: &request.log_bucket,
        log_prefix: &request.log_prefix,
    };
    let derived = derive_config(&reference, &substitution, now)?;

    if request.dry_run {
        console.warn("Dry run: distribution not created");
        return Ok(Outcome::Planned {
            rendered: derived.render()?,
        });
    }

    let distribution_id = create_distribution(service, console, derived).await?;
    Ok(Outcome::Created { distribution_id })
}
