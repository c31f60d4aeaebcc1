//! Remote operations the clone run depends on

use crate::error::Result;
use crate::record::DistributionRecord;

/// One issued certificate as listed by the certificate store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateRecord {
    pub domain_name: String,
    pub certificate_arn: String,
}

/// One page of a certificate listing.
#[derive(Debug, Clone, Default)]
pub struct CertificatePage {
    pub certificates: Vec<CertificateRecord>,
    /// Token for the next page; `None` once the listing is exhausted
    pub next_token: Option<String>,
}

/// CDN and certificate-store calls, one request each, never retried.
///
/// `AwsService` talks to CloudFront and ACM; tests swap in an in-memory fake.
#[allow(async_fn_in_trait)]
pub trait DistributionService {
    type Record: DistributionRecord;

    async fn fetch_distribution_config(&self, distribution_id: &str) -> Result<Self::Record>;

    /// List certificates in the ISSUED state, starting at `page_token`.
    async fn list_issued_certificates(&self, page_token: Option<String>) -> Result<CertificatePage>;

    /// Provision a distribution and return its id.
    async fn create_distribution(&self, config: Self::Record) -> Result<String>;
}
