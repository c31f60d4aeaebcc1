//! CloudFront and ACM client

use crate::config::{ACM_REGION, CERTIFICATE_PAGE_SIZE};
use crate::error::{CloneError, Result};
use crate::record::{DistributionRecord, missing};
use crate::remote::{CertificatePage, CertificateRecord, DistributionService};
use aws_config::BehaviorVersion;
use aws_sdk_acm::types::CertificateStatus;
use aws_sdk_cloudfront::error::DisplayErrorContext;
use aws_sdk_cloudfront::types::DistributionConfig;

/// Clients built from one named credential profile.
#[derive(Debug, Clone)]
pub struct AwsService {
    cloudfront: aws_sdk_cloudfront::Client,
    acm: aws_sdk_acm::Client,
}

impl AwsService {
    /// Load shared config for `profile`.
    ///
    /// CloudFront is global. ACM is pinned to us-east-1, the only region
    /// CloudFront attaches certificates from.
    pub async fn from_profile(profile: &str) -> Self {
        let shared = aws_config::defaults(BehaviorVersion::latest())
            .profile_name(profile)
            .load()
            .await;

        let acm_config = aws_sdk_acm::config::Builder::from(&shared)
            .region(aws_sdk_acm::config::Region::new(ACM_REGION))
            .build();

        tracing::debug!(profile, acm_region = ACM_REGION, "AWS clients ready");

        Self {
            cloudfront: aws_sdk_cloudfront::Client::new(&shared),
            acm: aws_sdk_acm::Client::from_conf(acm_config),
        }
    }
}

impl DistributionService for AwsService {
    type Record = DistributionConfig;

    async fn fetch_distribution_config(&self, distribution_id: &str) -> Result<DistributionConfig> {
        const OP: &str = "GetDistributionConfig";

        let output = self
            .cloudfront
            .get_distribution_config()
            .id(distribution_id)
            .send()
            .await
            .map_err(|e| CloneError::remote(OP, DisplayErrorContext(&e).to_string()))?;

        output
            .distribution_config()
            .cloned()
            .ok_or_else(|| CloneError::remote(OP, "response has no DistributionConfig"))
    }

    async fn list_issued_certificates(&self, page_token: Option<String>) -> Result<CertificatePage> {
        let output = self
            .acm
            .list_certificates()
            .certificate_statuses(CertificateStatus::Issued)
            .max_items(CERTIFICATE_PAGE_SIZE)
            .set_next_token(page_token)
            .send()
            .await
            .map_err(|e| {
                CloneError::remote(
                    "ListCertificates",
                    aws_sdk_acm::error::DisplayErrorContext(&e).to_string(),
                )
            })?;

        // Summaries without a domain or ARN cannot be matched or attached
        let certificates = output
            .certificate_summary_list()
            .iter()
            .filter_map(|summary| {
                Some(CertificateRecord {
                    domain_name: summary.domain_name()?.to_string(),
                    certificate_arn: summary.certificate_arn()?.to_string(),
                })
            })
            .collect();

        Ok(CertificatePage {
            certificates,
            next_token: output.next_token().map(str::to_string),
        })
    }

    async fn create_distribution(&self, config: DistributionConfig) -> Result<String> {
        const OP: &str = "CreateDistribution";

        let output = self
            .cloudfront
            .create_distribution()
            .distribution_config(config)
            .send()
            .await
            .map_err(|e| CloneError::remote(OP, DisplayErrorContext(&e).to_string()))?;

        let distribution = output
            .distribution()
            .ok_or_else(|| CloneError::remote(OP, "response has no Distribution"))?;
        Ok(distribution.id().to_string())
    }
}

impl DistributionRecord for DistributionConfig {
    fn clear_aliases(&mut self) -> Result<()> {
        if let Some(aliases) = self.aliases.as_mut() {
            aliases.quantity = 0;
            aliases.items = None;
        }
        Ok(())
    }

    fn set_caller_reference(&mut self, token: &str) -> Result<()> {
        self.caller_reference = token.to_string();
        Ok(())
    }

    fn set_primary_origin(&mut self, origin: &str) -> Result<()> {
        let first = self
            .origins
            .as_mut()
            .and_then(|origins| origins.items.first_mut())
            .ok_or_else(|| missing("Origins.Items[0]"))?;
        first.id = origin.to_string();
        first.domain_name = origin.to_string();
        Ok(())
    }

    fn set_default_target_origin(&mut self, origin_id: &str) -> Result<()> {
        self.default_cache_behavior
            .as_mut()
            .ok_or_else(|| missing("DefaultCacheBehavior"))?
            .target_origin_id = origin_id.to_string();
        Ok(())
    }

    fn set_comment(&mut self, comment: &str) -> Result<()> {
        self.comment = comment.to_string();
        Ok(())
    }

    fn uses_custom_certificate(&self) -> bool {
        self.viewer_certificate
            .as_ref()
            .and_then(|viewer| viewer.cloud_front_default_certificate)
            == Some(false)
    }

    fn set_acm_certificate(&mut self, certificate_arn: &str) -> Result<()> {
        self.viewer_certificate
            .as_mut()
            .ok_or_else(|| missing("ViewerCertificate"))?
            .acm_certificate_arn = Some(certificate_arn.to_string());
        Ok(())
    }

    fn logging_enabled(&self) -> bool {
        self.logging.as_ref().map(|logging| logging.enabled) == Some(true)
    }

    fn set_logging_target(&mut self, bucket: &str, prefix: &str) -> Result<()> {
        let logging = self.logging.as_mut().ok_or_else(|| missing("Logging"))?;
        logging.bucket = bucket.to_string();
        logging.prefix = prefix.to_string();
        Ok(())
    }

    fn render(&self) -> Result<String> {
        Ok(format!("{self:#?}"))
    }
}
