//! In-memory `DistributionService` for tests

use crate::error::{CloneError, Result};
use crate::remote::{CertificatePage, CertificateRecord, DistributionService};
use serde_json::{Value, json};
use std::sync::Mutex;

pub(crate) fn cert(domain: &str, arn: &str) -> CertificateRecord {
    CertificateRecord {
        domain_name: domain.to_string(),
        certificate_arn: arn.to_string(),
    }
}

/// Reference config shaped like a CloudFront `GetDistributionConfig` body.
pub(crate) fn reference_config() -> Value {
    json!({
        "CallerReference": "2021-08-24T10:00:00",
        "Aliases": { "Quantity": 1, "Items": ["www.example.com"] },
        "Origins": {
            "Quantity": 1,
            "Items": [{ "Id": "www-origin", "DomainName": "www-origin.example.net" }]
        },
        "DefaultCacheBehavior": { "TargetOriginId": "www-origin" },
        "Comment": "www.example.com",
        "Logging": { "Enabled": true, "IncludeCookies": false, "Bucket": "old.s3.amazonaws.com", "Prefix": "" },
        "Enabled": true,
        "ViewerCertificate": {
            "CloudFrontDefaultCertificate": false,
            "ACMCertificateArn": "arn:aws:acm:us-east-1:111122223333:certificate/www"
        }
    })
}

#[derive(Default)]
pub(crate) struct FakeService {
    reference: Option<Value>,
    pages: Vec<Vec<CertificateRecord>>,
    fail_fetch: bool,
    fail_list_at: Option<usize>,
    fail_create: bool,
    page_requests: Mutex<Vec<Option<String>>>,
    created: Mutex<Vec<Value>>,
}

impl FakeService {
    pub(crate) fn with_reference(mut self, reference: Value) -> Self {
        self.reference = Some(reference);
        self
    }

    /// Certificate pages, linked by `page-<n>` tokens.
    pub(crate) fn with_pages(mut self, pages: Vec<Vec<CertificateRecord>>) -> Self {
        self.pages = pages;
        self
    }

    pub(crate) fn failing_fetch(mut self) -> Self {
        self.fail_fetch = true;
        self
    }

    pub(crate) fn failing_list_at(mut self, page: usize) -> Self {
        self.fail_list_at = Some(page);
        self
    }

    pub(crate) fn failing_create(mut self) -> Self {
        self.fail_create = true;
        self
    }

    pub(crate) fn page_requests(&self) -> Vec<Option<String>> {
        self.page_requests.lock().unwrap().clone()
    }

    pub(crate) fn created(&self) -> Vec<Value> {
        self.created.lock().unwrap().clone()
    }
}

impl DistributionService for FakeService {
    type Record = Value;

    async fn fetch_distribution_config(&self, distribution_id: &str) -> Result<Value> {
        if self.fail_fetch {
            return Err(CloneError::remote(
                "GetDistributionConfig",
                format!("NoSuchDistribution: {distribution_id}"),
            ));
        }
        self.reference
            .clone()
            .ok_or_else(|| CloneError::remote("GetDistributionConfig", "no reference configured"))
    }

    async fn list_issued_certificates(&self, page_token: Option<String>) -> Result<CertificatePage> {
        self.page_requests.lock().unwrap().push(page_token.clone());

        let index = match page_token.as_deref() {
            None => 0,
            Some(token) => token
                .strip_prefix("page-")
                .and_then(|n| n.parse::<usize>().ok())
                .ok_or_else(|| CloneError::remote("ListCertificates", "InvalidNextToken"))?,
        };

        if self.fail_list_at == Some(index) {
            return Err(CloneError::remote("ListCertificates", "ThrottlingException"));
        }

        let next = index + 1;
        Ok(CertificatePage {
            certificates: self.pages.get(index).cloned().unwrap_or_default(),
            next_token: (next < self.pages.len()).then(|| format!("page-{next}")),
        })
    }

    async fn create_distribution(&self, config: Value) -> Result<String> {
        if self.fail_create {
            return Err(CloneError::remote(
                "CreateDistribution",
                "DistributionAlreadyExists",
            ));
        }
        let mut created = self.created.lock().unwrap();
        created.push(config);
        Ok(format!("E{:013}", created.len()))
    }
}
