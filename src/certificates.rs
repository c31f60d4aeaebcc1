//! Certificate directory: issued certificates keyed by domain name

use crate::console::Console;
use crate::error::{CloneError, Result};
use crate::remote::{CertificateRecord, DistributionService};
use std::collections::HashMap;

/// Domain name (exact or `*.parent` form) to certificate ARN.
///
/// Built once per run and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CertificateDirectory {
    entries: HashMap<String, String>,
}

impl CertificateDirectory {
    /// List every ISSUED certificate, following pagination to the end.
    ///
    /// A domain that appears on several pages keeps the ARN seen last.
    pub async fn fetch<S: DistributionService>(service: &S, console: &Console) -> Result<Self> {
        let mut directory = Self::default();
        let mut page_token = None;
        let mut pages = 0usize;

        loop {
            let page = service
                .list_issued_certificates(page_token.take())
                .await
                .inspect_err(|e| {
                    tracing::error!(error = %e, pages, "listing certificates failed");
                    console.error("Failed to list ACM certificates", Some(e.to_string().as_str()));
                })?;
            pages += 1;
            directory.extend(page.certificates);

            match page.next_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        tracing::debug!(pages, certificates = directory.len(), "certificate directory built");
        Ok(directory)
    }

    /// Certificate for `domain`: exact entry first, then `*.<parent>`.
    pub fn resolve(&self, domain: &str) -> Result<&str> {
        if let Some(arn) = self.entries.get(domain) {
            return Ok(arn.as_str());
        }

        let wildcard = wildcard_for(domain);
        match self.entries.get(&wildcard) {
            Some(arn) => {
                tracing::debug!(domain, %wildcard, "matched wildcard certificate");
                Ok(arn.as_str())
            }
            None => Err(CloneError::Resolution {
                domain: domain.to_string(),
            }),
        }
    }

    #[must_use]
    pub fn get(&self, domain: &str) -> Option<&str> {
        self.entries.get(domain).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Extend<CertificateRecord> for CertificateDirectory {
    fn extend<I: IntoIterator<Item = CertificateRecord>>(&mut self, records: I) {
        for record in records {
            self.entries.insert(record.domain_name, record.certificate_arn);
        }
    }
}

impl FromIterator<CertificateRecord> for CertificateDirectory {
    fn from_iter<I: IntoIterator<Item = CertificateRecord>>(records: I) -> Self {
        let mut directory = Self::default();
        directory.extend(records);
        directory
    }
}

/// `*.` followed by everything after the first dot.
///
/// A name without a dot is its own parent: `localhost` gives `*.localhost`.
#[must_use]
pub fn wildcard_for(domain: &str) -> String {
    let parent = domain.split_once('.').map_or(domain, |(_, rest)| rest);
    format!("*.{parent}")
}
