//! Clone a CloudFront distribution onto a new domain, origin and certificate

pub mod aws;
pub mod certificates;
pub mod config;
pub mod console;
pub mod error;
pub mod pipeline;
pub mod record;
pub mod remote;
pub mod transform;

#[cfg(test)]
pub(crate) mod fake;

// Re-export common types
pub use aws::AwsService;
pub use certificates::CertificateDirectory;
pub use config::{CloneConfig, CloneRequest};
pub use console::Console;
pub use error::{CloneError, Result};
pub use pipeline::{Outcome, run};
pub use record::DistributionRecord;
pub use remote::DistributionService;
