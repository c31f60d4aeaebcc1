//! Editable view over a distribution configuration
//!
//! The transformer only ever touches a handful of fields, so it works through
//! [`DistributionRecord`] rather than a concrete type. The AWS SDK
//! `DistributionConfig` implements it (see `aws.rs`), and so does a plain JSON
//! mapping laid out like the CloudFront API document (`"Origins"`,
//! `"ViewerCertificate"`, ...), which is what the offline tests use.

use crate::error::{CloneError, Result};
use serde_json::{Map, Value, json};

/// Fields of a distribution configuration that cloning reads or rewrites.
pub trait DistributionRecord: Clone + std::fmt::Debug {
    /// Drop every alternate domain name.
    fn clear_aliases(&mut self) -> Result<()>;

    fn set_caller_reference(&mut self, token: &str) -> Result<()>;

    /// Point the first origin (id and host name) at `origin`.
    fn set_primary_origin(&mut self, origin: &str) -> Result<()>;

    fn set_default_target_origin(&mut self, origin_id: &str) -> Result<()>;

    fn set_comment(&mut self, comment: &str) -> Result<()>;

    /// True only when the viewer certificate explicitly opts out of the
    /// CloudFront default certificate.
    fn uses_custom_certificate(&self) -> bool;

    fn set_acm_certificate(&mut self, certificate_arn: &str) -> Result<()>;

    /// True when a logging section is present and enabled.
    fn logging_enabled(&self) -> bool;

    fn set_logging_target(&mut self, bucket: &str, prefix: &str) -> Result<()>;

    /// Human-readable dump for dry runs.
    fn render(&self) -> Result<String>;
}

impl DistributionRecord for Value {
    fn clear_aliases(&mut self) -> Result<()> {
        root_mut(self)?.insert("Aliases".into(), json!({ "Quantity": 0 }));
        Ok(())
    }

    fn set_caller_reference(&mut self, token: &str) -> Result<()> {
        root_mut(self)?.insert("CallerReference".into(), Value::from(token));
        Ok(())
    }

    fn set_primary_origin(&mut self, origin: &str) -> Result<()> {
        let first = self
            .pointer_mut("/Origins/Items/0")
            .and_then(Value::as_object_mut)
            .ok_or_else(|| missing("Origins.Items[0]"))?;
        first.insert("Id".into(), Value::from(origin));
        first.insert("DomainName".into(), Value::from(origin));
        Ok(())
    }

    fn set_default_target_origin(&mut self, origin_id: &str) -> Result<()> {
        section_mut(self, "DefaultCacheBehavior")?
            .insert("TargetOriginId".into(), Value::from(origin_id));
        Ok(())
    }

    fn set_comment(&mut self, comment: &str) -> Result<()> {
        root_mut(self)?.insert("Comment".into(), Value::from(comment));
        Ok(())
    }

    fn uses_custom_certificate(&self) -> bool {
        self.pointer("/ViewerCertificate/CloudFrontDefaultCertificate")
            == Some(&Value::Bool(false))
    }

    fn set_acm_certificate(&mut self, certificate_arn: &str) -> Result<()> {
        section_mut(self, "ViewerCertificate")?
            .insert("ACMCertificateArn".into(), Value::from(certificate_arn));
        Ok(())
    }

    fn logging_enabled(&self) -> bool {
        self.pointer("/Logging/Enabled") == Some(&Value::Bool(true))
    }

    fn set_logging_target(&mut self, bucket: &str, prefix: &str) -> Result<()> {
        let logging = section_mut(self, "Logging")?;
        logging.insert("Bucket".into(), Value::from(bucket));
        logging.insert("Prefix".into(), Value::from(prefix));
        Ok(())
    }

    fn render(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn root_mut(value: &mut Value) -> Result<&mut Map<String, Value>> {
    value
        .as_object_mut()
        .ok_or_else(|| CloneError::InvalidConfig("distribution config is not a mapping".into()))
}

fn section_mut<'a>(value: &'a mut Value, key: &str) -> Result<&'a mut Map<String, Value>> {
    root_mut(value)?
        .get_mut(key)
        .and_then(Value::as_object_mut)
        .ok_or_else(|| missing(key))
}

pub(crate) fn missing(field: &str) -> CloneError {
    CloneError::InvalidConfig(format!("reference distribution has no {field}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_certificate_requires_explicit_false() {
        let explicit = json!({ "ViewerCertificate": { "CloudFrontDefaultCertificate": false } });
        let default = json!({ "ViewerCertificate": { "CloudFrontDefaultCertificate": true } });
        let absent = json!({ "ViewerCertificate": { "MinimumProtocolVersion": "TLSv1.2_2021" } });

        assert!(explicit.uses_custom_certificate());
        assert!(!default.uses_custom_certificate());
        assert!(!absent.uses_custom_certificate());
    }

    #[test]
    fn empty_origin_list_is_reported() {
        let mut config = json!({ "Origins": { "Quantity": 0, "Items": [] } });
        let err = config.set_primary_origin("origin.example.net").unwrap_err();
        assert!(err.to_string().contains("Origins.Items[0]"), "{err}");
    }

    #[test]
    fn non_mapping_is_rejected() {
        let mut config = json!(["not", "a", "config"]);
        assert!(matches!(
            config.set_comment("service.example.com"),
            Err(CloneError::InvalidConfig(_))
        ));
    }

    #[test]
    fn aliases_are_replaced_wholesale() {
        let mut config = json!({
            "Aliases": { "Quantity": 2, "Items": ["a.example.com", "b.example.com"] }
        });
        config.clear_aliases().unwrap();
        assert_eq!(config["Aliases"], json!({ "Quantity": 0 }));
    }
}
