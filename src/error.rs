//! Error types for distribution cloning.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CloneError>;

#[derive(Debug, Error)]
pub enum CloneError {
    #[error("{operation} failed: {message}")]
    Remote {
        operation: &'static str,
        message: String,
    },

    #[error("No certificate for domain - {domain} in ACM. Please create or import one.")]
    Resolution { domain: String },

    #[error("Missing required configuration: {0}")]
    MissingConfig(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0:#}")]
    Other(#[from] anyhow::Error),
}

impl CloneError {
    pub fn remote(operation: &'static str, message: impl Into<String>) -> Self {
        Self::Remote {
            operation,
            message: message.into(),
        }
    }

    /// Process exit status for this failure.
    ///
    /// A missing certificate is an expected, actionable outcome and exits
    /// with 1; everything else is an abnormal termination.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Resolution { .. } => 1,
            _ => 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolution_exits_with_one() {
        let err = CloneError::Resolution {
            domain: "service.example.com".to_string(),
        };
        assert_eq!(err.exit_code(), 1);
        assert_eq!(
            err.to_string(),
            "No certificate for domain - service.example.com in ACM. Please create or import one."
        );
    }

    #[test]
    fn context_chain_is_kept_in_message() {
        use anyhow::Context;

        let io: std::result::Result<(), _> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "No such file or directory",
        ));
        let err: CloneError = io
            .context("Failed to load config file: clone.toml")
            .unwrap_err()
            .into();

        assert!(matches!(err, CloneError::Other(_)));
        assert_eq!(err.exit_code(), 2);
        assert_eq!(
            err.to_string(),
            "Failed to load config file: clone.toml: No such file or directory"
        );
    }

    #[test]
    fn remote_errors_exit_non_zero() {
        let err = CloneError::remote("GetDistributionConfig", "AccessDenied");
        assert_eq!(err.exit_code(), 2);
        assert_eq!(err.to_string(), "GetDistributionConfig failed: AccessDenied");
    }
}
