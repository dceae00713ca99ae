//! Error types for eva-sub-cli

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while authenticating, initiating or uploading a submission
#[derive(Error, Debug)]
pub enum Error {
    /// Network failure (connection refused, timeout, broken body)
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Auth endpoint rejected the request or answered with something unusable
    #[error("{provider} authentication failed: {message}")]
    Authentication {
        /// Provider that failed (e.g. "ENA Webin")
        provider: &'static str,
        /// What went wrong
        message: String,
    },

    /// Submission initiate call failed
    #[error("failed to initiate submission: {0}")]
    Initiate(String),

    /// Resume was requested but no submission config exists
    #[error(
        "no submission config found in {}; run `eva-sub submit` first to initiate a submission",
        .0.display()
    )]
    ConfigNotFound(PathBuf),

    /// Working directory is not writable
    #[error("the directory '{}' does not have write permissions", .0.display())]
    Permission(PathBuf),

    /// Upload of one file failed: retries exhausted, or its name cannot be sent
    #[error("upload of {file} failed after {attempts} attempts: {source}")]
    Transfer {
        /// Base name of the file being uploaded
        file: String,
        /// Number of attempts made
        attempts: u32,
        /// Last underlying failure
        #[source]
        source: Box<Error>,
    },

    /// Upload endpoint answered with a non-success status
    #[error("upload endpoint returned {status} for {url}")]
    UploadStatus {
        /// HTTP status code
        status: u16,
        /// Destination URL
        url: String,
    },

    /// Operator did not pick a valid menu entry
    #[error("invalid selection: {0}")]
    InvalidSelection(String),

    /// Configuration could not be read or is incomplete
    #[error("configuration error: {0}")]
    Config(String),

    /// Local I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal error (terminal interaction and the like)
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Build an [`Error::Authentication`] for `provider`
    pub fn auth(provider: &'static str, message: impl Into<String>) -> Self {
        Self::Authentication {
            provider,
            message: message.into(),
        }
    }
}

/// Result type alias for eva-sub-cli operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transfer_error_names_file_and_cause() {
        let err = Error::Transfer {
            file: "sample.vcf".to_string(),
            attempts: 5,
            source: Box::new(Error::UploadStatus {
                status: 503,
                url: "https://upload.example/abc/sample.vcf".to_string(),
            }),
        };
        let msg = err.to_string();
        assert!(msg.contains("sample.vcf"));
        assert!(msg.contains("5 attempts"));
        assert!(msg.contains("503"));
    }

    #[test]
    fn test_config_not_found_is_actionable() {
        let err = Error::ConfigNotFound(PathBuf::from("/tmp/sub"));
        assert!(err.to_string().contains("eva-sub submit"));
    }

    #[test]
    fn test_auth_helper_names_provider() {
        let err = Error::auth("LS-RI", "HTTP 401");
        assert_eq!(err.to_string(), "LS-RI authentication failed: HTTP 401");
    }
}
