//! Error types for mgnctl.
//!
//! This module defines the error types used throughout mgnctl. Service call
//! failures are caught exactly once per operation and carry the rendered
//! error chain of the underlying SDK error; no retry logic lives in this
//! crate.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for mgnctl operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for mgnctl.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Service Errors
    // ========================================================================
    /// A service call failed. The message carries the full error chain of the
    /// underlying SDK error.
    #[error("{operation} failed: {message}")]
    Api {
        /// Service operation name
        operation: &'static str,
        /// Rendered error chain
        message: String,
    },

    /// The service endpoint could not be resolved. Produced by rewrapping a
    /// name-resolution failure with the attempted endpoint and region.
    #[error(
        "unable to reach '{endpoint}' (region '{region}'); \
         verify the region name and network connectivity"
    )]
    EndpointUnreachable {
        /// Endpoint the call was directed at
        endpoint: String,
        /// Region used to derive the endpoint
        region: String,
        /// The original failure
        #[source]
        source: Box<Error>,
    },

    /// The operation was interrupted by the host stop signal.
    #[error("operation interrupted")]
    Interrupted,

    // ========================================================================
    // Parameter Errors
    // ========================================================================
    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Missing required parameter.
    #[error("missing required parameter: {0}")]
    MissingParameter(String),

    /// Malformed select path.
    #[error("invalid select path '{path}': {message}")]
    SelectPath {
        /// The offending path expression
        path: String,
        /// What is wrong with it
        message: String,
    },

    // ========================================================================
    // Credential Errors
    // ========================================================================
    /// No store in the chain knows the profile.
    #[error("credential profile '{0}' not found")]
    ProfileNotFound(String),

    /// A credential store failed.
    #[error("credential store '{store}': {message}")]
    CredentialStore {
        /// Store name
        store: &'static str,
        /// Error message
        message: String,
    },

    /// The shared credentials file does not exist.
    #[error("shared credentials file not found: {0}")]
    CredentialsFileNotFound(PathBuf),

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    // ========================================================================
    // IO / Serialization Errors
    // ========================================================================
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

impl Error {
    /// Wraps an SDK error, rendering its full source chain into the message.
    pub fn api<E>(operation: &'static str, err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        let mut message = err.to_string();
        let mut source = std::error::Error::source(&err);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        Error::Api { operation, message }
    }

    /// Creates a credential store error.
    pub fn credential_store(store: &'static str, message: impl Into<String>) -> Self {
        Error::CredentialStore {
            store,
            message: message.into(),
        }
    }

    /// Returns true when the underlying failure is a DNS name-resolution
    /// error. Only these get rewrapped with endpoint/region context; every
    /// other error passes through unchanged.
    pub fn is_name_resolution(&self) -> bool {
        match self {
            Error::Api { message, .. } => {
                let m = message.to_ascii_lowercase();
                m.contains("dns error")
                    || m.contains("failed to lookup address")
                    || m.contains("name or service not known")
                    || m.contains("no such host")
            }
            _ => false,
        }
    }

    /// Returns the error code for CLI exit status.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Api { .. } | Error::EndpointUnreachable { .. } => 2,
            Error::ProfileNotFound(_)
            | Error::CredentialStore { .. }
            | Error::CredentialsFileNotFound(_) => 3,
            Error::InvalidParameter(_)
            | Error::MissingParameter(_)
            | Error::SelectPath { .. } => 4,
            Error::Config(_) | Error::TomlParse(_) => 5,
            Error::Interrupted => 130,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Error)]
    #[error("dispatch failure")]
    struct Outer {
        #[source]
        source: Inner,
    }

    #[derive(Debug, Error)]
    #[error("io error: dns error: failed to lookup address information")]
    struct Inner;

    #[test]
    fn api_error_renders_source_chain() {
        let err = Error::api("DescribeSourceServers", Outer { source: Inner });
        match &err {
            Error::Api { operation, message } => {
                assert_eq!(*operation, "DescribeSourceServers");
                assert!(message.contains("dispatch failure"));
                assert!(message.contains("failed to lookup address"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn name_resolution_detection() {
        let dns = Error::api("StartTest", Outer { source: Inner });
        assert!(dns.is_name_resolution());

        let plain = Error::Api {
            operation: "StartTest",
            message: "UninitializedAccountException".into(),
        };
        assert!(!plain.is_name_resolution());
        assert!(!Error::Interrupted.is_name_resolution());
    }

    #[test]
    fn exit_codes() {
        assert_eq!(
            Error::Api {
                operation: "DeleteJob",
                message: "boom".into()
            }
            .exit_code(),
            2
        );
        assert_eq!(Error::ProfileNotFound("dev".into()).exit_code(), 3);
        assert_eq!(Error::InvalidParameter("x".into()).exit_code(), 4);
        assert_eq!(Error::Interrupted.exit_code(), 130);
    }
}
