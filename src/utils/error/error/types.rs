//! Error types for the purge executor

use thiserror::Error;

/// Result type alias for the purge executor
pub type Result<T> = std::result::Result<T, PurgeError>;

/// Main error type for the purge executor
#[derive(Error, Debug)]
pub enum PurgeError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// The bearer credential could not be obtained
    #[error("Credential not found: {0}")]
    CredentialNotFound(String),

    /// The anti-forgery cookie is absent from the cookie store
    #[error("Missing CSRF token: cookie '{0}' is not set")]
    MissingCsrfToken(String),

    /// Transport-level failures (connection refused, reset, TLS, ...)
    #[error("Network error: {0}")]
    Network(String),

    /// The scheduler has already been driven once
    #[error("Execution already submitted")]
    AlreadySubmitted,

    /// Input could not be parsed into resource identifiers
    #[error("Parsing error: {0}")]
    Parsing(String),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
