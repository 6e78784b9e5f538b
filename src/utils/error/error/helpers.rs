//! Helper functions for creating specific error types

use super::types::PurgeError;

impl PurgeError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn credential_not_found<S: Into<String>>(message: S) -> Self {
        Self::CredentialNotFound(message.into())
    }

    pub fn missing_csrf_token<S: Into<String>>(cookie: S) -> Self {
        Self::MissingCsrfToken(cookie.into())
    }

    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network(message.into())
    }

    pub fn parsing<S: Into<String>>(message: S) -> Self {
        Self::Parsing(message.into())
    }
}
