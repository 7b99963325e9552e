//! Error types for the DMM affiliate client
//!
//! This module defines the error hierarchy for the whole crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.
//!
//! Retryable failures (429/5xx responses and transport errors) never surface
//! directly: the request executor retries them and reports
//! [`Error::RetriesExhausted`] once its budget is spent.

use thiserror::Error;

/// The main error type for the DMM affiliate client
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Request Errors
    // ============================================================================
    #[error("Invalid request parameter '{name}': {message}")]
    InvalidParam { name: String, message: String },

    #[error("Request to {endpoint} timed out after {timeout_ms}ms")]
    Timeout { endpoint: String, timeout_ms: u64 },

    #[error("Request to {endpoint} failed with HTTP {status}: {message}")]
    HttpStatus {
        endpoint: String,
        status: u16,
        message: String,
    },

    #[error("Request to {endpoint} failed after {attempts} attempts: {message}")]
    RetriesExhausted {
        endpoint: String,
        attempts: u32,
        status: Option<u16>,
        message: String,
    },

    #[error("Invalid response from {endpoint}: {message}")]
    Parse { endpoint: String, message: String },

    // ============================================================================
    // Pagination Errors
    // ============================================================================
    #[error("Pagination failed at offset {offset}: {source}")]
    Pagination {
        offset: u32,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create an invalid config value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an invalid parameter error
    pub fn invalid_param(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParam {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create a response parse error
    pub fn parse(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }

    /// Wrap a page fetch failure with the offset it happened at
    pub fn pagination(offset: u32, source: Error) -> Self {
        Self::Pagination {
            offset,
            source: Box::new(source),
        }
    }

    /// HTTP status attached to this error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::HttpStatus { status, .. } => Some(*status),
            Error::RetriesExhausted { status, .. } => *status,
            Error::Pagination { source, .. } => source.status(),
            _ => None,
        }
    }

    /// Check if this error is a deadline expiry
    pub fn is_timeout(&self) -> bool {
        match self {
            Error::Timeout { .. } => true,
            Error::Pagination { source, .. } => source.is_timeout(),
            _ => false,
        }
    }

    /// Check if this error was raised while building the client
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            Error::Config { .. }
                | Error::MissingConfigField { .. }
                | Error::InvalidConfigValue { .. }
                | Error::InvalidUrl(_)
                | Error::YamlParse(_)
                | Error::Io(_)
        )
    }
}

/// Check if an HTTP status code is worth retrying
pub fn is_retryable_status(status: u16) -> bool {
    status == 429 || (500..=599).contains(&status)
}

/// Result type alias for the DMM affiliate client
pub type Result<T> = std::result::Result<T, Error>;
