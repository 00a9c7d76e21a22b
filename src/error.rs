// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Error types for fetchpad
//!
//! Validation errors are returned synchronously from the request builder.
//! Transport errors are raised inside the HTTP client and turned into
//! [`RequestOutcome::Failure`](crate::http::RequestOutcome) before they reach
//! the executor, so nothing here ever propagates out of `poll`.

use thiserror::Error;

/// Result type alias for fetchpad operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for fetchpad
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed request description
    #[error("Invalid request: {0}")]
    Validation(String),

    /// HTTP request failed in transit
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Header name or value could not be encoded
    #[error("Invalid header '{name}': {reason}")]
    InvalidHeader { name: String, reason: String },

    /// Request did not finish within the configured deadline
    #[error("Request to {url} timed out after {duration_ms}ms")]
    Timeout { url: String, duration_ms: u64 },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a validation error
    pub fn validation<S: Into<String>>(msg: S) -> Self {
        Error::Validation(msg.into())
    }

    /// Create a configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }

    /// Create an invalid header error
    pub fn invalid_header(name: impl Into<String>, reason: impl ToString) -> Self {
        Error::InvalidHeader {
            name: name.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a timeout error
    pub fn timeout(url: impl Into<String>, duration_ms: u64) -> Self {
        Error::Timeout {
            url: url.into(),
            duration_ms,
        }
    }

    /// Render the error with its full source chain.
    ///
    /// reqwest hides the interesting part ("Connection refused", "dns error")
    /// in the source chain, so failure reasons are built from this.
    pub fn describe(&self) -> String {
        let mut message = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            let cause_text = cause.to_string();
            if !message.contains(&cause_text) {
                message.push_str(": ");
                message.push_str(&cause_text);
            }
            source = std::error::Error::source(cause);
        }
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let err = Error::validation("URL must not be empty");
        assert_eq!(err.to_string(), "Invalid request: URL must not be empty");
    }

    #[test]
    fn test_timeout_error() {
        let err = Error::timeout("https://example.test", 5000);
        assert_eq!(
            err.describe(),
            "Request to https://example.test timed out after 5000ms"
        );
    }

    #[test]
    fn test_url_error_describe() {
        let err: Error = url::Url::parse("not a url").unwrap_err().into();
        assert!(err.describe().starts_with("Invalid URL"));
    }

    #[test]
    fn test_invalid_header() {
        let err = Error::invalid_header("bad name", "invalid HTTP header name");
        assert_eq!(
            err.to_string(),
            "Invalid header 'bad name': invalid HTTP header name"
        );
    }
}
