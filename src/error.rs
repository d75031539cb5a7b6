//! Error types for completion API operations.
//!
//! The main error type is [`LlmError`], which covers every failure the
//! service can surface:
//! - Configuration errors (missing API key, malformed base URL)
//! - Transport failures (connectivity, timeouts)
//! - Non-success HTTP responses, optionally enriched with API-supplied messages
//! - Request serialization and response parsing failures
//!
//! There is no separate "API error" kind. When the remote API answers a failed
//! request with an error list (`{"error": ["invalid model", "rate limited"]}`),
//! the transport-level error keeps its kind and only its message is replaced by
//! the joined list, see [`enrich`].
//!
//! # Example
//!
//! ```rust
//! use openai_completions::error::{enrich, LlmError};
//!
//! let base = LlmError::http_status(400, "Bad Request");
//! let err = enrich(base, &["invalid model".to_string(), "rate limited".to_string()]);
//! assert_eq!(err.message(), "invalid model\nrate limited");
//! assert_eq!(err.status(), Some(400));
//! ```

use crate::logging::{log_debug, log_error, log_warn};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// High-level categorization of errors for routing and handling decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The caller can fix this (API key, request payload, 4xx responses).
    Client,

    /// The remote API or the network had an issue.
    External,

    /// Timeouts, rate limits and server overload.
    Transient,
}

/// Convenient result type for service operations.
pub type LlmResult<T> = std::result::Result<T, LlmError>;

/// Errors that can occur while talking to the completions API.
///
/// | Variant | Category | Retryable |
/// |---------|----------|-----------|
/// | `ConfigurationError` | Client | No |
/// | `RequestFailed` | External | Yes |
/// | `Timeout` | Transient | Yes |
/// | `HttpStatus` (429, 5xx) | Transient | Yes |
/// | `HttpStatus` (other) | Client | No |
/// | `SerializationError` | Client | No |
/// | `ResponseParsingError` | External | No |
///
/// Retryability is informational; this crate never retries on its own.
#[derive(Error, Debug)]
pub enum LlmError {
    /// Service configuration is invalid or incomplete.
    #[error("Service configuration error: {message}")]
    ConfigurationError {
        /// Description of the configuration problem.
        message: String,
    },

    /// The transport could not complete the HTTP exchange.
    #[error("Request failed: {message}")]
    RequestFailed {
        /// Description of the failure.
        message: String,
        /// The underlying error, if available.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The transport gave up waiting for the API.
    #[error("Request timed out: {message}")]
    Timeout {
        /// Description of the timeout.
        message: String,
    },

    /// The API answered with a non-success status.
    ///
    /// `message` starts out as the raw response body and is replaced by the
    /// API-supplied error strings when the body carries any.
    #[error("HTTP {status}: {message}")]
    HttpStatus {
        /// HTTP status code of the response.
        status: u16,
        /// Response body or joined API error messages.
        message: String,
    },

    /// The request body could not be encoded as JSON.
    #[error("Request serialization failed: {message}")]
    SerializationError {
        /// Details about the encoding failure.
        message: String,
    },

    /// The response body could not be decoded into the expected model.
    #[error("Response parsing failed: {message}")]
    ResponseParsingError {
        /// Details about the parsing failure.
        message: String,
    },
}

impl LlmError {
    /// The bare message carried by the error, without the variant prefix
    /// used by `Display`.
    pub fn message(&self) -> &str {
        match self {
            Self::ConfigurationError { message }
            | Self::RequestFailed { message, .. }
            | Self::Timeout { message }
            | Self::HttpStatus { message, .. }
            | Self::SerializationError { message }
            | Self::ResponseParsingError { message } => message,
        }
    }

    /// Replace the message while keeping the variant and its other fields.
    pub fn with_message(mut self, new_message: impl Into<String>) -> Self {
        match &mut self {
            Self::ConfigurationError { message }
            | Self::RequestFailed { message, .. }
            | Self::Timeout { message }
            | Self::HttpStatus { message, .. }
            | Self::SerializationError { message }
            | Self::ResponseParsingError { message } => *message = new_message.into(),
        }
        self
    }

    /// HTTP status code, for errors produced by a completed exchange.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfigurationError { .. } => ErrorCategory::Client,
            Self::RequestFailed { .. } => ErrorCategory::External,
            Self::Timeout { .. } => ErrorCategory::Transient,
            Self::HttpStatus { status, .. } => match status {
                429 | 500..=599 => ErrorCategory::Transient,
                _ => ErrorCategory::Client,
            },
            Self::SerializationError { .. } => ErrorCategory::Client,
            Self::ResponseParsingError { .. } => ErrorCategory::External,
        }
    }

    /// Whether a caller-side retry could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::RequestFailed { .. }) || self.category() == ErrorCategory::Transient
    }

    // =========================================================================
    // Constructor methods with automatic logging
    // =========================================================================

    pub fn configuration_error(message: impl Into<String>) -> Self {
        let message = message.into();
        log_error!(
            error_type = "configuration_error",
            message = %message,
            "Service configuration validation failed"
        );
        Self::ConfigurationError { message }
    }

    pub fn request_failed(
        message: impl Into<String>,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        let message = message.into();
        log_error!(
            error_type = "request_failed",
            message = %message,
            has_source = source.is_some(),
            "HTTP request execution failed"
        );
        Self::RequestFailed { message, source }
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        let message = message.into();
        log_warn!(
            error_type = "timeout",
            message = %message,
            "HTTP request timed out"
        );
        Self::Timeout { message }
    }

    pub fn http_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        log_warn!(
            error_type = "http_status",
            status = status,
            message = %message,
            "API returned a non-success status"
        );
        Self::HttpStatus { status, message }
    }

    pub fn serialization_error(message: impl Into<String>) -> Self {
        let message = message.into();
        log_error!(
            error_type = "serialization_error",
            message = %message,
            "Request body serialization failed"
        );
        Self::SerializationError { message }
    }

    pub fn response_parsing_error(message: impl Into<String>) -> Self {
        let message = message.into();
        log_warn!(
            error_type = "response_parsing_error",
            message = %message,
            "API response format invalid"
        );
        Self::ResponseParsingError { message }
    }
}

/// Fold API-supplied error messages into a transport error.
///
/// With an empty list the error is returned untouched. Otherwise its message
/// becomes the list joined by newlines; the variant and status are kept.
pub fn enrich(error: LlmError, messages: &[String]) -> LlmError {
    if messages.is_empty() {
        return error;
    }

    log_debug!(
        error_count = messages.len(),
        status = ?error.status(),
        "Enriching error with API-supplied messages"
    );
    error.with_message(messages.join("\n"))
}

/// Error payload returned by the API on failed requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(default, deserialize_with = "deserialize_error_messages")]
    pub error: Vec<String>,
}

impl ErrorResponse {
    /// Decode the error model from a response body.
    ///
    /// Bodies that are not JSON, or JSON of another shape, yield an empty model.
    pub fn capture(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.error.is_empty()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawErrorMessages {
    List(Vec<String>),
    Single(String),
    Object { message: String },
}

fn deserialize_error_messages<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawErrorMessages>::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawErrorMessages::List(messages)) => messages,
        Some(RawErrorMessages::Single(message)) | Some(RawErrorMessages::Object { message }) => {
            vec![message]
        }
        None => Vec::new(),
    })
}
