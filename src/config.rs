use crate::error::{LlmError, LlmResult};
use crate::logging::log_debug;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for constructing a [`Service`](crate::Service).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Bearer token sent with every request. Required.
    pub api_key: String,

    /// Accepted for compatibility with other credential sets; no request
    /// currently uses it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security_code: Option<String>,

    /// Overrides the API base URL (`https://api.openai.com/v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Settings applied to the default HTTP transport.
    #[serde(default)]
    pub transport: TransportConfig,
}

impl ServiceConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    pub fn with_security_code(mut self, security_code: impl Into<String>) -> Self {
        self.security_code = Some(security_code.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_transport(mut self, transport: TransportConfig) -> Self {
        self.transport = transport;
        self
    }

    /// Validate service configuration
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::ConfigurationError`] if:
    /// - The API key is empty (message: `ApiKey not provided`)
    /// - A base URL override is not an HTTP/HTTPS URL
    pub fn validate(&self) -> LlmResult<()> {
        if self.api_key.is_empty() {
            return Err(LlmError::configuration_error("ApiKey not provided"));
        }

        if let Some(base_url) = &self.base_url {
            if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
                return Err(LlmError::configuration_error(format!(
                    "Base URL must be a valid HTTP/HTTPS URL: {base_url}"
                )));
            }
        }

        log_debug!(
            has_security_code = self.security_code.is_some(),
            base_url_override = ?self.base_url,
            "Service configuration validated"
        );
        Ok(())
    }
}

/// Settings for the default reqwest-backed transport.
///
/// Unset fields leave reqwest's own defaults in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connect_timeout_seconds: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl TransportConfig {
    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = Some(timeout_seconds);
        self
    }

    pub fn with_connect_timeout(mut self, connect_timeout_seconds: u64) -> Self {
        self.connect_timeout_seconds = Some(connect_timeout_seconds);
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }

    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout_seconds.map(Duration::from_secs)
    }
}
