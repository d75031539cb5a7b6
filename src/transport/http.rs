//! reqwest-backed transport

use super::{HttpRequest, HttpResponse, HttpTransport};
use crate::config::TransportConfig;
use crate::error::{LlmError, LlmResult};
use crate::logging::{log_error, log_trace};
use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};

/// Default [`HttpTransport`] built on a pooled `reqwest::Client`.
#[derive(Debug)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    request_count: AtomicU64,
}

impl ReqwestTransport {
    /// Build a transport from its configuration
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::ConfigurationError`] if the underlying HTTP client
    /// cannot be initialized (e.g. TLS backend failure).
    pub fn new(config: &TransportConfig) -> LlmResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        if let Some(connect_timeout) = config.connect_timeout() {
            builder = builder.connect_timeout(connect_timeout);
        }
        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent.as_str());
        }

        let client = builder.build().map_err(|e| {
            LlmError::configuration_error(format!("Failed to initialize HTTP client: {e}"))
        })?;

        Ok(Self {
            client,
            request_count: AtomicU64::new(0),
        })
    }

    fn map_send_error(url: &str, error: reqwest::Error) -> LlmError {
        log_error!(
            url = %url,
            error = %error,
            "HTTP request failed"
        );
        if error.is_timeout() {
            LlmError::timeout(format!("No response from {url}: {error}"))
        } else {
            LlmError::request_failed(format!("Request failed: {error}"), Some(Box::new(error)))
        }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: &HttpRequest) -> LlmResult<HttpResponse> {
        self.request_count.fetch_add(1, Ordering::Relaxed);

        let mut builder = self
            .client
            .request(request.method.clone(), &request.url)
            .headers(request.headers.clone());
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| Self::map_send_error(&request.url, e))?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(|e| Self::map_send_error(&request.url, e))?;

        log_trace!(
            url = %request.url,
            status = %status,
            body_len = body.len(),
            "HTTP response received"
        );

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }

    fn request_count(&self) -> u64 {
        self.request_count.load(Ordering::Relaxed)
    }

    fn reset_request_count(&self) {
        self.request_count.store(0, Ordering::Relaxed);
    }
}
