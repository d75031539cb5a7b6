//! OpenAI service and the request pipeline shared by endpoint wrappers
//!
//! Every endpoint goes through [`Service::http_request`], which:
//! 1. injects `Authorization: Bearer <api_key>`, overwriting any caller value
//! 2. serializes the body and hands the request to the transport
//! 3. on a non-success status, captures the API's error model from the body
//!    and [`enrich`]es the status error with it
//! 4. on success, decodes the body into the endpoint's response model

use crate::config::ServiceConfig;
use crate::error::{enrich, ErrorResponse, LlmError, LlmResult};
use crate::logging::{log_debug, log_info};
use crate::transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;

pub const API_NAME: &str = "OpenAI";
pub const API_URL: &str = "https://api.openai.com/v1";

/// Request descriptor used by endpoint wrappers.
pub(crate) struct RequestConfig<'a, B: ?Sized> {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub body: Option<&'a B>,
}

impl<'a, B: ?Sized> RequestConfig<'a, B> {
    pub fn new(method: Method, url: String) -> Self {
        Self {
            method,
            url,
            headers: HeaderMap::new(),
            body: None,
        }
    }

    pub fn with_body(mut self, body: &'a B) -> Self {
        self.body = Some(body);
        self
    }
}

/// Outcome of a successful dispatch.
#[derive(Debug)]
pub(crate) struct Exchange<R> {
    pub request: HttpRequest,
    pub response: HttpResponse,
    pub data: R,
}

/// Authenticated client for the OpenAI API.
pub struct Service {
    api_key: String,
    base_url: String,
    transport: Box<dyn HttpTransport>,
}

impl fmt::Debug for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Service")
            .field("api_name", &API_NAME)
            .field("base_url", &self.base_url)
            .field("api_call_count", &self.api_call_count())
            .finish_non_exhaustive()
    }
}

impl Service {
    /// Create a service backed by the default reqwest transport
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::ConfigurationError`] if:
    /// - The API key is empty (`ApiKey not provided`)
    /// - The base URL override is malformed
    /// - The HTTP client cannot be initialized
    pub fn new(config: &ServiceConfig) -> LlmResult<Self> {
        config.validate()?;
        let transport = ReqwestTransport::new(&config.transport)?;
        Self::build(config, Box::new(transport))
    }

    /// Create a service that dispatches through the given transport.
    pub fn with_transport(
        config: &ServiceConfig,
        transport: impl HttpTransport + 'static,
    ) -> LlmResult<Self> {
        config.validate()?;
        Self::build(config, Box::new(transport))
    }

    fn build(config: &ServiceConfig, transport: Box<dyn HttpTransport>) -> LlmResult<Self> {
        let base_url = config
            .base_url
            .as_deref()
            .unwrap_or(API_URL)
            .trim_end_matches('/')
            .to_string();

        log_info!(
            api = API_NAME,
            base_url = %base_url,
            "OpenAI service initialized"
        );

        Ok(Self {
            api_key: config.api_key.clone(),
            base_url,
            transport,
        })
    }

    /// Dispatch an authenticated request and decode the response into `R`.
    pub(crate) async fn http_request<B, R>(
        &self,
        request_config: RequestConfig<'_, B>,
    ) -> LlmResult<Exchange<R>>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let RequestConfig {
            method,
            url,
            mut headers,
            body,
        } = request_config;

        headers.insert(AUTHORIZATION, self.authorization()?);

        let body = body
            .map(serde_json::to_value)
            .transpose()
            .map_err(|e| LlmError::serialization_error(format!("{url}: {e}")))?;

        let request = HttpRequest {
            method,
            url,
            headers,
            body,
        };

        log_debug!(
            api = API_NAME,
            method = %request.method,
            url = %request.url,
            has_body = request.body.is_some(),
            "Dispatching API request"
        );

        let response = self.transport.send(&request).await?;

        if !response.status.is_success() {
            let base = LlmError::http_status(response.status.as_u16(), response.text());
            let error_response = ErrorResponse::capture(&response.body);
            return Err(enrich(base, &error_response.error));
        }

        let data = serde_json::from_slice(&response.body).map_err(|e| {
            LlmError::response_parsing_error(format!(
                "Failed to decode response from {}: {e}",
                request.url
            ))
        })?;

        Ok(Exchange {
            request,
            response,
            data,
        })
    }

    /// Bearer header value for the API key, marked sensitive.
    ///
    /// Keys with characters not allowed in a header value (control
    /// characters) fail here, before anything reaches the transport.
    fn authorization(&self) -> LlmResult<HeaderValue> {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", self.api_key))
            .map_err(|e| LlmError::configuration_error(format!("Invalid API key format: {e}")))?;
        value.set_sensitive(true);
        Ok(value)
    }

    /// Join the base URL and a relative path. The path is not escaped.
    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    pub fn api_name(&self) -> &'static str {
        API_NAME
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Requests issued through this service since creation or the last reset.
    pub fn api_call_count(&self) -> u64 {
        self.transport.request_count()
    }

    pub fn api_reset(&self) {
        self.transport.reset_request_count();
    }
}
