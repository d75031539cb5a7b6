//! HTTP transport seam
//!
//! The service never talks to the network directly. It hands a fully built
//! [`HttpRequest`] to an [`HttpTransport`] and gets the raw [`HttpResponse`]
//! back, whatever its status. Status interpretation and body decoding stay in
//! the service so transports remain API-agnostic.
//!
//! - `http` - [`ReqwestTransport`], the default implementation

pub mod http;

pub use http::ReqwestTransport;

use crate::error::LlmResult;
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};

/// Outgoing request descriptor, as handed to the transport.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    /// JSON body, already serialized from the caller's model.
    pub body: Option<serde_json::Value>,
}

/// Raw response as received by the transport.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl HttpResponse {
    /// Body as text, replacing invalid UTF-8.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Performs HTTP exchanges and counts them.
///
/// Implementations must increment the request counter once per call to
/// [`send`](Self::send), whether the exchange succeeds or not.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Execute the request.
    ///
    /// Any response that arrives is returned as `Ok`, including non-success
    /// statuses. `Err` means no response was obtained.
    async fn send(&self, request: &HttpRequest) -> LlmResult<HttpResponse>;

    /// Number of calls made through this transport since creation or the last reset.
    fn request_count(&self) -> u64;

    fn reset_request_count(&self);
}
