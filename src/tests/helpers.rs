//! Test helper utilities for openai-completions unit tests
//!
//! IMPORTANT: These helpers are test-only and should NEVER be used in production code.

#![allow(dead_code)]

use crate::completions::CompletionsConfig;
use crate::config::ServiceConfig;
use crate::error::{LlmError, LlmResult};
use crate::service::Service;
use crate::transport::{HttpRequest, HttpResponse, HttpTransport};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

pub const TEST_API_KEY: &str = "sk-test-key";

/// Substitute transport that replays canned results and records requests.
///
/// Counts every call, including calls that produce an error, the same way
/// `ReqwestTransport` does. Clones share state so a test can keep a handle
/// after moving the transport into a `Service`.
#[derive(Clone, Default)]
pub struct StubTransport {
    responses: Arc<Mutex<VecDeque<LlmResult<HttpResponse>>>>,
    requests: Arc<Mutex<Vec<HttpRequest>>>,
    count: Arc<AtomicU64>,
}

impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_json(&self, status: u16, body: serde_json::Value) -> &Self {
        self.push_raw(status, body.to_string())
    }

    pub fn push_raw(&self, status: u16, body: impl Into<String>) -> &Self {
        let response = HttpResponse {
            status: StatusCode::from_u16(status).unwrap(),
            headers: HeaderMap::new(),
            body: Bytes::from(body.into()),
        };
        self.responses.lock().unwrap().push_back(Ok(response));
        self
    }

    pub fn push_error(&self, error: LlmError) -> &Self {
        self.responses.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> HttpRequest {
        self.requests()
            .pop()
            .expect("transport should have received a request")
    }
}

#[async_trait]
impl HttpTransport for StubTransport {
    async fn send(&self, request: &HttpRequest) -> LlmResult<HttpResponse> {
        self.count.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(LlmError::request_failed("no canned response queued", None)))
    }

    fn request_count(&self) -> u64 {
        self.count.load(Ordering::SeqCst)
    }

    fn reset_request_count(&self) {
        self.count.store(0, Ordering::SeqCst);
    }
}

pub fn create_test_service(transport: &StubTransport) -> Service {
    Service::with_transport(&ServiceConfig::new(TEST_API_KEY), transport.clone())
        .expect("test service should build")
}

pub fn create_completions_config() -> CompletionsConfig {
    CompletionsConfig {
        model: "gpt-3.5-turbo-instruct".to_string(),
        prompt: "Say this is a test".to_string(),
        temperature: 0.7,
        max_tokens: 16,
    }
}

pub fn completion_body(texts: &[&str]) -> serde_json::Value {
    let choices: Vec<serde_json::Value> = texts
        .iter()
        .enumerate()
        .map(|(index, text)| {
            serde_json::json!({
                "text": text,
                "index": index,
                "logprobs": null,
                "finish_reason": "stop"
            })
        })
        .collect();

    serde_json::json!({
        "id": "cmpl-uqkvlQyYK7bGYrRHQ0eXlWi7",
        "object": "text_completion",
        "created": 1589478378,
        "model": "gpt-3.5-turbo-instruct",
        "choices": choices,
        "usage": {
            "prompt_tokens": 5,
            "completion_tokens": 7,
            "total_tokens": 12
        }
    })
}
