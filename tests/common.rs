//! Test helper utilities for openai-completions integration tests
//!
//! IMPORTANT: These helpers are test-only and should NEVER be used in production code.

#![allow(dead_code)]

use openai_completions::{CompletionsConfig, Service, ServiceConfig, TransportConfig};
use wiremock::{MockServer, ResponseTemplate};

pub const TEST_API_KEY: &str = "sk-integration-key";

/// Service pointed at the mock server's `/v1` prefix.
pub fn create_service_for(server: &MockServer) -> Service {
    create_service_with_transport(server, TransportConfig::default())
}

pub fn create_service_with_transport(server: &MockServer, transport: TransportConfig) -> Service {
    let config = ServiceConfig::new(TEST_API_KEY)
        .with_base_url(format!("{}/v1", server.uri()))
        .with_transport(transport);
    Service::new(&config).expect("service should build against mock server")
}

pub fn create_completions_config() -> CompletionsConfig {
    CompletionsConfig {
        model: "gpt-3.5-turbo-instruct".to_string(),
        prompt: "Say this is a test".to_string(),
        temperature: 0.0,
        max_tokens: 7,
    }
}

pub fn completion_response() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "id": "cmpl-7QmVI15qgYVllxK0FtxVGG6ywfzaq",
        "object": "text_completion",
        "created": 1686617332,
        "model": "gpt-3.5-turbo-instruct",
        "choices": [
            {
                "text": "\n\nThis is indeed a test",
                "index": 0,
                "logprobs": null,
                "finish_reason": "length"
            }
        ],
        "usage": {
            "prompt_tokens": 5,
            "completion_tokens": 7,
            "total_tokens": 12
        }
    }))
}

pub fn error_response(status: u16, messages: &[&str]) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_json(serde_json::json!({ "error": messages }))
}
