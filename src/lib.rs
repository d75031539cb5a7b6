//! # openai-completions
//!
//! Thin client binding for the OpenAI text completions API.
//!
//! ## Key Features
//!
//! - **Authenticated dispatch**: bearer token injected into every request
//! - **API error capture**: error strings returned by the API replace the
//!   transport error message, joined by newlines
//! - **Call accounting**: per-service request counter with reset
//! - **Pluggable transport**: any [`HttpTransport`] can stand in for the
//!   default reqwest client
//!
//! ## Example
//!
//! ```rust,no_run
//! use openai_completions::{CompletionsConfig, Service, ServiceConfig};
//!
//! # async fn example() -> Result<(), openai_completions::LlmError> {
//! let service = Service::new(&ServiceConfig::new("your-api-key"))?;
//!
//! let response = service
//!     .completions(&CompletionsConfig {
//!         model: "gpt-3.5-turbo-instruct".to_string(),
//!         prompt: "Say this is a test".to_string(),
//!         temperature: 0.0,
//!         max_tokens: 16,
//!     })
//!     .await?;
//!
//! println!("{}", response.first_text().unwrap_or_default());
//! println!("calls so far: {}", service.api_call_count());
//! # Ok(())
//! # }
//! ```

#![allow(clippy::missing_errors_doc)]

pub(crate) mod logging;

pub mod completions;
pub mod config;
pub mod error;
pub mod service;
pub mod transport;

#[cfg(test)]
pub mod tests;

pub use completions::{CompletionChoice, CompletionUsage, CompletionsConfig, CompletionsResponse};
pub use config::{ServiceConfig, TransportConfig};
pub use error::{enrich, ErrorCategory, ErrorResponse, LlmError, LlmResult};
pub use service::{Service, API_NAME, API_URL};
pub use transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
