//! Text completions endpoint (`POST /completions`)

use crate::error::LlmResult;
use crate::logging::log_debug;
use crate::service::{RequestConfig, Service};
use reqwest::Method;
use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Request body for a text completion.
///
/// Values are sent as given; validation is left to the API. Only a
/// temperature JSON cannot represent is refused, before any request is made.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionsConfig {
    pub model: String,
    pub prompt: String,
    /// Must be finite; NaN and infinities fail serialization instead of
    /// going out as `null`.
    #[serde(serialize_with = "serialize_finite")]
    pub temperature: f64,
    pub max_tokens: u32,
}

/// Completion response as returned by the API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompletionsResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub object: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub created: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub model: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub choices: Vec<CompletionChoice>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub usage: CompletionUsage,
}

impl CompletionsResponse {
    /// Text of the first choice, if any.
    pub fn first_text(&self) -> Option<&str> {
        self.choices.first().map(|choice| choice.text.as_str())
    }
}

/// One generated alternative.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompletionChoice {
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub index: u32,
    /// Passed through untouched.
    #[serde(default)]
    pub logprobs: Option<serde_json::Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub finish_reason: String,
}

/// Token accounting for a completion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionUsage {
    #[serde(default, deserialize_with = "null_as_default")]
    pub prompt_tokens: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub completion_tokens: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_tokens: u32,
}

fn serialize_finite<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if !value.is_finite() {
        return Err(S::Error::custom(format!(
            "temperature must be a finite number, got {value}"
        )));
    }
    serializer.serialize_f64(*value)
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Service {
    /// Request a text completion
    ///
    /// # Errors
    ///
    /// Returns the dispatch error unchanged: transport failures, or
    /// [`LlmError::HttpStatus`](crate::LlmError::HttpStatus) whose message
    /// holds the API's error strings when the response carried any.
    pub async fn completions(&self, config: &CompletionsConfig) -> LlmResult<CompletionsResponse> {
        let request_config =
            RequestConfig::new(Method::POST, self.url("completions")).with_body(config);

        let exchange = self.http_request::<_, CompletionsResponse>(request_config).await?;

        log_debug!(
            url = %exchange.request.url,
            status = %exchange.response.status,
            model = %exchange.data.model,
            choice_count = exchange.data.choices.len(),
            total_tokens = exchange.data.usage.total_tokens,
            "Completion received"
        );

        Ok(exchange.data)
    }
}
