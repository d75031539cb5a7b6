//! Basic completion example demonstrating a single request/response.
//!
//! This example shows how to:
//! - Create a service from an API key
//! - Send a completion request
//! - Inspect the generated choices, token usage and call count
//!
//! # Running
//!
//! ```bash
//! export OPENAI_API_KEY="sk-..."
//! cargo run --example basic_completion
//! ```

use openai_completions::{CompletionsConfig, Service, ServiceConfig, TransportConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let api_key =
        std::env::var("OPENAI_API_KEY").expect("OPENAI_API_KEY environment variable must be set");

    let config =
        ServiceConfig::new(api_key).with_transport(TransportConfig::default().with_timeout(60));
    let service = Service::new(&config)?;

    let request = CompletionsConfig {
        model: "gpt-3.5-turbo-instruct".to_string(),
        prompt: "Write a one-line haiku about the sea.".to_string(),
        temperature: 0.7,
        max_tokens: 32,
    };

    println!("Sending request to {}...", service.api_name());

    match service.completions(&request).await {
        Ok(response) => {
            for choice in &response.choices {
                println!(
                    "\n[{}] {} (finish_reason: {})",
                    choice.index,
                    choice.text.trim(),
                    choice.finish_reason
                );
            }
            println!(
                "\nToken usage: {} prompt + {} completion = {} total",
                response.usage.prompt_tokens,
                response.usage.completion_tokens,
                response.usage.total_tokens
            );
        }
        Err(e) => {
            // API-supplied messages arrive one per line
            eprintln!("Completion failed:\n{}", e.message());
        }
    }

    println!("API calls made: {}", service.api_call_count());
    Ok(())
}
