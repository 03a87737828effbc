//! LLM provider implementations.
//!
//! Contains concrete implementations of the [`LlmProvider`] trait defined in
//! `breezy-core`: the native Ollama API and any OpenAI-compatible server.
//!
//! Also provides a provider factory ([`create_provider`]) that constructs
//! the right provider from a [`ClientConfig`], and a connection test
//! ([`test_provider_connection`]) used by `breezy check`.
//!
//! [`LlmProvider`]: breezy_core::llm::provider::LlmProvider

pub mod ollama;
pub mod openai_compat;

#[cfg(test)]
mod test_support;

use std::time::Duration;

use breezy_core::llm::box_provider::BoxLlmProvider;
use breezy_types::config::ClientConfig;
use breezy_types::llm::{ChatRequest, LlmError, ProviderType};

use self::ollama::OllamaProvider;
use self::openai_compat::OpenAiCompatibleProvider;

/// Create a [`BoxLlmProvider`] from a [`ClientConfig`].
///
/// `api_key` is only used by OpenAI-compatible servers; local servers
/// accept the placeholder key when it is `None`.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be constructed.
pub fn create_provider(
    config: &ClientConfig,
    api_key: Option<&str>,
) -> Result<BoxLlmProvider, LlmError> {
    match config.provider {
        ProviderType::Ollama => {
            let timeout = config.request_timeout_secs.map(Duration::from_secs);
            let provider = OllamaProvider::new(&config.host, &config.model, timeout)?;
            Ok(BoxLlmProvider::new(provider))
        }
        ProviderType::OpenAiCompatible => {
            if config.request_timeout_secs.is_some() {
                tracing::debug!("request_timeout_secs is ignored by the openai_compatible provider");
            }
            let provider = OpenAiCompatibleProvider::local(&config.host, &config.model, api_key);
            Ok(BoxLlmProvider::new(provider))
        }
    }
}

/// Test provider connectivity by sending a minimal completion request.
///
/// # Errors
///
/// Returns the LLM error if the provider fails to respond.
pub async fn test_provider_connection(provider: &BoxLlmProvider) -> Result<(), LlmError> {
    let mut request = ChatRequest::single_turn(provider.model(), "Hello");
    request.temperature = Some(0.0);
    provider.complete(&request).await?;
    Ok(())
}
