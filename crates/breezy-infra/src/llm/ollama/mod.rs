//! OllamaProvider -- concrete [`LlmProvider`] for the native Ollama API.
//!
//! Sends non-streaming requests to `POST {host}/api/chat` and reads the
//! reply text from `message.content`. Also lists installed models through
//! `GET {host}/api/tags` for the `check` command.

pub mod types;

use std::time::Duration;

use breezy_core::llm::provider::LlmProvider;
use breezy_observe::genai_attrs;
use breezy_types::llm::{ChatRequest, ChatResponse, LlmError};

use self::types::{
    OllamaChatRequest, OllamaChatResponse, OllamaErrorResponse, OllamaMessage, OllamaModelTag,
    OllamaOptions, OllamaTagsResponse,
};

/// Native Ollama provider.
pub struct OllamaProvider {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl OllamaProvider {
    /// Create a provider for the server at `base_url`.
    ///
    /// `timeout` of `None` keeps reqwest's default (no overall timeout).
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, LlmError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| LlmError::Provider {
            message: format!("failed to create HTTP client: {e}"),
        })?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the full API URL for a given path.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Convert a generic [`ChatRequest`] into an [`OllamaChatRequest`].
    fn to_ollama_request(&self, request: &ChatRequest) -> OllamaChatRequest {
        let model = if request.model.is_empty() {
            self.model.clone()
        } else {
            request.model.clone()
        };

        OllamaChatRequest {
            model,
            messages: request
                .messages
                .iter()
                .map(|m| OllamaMessage {
                    role: m.role.to_string(),
                    content: m.content.clone(),
                })
                .collect(),
            stream: false,
            options: request.temperature.map(|t| OllamaOptions {
                temperature: Some(t),
            }),
        }
    }

    /// Map a reqwest transport error.
    fn map_send_error(&self, err: reqwest::Error) -> LlmError {
        if err.is_timeout() {
            LlmError::Timeout(err.to_string())
        } else if err.is_connect() {
            LlmError::Connection {
                url: self.base_url.clone(),
                message: err.to_string(),
            }
        } else {
            LlmError::Provider {
                message: format!("HTTP request failed: {err}"),
            }
        }
    }

    /// List the models installed on the server.
    pub async fn list_models(&self) -> Result<Vec<OllamaModelTag>, LlmError> {
        let response = self
            .client
            .get(self.url("/api/tags"))
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Provider {
                message: format!("HTTP {status}: {body}"),
            });
        }

        let tags: OllamaTagsResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Deserialization(format!("failed to parse model list: {e}")))?;
        Ok(tags.models)
    }
}

/// Whether `installed` satisfies a request for `wanted`.
///
/// A bare name (`llama3`) matches any tag of that model; a tagged name
/// (`qwen2.5:1.5b`) must match exactly, with `:latest` implied for bare
/// installed names.
pub fn model_matches(installed: &str, wanted: &str) -> bool {
    if installed == wanted {
        return true;
    }
    match wanted.split_once(':') {
        Some(_) => {
            installed.strip_suffix(":latest") == Some(wanted)
                || wanted.strip_suffix(":latest") == Some(installed)
        }
        None => installed.split(':').next() == Some(wanted),
    }
}

impl LlmProvider for OllamaProvider {
    fn name(&self) -> &str {
        genai_attrs::PROVIDER_OLLAMA
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, LlmError> {
        let body = self.to_ollama_request(request);
        let url = self.url("/api/chat");

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<OllamaErrorResponse>(&error_body)
                .map(|e| e.error)
                .unwrap_or(error_body);

            return Err(match status.as_u16() {
                404 if message.contains("not found") => LlmError::ModelNotFound(body.model),
                400 => LlmError::InvalidRequest(message),
                _ => LlmError::Provider {
                    message: format!("HTTP {status}: {message}"),
                },
            });
        }

        let ollama_resp: OllamaChatResponse = response.json().await.map_err(|e| {
            LlmError::Deserialization(format!("failed to parse response: {e}"))
        })?;

        Ok(ChatResponse {
            content: ollama_resp.message.content,
            model: ollama_resp.model,
            done_reason: ollama_resp.done_reason,
            output_tokens: ollama_resp.eval_count.unwrap_or(0),
        })
    }
}
