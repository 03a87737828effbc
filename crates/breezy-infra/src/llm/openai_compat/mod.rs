//! OpenAI-compatible LLM provider implementation.
//!
//! Talks to any server exposing `/v1/chat/completions`, including Ollama's
//! compatibility endpoint. Uses [`async_openai`] for type-safe
//! request/response handling.

pub mod config;

use async_openai::Client;
use async_openai::config::OpenAIConfig;
use async_openai::types::chat::{
    ChatCompletionRequestAssistantMessage, ChatCompletionRequestAssistantMessageContent,
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage,
    ChatCompletionRequestSystemMessageContent, ChatCompletionRequestUserMessage,
    ChatCompletionRequestUserMessageContent, CreateChatCompletionRequest, FinishReason,
};
use secrecy::ExposeSecret;

use breezy_core::llm::provider::LlmProvider;
use breezy_types::llm::{ChatRequest, ChatResponse, LlmError, MessageRole};

use self::config::OpenAiCompatConfig;

/// Provider for any OpenAI-compatible chat completions API.
///
/// Does NOT derive Debug: the `async_openai::Client` holds the API key.
pub struct OpenAiCompatibleProvider {
    client: Client<OpenAIConfig>,
    provider_name: String,
    base_url: String,
    model: String,
}

impl OpenAiCompatibleProvider {
    /// Create a new OpenAI-compatible provider from a configuration.
    pub fn new(config: OpenAiCompatConfig) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(config.api_key.expose_secret())
            .with_api_base(&config.base_url);

        Self {
            client: Client::with_config(openai_config),
            provider_name: config.provider_name,
            base_url: config.base_url,
            model: config.model,
        }
    }

    /// Provider for a local server at `host`.
    pub fn local(host: &str, model: &str, api_key: Option<&str>) -> Self {
        Self::new(config::local_defaults(host, model, api_key))
    }

    /// Build a [`CreateChatCompletionRequest`] from a generic [`ChatRequest`].
    fn build_request(&self, request: &ChatRequest) -> CreateChatCompletionRequest {
        let messages: Vec<ChatCompletionRequestMessage> = request
            .messages
            .iter()
            .map(|msg| match msg.role {
                MessageRole::System => {
                    ChatCompletionRequestMessage::System(ChatCompletionRequestSystemMessage {
                        content: ChatCompletionRequestSystemMessageContent::Text(
                            msg.content.clone(),
                        ),
                        name: None,
                    })
                }
                MessageRole::User => {
                    ChatCompletionRequestMessage::User(ChatCompletionRequestUserMessage {
                        content: ChatCompletionRequestUserMessageContent::Text(
                            msg.content.clone(),
                        ),
                        name: None,
                    })
                }
                MessageRole::Assistant => {
                    #[allow(deprecated)]
                    ChatCompletionRequestMessage::Assistant(
                        ChatCompletionRequestAssistantMessage {
                            content: Some(ChatCompletionRequestAssistantMessageContent::Text(
                                msg.content.clone(),
                            )),
                            refusal: None,
                            name: None,
                            audio: None,
                            tool_calls: None,
                            function_call: None,
                        },
                    )
                }
            })
            .collect();

        let model = if request.model.is_empty() {
            self.model.clone()
        } else {
            request.model.clone()
        };

        CreateChatCompletionRequest {
            model,
            messages,
            temperature: request.temperature.map(|t| t as f32),
            ..Default::default()
        }
    }

    /// Map an `async_openai::error::OpenAIError` to an [`LlmError`].
    fn map_openai_error(&self, err: async_openai::error::OpenAIError) -> LlmError {
        use async_openai::error::OpenAIError;

        match &err {
            OpenAIError::ApiError(api_err) => {
                let code = api_err.code.as_deref().unwrap_or("");
                if code == "model_not_found" || api_err.message.contains("not found") {
                    LlmError::ModelNotFound(self.model.clone())
                } else {
                    LlmError::Provider {
                        message: api_err.message.clone(),
                    }
                }
            }
            OpenAIError::Reqwest(reqwest_err) => {
                if reqwest_err.is_timeout() {
                    LlmError::Timeout(reqwest_err.to_string())
                } else if reqwest_err.is_connect() {
                    LlmError::Connection {
                        url: self.base_url.clone(),
                        message: reqwest_err.to_string(),
                    }
                } else {
                    LlmError::Provider {
                        message: err.to_string(),
                    }
                }
            }
            OpenAIError::JSONDeserialize(_, content) => {
                LlmError::Deserialization(format!("failed to parse response: {content}"))
            }
            OpenAIError::InvalidArgument(msg) => LlmError::InvalidRequest(msg.clone()),
            _ => LlmError::Provider {
                message: err.to_string(),
            },
        }
    }
}

impl LlmProvider for OpenAiCompatibleProvider {
    fn name(&self) -> &str {
        &self.provider_name
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, LlmError> {
        let oai_request = self.build_request(request);

        let response = self
            .client
            .chat()
            .create(oai_request)
            .await
            .map_err(|e| self.map_openai_error(e))?;

        let choice = response.choices.first().ok_or_else(|| {
            LlmError::Deserialization("response contained no choices".to_string())
        })?;

        let done_reason = choice.finish_reason.as_ref().map(|fr| {
            match fr {
                FinishReason::Stop => "stop",
                FinishReason::Length => "length",
                FinishReason::ToolCalls => "tool_calls",
                FinishReason::ContentFilter => "content_filter",
                FinishReason::FunctionCall => "function_call",
            }
            .to_string()
        });

        Ok(ChatResponse {
            content: choice.message.content.clone().unwrap_or_default(),
            model: response.model.clone(),
            done_reason,
            output_tokens: response
                .usage
                .as_ref()
                .map(|u| u.completion_tokens)
                .unwrap_or(0),
        })
    }
}
