//! LlmProvider trait definition.
//!
//! This is the core abstraction that every model server backend implements.
//! Uses RPITIT for `complete`, so concrete providers can write plain
//! `async fn` in their impls.

use breezy_types::llm::{ChatRequest, ChatResponse, LlmError};

/// Trait for model server backends (native Ollama, OpenAI-compatible).
///
/// Implementations live in breezy-infra (e.g., `OllamaProvider`).
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g., "ollama").
    fn name(&self) -> &str;

    /// Model identifier this provider sends when a request leaves it empty.
    fn model(&self) -> &str;

    /// Send a chat request and receive the full reply.
    ///
    /// Never retries: a single failed round trip is reported as-is.
    fn complete(
        &self,
        request: &ChatRequest,
    ) -> impl std::future::Future<Output = Result<ChatResponse, LlmError>> + Send;
}
