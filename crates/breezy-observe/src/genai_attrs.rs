//! OpenTelemetry GenAI Semantic Convention values.
//!
//! `tracing` needs span field names as literals, so model-call spans spell
//! out the keys themselves:
//!
//! - `gen_ai.operation.name`: one of the `OP_*` values below
//! - `gen_ai.provider.name`: the provider's `name()` (e.g. "ollama")
//! - `gen_ai.request.model`: the model identifier sent
//! - `gen_ai.usage.output_tokens`: tokens generated, when reported
//! - `gen_ai.response.finish_reasons`: the server's finish reason

/// Standard chat completion operation.
pub const OP_CHAT: &str = "chat";

/// Canned reply produced while the session is offline.
pub const OP_OFFLINE_REPLY: &str = "offline_reply";

/// Connectivity probe issued by `breezy check`.
pub const OP_HEALTH_CHECK: &str = "health_check";

/// Provider name reported by the native Ollama provider.
pub const PROVIDER_OLLAMA: &str = "ollama";

/// Provider name reported by the OpenAI-compatible provider.
pub const PROVIDER_OPENAI_COMPATIBLE: &str = "openai_compatible";
