//! Configuration for OpenAI-compatible model servers.
//!
//! Local servers (Ollama's `/v1` endpoint, llama.cpp, vLLM, LM Studio)
//! accept any API key, so one is only sent when the caller supplies it.

use secrecy::SecretString;

use breezy_observe::genai_attrs;

/// Placeholder key for servers that ignore authentication.
pub const LOCAL_API_KEY: &str = "ollama";

/// Configuration for an OpenAI-compatible provider.
///
/// Used to construct an [`super::OpenAiCompatibleProvider`].
pub struct OpenAiCompatConfig {
    /// Human-readable provider name.
    pub provider_name: String,
    /// Base URL including the `/v1` prefix.
    pub base_url: String,
    /// API key for authentication.
    pub api_key: SecretString,
    /// Model identifier (e.g., "qwen2.5:1.5b").
    pub model: String,
}

/// Defaults for a server running at `host`.
///
/// Appends `/v1` to the host unless it is already there.
pub fn local_defaults(host: &str, model: &str, api_key: Option<&str>) -> OpenAiCompatConfig {
    OpenAiCompatConfig {
        provider_name: genai_attrs::PROVIDER_OPENAI_COMPATIBLE.into(),
        base_url: api_base(host),
        api_key: SecretString::from(api_key.unwrap_or(LOCAL_API_KEY).to_string()),
        model: model.into(),
    }
}

/// Normalize a host into an OpenAI API base URL.
pub fn api_base(host: &str) -> String {
    let trimmed = host.trim_end_matches('/');
    if trimmed.ends_with("/v1") {
        trimmed.to_string()
    } else {
        format!("{trimmed}/v1")
    }
}

#[cfg(test)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    #[test]
    fn test_local_defaults() {
        let config = local_defaults("http://127.0.0.1:11434", "qwen2.5:1.5b", None);
        assert_eq!(config.provider_name, "openai_compatible");
        assert_eq!(config.base_url, "http://127.0.0.1:11434/v1");
        assert_eq!(config.api_key.expose_secret(), "ollama");
        assert_eq!(config.model, "qwen2.5:1.5b");
    }

    #[test]
    fn test_local_defaults_with_key() {
        let config = local_defaults("http://gpu-box:8000", "m", Some("sk-local"));
        assert_eq!(config.api_key.expose_secret(), "sk-local");
    }

    #[test]
    fn test_api_base_normalization() {
        assert_eq!(api_base("http://localhost:11434"), "http://localhost:11434/v1");
        assert_eq!(api_base("http://localhost:11434/"), "http://localhost:11434/v1");
        assert_eq!(api_base("http://localhost:8080/v1"), "http://localhost:8080/v1");
        assert_eq!(api_base("http://localhost:8080/v1/"), "http://localhost:8080/v1");
    }
}
