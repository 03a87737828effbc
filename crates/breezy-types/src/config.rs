//! Client configuration types for Breezy.
//!
//! `ClientConfig` represents the optional `config.toml` that selects the
//! model server, the model and a few presentation settings.

use serde::{Deserialize, Serialize};

use crate::llm::ProviderType;

/// Default model server address (local Ollama).
pub const DEFAULT_HOST: &str = "http://127.0.0.1:11434";

/// Default model identifier.
pub const DEFAULT_MODEL: &str = "qwen2.5:1.5b";

/// Top-level configuration for the chat client.
///
/// Loaded from `~/.breezy/config.toml`. All fields have defaults, so an
/// empty file is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the model server.
    #[serde(default = "default_host")]
    pub host: String,

    /// Model identifier sent with every request.
    #[serde(default = "default_model")]
    pub model: String,

    /// Wire protocol spoken by the model server.
    #[serde(default)]
    pub provider: ProviderType,

    /// Simulated latency before an offline reply is printed.
    #[serde(default = "default_offline_delay_ms")]
    pub offline_delay_ms: u64,

    /// Per-request timeout; `None` leaves it to the HTTP client.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    /// Render live replies as terminal markdown.
    #[serde(default = "default_markdown")]
    pub markdown: bool,
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_offline_delay_ms() -> u64 {
    1000
}

fn default_markdown() -> bool {
    true
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            model: default_model(),
            provider: ProviderType::default(),
            offline_delay_ms: default_offline_delay_ms(),
            request_timeout_secs: None,
            markdown: default_markdown(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_config_default_values() {
        let config = ClientConfig::default();
        assert_eq!(config.host, "http://127.0.0.1:11434");
        assert_eq!(config.model, "qwen2.5:1.5b");
        assert_eq!(config.provider, ProviderType::Ollama);
        assert_eq!(config.offline_delay_ms, 1000);
        assert!(config.request_timeout_secs.is_none());
        assert!(config.markdown);
    }

    #[test]
    fn test_client_config_deserialize_with_defaults() {
        let config: ClientConfig = toml::from_str("").unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_client_config_deserialize_with_values() {
        let toml_str = r#"
host = "http://gpu-box:11434"
model = "llama3.2:3b"
provider = "openai_compatible"
offline_delay_ms = 250
request_timeout_secs = 60
markdown = false
"#;
        let config: ClientConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.host, "http://gpu-box:11434");
        assert_eq!(config.model, "llama3.2:3b");
        assert_eq!(config.provider, ProviderType::OpenAiCompatible);
        assert_eq!(config.offline_delay_ms, 250);
        assert_eq!(config.request_timeout_secs, Some(60));
        assert!(!config.markdown);
    }

    #[test]
    fn test_client_config_rejects_unknown_provider() {
        let result = toml::from_str::<ClientConfig>(r#"provider = "bedrock""#);
        assert!(result.is_err());
    }
}
