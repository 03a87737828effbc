//! CLI command definitions for the `breezy` binary.
//!
//! Uses clap derive macros for argument parsing. Running `breezy` with no
//! subcommand starts a chat session.

pub mod chat;
pub mod check;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

use breezy_types::config::ClientConfig;
use breezy_types::llm::ProviderType;

/// Chat with a local language model from the terminal.
#[derive(Parser, Debug)]
#[command(name = "breezy", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text (check only).
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all log output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed logging (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export tracing spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    /// Config file to read instead of ~/.breezy/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Model server base URL.
    #[arg(long, global = true, env = "OLLAMA_HOST")]
    pub host: Option<String>,

    /// Model identifier sent with every prompt.
    #[arg(long, global = true, env = "BREEZY_MODEL")]
    pub model: Option<String>,

    /// Wire protocol of the model server (ollama, openai_compatible).
    #[arg(long, global = true)]
    pub provider: Option<ProviderType>,

    /// API key for OpenAI-compatible servers that require one.
    #[arg(long, global = true, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Print replies as plain text instead of rendered markdown.
    #[arg(long, global = true)]
    pub plain: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start an interactive chat session (the default).
    Chat,

    /// Check that the model server is reachable and the model is installed.
    Check,

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

impl Cli {
    /// Level directives for the log filter.
    pub fn log_directives(&self) -> &'static str {
        match self.verbose {
            0 if self.quiet => "error",
            0 => "warn",
            1 => "info,breezy=debug",
            _ => "trace",
        }
    }

    /// Layer command-line and environment settings over the file config.
    pub fn apply_overrides(&self, config: &mut ClientConfig) {
        if let Some(host) = &self.host {
            config.host = host_url(host);
        }
        if let Some(model) = &self.model {
            config.model = model.clone();
        }
        if let Some(provider) = self.provider {
            config.provider = provider;
        }
        if self.plain {
            config.markdown = false;
        }
    }
}

/// Accept `OLLAMA_HOST`-style values that omit the scheme (`0.0.0.0:11434`).
fn host_url(host: &str) -> String {
    if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("http://{host}")
    }
}
