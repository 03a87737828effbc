//! Infrastructure layer for Breezy.
//!
//! Contains the implementations of the `LlmProvider` port defined in
//! `breezy-core` (native Ollama and OpenAI-compatible servers) and the
//! loader for the optional `config.toml`.

pub mod config;
pub mod llm;
