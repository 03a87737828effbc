//! Shared domain types for Breezy.
//!
//! This crate contains the types passed between the chat loop, the
//! conversation controller and the model server providers: chat messages,
//! prompts, session modes, client configuration and the error type.
//!
//! Zero infrastructure dependencies -- only serde and thiserror.

pub mod chat;
pub mod config;
pub mod llm;
