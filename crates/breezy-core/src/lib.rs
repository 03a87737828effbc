//! Conversation control and provider abstractions for Breezy.
//!
//! This crate defines the `LlmProvider` port that the infrastructure layer
//! implements, plus the pieces of the chat session that do not touch a
//! terminal: session state, the offline responder and the conversation
//! controller. It depends on `breezy-types` and the span conventions in
//! `breezy-observe` -- never on `breezy-infra` or any HTTP crate.

pub mod chat;
pub mod llm;
