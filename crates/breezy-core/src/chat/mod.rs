//! Chat session logic independent of the terminal.
//!
//! `SessionState` tracks consecutive transport failures and the one-way
//! switch to offline mode, `FallbackResponder` produces canned replies, and
//! `Conversation` routes each prompt to one or the other.

pub mod conversation;
pub mod fallback;
pub mod session;
