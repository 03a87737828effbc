//! Chat domain types: prompts, session modes and reply kinds.

use std::fmt;

/// A single line of user text bound for the model.
///
/// Always trimmed and never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt(String);

impl Prompt {
    /// Build a prompt from a raw input line.
    ///
    /// Returns `None` for empty or whitespace-only input.
    pub fn new(line: &str) -> Option<Self> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whether prompts go to the model server or to the canned responder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Online,
    /// Terminal for the rest of the process.
    Offline,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Online => write!(f, "online"),
            Mode::Offline => write!(f, "offline"),
        }
    }
}

/// Where a printed reply came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyKind {
    /// Generated by the model server.
    Live,
    /// Picked from the canned offline templates.
    Offline,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_trims_input() {
        let prompt = Prompt::new("  qual é a capital?\n").unwrap();
        assert_eq!(prompt.as_str(), "qual é a capital?");
        assert_eq!(prompt.to_string(), "qual é a capital?");
    }

    #[test]
    fn test_prompt_rejects_blank_input() {
        assert!(Prompt::new("").is_none());
        assert!(Prompt::new("   ").is_none());
        assert!(Prompt::new("\t\n").is_none());
    }

    #[test]
    fn test_mode_default_is_online() {
        assert_eq!(Mode::default(), Mode::Online);
        assert_eq!(Mode::Offline.to_string(), "offline");
    }
}
