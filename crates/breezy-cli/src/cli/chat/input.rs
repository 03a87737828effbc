//! Async line input for the chat loop.
//!
//! [`LineSource`] is what the loop reads from; [`ChatInput`] implements it
//! over `rustyline_async::Readline`, handling EOF (Ctrl+D) and interrupt
//! (Ctrl+C).

use std::future::Future;

use rustyline_async::{Readline, ReadlineError, ReadlineEvent, SharedWriter};

/// Events produced by the input handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// User submitted a line (trimmed).
    Message(String),
    /// End of file (Ctrl+D).
    Eof,
    /// Interrupt signal (Ctrl+C).
    Interrupted,
}

/// Source of input lines for the chat loop.
pub trait LineSource {
    /// Wait for the next input event.
    fn read_line(&mut self) -> impl Future<Output = InputEvent>;

    /// Clear the terminal screen.
    fn clear_screen(&mut self);
}

/// Async input handler wrapping rustyline_async.
pub struct ChatInput {
    rl: Readline,
}

impl ChatInput {
    /// Create a new chat input handler with the given prompt.
    ///
    /// Returns the input handler and a `SharedWriter` that prints output
    /// without interfering with the readline prompt.
    pub fn new(prompt: String) -> Result<(Self, SharedWriter), ReadlineError> {
        let (rl, stdout) = Readline::new(prompt)?;
        Ok((Self { rl }, stdout))
    }

    /// Flush pending output and restore the terminal.
    pub fn flush(&mut self) {
        if let Err(err) = self.rl.flush() {
            tracing::debug!(error = %err, "Failed to flush pending chat output");
        }
    }
}

impl LineSource for ChatInput {
    async fn read_line(&mut self) -> InputEvent {
        match self.rl.readline().await {
            Ok(ReadlineEvent::Line(line)) => InputEvent::Message(line.trim().to_string()),
            Ok(ReadlineEvent::Eof) => InputEvent::Eof,
            Ok(ReadlineEvent::Interrupted) => InputEvent::Interrupted,
            Err(err) => {
                tracing::debug!(error = %err, "Readline failed, treating as end of input");
                InputEvent::Eof
            }
        }
    }

    fn clear_screen(&mut self) {
        let _ = self.rl.clear();
    }
}
