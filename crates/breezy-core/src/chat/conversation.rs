//! Conversation controller.
//!
//! Routes each prompt either to the model server or to the offline
//! responder, and folds the outcome into the session state. The work is
//! split in two steps so the caller can tear down its busy indicator after
//! the call settles and before any state changes:
//!
//! 1. [`Conversation::attempt`] performs the call (or the simulated delay)
//! 2. [`Conversation::settle`] applies the outcome and reports a [`Turn`]

use std::time::Duration;

use tracing::{Instrument, debug, info, info_span};

use breezy_observe::genai_attrs;
use breezy_types::chat::{Mode, Prompt, ReplyKind};
use breezy_types::llm::{ChatRequest, ChatResponse, LlmError};

use crate::llm::provider::LlmProvider;

use super::fallback::{FallbackResponder, RandomSource};
use super::session::{FailureOutcome, SessionState};

/// Default simulated latency for offline replies.
pub const DEFAULT_OFFLINE_DELAY: Duration = Duration::from_millis(1000);

/// Outcome of the call step, before it is applied to the session.
#[derive(Debug)]
pub enum Attempt {
    /// The model server was asked.
    Live(Result<ChatResponse, LlmError>),
    /// A canned reply was produced.
    Offline(String),
}

/// What the chat loop should print for one prompt.
#[derive(Debug)]
pub enum Turn {
    Reply {
        kind: ReplyKind,
        text: String,
    },
    Failed {
        error: LlmError,
        consecutive_failures: u32,
        /// True only on the failure that switched the session offline.
        went_offline: bool,
    },
}

/// Owns the provider, the offline responder and the session state.
pub struct Conversation<P, R> {
    provider: P,
    fallback: FallbackResponder<R>,
    session: SessionState,
    offline_delay: Duration,
}

impl<P: LlmProvider, R: RandomSource> Conversation<P, R> {
    /// Start an online conversation with the default offline delay.
    pub fn new(provider: P, fallback: FallbackResponder<R>) -> Self {
        Self {
            provider,
            fallback,
            session: SessionState::new(),
            offline_delay: DEFAULT_OFFLINE_DELAY,
        }
    }

    /// Override the simulated latency of offline replies.
    pub fn with_offline_delay(mut self, delay: Duration) -> Self {
        self.offline_delay = delay;
        self
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn mode(&self) -> Mode {
        self.session.mode()
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Model identifier sent with every request.
    pub fn model(&self) -> &str {
        self.provider.model()
    }

    /// Produce a reply for `prompt` without touching the session state.
    ///
    /// Online, this is exactly one request to the provider carrying the
    /// prompt as the only message. Offline, the provider is never called:
    /// after the configured delay a canned reply is chosen.
    pub async fn attempt(&mut self, prompt: &Prompt) -> Attempt {
        match self.session.mode() {
            Mode::Offline => {
                let span = info_span!(
                    "gen_ai.offline",
                    gen_ai.operation.name = genai_attrs::OP_OFFLINE_REPLY,
                    gen_ai.request.model = %self.provider.model(),
                );
                async {
                    tokio::time::sleep(self.offline_delay).await;
                }
                .instrument(span)
                .await;
                Attempt::Offline(self.fallback.respond(prompt))
            }
            Mode::Online => {
                let request = ChatRequest::single_turn(self.provider.model(), prompt.as_str());

                let span = info_span!(
                    "gen_ai.chat",
                    gen_ai.operation.name = genai_attrs::OP_CHAT,
                    gen_ai.provider.name = self.provider.name(),
                    gen_ai.request.model = %request.model,
                    gen_ai.request.stream = false,
                );

                debug!(chars = prompt.as_str().len(), "Sending prompt to model server");
                Attempt::Live(self.provider.complete(&request).instrument(span).await)
            }
        }
    }

    /// Apply an attempt's outcome to the session state.
    pub fn settle(&mut self, attempt: Attempt) -> Turn {
        match attempt {
            Attempt::Offline(text) => Turn::Reply {
                kind: ReplyKind::Offline,
                text,
            },
            Attempt::Live(Ok(response)) => {
                self.session.record_success();
                debug!(
                    gen_ai.usage.output_tokens = response.output_tokens,
                    gen_ai.response.finish_reasons = ?response.done_reason,
                    model = %response.model,
                    "Model server replied"
                );
                Turn::Reply {
                    kind: ReplyKind::Live,
                    text: response.content,
                }
            }
            Attempt::Live(Err(error)) => {
                let outcome = self.session.record_failure();
                let consecutive_failures = self.session.consecutive_failures();
                info!(error = %error, consecutive_failures, "Model server request failed");

                let went_offline = outcome == FailureOutcome::WentOffline;
                if went_offline {
                    info!(
                        consecutive_failures,
                        "Switching to offline mode after repeated failures"
                    );
                }

                Turn::Failed {
                    error,
                    consecutive_failures,
                    went_offline,
                }
            }
        }
    }

    /// Convenience for callers without a busy indicator: attempt then settle.
    pub async fn respond(&mut self, prompt: &Prompt) -> Turn {
        let attempt = self.attempt(prompt).await;
        self.settle(attempt)
    }
}
