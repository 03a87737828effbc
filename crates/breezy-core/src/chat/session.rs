//! Failure tracking for a chat session.
//!
//! A one-way circuit: consecutive transport failures count toward a
//! threshold, a success resets the count, and reaching the threshold opens
//! the circuit for good. There is no half-open probe; once offline, the
//! session stays offline until the process exits.

use breezy_types::chat::Mode;

/// Consecutive failures that switch a session to offline mode.
pub const FAILURE_THRESHOLD: u32 = 3;

/// What a recorded failure did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureOutcome {
    /// No mode change; carries the current consecutive failure count.
    Counted { consecutive_failures: u32 },
    /// This failure reached the threshold and switched the session offline.
    WentOffline,
}

/// Mutable state of one interactive session.
///
/// Owned by the conversation controller and mutated only after an
/// inference attempt has settled.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    consecutive_failures: u32,
    mode: Mode,
}

impl SessionState {
    /// Fresh session: online, no failures.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_offline(&self) -> bool {
        self.mode == Mode::Offline
    }

    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures
    }

    /// Record a successful inference call.
    pub fn record_success(&mut self) {
        self.consecutive_failures = 0;
    }

    /// Record a failed inference call.
    ///
    /// Returns `WentOffline` exactly once per session: on the failure that
    /// reaches [`FAILURE_THRESHOLD`].
    pub fn record_failure(&mut self) -> FailureOutcome {
        self.consecutive_failures = self.consecutive_failures.saturating_add(1);

        if self.mode == Mode::Online && self.consecutive_failures >= FAILURE_THRESHOLD {
            self.mode = Mode::Offline;
            return FailureOutcome::WentOffline;
        }

        FailureOutcome::Counted {
            consecutive_failures: self.consecutive_failures,
        }
    }
}
