//! Busy indicator shown while a prompt is being answered.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Spinner frames; the last entry is the finished state.
const TICKS: &[&str] = &["|", "/", "-", "\\", " "];

const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// A `Processando` spinner on stderr, cleared by [`BusyIndicator::finish`].
pub struct BusyIndicator {
    bar: ProgressBar,
}

impl BusyIndicator {
    /// Start ticking immediately.
    pub fn start() -> Self {
        let bar = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{msg:.yellow} {spinner:.yellow}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(TICKS);
        bar.set_style(style);
        bar.set_message("Processando");
        bar.enable_steady_tick(TICK_INTERVAL);
        Self { bar }
    }

    /// An indicator that never draws.
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    /// Stop ticking and erase the line.
    pub fn finish(self) {
        self.bar.finish_and_clear();
    }
}
