//! Terminal progress for generation batches using indicatif

use crate::pipeline::{Progress, ProgressObserver};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

/// Percentage bar driven by pipeline progress updates
pub struct ProgressDisplay {
    pb: ProgressBar,
}

impl ProgressDisplay {
    /// Bar on stderr; indicatif draws nothing when stderr is not a terminal.
    pub fn new(message: &str) -> Self {
        let pb = ProgressBar::with_draw_target(Some(100), ProgressDrawTarget::stderr());
        pb.set_style(
            ProgressStyle::with_template("{spinner:.green} {msg} [{bar:30.cyan/blue}] {pos:>3}% ({elapsed})")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(120));
        Self { pb }
    }

    pub fn hidden() -> Self {
        Self {
            pb: ProgressBar::hidden(),
        }
    }

    pub fn position(&self) -> u64 {
        self.pb.position()
    }

    pub fn finish_with_message(&self, message: &str) {
        self.pb.finish_with_message(message.to_string());
    }

    pub fn finish_and_clear(&self) {
        self.pb.finish_and_clear();
    }

    pub fn abandon_with_message(&self, message: &str) {
        self.pb.abandon_with_message(message.to_string());
    }
}

impl ProgressObserver for ProgressDisplay {
    fn on_progress(&self, progress: Progress) {
        self.pb
            .set_message(format!("{}/{} prompts", progress.completed, progress.total));
        self.pb.set_position(u64::from(progress.percent()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_tracks_percent() {
        let display = ProgressDisplay::hidden();
        display.on_progress(Progress {
            completed: 1,
            total: 3,
        });
        assert_eq!(display.position(), 33);
        display.on_progress(Progress {
            completed: 3,
            total: 3,
        });
        assert_eq!(display.position(), 100);
    }
}
