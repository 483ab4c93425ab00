use serde::Serialize;

/// Completed generation calls across a whole batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
}

impl Progress {
    /// `floor(100 * completed / total)`, 100 for an empty batch
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 100;
        }
        let completed = self.completed.min(self.total);
        ((completed * 100) / self.total) as u8
    }

    pub fn is_done(&self) -> bool {
        self.completed >= self.total
    }
}

/// Receives progress after each completed generation call
pub trait ProgressObserver: Send + Sync {
    fn on_progress(&self, progress: Progress);
}

impl<F> ProgressObserver for F
where
    F: Fn(Progress) + Send + Sync,
{
    fn on_progress(&self, progress: Progress) {
        self(progress)
    }
}

/// Observer that ignores every update
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn on_progress(&self, _progress: Progress) {}
}

/// Monotonic completed-call counter for one batch
#[derive(Debug)]
pub struct ProgressTracker {
    completed: usize,
    total: usize,
}

impl ProgressTracker {
    pub fn new(total: usize) -> Self {
        Self {
            completed: 0,
            total,
        }
    }

    /// Count one finished call; never exceeds the batch size.
    pub fn record(&mut self) -> Progress {
        if self.completed < self.total {
            self.completed += 1;
        }
        self.snapshot()
    }

    pub fn snapshot(&self) -> Progress {
        Progress {
            completed: self.completed,
            total: self.total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_is_floored_and_reaches_100() {
        let mut tracker = ProgressTracker::new(3);
        let seen: Vec<u8> = (0..3).map(|_| tracker.record().percent()).collect();
        assert_eq!(seen, vec![33, 66, 100]);
        assert!(tracker.snapshot().is_done());
    }

    #[test]
    fn every_step_matches_formula() {
        let total = 7;
        let mut tracker = ProgressTracker::new(total);
        let mut last = 0;
        for k in 1..=total {
            let progress = tracker.record();
            assert_eq!(progress.completed, k);
            assert_eq!(progress.percent() as usize, 100 * k / total);
            assert!(progress.percent() >= last);
            last = progress.percent();
        }
        assert_eq!(tracker.record().percent(), 100);
        assert_eq!(tracker.snapshot().completed, total);
    }
}
