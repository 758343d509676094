//! Sparse progress logging.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Logs the first step, every `every`th step and the last step.
///
/// Safe to tick from several threads; under parallel use the reported
/// counts are approximate in order but never skipped.
#[derive(Debug)]
pub struct Progress {
    label: &'static str,
    total: usize,
    every: usize,
    done: AtomicUsize,
}

impl Progress {
    pub fn new(label: &'static str, total: usize, every: usize) -> Self {
        Self {
            label,
            total,
            every: every.max(1),
            done: AtomicUsize::new(0),
        }
    }

    /// Record one finished step. Returns the step number.
    pub fn tick(&self) -> usize {
        let n = self.done.fetch_add(1, Ordering::Relaxed) + 1;
        if self.should_log(n) {
            tracing::info!("{}: {} / {}", self.label, n, self.total);
        }
        n
    }

    pub fn done(&self) -> usize {
        self.done.load(Ordering::Relaxed)
    }

    fn should_log(&self, n: usize) -> bool {
        n == 1 || n % self.every == 0 || n == self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_points() {
        let progress = Progress::new("Blended block", 400, 180);
        let logged: Vec<usize> = (1..=400).filter(|&n| progress.should_log(n)).collect();
        assert_eq!(logged, vec![1, 180, 360, 400]);
    }

    #[test]
    fn test_tick_counts() {
        let progress = Progress::new("Step", 3, 10);
        progress.tick();
        progress.tick();
        assert_eq!(progress.tick(), 3);
        assert_eq!(progress.done(), 3);
    }
}
