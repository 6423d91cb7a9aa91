//! Inclusive temporal window in seconds since a caller-supplied epoch.

use serde::{Deserialize, Serialize};

/// `[start, end]` in seconds. The epoch itself lives with the caller; when a
/// dataset declares a different epoch, [`rebase`](TemporalWindow::rebase)
/// shifts the window into the dataset's frame.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TemporalWindow {
    start: f64,
    end: f64,
}

impl TemporalWindow {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    #[inline]
    pub fn start(&self) -> f64 {
        self.start
    }

    #[inline]
    pub fn end(&self) -> f64 {
        self.end
    }

    /// Inclusive containment at both ends.
    #[inline]
    pub fn contains(&self, t: f64) -> bool {
        t >= self.start && t <= self.end
    }

    /// Shift the window by the offset between two epochs.
    ///
    /// `delta_seconds` is the dataset epoch minus the window's current
    /// epoch; a window expressed against 1970 being rebased onto a 2018
    /// dataset epoch shifts *down* by the intervening seconds.
    pub fn rebase(&mut self, delta_seconds: f64) {
        self.start -= delta_seconds;
        self.end -= delta_seconds;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn containment_is_inclusive() {
        let w = TemporalWindow::new(100.0, 200.0);
        assert!(w.contains(100.0));
        assert!(w.contains(200.0));
        assert!(w.contains(150.0));
        assert!(!w.contains(99.999));
        assert!(!w.contains(200.001));
    }

    #[test]
    fn rebase_shifts_both_ends() {
        let mut w = TemporalWindow::new(1_000_000.0, 2_000_000.0);
        w.rebase(500_000.0);
        assert_eq!(w.start(), 500_000.0);
        assert_eq!(w.end(), 1_500_000.0);
        // A value that sat inside the old frame at 1.2M now passes at 0.7M.
        assert!(w.contains(700_000.0));
    }
}
