//! Completion progress derived from question leaves.

use serde::{Deserialize, Serialize};
use std::iter::Sum;
use std::ops::Add;

/// Completed/total leaf counts for one subtree.
///
/// Values add up: the progress of a parent equals the sum of its children.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    /// Number of completed questions.
    pub completed: usize,
    /// Number of questions.
    pub total: usize,
}

impl Progress {
    /// Creates progress from raw counts.
    pub fn new(completed: usize, total: usize) -> Self {
        Self { completed, total }
    }

    /// Progress contributed by one question.
    pub fn leaf(completed: bool) -> Self {
        Self {
            completed: usize::from(completed),
            total: 1,
        }
    }

    /// Completion ratio in `0.0..=1.0`; an empty subtree is `0.0`.
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.completed as f64 / self.total as f64
    }

    /// Rounded completion percentage in `0..=100`.
    pub fn percent(&self) -> u32 {
        (self.ratio() * 100.0).round() as u32
    }

    /// Whether every question is completed. Empty subtrees are not complete.
    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.completed == self.total
    }

    /// Number of questions not yet completed; never underflows.
    pub fn remaining(&self) -> usize {
        self.total.saturating_sub(self.completed)
    }
}

impl Add for Progress {
    type Output = Progress;

    fn add(self, rhs: Progress) -> Progress {
        Progress {
            completed: self.completed + rhs.completed,
            total: self.total + rhs.total,
        }
    }
}

impl Sum for Progress {
    fn sum<I: Iterator<Item = Progress>>(iter: I) -> Progress {
        iter.fold(Progress::default(), Add::add)
    }
}

#[cfg(test)]
mod tests {
    use super::Progress;

    #[test]
    fn empty_progress_has_zero_ratio() {
        let progress = Progress::default();
        assert_eq!(progress.ratio(), 0.0);
        assert_eq!(progress.percent(), 0);
        assert!(!progress.is_complete());
    }

    #[test]
    fn percent_rounds_to_nearest() {
        assert_eq!(Progress::new(1, 3).percent(), 33);
        assert_eq!(Progress::new(2, 3).percent(), 67);
        assert_eq!(Progress::new(3, 3).percent(), 100);
    }

    #[test]
    fn sum_adds_both_counts() {
        let total: Progress = [Progress::leaf(true), Progress::leaf(false), Progress::new(2, 5)]
            .into_iter()
            .sum();
        assert_eq!(total, Progress::new(3, 7));
        assert_eq!(total.remaining(), 4);
    }

    #[test]
    fn remaining_saturates_for_inconsistent_counts() {
        let progress: Progress =
            serde_json::from_str(r#"{"completed":3,"total":1}"#).unwrap();
        assert_eq!(progress.remaining(), 0);
    }
}
