//! Celebrated streak lengths.

use serde::{Deserialize, Serialize};

/// Default celebrated streak lengths, in days.
pub const DEFAULT_MILESTONES: [u32; 4] = [3, 7, 21, 40];

/// Ordered set of streak lengths that trigger a celebration.
///
/// Milestone detection is exact membership: reaching day 8 after the 7-day
/// milestone does not re-trigger until day 21. The schedule is configuration
/// (see [`Config`](crate::storage::Config)), not a hard-coded constant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MilestoneSchedule {
    thresholds: Vec<u32>,
}

impl Default for MilestoneSchedule {
    fn default() -> Self {
        Self::new(DEFAULT_MILESTONES.to_vec())
    }
}

impl MilestoneSchedule {
    /// Build a schedule from threshold days. Duplicates collapse and the
    /// order of the input does not matter; zero is never a milestone.
    pub fn new(mut thresholds: Vec<u32>) -> Self {
        thresholds.retain(|&t| t > 0);
        thresholds.sort_unstable();
        thresholds.dedup();
        Self { thresholds }
    }

    /// Whether this exact streak length is celebrated.
    pub fn is_milestone(&self, streak: u32) -> bool {
        self.thresholds.binary_search(&streak).is_ok()
    }

    /// The next milestone strictly above the given streak, if any.
    pub fn next_after(&self, streak: u32) -> Option<u32> {
        self.thresholds.iter().copied().find(|&t| t > streak)
    }

    /// The thresholds in ascending order.
    pub fn thresholds(&self) -> &[u32] {
        &self.thresholds
    }
}
