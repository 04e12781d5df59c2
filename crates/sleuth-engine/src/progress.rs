//! Investigation progress for the active case.

use serde::{Deserialize, Serialize};

/// Progress toward solving the case, from 0 to 100.
///
/// Only ever increases within a case. Reaches 100 on a correct accusation
/// even when little evidence was gathered.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProgressTracker {
    value: u8,
}

impl ProgressTracker {
    /// Ceiling for progress.
    pub const MAX: u8 = 100;

    /// Start at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current progress.
    pub fn value(&self) -> u8 {
        self.value
    }

    /// Add points, clamped at 100. Returns the points actually gained.
    pub fn add(&mut self, points: u8) -> u8 {
        let before = self.value;
        self.value = self.value.saturating_add(points).min(Self::MAX);
        self.value - before
    }

    /// Jump to 100. Returns the points gained.
    pub fn complete(&mut self) -> u8 {
        let before = self.value;
        self.value = Self::MAX;
        Self::MAX - before
    }

    /// Back to zero for a new case.
    pub fn reset(&mut self) {
        self.value = 0;
    }
}
