//! Escalating hint tiers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How direct a hint is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HintLevel {
    /// Points at an unexplored area.
    Subtle,
    /// Names the kind of evidence that matters.
    Moderate,
    /// Narrows the field without naming the culprit.
    Explicit,
}

impl HintLevel {
    /// The next tier, saturating at `Explicit`.
    pub fn next(self) -> Self {
        match self {
            Self::Subtle => Self::Moderate,
            Self::Moderate | Self::Explicit => Self::Explicit,
        }
    }
}

impl fmt::Display for HintLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Subtle => write!(f, "subtle"),
            Self::Moderate => write!(f, "moderate"),
            Self::Explicit => write!(f, "explicit"),
        }
    }
}

/// Tracks which hint tier comes next.
///
/// Never moves backward. Not reset when a new case starts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HintLadder {
    last: Option<HintLevel>,
}

impl HintLadder {
    /// Create a ladder that will give a subtle hint first.
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recent tier given, if any.
    pub fn last(&self) -> Option<HintLevel> {
        self.last
    }

    /// Advance and return the tier for this request.
    pub fn escalate(&mut self) -> HintLevel {
        let level = self.last.map_or(HintLevel::Subtle, HintLevel::next);
        self.last = Some(level);
        level
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escalation_order() {
        let mut ladder = HintLadder::new();
        assert_eq!(ladder.last(), None);
        assert_eq!(ladder.escalate(), HintLevel::Subtle);
        assert_eq!(ladder.escalate(), HintLevel::Moderate);
        assert_eq!(ladder.escalate(), HintLevel::Explicit);
        assert_eq!(ladder.escalate(), HintLevel::Explicit);
        assert_eq!(ladder.last(), Some(HintLevel::Explicit));
    }

    #[test]
    fn levels_are_ordered() {
        assert!(HintLevel::Subtle < HintLevel::Moderate);
        assert!(HintLevel::Moderate < HintLevel::Explicit);
    }
}
