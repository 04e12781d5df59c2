//! Accusation judging.

use serde::{Deserialize, Serialize};

use crate::case::Case;
use crate::suspect::SuspectId;

/// The outcome of an accusation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    /// The accused is the culprit.
    Correct {
        /// How the attack was carried out.
        method: String,
        /// Evidence labels supporting the solution.
        evidence: Vec<String>,
    },
    /// The accused is not the culprit.
    Incorrect,
}

impl Verdict {
    /// Whether the accusation was correct.
    pub fn is_correct(&self) -> bool {
        matches!(self, Self::Correct { .. })
    }
}

/// Rule on an accusation.
///
/// Compares ids, not display names. Pure: updating progress or counters is
/// left to the caller.
pub fn judge(case: &Case, accused: SuspectId) -> Verdict {
    if accused == case.solution.culprit_id {
        Verdict::Correct {
            method: case.solution.method.clone(),
            evidence: case.solution.evidence.clone(),
        }
    } else {
        Verdict::Incorrect
    }
}
