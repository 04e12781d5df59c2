//! The case aggregate: one generated mystery with its hidden solution.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::artifact::{ChatMessage, Email, FileMetadata, LogEntry};
use crate::suspect::{Suspect, SuspectId};

/// Unique identifier for a case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CaseId(pub Uuid);

impl fmt::Display for CaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CASE-{}", &self.0.simple().to_string()[..8].to_uppercase())
    }
}

/// Incident severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    /// Minor incident.
    Low,
    /// Moderate incident.
    Medium,
    /// Serious incident.
    High,
    /// Business-threatening incident.
    Critical,
}

impl Severity {
    /// All severities, lowest first.
    pub const ALL: &'static [Self] = &[Self::Low, Self::Medium, Self::High, Self::Critical];
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "LOW"),
            Self::Medium => write!(f, "MEDIUM"),
            Self::High => write!(f, "HIGH"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Inclusive time span that every log and chat timestamp falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    /// Earliest possible timestamp.
    pub start: DateTime<Utc>,
    /// The case's base date; no artifact is later than this.
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// Whether `ts` lies within the window (both ends inclusive).
    pub fn contains(&self, ts: &DateTime<Utc>) -> bool {
        *ts >= self.start && *ts <= self.end
    }
}

/// The hidden answer to a case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    /// Identifier of the culprit. Accusations are compared against this.
    pub culprit_id: SuspectId,
    /// Display name of the culprit.
    pub culprit: String,
    /// How the attack was carried out.
    pub method: String,
    /// Evidence labels shown when the case is solved.
    ///
    /// This is a fixed list and is not derived from the generated artifacts.
    pub evidence: Vec<String>,
}

/// One generated investigation.
///
/// Immutable once generated. Artifact collections are sorted by timestamp,
/// oldest first, except `files` which follows catalog order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Case {
    /// Case identifier.
    pub id: CaseId,
    /// Headline, e.g. `Operation: Data Breach Investigation`.
    pub title: String,
    /// Affected company.
    pub company: String,
    /// Attack type label.
    pub attack_type: String,
    /// Briefing text.
    pub description: String,
    /// Severity.
    pub severity: Severity,
    /// Human-readable timeframe, e.g. `36 hours ago`.
    pub timeframe: String,
    /// Span covering every log and chat timestamp.
    pub window: TimeWindow,
    /// The six people of interest.
    pub suspects: Vec<Suspect>,
    /// Access logs.
    pub logs: Vec<LogEntry>,
    /// Intercepted email.
    pub emails: Vec<Email>,
    /// Chat transcripts.
    pub chats: Vec<ChatMessage>,
    /// File metadata, one record per catalog filename.
    pub files: Vec<FileMetadata>,
    /// The hidden answer.
    pub solution: Solution,
}

impl Case {
    /// Look up a suspect by id.
    pub fn suspect(&self, id: SuspectId) -> Option<&Suspect> {
        self.suspects.iter().find(|s| s.id == id)
    }

    /// All suspects whose name contains `query`, ignoring case, in case
    /// order.
    pub fn matching_suspects(&self, query: &str) -> Vec<&Suspect> {
        self.suspects.iter().filter(|s| s.name_matches(query)).collect()
    }

    /// Look up a suspect by account name (`first.last`).
    pub fn suspect_by_username(&self, username: &str) -> Option<&Suspect> {
        self.suspects.iter().find(|s| s.username() == username)
    }

    /// The culprit.
    pub fn culprit(&self) -> Option<&Suspect> {
        self.suspect(self.solution.culprit_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::generate_case;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn case_id_display() {
        let id = CaseId(Uuid::nil());
        assert_eq!(id.to_string(), "CASE-00000000");
    }

    #[test]
    fn window_is_inclusive() {
        let w = TimeWindow {
            start: now() - chrono::Duration::hours(1),
            end: now(),
        };
        assert!(w.contains(&now()));
        assert!(w.contains(&w.start));
        assert!(!w.contains(&(now() + chrono::Duration::seconds(1))));
    }

    #[test]
    fn culprit_lookup() {
        let case = generate_case(42, now());
        let culprit = case.culprit().unwrap();
        assert_eq!(culprit.name, case.solution.culprit);
    }

    #[test]
    fn match_by_first_name() {
        let case = generate_case(42, now());
        let target = &case.suspects[3];
        let first = target.name.split(' ').next().unwrap().to_uppercase();
        let found = case.matching_suspects(&first);
        assert!(found.iter().all(|s| s.name.to_uppercase().contains(&first)));
        assert!(found.iter().any(|s| s.id == target.id));
    }

    #[test]
    fn find_by_username() {
        let case = generate_case(7, now());
        let s = &case.suspects[0];
        assert_eq!(case.suspect_by_username(&s.username()).unwrap().id, s.id);
        assert!(case.matching_suspects("zzzz-nobody").is_empty());
        assert!(case.matching_suspects("  ").is_empty());
    }
}
