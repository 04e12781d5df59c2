//! Everything a session remembers between commands.

use serde::{Deserialize, Serialize};
use sleuth_core::{Case, SuspectId};

use crate::evidence::{EvidenceCategory, EvidenceStore, Reward};
use crate::hint::HintLadder;
use crate::progress::ProgressTracker;

/// Credits paid for a correct accusation.
pub const SOLVE_REWARD_CREDITS: u32 = 1000;

/// Where the interpreter is in the investigation lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// No case loaded; only `start-case`, `help` and cosmetic commands work.
    NoCase,
    /// A case is open for investigation.
    Investigating,
    /// The active case has been solved.
    Resolved,
}

/// The loaded case and whether it has been solved.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ActiveCase {
    case: Case,
    /// Set once by a correct accusation.
    solved: bool,
}

/// Append-only record of raw command lines.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommandHistory {
    entries: Vec<String>,
}

impl CommandHistory {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a command line.
    pub fn push(&mut self, line: impl Into<String>) {
        self.entries.push(line.into());
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// The last `n` entries, oldest first.
    pub fn recent(&self, n: usize) -> &[String] {
        &self.entries[self.entries.len().saturating_sub(n)..]
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no command has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Session-wide counters shown by `profile`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metrics {
    /// Non-blank commands entered.
    pub commands_issued: u32,
    /// Cases solved.
    pub cases_completed: u32,
    /// `ask` queries sent.
    pub queries_issued: u32,
    /// Hints requested.
    pub hints_used: u32,
    /// Theories submitted.
    pub theories_submitted: u32,
    /// Accusations made.
    pub solve_attempts: u32,
    /// Accusations that were correct.
    pub correct_solves: u32,
}

impl Metrics {
    /// Share of accusations that were correct, in percent.
    pub fn accuracy(&self) -> u32 {
        if self.solve_attempts == 0 {
            0
        } else {
            self.correct_solves * 100 / self.solve_attempts
        }
    }
}

/// Complete interpreter state. Serializable so a session can be saved and
/// resumed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameState {
    active: Option<ActiveCase>,
    evidence: EvidenceStore,
    progress: ProgressTracker,
    hints: HintLadder,
    history: CommandHistory,
    metrics: Metrics,
    credits: u32,
}

impl GameState {
    /// Fresh state with no case loaded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        match &self.active {
            None => Phase::NoCase,
            Some(active) if active.solved => Phase::Resolved,
            Some(_) => Phase::Investigating,
        }
    }

    /// The loaded case.
    pub fn case(&self) -> Option<&Case> {
        self.active.as_ref().map(|a| &a.case)
    }

    /// Evidence unlocked in the current case.
    pub fn evidence(&self) -> &EvidenceStore {
        &self.evidence
    }

    /// Progress in the current case.
    pub fn progress(&self) -> u8 {
        self.progress.value()
    }

    /// Hint escalation state.
    pub fn hints(&self) -> &HintLadder {
        &self.hints
    }

    /// Every command entered this session.
    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    /// Session counters.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Credits earned this session.
    pub fn credits(&self) -> u32 {
        self.credits
    }

    /// Replace the active case and reset per-case evidence and progress.
    pub fn begin_case(&mut self, case: Case) {
        self.active = Some(ActiveCase {
            case,
            solved: false,
        });
        self.evidence.clear();
        self.progress.reset();
    }

    /// Record a non-blank command line.
    pub(crate) fn record_command(&mut self, line: &str) {
        self.history.push(line);
        self.metrics.commands_issued += 1;
    }

    /// Unlock `category`, paying its reward the first time.
    ///
    /// Returns the reward actually paid, or `None` for a repeat unlock.
    pub(crate) fn reveal(&mut self, category: EvidenceCategory) -> Option<Reward> {
        if self.evidence.unlock(category).already_unlocked {
            return None;
        }
        let reward = category.reward();
        let gained = self.progress.add(reward.progress);
        self.credits += reward.credits;
        Some(Reward {
            progress: gained,
            credits: reward.credits,
        })
    }

    /// Mark the active case solved. Returns the progress points gained.
    ///
    /// Does nothing when no case is loaded or it is already solved.
    pub(crate) fn resolve(&mut self) -> u8 {
        let Some(active) = self.active.as_mut() else {
            return 0;
        };
        if active.solved {
            return 0;
        }
        active.solved = true;
        self.metrics.cases_completed += 1;
        self.credits += SOLVE_REWARD_CREDITS;
        self.progress.complete()
    }

    pub(crate) fn escalate_hint(&mut self) -> crate::hint::HintLevel {
        self.metrics.hints_used += 1;
        self.hints.escalate()
    }

    pub(crate) fn metrics_mut(&mut self) -> &mut Metrics {
        &mut self.metrics
    }

    /// Whether the suspect's profile has been opened.
    pub fn profiled(&self, id: SuspectId) -> bool {
        self.evidence.contains(EvidenceCategory::Profile(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use sleuth_core::generate_case;

    fn case() -> Case {
        generate_case(42, Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap())
    }

    #[test]
    fn phases() {
        let mut state = GameState::new();
        assert_eq!(state.phase(), Phase::NoCase);
        state.begin_case(case());
        assert_eq!(state.phase(), Phase::Investigating);
        state.resolve();
        assert_eq!(state.phase(), Phase::Resolved);
    }

    #[test]
    fn reveal_pays_once() {
        let mut state = GameState::new();
        state.begin_case(case());
        let reward = state.reveal(EvidenceCategory::EmailRecords).unwrap();
        assert_eq!(reward.progress, 20);
        assert_eq!(reward.credits, 200);
        assert!(state.reveal(EvidenceCategory::EmailRecords).is_none());
        assert_eq!(state.progress(), 20);
        assert_eq!(state.credits(), 200);
    }

    #[test]
    fn begin_case_resets_evidence_but_not_session() {
        let mut state = GameState::new();
        state.begin_case(case());
        state.reveal(EvidenceCategory::SystemLogs);
        state.record_command("logs");
        state.escalate_hint();
        state.begin_case(case());
        assert!(state.evidence().is_empty());
        assert_eq!(state.progress(), 0);
        assert_eq!(state.credits(), 150);
        assert_eq!(state.history().len(), 1);
        assert_eq!(state.hints().last(), Some(crate::hint::HintLevel::Subtle));
    }

    #[test]
    fn resolve_is_once() {
        let mut state = GameState::new();
        assert_eq!(state.resolve(), 0);
        state.begin_case(case());
        state.reveal(EvidenceCategory::SystemLogs);
        assert_eq!(state.resolve(), 85);
        assert_eq!(state.resolve(), 0);
        assert_eq!(state.metrics().cases_completed, 1);
        assert_eq!(state.credits(), 150 + SOLVE_REWARD_CREDITS);
    }

    #[test]
    fn history_window() {
        let mut h = CommandHistory::new();
        for cmd in ["a", "b", "c"] {
            h.push(cmd);
        }
        assert_eq!(h.recent(2), &["b".to_string(), "c".to_string()]);
        assert_eq!(h.recent(10).len(), 3);
        assert_eq!(h.entries()[0], "a");
    }

    #[test]
    fn accuracy() {
        let mut m = Metrics::default();
        assert_eq!(m.accuracy(), 0);
        m.solve_attempts = 3;
        m.correct_solves = 1;
        assert_eq!(m.accuracy(), 33);
    }

    #[test]
    fn state_roundtrips_through_json() {
        let mut state = GameState::new();
        state.begin_case(case());
        state.reveal(EvidenceCategory::Profile(SuspectId(2)));
        let json = serde_json::to_string(&state).unwrap();
        let back: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(back.phase(), Phase::Investigating);
        assert!(back.profiled(SuspectId(2)));
        assert_eq!(back.progress(), 10);
    }
}
