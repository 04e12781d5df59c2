//! What the oracle is told about the investigation.

use serde::{Deserialize, Serialize};

use crate::hint::HintLevel;
use crate::state::GameState;

/// Standing instructions sent ahead of every request.
pub const SYSTEM_PROMPT: &str = "You are the forensic analysis assistant in a terminal-based \
cyber investigation game. The player is an investigator working a breach case. Answer in the \
voice of a terse analysis system. Point the player toward evidence and patterns: login \
anomalies, address changes, privilege escalation, data exports and deleted files. Never state \
who the culprit is outright and never invent evidence that is not in the context. Keep replies \
under 120 words.";

/// Why the oracle is being consulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueryKind {
    /// Free-form question.
    Ask,
    /// Theory evaluation.
    Theory,
    /// Opinion on collected evidence.
    Analysis,
    /// Hint at the given tier.
    Hint(HintLevel),
}

/// One suspect as the oracle sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuspectBrief {
    /// Display name.
    pub name: String,
    /// Job title.
    pub role: String,
    /// Suspicion level.
    pub risk: u8,
}

/// Public facts about the active case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseBrief {
    /// Case headline.
    pub title: String,
    /// Target company.
    pub company: String,
    /// Attack type.
    pub attack_type: String,
    /// Severity label.
    pub severity: String,
    /// Everyone under investigation.
    pub suspects: Vec<SuspectBrief>,
}

/// Snapshot of game state attached to a request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OracleContext {
    /// The active case, if any.
    pub case: Option<CaseBrief>,
    /// Progress percentage.
    pub progress: u8,
    /// Labels of unlocked evidence.
    pub evidence: Vec<String>,
    /// Most recent commands, oldest first.
    pub recent_commands: Vec<String>,
}

impl OracleContext {
    /// Capture the parts of `state` the oracle may see.
    pub fn capture(state: &GameState, history_window: usize) -> Self {
        let case = state.case().map(|case| CaseBrief {
            title: case.title.clone(),
            company: case.company.clone(),
            attack_type: case.attack_type.clone(),
            severity: case.severity.to_string(),
            suspects: case
                .suspects
                .iter()
                .map(|s| SuspectBrief {
                    name: s.name.clone(),
                    role: s.role.clone(),
                    risk: s.suspicion_level,
                })
                .collect(),
        });
        Self {
            case,
            progress: state.progress(),
            evidence: state
                .evidence()
                .categories()
                .iter()
                .map(ToString::to_string)
                .collect(),
            recent_commands: state.history().recent(history_window).to_vec(),
        }
    }
}

/// A prompt plus the context it is asked in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OracleRequest {
    /// Why the oracle is asked.
    pub kind: QueryKind,
    /// The question itself.
    pub prompt: String,
    /// Game state snapshot.
    pub context: OracleContext,
}

impl OracleRequest {
    /// Create a request.
    pub fn new(kind: QueryKind, prompt: impl Into<String>, context: OracleContext) -> Self {
        Self {
            kind,
            prompt: prompt.into(),
            context,
        }
    }

    /// The user message sent to the model: context block then the query.
    pub fn render(&self) -> String {
        let mut msg = String::from("INVESTIGATION CONTEXT:\n");
        match &self.context.case {
            Some(case) => {
                msg.push_str(&format!("Case: {}\n", case.title));
                msg.push_str(&format!("Company: {}\n", case.company));
                msg.push_str(&format!("Attack Type: {}\n", case.attack_type));
                msg.push_str(&format!("Severity: {}\n", case.severity));
                msg.push_str("Suspects:\n");
                for s in &case.suspects {
                    msg.push_str(&format!("- {} ({}) risk {}%\n", s.name, s.role, s.risk));
                }
            }
            None => msg.push_str("No active case.\n"),
        }
        msg.push_str(&format!("Progress: {}%\n", self.context.progress));
        if self.context.evidence.is_empty() {
            msg.push_str("Evidence Found: none\n");
        } else {
            msg.push_str(&format!(
                "Evidence Found: {}\n",
                self.context.evidence.join(", ")
            ));
        }
        if !self.context.recent_commands.is_empty() {
            msg.push_str(&format!(
                "Recent Commands: {}\n",
                self.context.recent_commands.join(", ")
            ));
        }
        msg.push_str(&format!("\nPLAYER QUERY: {}", self.prompt));
        msg
    }
}

/// Prompt for a hint at `level`.
pub fn hint_prompt(level: HintLevel, progress: u8) -> String {
    let ask = match level {
        HintLevel::Subtle => {
            "Give a subtle hint about what the investigator should look for next, without revealing the answer."
        }
        HintLevel::Moderate => {
            "Give a moderate hint that points toward the important evidence without naming the culprit."
        }
        HintLevel::Explicit => {
            "Give a clear hint about which evidence matters most and how it connects. Do not name the culprit."
        }
    };
    format!("{ask} Current progress: {progress}%.")
}

/// Prompt asking for an opinion on the listed evidence.
pub fn analysis_prompt(evidence: &[String]) -> String {
    let listed = if evidence.is_empty() {
        "no evidence collected yet".to_string()
    } else {
        evidence.join(", ")
    };
    format!(
        "Analyze the following evidence and provide insights: {listed}. What patterns or connections do you see?"
    )
}

/// Prompt asking the oracle to evaluate a theory.
pub fn theory_prompt(theory: &str) -> String {
    format!(
        "Evaluate this investigation theory: \"{theory}\". Is it supported by the evidence? What might be missing?"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evidence::EvidenceCategory;
    use chrono::{TimeZone, Utc};
    use sleuth_core::generate_case;

    #[test]
    fn empty_context_renders() {
        let req = OracleRequest::new(QueryKind::Ask, "hello", OracleContext::default());
        let text = req.render();
        assert!(text.contains("No active case."));
        assert!(text.contains("Evidence Found: none"));
        assert!(text.ends_with("PLAYER QUERY: hello"));
    }

    #[test]
    fn capture_reads_state() {
        let mut state = GameState::new();
        state.begin_case(generate_case(
            3,
            Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
        ));
        state.reveal(EvidenceCategory::SystemLogs);
        for cmd in ["scan", "logs", "intercept", "decrypt", "forensics", "hint"] {
            state.record_command(cmd);
        }
        let ctx = OracleContext::capture(&state, 5);
        assert_eq!(ctx.progress, 15);
        assert_eq!(ctx.evidence, vec!["system_logs".to_string()]);
        assert_eq!(ctx.recent_commands.len(), 5);
        assert_eq!(ctx.recent_commands[0], "logs");
        let brief = ctx.case.as_ref().unwrap();
        assert_eq!(brief.suspects.len(), 6);

        let text = OracleRequest::new(QueryKind::Ask, "who?", ctx).render();
        assert!(text.contains("Recent Commands: logs, intercept, decrypt, forensics, hint"));
    }

    #[test]
    fn prompts() {
        assert!(hint_prompt(HintLevel::Subtle, 30).contains("subtle"));
        assert!(hint_prompt(HintLevel::Explicit, 30).ends_with("Current progress: 30%."));
        assert!(analysis_prompt(&[]).contains("no evidence collected yet"));
        assert!(theory_prompt("it was the intern").contains("\"it was the intern\""));
    }
}
