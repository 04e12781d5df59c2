//! Structured command output.
//!
//! Handlers produce complete lines; any typewriter-style reveal belongs to
//! the frontend.

use serde::{Deserialize, Serialize};
use sleuth_core::CaseId;

use crate::evidence::EvidenceCategory;
use crate::hint::HintLevel;

/// How a line should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LineKind {
    /// The command as typed.
    InputEcho,
    /// Ordinary content.
    Info,
    /// Section headers and framing.
    SystemBanner,
    /// A failed command.
    Error,
    /// A reward or solved case.
    Success,
    /// Something the player should notice.
    Warning,
    /// Text from the oracle (or its fallback).
    Enrichment,
}

/// One output line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    /// Presentation kind.
    pub kind: LineKind,
    /// Line text without trailing newline.
    pub text: String,
}

/// What a command changed, for frontends that track state incrementally.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateDelta {
    /// A new case was loaded.
    pub case_started: Option<CaseId>,
    /// Evidence categories unlocked for the first time.
    pub unlocked: Vec<EvidenceCategory>,
    /// Progress points gained.
    pub progress_gained: u8,
    /// Credits gained.
    pub credits_awarded: u32,
    /// Hint tier delivered.
    pub hint: Option<HintLevel>,
    /// The case was solved by this command.
    pub solved: bool,
    /// The frontend should clear its screen.
    pub clear_screen: bool,
}

/// Complete result of one command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Output {
    /// Lines to display, in order.
    pub lines: Vec<Line>,
    /// State changes.
    pub delta: StateDelta,
}

impl Output {
    /// Start an output with the echoed input.
    pub fn echo(input: &str) -> Self {
        let mut out = Self::default();
        out.push(LineKind::InputEcho, format!("$ {input}"));
        out
    }

    /// Append a line.
    pub fn push(&mut self, kind: LineKind, text: impl Into<String>) {
        self.lines.push(Line {
            kind,
            text: text.into(),
        });
    }

    /// Append an informational line.
    pub fn info(&mut self, text: impl Into<String>) {
        self.push(LineKind::Info, text);
    }

    /// Append a banner line.
    pub fn banner(&mut self, text: impl Into<String>) {
        self.push(LineKind::SystemBanner, text);
    }

    /// Append an error line.
    pub fn error(&mut self, text: impl Into<String>) {
        self.push(LineKind::Error, text);
    }

    /// Append a success line.
    pub fn success(&mut self, text: impl Into<String>) {
        self.push(LineKind::Success, text);
    }

    /// Append a warning line.
    pub fn warning(&mut self, text: impl Into<String>) {
        self.push(LineKind::Warning, text);
    }

    /// Lines of a given kind.
    pub fn of_kind(&self, kind: LineKind) -> impl Iterator<Item = &Line> {
        self.lines.iter().filter(move |l| l.kind == kind)
    }

    /// Whether any line of `kind` contains `needle`.
    pub fn mentions(&self, kind: LineKind, needle: &str) -> bool {
        self.of_kind(kind).any(|l| l.text.contains(needle))
    }

    /// All line texts joined with newlines.
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
