//! Command parsing for terminal input.
//!
//! The first word selects the command and is matched case-insensitively.
//! Everything after it is kept verbatim (trimmed) as the argument.

/// A parsed terminal command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Generate and load a new case.
    StartCase,
    /// List available commands.
    Help,
    /// Network scan of all suspects.
    Scan,
    /// Recent access logs.
    Logs,
    /// Intercepted email.
    Intercept,
    /// Decrypted chat transcripts.
    Decrypt,
    /// File system forensics.
    Forensics,
    /// Local pattern analysis plus an oracle opinion.
    Analyze,
    /// Escalating hint.
    Hint,
    /// Mission summary for the active case.
    Status,
    /// Investigator profile and wallet.
    Profile,
    /// Evidence collected so far.
    EvidenceList,
    /// Clear the screen.
    Clear,
    /// Profile one suspect.
    Suspect {
        /// Name fragment.
        query: String,
    },
    /// Accuse a suspect.
    Solve {
        /// Name fragment.
        query: String,
    },
    /// Free-form question to the oracle.
    Ask {
        /// The question.
        text: String,
    },
    /// Submit a theory for evaluation.
    Theory {
        /// The theory.
        text: String,
    },
    /// A known command given without its required argument.
    Incomplete {
        /// Usage string for the command.
        usage: &'static str,
    },
    /// Unrecognised command word.
    Unknown {
        /// The command word as typed.
        verb: String,
    },
}

impl Command {
    /// Whether the command needs a loaded case.
    pub fn requires_case(&self) -> bool {
        !matches!(
            self,
            Self::StartCase
                | Self::Help
                | Self::Profile
                | Self::Clear
                | Self::Incomplete { .. }
                | Self::Unknown { .. }
        )
    }

    /// Whether the command gathers evidence or acts on the case.
    ///
    /// These become inert once the case is solved. Read-only views
    /// (`status`, `evidence-list`) stay available.
    pub fn is_investigative(&self) -> bool {
        self.requires_case() && !matches!(self, Self::Status | Self::EvidenceList)
    }
}

const START_VERBS: &[&str] = &["start-case", "start", "new-case"];
const HELP_VERBS: &[&str] = &["help", "?", "commands"];
const FORENSICS_VERBS: &[&str] = &["forensics", "exploit"];
const ANALYZE_VERBS: &[&str] = &["analyze", "analyse"];
const STATUS_VERBS: &[&str] = &["status", "mission"];
const PROFILE_VERBS: &[&str] = &["profile", "wallet"];
const EVIDENCE_VERBS: &[&str] = &["evidence-list", "evidence"];
const CLEAR_VERBS: &[&str] = &["clear", "cls"];
const SUSPECT_VERBS: &[&str] = &["suspect", "investigate"];
const SOLVE_VERBS: &[&str] = &["solve", "accuse"];

/// Parse one line of input into a command.
pub fn parse_command(input: &str) -> Command {
    let input = input.trim();
    let (verb, rest) = match input.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb.to_lowercase(), rest.trim()),
        None => (input.to_lowercase(), ""),
    };
    let verb = verb.as_str();

    if START_VERBS.contains(&verb) {
        return Command::StartCase;
    }
    if HELP_VERBS.contains(&verb) {
        return Command::Help;
    }
    if FORENSICS_VERBS.contains(&verb) {
        return Command::Forensics;
    }
    if ANALYZE_VERBS.contains(&verb) {
        return Command::Analyze;
    }
    if STATUS_VERBS.contains(&verb) {
        return Command::Status;
    }
    if PROFILE_VERBS.contains(&verb) {
        return Command::Profile;
    }
    if EVIDENCE_VERBS.contains(&verb) {
        return Command::EvidenceList;
    }
    if CLEAR_VERBS.contains(&verb) {
        return Command::Clear;
    }
    if SUSPECT_VERBS.contains(&verb) {
        return with_argument(rest, "suspect <name>", |query| Command::Suspect { query });
    }
    if SOLVE_VERBS.contains(&verb) {
        return with_argument(rest, "solve <suspect name>", |query| Command::Solve { query });
    }

    match verb {
        "scan" => Command::Scan,
        "logs" => Command::Logs,
        "intercept" => Command::Intercept,
        "decrypt" => Command::Decrypt,
        "hint" => Command::Hint,
        "ask" => with_argument(rest, "ask <question>", |text| Command::Ask { text }),
        "theory" => with_argument(rest, "theory <your theory>", |text| Command::Theory { text }),
        _ => Command::Unknown {
            verb: verb.to_string(),
        },
    }
}

fn with_argument(
    rest: &str,
    usage: &'static str,
    build: impl FnOnce(String) -> Command,
) -> Command {
    if rest.is_empty() {
        Command::Incomplete { usage }
    } else {
        build(rest.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_bare_commands() {
        assert_eq!(parse_command("start-case"), Command::StartCase);
        assert_eq!(parse_command("scan"), Command::Scan);
        assert_eq!(parse_command("logs"), Command::Logs);
        assert_eq!(parse_command("intercept"), Command::Intercept);
        assert_eq!(parse_command("decrypt"), Command::Decrypt);
        assert_eq!(parse_command("forensics"), Command::Forensics);
        assert_eq!(parse_command("analyze"), Command::Analyze);
        assert_eq!(parse_command("hint"), Command::Hint);
        assert_eq!(parse_command("help"), Command::Help);
        assert_eq!(parse_command("clear"), Command::Clear);
        assert_eq!(parse_command("evidence-list"), Command::EvidenceList);
    }

    #[test]
    fn synonyms() {
        assert_eq!(parse_command("exploit"), Command::Forensics);
        assert_eq!(parse_command("mission"), Command::Status);
        assert_eq!(parse_command("wallet"), Command::Profile);
        assert_eq!(parse_command("?"), Command::Help);
        assert_eq!(
            parse_command("accuse anna"),
            Command::Solve {
                query: "anna".to_string()
            }
        );
    }

    #[test]
    fn verb_is_case_insensitive() {
        assert_eq!(parse_command("SCAN"), Command::Scan);
        assert_eq!(parse_command("  Logs  "), Command::Logs);
    }

    #[test]
    fn argument_keeps_case_and_inner_spacing() {
        assert_eq!(
            parse_command("ask Who  touched the VPN?"),
            Command::Ask {
                text: "Who  touched the VPN?".to_string()
            }
        );
        assert_eq!(
            parse_command("suspect   Sarah Johnson  "),
            Command::Suspect {
                query: "Sarah Johnson".to_string()
            }
        );
    }

    #[test]
    fn missing_argument() {
        assert_eq!(
            parse_command("solve"),
            Command::Incomplete {
                usage: "solve <suspect name>"
            }
        );
        assert_eq!(
            parse_command("ask   "),
            Command::Incomplete {
                usage: "ask <question>"
            }
        );
        assert!(matches!(parse_command("theory"), Command::Incomplete { .. }));
        assert!(matches!(parse_command("suspect"), Command::Incomplete { .. }));
    }

    #[test]
    fn unknown_verb() {
        assert_eq!(
            parse_command("hack the planet"),
            Command::Unknown {
                verb: "hack".to_string()
            }
        );
    }

    #[test]
    fn case_requirements() {
        assert!(!Command::StartCase.requires_case());
        assert!(!Command::Help.requires_case());
        assert!(!Command::Profile.requires_case());
        assert!(!Command::Clear.requires_case());
        assert!(Command::Scan.requires_case());
        assert!(Command::Status.requires_case());
        assert!(!Command::Status.is_investigative());
        assert!(!Command::EvidenceList.is_investigative());
        assert!(Command::Hint.is_investigative());
        assert!(
            Command::Solve {
                query: "x".to_string()
            }
            .is_investigative()
        );
    }
}
