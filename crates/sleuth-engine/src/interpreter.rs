//! The command interpreter: one line of input in, one [`Step`] out.
//!
//! [`step`] is synchronous and never touches the network. Commands that
//! want an oracle opinion return an [`OracleRequest`] alongside their local
//! output; the caller decides whether and how to fulfil it.

use chrono::{DateTime, Utc};
use sleuth_core::{Case, CaseGenerator, RandomSource, Suspect, Verdict, judge};
use tracing::{debug, info};

use crate::command::{Command, parse_command};
use crate::error::{EngineError, EngineResult};
use crate::evidence::EvidenceCategory;
use crate::hint::HintLevel;
use crate::oracle::context::{self, OracleContext, OracleRequest, QueryKind};
use crate::output::Output;
use crate::render;
use crate::state::{GameState, Phase};

/// Everything a command may need besides the state it mutates.
pub struct Dispatch<'a> {
    /// Randomness for case generation.
    pub rng: &'a mut RandomSource,
    /// Case generator.
    pub generator: &'a CaseGenerator,
    /// Wall-clock anchor for new cases.
    pub now: DateTime<Utc>,
    /// Recent commands included in oracle context.
    pub history_window: usize,
}

/// Result of interpreting one line.
#[derive(Debug, Clone, Default)]
pub struct Step {
    /// Local output, complete without the oracle.
    pub output: Output,
    /// Oracle request to fulfil, if the command wants one.
    pub query: Option<OracleRequest>,
}

/// Interpret one line of input.
///
/// Blank input is ignored and not recorded. Everything else is recorded in
/// the command history exactly as entered, before it is parsed, so failed
/// commands are recorded too. Errors become a single error line and leave the rest of
/// the state untouched.
pub fn step(state: &mut GameState, input: &str, ctx: &mut Dispatch<'_>) -> Step {
    if input.trim().is_empty() {
        return Step::default();
    }

    state.record_command(input);
    let input = input.trim();
    let mut output = Output::echo(input);
    let command = parse_command(input);
    debug!(?command, "dispatching");

    match dispatch(state, command, ctx, &mut output) {
        Ok(query) => Step { output, query },
        Err(err) => {
            debug!(error = %err, "command failed");
            output.error(err.to_string());
            Step {
                output,
                query: None,
            }
        }
    }
}

fn dispatch(
    state: &mut GameState,
    command: Command,
    ctx: &mut Dispatch<'_>,
    out: &mut Output,
) -> EngineResult<Option<OracleRequest>> {
    match &command {
        Command::Unknown { verb } => return Err(EngineError::UnknownCommand(verb.clone())),
        Command::Incomplete { usage } => return Err(EngineError::UsageError(usage.to_string())),
        _ => {}
    }

    if command.requires_case() {
        match state.phase() {
            Phase::NoCase => return Err(EngineError::NoActiveCase),
            Phase::Resolved if command.is_investigative() => {
                if let Some(case) = state.case() {
                    out.warning(format!(
                        "{} is closed. Type `start-case` to open a new investigation.",
                        case.id
                    ));
                }
                return Ok(None);
            }
            _ => {}
        }
    }

    match command {
        Command::StartCase => start_case(state, ctx, out),
        Command::Help => help(out),
        Command::Profile => profile(state, out),
        Command::Clear => {
            out.delta.clear_screen = true;
            Ok(None)
        }
        Command::Scan => {
            render::scan(active_case(state)?, out);
            Ok(None)
        }
        Command::Logs => {
            render::logs(active_case(state)?, out);
            reveal(state, EvidenceCategory::SystemLogs, out);
            Ok(None)
        }
        Command::Intercept => {
            render::emails(active_case(state)?, out);
            reveal(state, EvidenceCategory::EmailRecords, out);
            Ok(None)
        }
        Command::Decrypt => {
            render::chats(active_case(state)?, out);
            reveal(state, EvidenceCategory::ChatLogs, out);
            Ok(None)
        }
        Command::Forensics => {
            render::files(active_case(state)?, out);
            reveal(state, EvidenceCategory::FileMetadata, out);
            Ok(None)
        }
        Command::Suspect { query } => suspect(state, &query, out),
        Command::Analyze => analyze(state, ctx, out),
        Command::Hint => hint(state, ctx, out),
        Command::Ask { text } => {
            state.metrics_mut().queries_issued += 1;
            out.info("Querying analysis grid...");
            Ok(Some(request(state, ctx, QueryKind::Ask, text)))
        }
        Command::Theory { text } => theory(state, ctx, &text, out),
        Command::Solve { query } => solve(state, &query, out),
        Command::Status => status(state, out),
        Command::EvidenceList => evidence_list(state, out),
        Command::Incomplete { .. } | Command::Unknown { .. } => Ok(None),
    }
}

fn active_case(state: &GameState) -> EngineResult<&Case> {
    state.case().ok_or(EngineError::NoActiveCase)
}

/// Resolve a name fragment to exactly one suspect.
///
/// A full name (any case) wins outright. Otherwise the fragment must match
/// a single suspect; several matches are rejected so an overlap such as a
/// shared family name never picks the wrong person.
fn resolve_suspect<'a>(case: &'a Case, query: &str) -> EngineResult<&'a Suspect> {
    let wanted = query.trim();
    if let Some(exact) = case
        .suspects
        .iter()
        .find(|s| s.name.eq_ignore_ascii_case(wanted))
    {
        return Ok(exact);
    }
    match case.matching_suspects(wanted).as_slice() {
        [] => Err(EngineError::NotFound(wanted.to_string())),
        [only] => Ok(*only),
        many => Err(EngineError::Ambiguous {
            query: wanted.to_string(),
            candidates: many
                .iter()
                .map(|s| s.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        }),
    }
}

fn request(
    state: &GameState,
    ctx: &Dispatch<'_>,
    kind: QueryKind,
    prompt: String,
) -> OracleRequest {
    OracleRequest::new(kind, prompt, OracleContext::capture(state, ctx.history_window))
}

/// Unlock `category` and report the reward, if any.
fn reveal(state: &mut GameState, category: EvidenceCategory, out: &mut Output) {
    match state.reveal(category) {
        Some(reward) => {
            debug!(evidence = %category, progress = state.progress(), "evidence unlocked");
            out.success(format!(
                "Evidence logged: {} (+{}% progress, +{} credits)",
                category.title(),
                reward.progress,
                reward.credits
            ));
            out.delta.unlocked.push(category);
            out.delta.progress_gained += reward.progress;
            out.delta.credits_awarded += reward.credits;
        }
        None => out.info(format!("{} already on file.", category.title())),
    }
}

fn start_case(
    state: &mut GameState,
    ctx: &mut Dispatch<'_>,
    out: &mut Output,
) -> EngineResult<Option<OracleRequest>> {
    let case = ctx.generator.generate(ctx.rng, ctx.now);
    info!(case = %case.id, company = %case.company, "case started");
    out.banner("INITIALIZING INVESTIGATION...");
    render::briefing(&case, out);
    out.delta.case_started = Some(case.id);
    state.begin_case(case);
    Ok(None)
}

fn help(out: &mut Output) -> EngineResult<Option<OracleRequest>> {
    out.banner("=== AVAILABLE COMMANDS ===");
    for (usage, what) in [
        ("start-case", "open a new investigation"),
        ("scan", "network scan of all suspects"),
        ("logs", "recent system access logs"),
        ("intercept", "intercepted email"),
        ("decrypt", "decrypted chat transcripts"),
        ("forensics", "file system metadata"),
        ("suspect <name>", "full profile of one suspect"),
        ("analyze", "pattern analysis of collected evidence"),
        ("ask <question>", "consult the analysis grid"),
        ("theory <text>", "submit a theory for evaluation"),
        ("hint", "escalating hint"),
        ("solve <name>", "accuse a suspect"),
        ("status", "mission summary"),
        ("evidence-list", "evidence collected so far"),
        ("profile", "investigator profile and wallet"),
        ("clear", "clear the screen"),
    ] {
        out.info(format!("  {usage:<16} {what}"));
    }
    Ok(None)
}

fn profile(state: &GameState, out: &mut Output) -> EngineResult<Option<OracleRequest>> {
    let m = state.metrics();
    out.banner("=== INVESTIGATOR PROFILE ===");
    out.info(format!("Credits:            {}", state.credits()));
    if state.case().is_some() {
        out.info(format!("Case progress:      {}%", state.progress()));
    }
    out.info(format!("Cases solved:       {}", m.cases_completed));
    out.info(format!("Commands issued:    {}", m.commands_issued));
    out.info(format!("Queries issued:     {}", m.queries_issued));
    out.info(format!("Hints used:         {}", m.hints_used));
    out.info(format!("Theories submitted: {}", m.theories_submitted));
    out.info(format!(
        "Accusation accuracy: {}% ({}/{})",
        m.accuracy(),
        m.correct_solves,
        m.solve_attempts
    ));
    Ok(None)
}

fn suspect(
    state: &mut GameState,
    query: &str,
    out: &mut Output,
) -> EngineResult<Option<OracleRequest>> {
    let id = {
        let suspect = resolve_suspect(active_case(state)?, query)?;
        render::profile(suspect, out);
        suspect.id
    };
    reveal(state, EvidenceCategory::Profile(id), out);
    Ok(None)
}

fn analyze(
    state: &mut GameState,
    ctx: &Dispatch<'_>,
    out: &mut Output,
) -> EngineResult<Option<OracleRequest>> {
    render::analysis(active_case(state)?, state.evidence(), out);
    reveal(state, EvidenceCategory::AiAnalysis, out);
    let labels: Vec<String> = state
        .evidence()
        .categories()
        .iter()
        .map(ToString::to_string)
        .collect();
    let prompt = context::analysis_prompt(&labels);
    Ok(Some(request(state, ctx, QueryKind::Analysis, prompt)))
}

fn hint(
    state: &mut GameState,
    ctx: &Dispatch<'_>,
    out: &mut Output,
) -> EngineResult<Option<OracleRequest>> {
    let level = state.escalate_hint();
    out.delta.hint = Some(level);
    let text = local_hint(state, level)?;
    out.warning(format!("[{} hint] {text}", level.to_string().to_uppercase()));
    let prompt = context::hint_prompt(level, state.progress());
    Ok(Some(request(state, ctx, QueryKind::Hint(level), prompt)))
}

/// Hint text computed from the case. Never names the culprit.
fn local_hint(state: &GameState, level: HintLevel) -> EngineResult<String> {
    let case = active_case(state)?;
    Ok(match level {
        HintLevel::Subtle => {
            match EvidenceCategory::DATA_SOURCES
                .iter()
                .find(|c| !state.evidence().contains(**c))
            {
                Some(next) => format!(
                    "The {} have not been examined yet. Try `{}`.",
                    next.title(),
                    next.command()
                ),
                None => "Compare where each account usually connects from with where its \
                          activity came from."
                    .to_string(),
            }
        }
        HintLevel::Moderate => "Look for DATA_EXPORT, PRIVILEGE_ESCALATION and FILE_DELETE \
                                entries in the final day before the incident, especially from \
                                an unfamiliar address."
            .to_string(),
        HintLevel::Explicit => match case.culprit() {
            Some(culprit) => format!(
                "The activity traces back to someone in {} with {} access.",
                culprit.department, culprit.access_level
            ),
            None => "Focus on the account with the most suspicious activity.".to_string(),
        },
    })
}

fn theory(
    state: &mut GameState,
    ctx: &Dispatch<'_>,
    text: &str,
    out: &mut Output,
) -> EngineResult<Option<OracleRequest>> {
    state.metrics_mut().theories_submitted += 1;
    out.info(format!("Theory logged: {text}"));
    reveal(state, EvidenceCategory::Theory, out);
    let prompt = context::theory_prompt(text);
    Ok(Some(request(state, ctx, QueryKind::Theory, prompt)))
}

fn solve(
    state: &mut GameState,
    query: &str,
    out: &mut Output,
) -> EngineResult<Option<OracleRequest>> {
    let (verdict, name) = {
        let case = active_case(state)?;
        let accused = resolve_suspect(case, query)?;
        (judge(case, accused.id), accused.name.clone())
    };
    state.metrics_mut().solve_attempts += 1;

    match verdict {
        Verdict::Correct { method, evidence } => {
            state.metrics_mut().correct_solves += 1;
            let gained = state.resolve();
            info!(culprit = %name, "case solved");
            out.success("=== CASE SOLVED ===");
            out.success(format!("{name} was behind the attack."));
            out.info(format!("Method: {method}"));
            out.info(format!("Key evidence: {}", evidence.join(", ")));
            out.success(format!(
                "+{} credits. Type `start-case` for your next assignment.",
                crate::state::SOLVE_REWARD_CREDITS
            ));
            out.delta.solved = true;
            out.delta.progress_gained += gained;
            out.delta.credits_awarded += crate::state::SOLVE_REWARD_CREDITS;
        }
        Verdict::Incorrect => {
            info!(accused = %name, "incorrect accusation");
            out.error(format!("Accusation rejected: the evidence does not support {name}."));
            out.warning("The investigation continues.");
        }
    }
    Ok(None)
}

fn status(state: &GameState, out: &mut Output) -> EngineResult<Option<OracleRequest>> {
    let case = active_case(state)?;
    out.banner("=== MISSION STATUS ===");
    out.info(format!("Case:      {} ({})", case.title, case.id));
    out.info(format!("Target:    {}", case.company));
    out.info(format!("Attack:    {}", case.attack_type));
    out.info(format!("Severity:  {}", case.severity));
    out.info(format!("Detected:  {}", case.timeframe));
    out.info(format!("Progress:  {}%", state.progress()));
    out.info(format!("Evidence:  {} item(s)", state.evidence().len()));
    let tier = state
        .hints()
        .last()
        .map_or_else(|| "none".to_string(), |l| l.to_string().to_uppercase());
    out.info(format!("Hints:     {tier}"));
    let phase = match state.phase() {
        Phase::Resolved => "SOLVED",
        _ => "OPEN",
    };
    out.info(format!("State:     {phase}"));
    Ok(None)
}

fn evidence_list(state: &GameState, out: &mut Output) -> EngineResult<Option<OracleRequest>> {
    let case = active_case(state)?;
    out.banner("=== EVIDENCE ===");
    if state.evidence().is_empty() {
        out.info("No evidence collected.");
        return Ok(None);
    }
    for category in state.evidence().categories() {
        let title = match category {
            EvidenceCategory::Profile(id) => match case.suspect(*id) {
                Some(s) => format!("{} Profile", s.name),
                None => category.title().to_string(),
            },
            _ => category.title().to_string(),
        };
        out.info(format!("  [{category}] {title}"));
    }
    Ok(None)
}
