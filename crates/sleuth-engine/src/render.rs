//! Text views of case data.
//!
//! Each view appends complete lines to an [`Output`]. Tables go through
//! comfy-table and are split into one info line per row.

use comfy_table::{ContentArrangement, Table};
use sleuth_core::artifact::display_time;
use sleuth_core::{Case, Suspect};

use crate::evidence::{EvidenceCategory, EvidenceStore};
use crate::output::Output;

/// Log entries shown by `logs`, most recent last.
pub const LOG_VIEW: usize = 8;
/// Emails shown by `intercept`.
pub const EMAIL_VIEW: usize = 4;
/// Chat messages shown by `decrypt`.
pub const CHAT_VIEW: usize = 6;

fn tail<T>(items: &[T], n: usize) -> &[T] {
    &items[items.len().saturating_sub(n)..]
}

fn push_table(out: &mut Output, table: &Table) {
    for line in table.to_string().lines() {
        out.info(line);
    }
}

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    // frontends decide on wrapping; rows stay on one line here
    table.set_content_arrangement(ContentArrangement::Disabled);
    table.set_header(header);
    table
}

/// Opening briefing for a freshly loaded case.
pub fn briefing(case: &Case, out: &mut Output) {
    out.banner("=== INCOMING TRANSMISSION ===");
    out.banner(case.title.clone());
    out.info(format!("Case ID:     {}", case.id));
    out.info(format!("Target:      {}", case.company));
    out.info(format!("Attack type: {}", case.attack_type));
    out.info(format!("Severity:    {}", case.severity));
    out.info(format!("Detected:    {}", case.timeframe));
    out.info(case.description.clone());
    out.info(format!(
        "{} persons of interest identified. Start with `scan`.",
        case.suspects.len()
    ));
}

/// Network scan: every suspect with risk tier and clearance.
pub fn scan(case: &Case, out: &mut Output) {
    out.banner("=== NETWORK SCAN ===");
    let mut table = new_table(vec!["#", "Name", "Role", "Department", "Access", "IP", "Risk"]);
    for (i, s) in case.suspects.iter().enumerate() {
        table.add_row(vec![
            format!("{:02}", i + 1),
            s.name.clone(),
            s.role.clone(),
            s.department.clone(),
            s.access_level.to_string(),
            s.ip.to_string(),
            format!("{} ({}%)", s.risk_tier(), s.suspicion_level),
        ]);
    }
    push_table(out, &table);
    out.info("Use `suspect <name>` for a full profile.");
}

/// The most recent access log entries.
pub fn logs(case: &Case, out: &mut Output) {
    out.banner("=== SYSTEM ACCESS LOGS ===");
    let mut table = new_table(vec!["Time", "User", "IP", "Action", "Resource", "Status"]);
    for entry in tail(&case.logs, LOG_VIEW) {
        table.add_row(vec![
            display_time(&entry.timestamp),
            entry.user.clone(),
            entry.ip.to_string(),
            entry.action.to_string(),
            entry.resource.clone(),
            entry.status.to_string(),
        ]);
    }
    push_table(out, &table);
    out.info(format!(
        "Showing {} of {} entries.",
        case.logs.len().min(LOG_VIEW),
        case.logs.len()
    ));
}

/// The most recent intercepted emails.
pub fn emails(case: &Case, out: &mut Output) {
    out.banner("=== INTERCEPTED EMAIL ===");
    for email in tail(&case.emails, EMAIL_VIEW) {
        out.info(format!("From:    {}", email.from));
        out.info(format!("To:      {}", email.to));
        out.info(format!("Subject: {}", email.subject));
        out.info(format!("Sent:    {}", display_time(&email.timestamp)));
        if let Some(priority) = email.headers.get("X-Priority") {
            out.info(format!("Priority: {priority}"));
        }
        if let Some(ip) = email.headers.get("X-Originating-IP") {
            out.info(format!("Origin:  {ip}"));
        }
        out.info(format!("  {}", email.body));
        out.info("---");
    }
}

/// The most recent decrypted chat messages.
pub fn chats(case: &Case, out: &mut Output) {
    out.banner("=== DECRYPTED CHAT LOGS ===");
    for chat in tail(&case.chats, CHAT_VIEW) {
        let edited = if chat.edited { " (edited)" } else { "" };
        out.info(format!(
            "[{}] {} {}: {}{edited}",
            display_time(&chat.timestamp),
            chat.channel,
            chat.user,
            chat.message
        ));
    }
}

/// Metadata for every file in the case.
pub fn files(case: &Case, out: &mut Output) {
    out.banner("=== FILE SYSTEM FORENSICS ===");
    let mut table = new_table(vec![
        "File", "Owner", "Size", "Modified", "Accessed", "Perms", "Hash",
    ]);
    for file in &case.files {
        let short_hash: String = file.hash.chars().take(23).collect();
        table.add_row(vec![
            file.filename.clone(),
            file.owner.clone(),
            file.size.to_string(),
            display_time(&file.modified),
            display_time(&file.accessed),
            file.permissions.clone(),
            format!("{short_hash}..."),
        ]);
    }
    push_table(out, &table);
}

/// Full dossier on one suspect.
pub fn profile(suspect: &Suspect, out: &mut Output) {
    out.banner(format!("=== SUSPECT PROFILE: {} ===", suspect.name));
    out.info(format!("Role:        {}", suspect.role));
    out.info(format!("Department:  {}", suspect.department));
    out.info(format!("Access:      {}", suspect.access_level));
    out.info(format!("Account:     {}", suspect.username()));
    out.info(format!("Usual IP:    {}", suspect.ip));
    out.info(format!("Last login:  {}", display_time(&suspect.last_login)));
    out.info(format!(
        "Risk:        {} ({}%)",
        suspect.risk_tier(),
        suspect.suspicion_level
    ));
    out.info(format!("Background:  {}", suspect.backstory));
    out.info(format!("Motive:      {}", suspect.motive));
    out.info(format!("Alibi:       {}", suspect.alibi));
}

/// Per-suspect tallies drawn from unlocked evidence only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally {
    /// Suspicious log actions.
    pub suspicious_actions: usize,
    /// Log entries from an address other than the suspect's own.
    pub foreign_addresses: usize,
    /// High-priority emails sent.
    pub flagged_emails: usize,
    /// Suspicious chat messages.
    pub flagged_chats: usize,
}

impl Tally {
    fn score(&self) -> usize {
        self.suspicious_actions + self.foreign_addresses + self.flagged_emails + self.flagged_chats
    }
}

/// Count anomalies per suspect using only categories in `evidence`.
pub fn tally<'a>(case: &'a Case, evidence: &EvidenceStore) -> Vec<(&'a Suspect, Tally)> {
    let logs = evidence.contains(EvidenceCategory::SystemLogs);
    let emails = evidence.contains(EvidenceCategory::EmailRecords);
    let chats = evidence.contains(EvidenceCategory::ChatLogs);

    case.suspects
        .iter()
        .map(|s| {
            let mut t = Tally::default();
            if logs {
                for entry in case.logs.iter().filter(|e| e.author == s.id) {
                    if entry.action.is_suspicious() {
                        t.suspicious_actions += 1;
                    }
                    if entry.ip != s.ip {
                        t.foreign_addresses += 1;
                    }
                }
            }
            if emails {
                let address = s.email_address(mail_domain(case));
                t.flagged_emails = case
                    .emails
                    .iter()
                    .filter(|e| e.from == address && e.suspicious)
                    .count();
            }
            if chats {
                t.flagged_chats = case
                    .chats
                    .iter()
                    .filter(|c| c.suspicious)
                    .filter(|c| case.suspect_by_username(&c.user).is_some_and(|a| a.id == s.id))
                    .count();
            }
            (s, t)
        })
        .collect()
}

fn mail_domain(case: &Case) -> &str {
    case.emails
        .first()
        .and_then(|e| e.from.split_once('@'))
        .map_or(sleuth_core::catalog::MAIL_DOMAIN, |(_, domain)| domain)
}

/// Pattern analysis over unlocked evidence.
///
/// Shows a single warning instead of the table when no logs, email or chat
/// have been unlocked yet.
pub fn analysis(case: &Case, evidence: &EvidenceStore, out: &mut Output) {
    out.banner("=== PATTERN ANALYSIS ===");
    let sources: Vec<_> = [
        EvidenceCategory::SystemLogs,
        EvidenceCategory::EmailRecords,
        EvidenceCategory::ChatLogs,
    ]
    .into_iter()
    .filter(|c| evidence.contains(*c))
    .collect();

    if sources.is_empty() {
        out.warning("No logs, email or chat evidence collected yet. Analysis is limited.");
        return;
    }

    let names: Vec<_> = sources.iter().map(|c| c.title()).collect();
    out.info(format!("Sources: {}", names.join(", ")));

    let mut rows = tally(case, evidence);
    rows.sort_by(|(a, ta), (b, tb)| tb.score().cmp(&ta.score()).then(a.name.cmp(&b.name)));

    let mut table = new_table(vec![
        "Suspect",
        "Suspicious ops",
        "Foreign IPs",
        "Flagged mail",
        "Flagged chat",
    ]);
    for (s, t) in &rows {
        table.add_row(vec![
            s.name.clone(),
            t.suspicious_actions.to_string(),
            t.foreign_addresses.to_string(),
            t.flagged_emails.to_string(),
            t.flagged_chats.to_string(),
        ]);
    }
    push_table(out, &table);
}
