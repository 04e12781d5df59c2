//! Case generation.
//!
//! A case is built in one pass from a [`RandomSource`]: six suspects, one of
//! them the culprit and another a red herring, followed by the artifact
//! collections. The culprit's access log entries are biased toward
//! suspicious actions, a tighter recent window, and spoofed addresses; that
//! statistical skew is the tell the player has to find.

use std::collections::{BTreeMap, HashSet};
use std::net::Ipv4Addr;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info};
use uuid::Builder;

use crate::artifact::{ChatMessage, Email, FileMetadata, LogAction, LogEntry, LogStatus};
use crate::case::{Case, CaseId, Severity, Solution, TimeWindow};
use crate::catalog::Catalog;
use crate::error::{CoreError, CoreResult};
use crate::random::RandomSource;
use crate::suspect::{AccessLevel, Suspect, SuspectId, username_for};

/// Tunable sizes and probabilities for case generation.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    /// Number of suspects (at least 2: culprit plus red herring).
    pub suspect_count: usize,
    /// Number of access log entries.
    pub log_count: usize,
    /// Number of emails.
    pub email_count: usize,
    /// Number of chat messages.
    pub chat_count: usize,
    /// Probability that a culprit-authored log entry is suspicious.
    pub suspicious_probability: f64,
    /// Probability that a suspicious entry carries a spoofed address.
    pub spoof_probability: f64,
    /// Probability that an ordinary entry succeeded.
    pub success_probability: f64,
    /// Probability that a chat message was edited.
    pub edit_probability: f64,
    /// Maximum hours the base date lies before "now".
    pub base_offset_hours: u32,
    /// Hours before the base date covered by logs and chats.
    pub window_hours: u32,
    /// Tighter window for the culprit's suspicious entries.
    pub suspicious_window_hours: u32,
    /// Window for emails.
    pub email_window_hours: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            suspect_count: 6,
            log_count: 75,
            email_count: 20,
            chat_count: 40,
            suspicious_probability: 0.4,
            spoof_probability: 0.7,
            success_probability: 0.9,
            edit_probability: 0.1,
            base_offset_hours: 72,
            window_hours: 72,
            suspicious_window_hours: 24,
            email_window_hours: 48,
        }
    }
}

impl GeneratorConfig {
    /// Set the number of suspects.
    pub fn with_suspects(mut self, count: usize) -> Self {
        self.suspect_count = count;
        self
    }

    /// Set the number of access log entries.
    pub fn with_logs(mut self, count: usize) -> Self {
        self.log_count = count;
        self
    }
}

/// Builds internally consistent cases from a catalog.
#[derive(Debug, Clone)]
pub struct CaseGenerator {
    catalog: Catalog,
    config: GeneratorConfig,
}

impl Default for CaseGenerator {
    fn default() -> Self {
        Self {
            catalog: Catalog::default(),
            config: GeneratorConfig::default(),
        }
    }
}

impl CaseGenerator {
    /// Create a generator, rejecting catalogs or settings that cannot
    /// produce a valid case.
    pub fn new(catalog: Catalog, config: GeneratorConfig) -> CoreResult<Self> {
        catalog.validate()?;
        if config.suspect_count < 2 {
            return Err(CoreError::PreconditionViolation(format!(
                "need at least 2 suspects, got {}",
                config.suspect_count
            )));
        }
        if catalog.name_capacity() < config.suspect_count {
            return Err(CoreError::PreconditionViolation(format!(
                "name pools yield {} distinct names, need {}",
                catalog.name_capacity(),
                config.suspect_count
            )));
        }
        Ok(Self { catalog, config })
    }

    /// Generate a complete case.
    pub fn generate(&self, rng: &mut RandomSource, now: DateTime<Utc>) -> Case {
        let company = rng.pick(&self.catalog.companies).clone();
        let attack_type = rng.pick(&self.catalog.attack_types).clone();
        let severity = *rng.pick(Severity::ALL);
        let timeframe = format!("{} hours ago", rng.uniform_int(24, 96));
        let base = hours_before(now, rng, self.config.base_offset_hours);
        let window = TimeWindow {
            start: base - Duration::hours(i64::from(self.config.window_hours)),
            end: base,
        };

        let mut suspects = self.generate_suspects(rng, now);

        let culprit_idx = rng.index(suspects.len());
        suspects[culprit_idx].suspicion_level = rng.uniform_int(70, 100) as u8;

        let mut herring_idx = rng.index(suspects.len() - 1);
        if herring_idx >= culprit_idx {
            herring_idx += 1;
        }
        suspects[herring_idx].suspicion_level = rng.uniform_int(50, 70) as u8;

        let culprit = suspects[culprit_idx].clone();
        debug!(suspects = suspects.len(), "planted culprit and red herring");

        let logs = self.generate_logs(rng, &suspects, culprit.id, base);
        let emails = self.generate_emails(rng, &suspects, base);
        let chats = self.generate_chats(rng, &suspects, base);
        let files = self.generate_files(rng, &suspects, base);

        let id = CaseId(Builder::from_random_bytes(rng.bytes()).into_uuid());
        let solution = Solution {
            culprit_id: culprit.id,
            culprit: culprit.name.clone(),
            method: format!(
                "Used {} privileges to access sensitive data during off-hours",
                culprit.access_level
            ),
            evidence: self.catalog.solution_evidence.clone(),
        };

        info!(case = %id, %company, %attack_type, %severity, "generated case");

        Case {
            id,
            title: format!("Operation: {attack_type} Investigation"),
            description: format!(
                "{company} has reported a {} incident. Initial analysis suggests internal \
                 involvement. Digital forensics required to identify the perpetrator and \
                 attack vector.",
                attack_type.to_lowercase()
            ),
            company,
            attack_type,
            severity,
            timeframe,
            window,
            suspects,
            logs,
            emails,
            chats,
            files,
            solution,
        }
    }

    fn generate_suspects(&self, rng: &mut RandomSource, now: DateTime<Utc>) -> Vec<Suspect> {
        let mut taken = HashSet::new();
        let mut suspects = Vec::with_capacity(self.config.suspect_count);

        for i in 0..self.config.suspect_count {
            // bounded by the capacity check in `new`
            let name = loop {
                let candidate = format!(
                    "{} {}",
                    rng.pick(&self.catalog.first_names),
                    rng.pick(&self.catalog.last_names)
                );
                if taken.insert(candidate.clone()) {
                    break candidate;
                }
            };
            let role = rng.pick(&self.catalog.roles).clone();
            let department = rng.pick(&self.catalog.departments).clone();
            let access_level = AccessLevel::from_roll(rng.uniform_float());
            let last_login = hours_before(now, rng, 48);
            let ip = random_ip(rng);
            let years = rng.uniform_int(1, 9);
            let backstory = format!(
                "{name} has been with the company for {years} years as a {role} in {department}."
            );
            let motive = rng.pick(&self.catalog.motives).clone();
            let alibi = rng.pick(&self.catalog.alibis).clone();
            let suspicion_level = ordinary_suspicion(rng);

            suspects.push(Suspect {
                id: SuspectId(i as u32 + 1),
                name,
                role,
                department,
                access_level,
                last_login,
                ip,
                backstory,
                motive,
                alibi,
                suspicion_level,
            });
        }

        suspects
    }

    fn generate_logs(
        &self,
        rng: &mut RandomSource,
        suspects: &[Suspect],
        culprit: SuspectId,
        base: DateTime<Utc>,
    ) -> Vec<LogEntry> {
        let cfg = &self.config;
        let mut logs = Vec::with_capacity(cfg.log_count);

        for _ in 0..cfg.log_count {
            let author = rng.pick(suspects);
            let suspicious = author.id == culprit && rng.chance(cfg.suspicious_probability);

            let action = if suspicious {
                *rng.pick(LogAction::SUSPICIOUS)
            } else {
                *rng.pick(LogAction::ALL)
            };
            let resource = rng.pick(&self.catalog.resources).clone();
            let hours = if suspicious {
                cfg.suspicious_window_hours
            } else {
                cfg.window_hours
            };
            let timestamp = hours_before(base, rng, hours);
            let ip = if suspicious && rng.chance(cfg.spoof_probability) {
                random_ip(rng)
            } else {
                author.ip
            };
            let status = if suspicious || rng.chance(cfg.success_probability) {
                LogStatus::Success
            } else {
                LogStatus::Failed
            };

            logs.push(LogEntry {
                timestamp,
                user: author.username(),
                author: author.id,
                ip,
                action,
                detail: format!("{action} attempt on {resource}"),
                resource,
                status,
            });
        }

        logs.sort_by_key(|l| l.timestamp);
        logs
    }

    fn generate_emails(
        &self,
        rng: &mut RandomSource,
        suspects: &[Suspect],
        base: DateTime<Utc>,
    ) -> Vec<Email> {
        let domain = &self.catalog.mail_domain;
        let mut emails = Vec::with_capacity(self.config.email_count);

        for i in 0..self.config.email_count {
            let from_idx = rng.index(suspects.len());
            // self-addressed mail is resampled
            let to_idx = loop {
                let idx = rng.index(suspects.len());
                if idx != from_idx {
                    break idx;
                }
            };
            let (sender, recipient) = (&suspects[from_idx], &suspects[to_idx]);
            let template = rng.pick(&self.catalog.email_templates);
            let timestamp = hours_before(base, rng, self.config.email_window_hours);
            let message_id: u64 = u64::from_le_bytes(rng.bytes());

            let mut headers = BTreeMap::new();
            headers.insert(
                "Message-ID".to_string(),
                format!("<{message_id:016x}@{domain}>"),
            );
            headers.insert("X-Originating-IP".to_string(), sender.ip.to_string());
            headers.insert("User-Agent".to_string(), "Outlook Express 6.0".to_string());
            headers.insert(
                "X-Priority".to_string(),
                if template.suspicious { "High" } else { "Normal" }.to_string(),
            );

            emails.push(Email {
                id: format!("email_{}", i + 1),
                from: sender.email_address(domain),
                to: recipient.email_address(domain),
                subject: template.subject.clone(),
                body: template.body.clone(),
                timestamp,
                headers,
                suspicious: template.suspicious,
            });
        }

        emails.sort_by_key(|e| e.timestamp);
        emails
    }

    fn generate_chats(
        &self,
        rng: &mut RandomSource,
        suspects: &[Suspect],
        base: DateTime<Utc>,
    ) -> Vec<ChatMessage> {
        let mut chats = Vec::with_capacity(self.config.chat_count);

        for _ in 0..self.config.chat_count {
            let author = rng.pick(suspects);
            let template = rng.pick(&self.catalog.chat_templates);
            let timestamp = hours_before(base, rng, self.config.window_hours);
            let channel = rng.pick(&self.catalog.channels).clone();

            chats.push(ChatMessage {
                timestamp,
                user: author.username(),
                channel,
                message: template.text.clone(),
                edited: rng.chance(self.config.edit_probability),
                suspicious: template.suspicious,
            });
        }

        chats.sort_by_key(|c| c.timestamp);
        chats
    }

    fn generate_files(
        &self,
        rng: &mut RandomSource,
        suspects: &[Suspect],
        base: DateTime<Utc>,
    ) -> Vec<FileMetadata> {
        self.catalog
            .filenames
            .iter()
            .map(|filename| {
                let owner = rng.pick(suspects);
                let digest: [u8; 32] = rng.bytes();
                let hash: String = digest.iter().map(|b| format!("{b:02x}")).collect();
                FileMetadata {
                    filename: filename.clone(),
                    hash: format!("sha256:{hash}"),
                    size: u64::from(rng.uniform_int(1_000, 1_001_000)),
                    created: hours_before(base, rng, 168),
                    modified: hours_before(base, rng, 48),
                    accessed: hours_before(base, rng, 24),
                    owner: username_for(&owner.name),
                    permissions: if rng.chance(0.5) { "755" } else { "644" }.to_string(),
                }
            })
            .collect()
    }
}

/// Generate a case with the default catalog from a seed.
pub fn generate_case(seed: u64, now: DateTime<Utc>) -> Case {
    CaseGenerator::default().generate(&mut RandomSource::seeded(seed), now)
}

/// A random instant up to `hours` before `anchor` (inclusive of `anchor`).
fn hours_before(anchor: DateTime<Utc>, rng: &mut RandomSource, hours: u32) -> DateTime<Utc> {
    if hours == 0 {
        return anchor;
    }
    let secs = rng.uniform_int(0, hours * 3600);
    anchor - Duration::seconds(i64::from(secs))
}

/// Suspicion for an ordinary suspect: uniform over `[0, 100)` minus the
/// red-herring band `[50, 70)`, which stays reserved for exactly one suspect.
fn ordinary_suspicion(rng: &mut RandomSource) -> u8 {
    loop {
        let level = rng.uniform_int(0, 100);
        if !(50..70).contains(&level) {
            return level as u8;
        }
    }
}

fn random_ip(rng: &mut RandomSource) -> Ipv4Addr {
    let c = rng.uniform_int(0, 255) as u8;
    let d = rng.uniform_int(0, 255) as u8;
    Ipv4Addr::new(192, 168, c, d)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn deterministic_for_seed() {
        let a = generate_case(42, now());
        let b = generate_case(42, now());
        assert_eq!(a, b);
        let c = generate_case(43, now());
        assert_ne!(a.id, c.id);
    }

    #[test]
    fn collection_sizes() {
        let case = generate_case(1, now());
        assert_eq!(case.suspects.len(), 6);
        assert_eq!(case.logs.len(), 75);
        assert_eq!(case.emails.len(), 20);
        assert_eq!(case.chats.len(), 40);
        assert_eq!(case.files.len(), 10);
    }

    #[test]
    fn culprit_and_red_herring_ranges() {
        for seed in 0..50 {
            let case = generate_case(seed, now());
            let culprit = case.culprit().unwrap();
            assert!((70..100).contains(&culprit.suspicion_level));
            let herrings = case
                .suspects
                .iter()
                .filter(|s| s.id != culprit.id && (50..70).contains(&s.suspicion_level))
                .count();
            assert_eq!(herrings, 1, "seed {seed}");
        }
    }

    #[test]
    fn suspect_names_unique() {
        for seed in 0..50 {
            let case = generate_case(seed, now());
            let names: HashSet<_> = case.suspects.iter().map(|s| &s.name).collect();
            assert_eq!(names.len(), case.suspects.len());
        }
    }

    #[test]
    fn artifacts_sorted_by_time() {
        let case = generate_case(9, now());
        assert!(case.logs.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
        assert!(case.emails.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
        assert!(case.chats.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
    }

    #[test]
    fn solution_method_names_access_level() {
        let case = generate_case(5, now());
        let culprit = case.culprit().unwrap();
        assert!(
            case.solution
                .method
                .contains(&culprit.access_level.to_string())
        );
        assert_eq!(
            case.solution.evidence,
            vec![
                "Suspicious login patterns",
                "Unusual file access",
                "Contradictory statements"
            ]
        );
    }

    #[test]
    fn culprit_logs_skew_suspicious() {
        // Aggregate over many cases: culprit entries carry suspicious actions
        // far more often than everyone else's.
        let (mut culprit_hits, mut culprit_total) = (0u32, 0u32);
        let (mut other_hits, mut other_total) = (0u32, 0u32);
        for seed in 0..100 {
            let case = generate_case(seed, now());
            for log in &case.logs {
                let hit = u32::from(log.action.is_suspicious());
                if log.author == case.solution.culprit_id {
                    culprit_hits += hit;
                    culprit_total += 1;
                } else {
                    other_hits += hit;
                    other_total += 1;
                }
            }
        }
        let culprit_rate = f64::from(culprit_hits) / f64::from(culprit_total);
        let other_rate = f64::from(other_hits) / f64::from(other_total);
        assert!(culprit_rate > other_rate + 0.15, "{culprit_rate} vs {other_rate}");
    }

    #[test]
    fn headers_present() {
        let case = generate_case(3, now());
        for email in &case.emails {
            for key in ["Message-ID", "X-Originating-IP", "User-Agent", "X-Priority"] {
                assert!(email.headers.contains_key(key), "missing {key}");
            }
            let priority = &email.headers["X-Priority"];
            assert_eq!(priority == "High", email.suspicious);
        }
    }

    #[test]
    fn file_hash_format() {
        let case = generate_case(3, now());
        for f in &case.files {
            assert!(f.hash.starts_with("sha256:"));
            assert_eq!(f.hash.len(), "sha256:".len() + 64);
            assert!((1_000..1_001_000).contains(&f.size));
            assert!(f.permissions == "755" || f.permissions == "644");
        }
    }

    #[test]
    fn rejects_single_suspect() {
        let err = CaseGenerator::new(Catalog::default(), GeneratorConfig::default().with_suspects(1))
            .unwrap_err();
        assert!(matches!(err, CoreError::PreconditionViolation(_)));
    }

    #[test]
    fn rejects_small_name_pool() {
        let catalog = Catalog {
            first_names: vec!["Ann".into()],
            last_names: vec!["Lee".into(), "Kim".into()],
            ..Catalog::default()
        };
        assert!(CaseGenerator::new(catalog, GeneratorConfig::default()).is_err());
    }

    #[test]
    fn rejects_empty_catalog() {
        let catalog = Catalog {
            companies: Vec::new(),
            ..Catalog::default()
        };
        assert!(CaseGenerator::new(catalog, GeneratorConfig::default()).is_err());
    }

    #[test]
    fn exact_name_pool_still_terminates() {
        let catalog = Catalog {
            first_names: vec!["Ann".into(), "Bo".into()],
            last_names: vec!["Lee".into(), "Kim".into(), "Ng".into()],
            ..Catalog::default()
        };
        let generator = CaseGenerator::new(catalog, GeneratorConfig::default()).unwrap();
        let case = generator.generate(&mut RandomSource::seeded(11), now());
        assert_eq!(case.suspects.len(), 6);
    }

    #[test]
    fn case_serde_roundtrip() {
        let case = generate_case(12, now());
        let json = serde_json::to_string(&case).unwrap();
        let back: Case = serde_json::from_str(&json).unwrap();
        assert_eq!(back, case);
    }
}
