//! Fixed pools that case generation draws from.
//!
//! The defaults are built from the constant tables below. A custom
//! [`Catalog`] can replace any pool; [`Catalog::validate`] rejects pools that
//! cannot support generation.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Target companies.
pub const COMPANIES: &[&str] = &[
    "TechCorp Industries",
    "DataFlow Solutions",
    "CyberSecure Inc",
    "QuantumByte LLC",
    "NexusNet Systems",
];

/// Attack type labels.
pub const ATTACK_TYPES: &[&str] = &[
    "Data Breach",
    "Ransomware Attack",
    "Insider Threat",
    "APT Infiltration",
    "Financial Fraud",
];

/// Departments.
pub const DEPARTMENTS: &[&str] = &["IT", "Finance", "HR", "Operations", "Marketing", "Security"];

/// Job titles.
pub const ROLES: &[&str] = &[
    "Developer",
    "Analyst",
    "Manager",
    "Administrator",
    "Consultant",
    "Intern",
];

/// Given names.
pub const FIRST_NAMES: &[&str] = &[
    "John", "Sarah", "Michael", "Emma", "David", "Lisa", "James", "Anna", "Robert", "Jennifer",
];

/// Family names.
pub const LAST_NAMES: &[&str] = &[
    "Smith",
    "Johnson",
    "Williams",
    "Brown",
    "Jones",
    "Garcia",
    "Miller",
    "Davis",
    "Rodriguez",
    "Martinez",
];

/// Motives.
pub const MOTIVES: &[&str] = &[
    "Recently passed over for promotion",
    "Financial difficulties due to divorce",
    "Disagreement with company policies",
    "Planning to leave for competitor",
    "Revenge against management",
    "Gambling debts",
    "No apparent motive",
];

/// Alibis.
pub const ALIBIS: &[&str] = &[
    "Claims to have been working late in the office",
    "Says was attending a client meeting",
    "States was at home with family",
    "Reports being on vacation",
    "Mentions working from home",
    "Claims system access was compromised",
];

/// Resource paths that appear in access logs.
pub const RESOURCES: &[&str] = &[
    "/secure/customer_data.db",
    "/admin/user_accounts",
    "/backup/financial_records",
    "/temp/download.zip",
    "/system/config.xml",
    "/logs/audit.log",
    "/crypto/wallet_keys",
    "/network/firewall_rules",
];

/// Chat channels.
pub const CHANNELS: &[&str] = &["#general", "#it-support", "#security", "#project-aurora"];

/// Files examined by forensics. Every case carries exactly one record each.
pub const FILENAMES: &[&str] = &[
    "customer_data.db",
    "financial_records.xlsx",
    "user_accounts.csv",
    "backup_config.xml",
    "security_log.txt",
    "project_aurora.zip",
    "wallet_keys.enc",
    "audit_trail.log",
    "network_topology.json",
    "employee_records.db",
];

/// Email templates: `(subject, body, suspicious)`.
pub const EMAIL_TEMPLATES: &[(&str, &str, bool)] = &[
    (
        "Urgent: System Maintenance Tonight",
        "Please be advised that system maintenance will occur tonight from 11 PM to 3 AM. All systems will be offline during this period.",
        false,
    ),
    (
        "RE: Quarterly Budget Review",
        "I need access to the financial records for the quarterly review. Can you assist with the database permissions?",
        false,
    ),
    (
        "New Security Protocols",
        "The new security protocols are too restrictive. We need to discuss alternatives that won't impact productivity.",
        true,
    ),
    (
        "Weekend Work Schedule",
        "I'll be working this weekend to catch up on the project deliverables. Will need extended system access.",
        true,
    ),
    (
        "Confidential: Data Transfer",
        "The client data needs to be transferred to the secure server immediately. Time sensitive.",
        true,
    ),
    (
        "System Access Issues",
        "I'm having trouble accessing the customer database. Is this a known issue? Need resolution ASAP.",
        false,
    ),
    (
        "Backup Verification",
        "Can someone verify the backup integrity? I noticed some inconsistencies in the logs.",
        true,
    ),
    (
        "VPN Configuration",
        "Need help setting up VPN access for remote work. Current configuration seems problematic.",
        true,
    ),
];

/// Chat templates: `(text, suspicious)`.
pub const CHAT_TEMPLATES: &[(&str, bool)] = &[
    ("Anyone else having network issues?", false),
    ("The server seems slow today", false),
    ("Can someone check the backup logs?", true),
    ("I need elevated access for this task", true),
    ("Something strange in the access logs", true),
    ("Working late again tonight", true),
    ("The security system flagged unusual activity", true),
    ("Database connection keeps timing out", false),
    ("Anyone know the admin password for the backup server?", true),
    ("Why are there so many failed login attempts?", true),
    ("Need to transfer some files before the audit", true),
    ("VPN is acting weird, keeps disconnecting", false),
];

/// Evidence labels attached to every solution.
pub const SOLUTION_EVIDENCE: &[&str] = &[
    "Suspicious login patterns",
    "Unusual file access",
    "Contradictory statements",
];

/// Mail domain for suspect addresses.
pub const MAIL_DOMAIN: &str = "company.com";

/// An email body template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailTemplate {
    /// Subject line.
    pub subject: String,
    /// Body text.
    pub body: String,
    /// Whether the template reads as suspicious.
    pub suspicious: bool,
}

/// A chat message template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTemplate {
    /// Message text.
    pub text: String,
    /// Whether the template reads as suspicious.
    pub suspicious: bool,
}

/// Every pool the generator draws from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    /// Target companies.
    pub companies: Vec<String>,
    /// Attack type labels.
    pub attack_types: Vec<String>,
    /// Departments.
    pub departments: Vec<String>,
    /// Job titles.
    pub roles: Vec<String>,
    /// Given names.
    pub first_names: Vec<String>,
    /// Family names.
    pub last_names: Vec<String>,
    /// Motives.
    pub motives: Vec<String>,
    /// Alibis.
    pub alibis: Vec<String>,
    /// Log resource paths.
    pub resources: Vec<String>,
    /// Chat channels.
    pub channels: Vec<String>,
    /// Forensic file names.
    pub filenames: Vec<String>,
    /// Email templates.
    pub email_templates: Vec<EmailTemplate>,
    /// Chat templates.
    pub chat_templates: Vec<ChatTemplate>,
    /// Evidence labels for the solution.
    pub solution_evidence: Vec<String>,
    /// Mail domain.
    pub mail_domain: String,
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            companies: owned(COMPANIES),
            attack_types: owned(ATTACK_TYPES),
            departments: owned(DEPARTMENTS),
            roles: owned(ROLES),
            first_names: owned(FIRST_NAMES),
            last_names: owned(LAST_NAMES),
            motives: owned(MOTIVES),
            alibis: owned(ALIBIS),
            resources: owned(RESOURCES),
            channels: owned(CHANNELS),
            filenames: owned(FILENAMES),
            email_templates: EMAIL_TEMPLATES
                .iter()
                .map(|(subject, body, suspicious)| EmailTemplate {
                    subject: (*subject).to_string(),
                    body: (*body).to_string(),
                    suspicious: *suspicious,
                })
                .collect(),
            chat_templates: CHAT_TEMPLATES
                .iter()
                .map(|(text, suspicious)| ChatTemplate {
                    text: (*text).to_string(),
                    suspicious: *suspicious,
                })
                .collect(),
            solution_evidence: owned(SOLUTION_EVIDENCE),
            mail_domain: MAIL_DOMAIN.to_string(),
        }
    }
}

impl Catalog {
    /// Number of distinct "First Last" names the pools can produce.
    pub fn name_capacity(&self) -> usize {
        let mut firsts = self.first_names.clone();
        firsts.sort();
        firsts.dedup();
        let mut lasts = self.last_names.clone();
        lasts.sort();
        lasts.dedup();
        firsts.len() * lasts.len()
    }

    /// Check that every pool can be drawn from and that filenames are unique.
    pub fn validate(&self) -> CoreResult<()> {
        let pools: [(&str, usize); 13] = [
            ("companies", self.companies.len()),
            ("attack_types", self.attack_types.len()),
            ("departments", self.departments.len()),
            ("roles", self.roles.len()),
            ("first_names", self.first_names.len()),
            ("last_names", self.last_names.len()),
            ("motives", self.motives.len()),
            ("alibis", self.alibis.len()),
            ("resources", self.resources.len()),
            ("channels", self.channels.len()),
            ("filenames", self.filenames.len()),
            ("email_templates", self.email_templates.len()),
            ("chat_templates", self.chat_templates.len()),
        ];
        if let Some((name, _)) = pools.iter().find(|(_, len)| *len == 0) {
            return Err(CoreError::PreconditionViolation(format!(
                "catalog pool '{name}' is empty"
            )));
        }

        let mut names = self.filenames.clone();
        names.sort();
        names.dedup();
        if names.len() != self.filenames.len() {
            return Err(CoreError::PreconditionViolation(
                "catalog filenames must be unique".to_string(),
            ));
        }

        Ok(())
    }
}
