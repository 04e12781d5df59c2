//! Suspects: the people under investigation in a case.

use std::fmt;
use std::net::Ipv4Addr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stable identifier of a suspect within one case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SuspectId(pub u32);

impl fmt::Display for SuspectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "suspect_{}", self.0)
    }
}

/// System clearance of a suspect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccessLevel {
    /// Ordinary user account.
    Standard,
    /// Power user with some administrative rights.
    Elevated,
    /// Full administrative rights.
    Admin,
}

impl AccessLevel {
    /// Map a uniform `[0, 1)` roll to an access level.
    ///
    /// 30% admin, 30% elevated, 40% standard.
    pub fn from_roll(roll: f64) -> Self {
        if roll < 0.3 {
            Self::Admin
        } else if roll < 0.6 {
            Self::Elevated
        } else {
            Self::Standard
        }
    }
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Standard => write!(f, "STANDARD"),
            Self::Elevated => write!(f, "ELEVATED"),
            Self::Admin => write!(f, "ADMIN"),
        }
    }
}

/// Coarse risk bucket shown by the network scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskTier {
    /// Suspicion of 40 or less.
    Low,
    /// Suspicion above 40, up to 70.
    Medium,
    /// Suspicion above 70.
    High,
}

impl RiskTier {
    /// Bucket a suspicion level.
    pub fn from_suspicion(level: u8) -> Self {
        match level {
            71.. => Self::High,
            41..=70 => Self::Medium,
            _ => Self::Low,
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "LOW"),
            Self::Medium => write!(f, "MED"),
            Self::High => write!(f, "HIGH"),
        }
    }
}

/// A person of interest in a case.
///
/// Suspects are created once per case and never change afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suspect {
    /// Identifier, unique within the case.
    pub id: SuspectId,
    /// Display name ("First Last"), unique within the case.
    pub name: String,
    /// Job title.
    pub role: String,
    /// Department.
    pub department: String,
    /// System clearance.
    pub access_level: AccessLevel,
    /// Most recent login.
    pub last_login: DateTime<Utc>,
    /// Usual workstation address.
    pub ip: Ipv4Addr,
    /// Short biography.
    pub backstory: String,
    /// Possible motive.
    pub motive: String,
    /// Claimed alibi.
    pub alibi: String,
    /// Suspicion level in `[0, 100)`.
    pub suspicion_level: u8,
}

impl Suspect {
    /// Account name derived from the display name, e.g. `sarah.johnson`.
    pub fn username(&self) -> String {
        username_for(&self.name)
    }

    /// Corporate email address.
    pub fn email_address(&self, domain: &str) -> String {
        format!("{}@{domain}", self.username())
    }

    /// Risk bucket for this suspect's suspicion level.
    pub fn risk_tier(&self) -> RiskTier {
        RiskTier::from_suspicion(self.suspicion_level)
    }

    /// Case-insensitive substring match on the display name.
    pub fn name_matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        !query.is_empty() && self.name.to_lowercase().contains(&query)
    }
}

/// Lowercase the name and join first and last with a dot.
pub fn username_for(name: &str) -> String {
    name.to_lowercase().replacen(' ', ".", 1)
}
