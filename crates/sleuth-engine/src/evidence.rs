//! Evidence categories and the per-case evidence store.

use std::fmt;

use serde::{Deserialize, Serialize};
use sleuth_core::SuspectId;

/// Reward for unlocking a category the first time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reward {
    /// Progress points.
    pub progress: u8,
    /// Credits.
    pub credits: u32,
}

/// A kind of evidence the player can unlock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceCategory {
    /// Access logs (`logs`).
    SystemLogs,
    /// Intercepted email (`intercept`).
    EmailRecords,
    /// Decrypted chats (`decrypt`).
    ChatLogs,
    /// File forensics (`forensics`).
    FileMetadata,
    /// Profile of one suspect (`suspect <name>`).
    Profile(SuspectId),
    /// Pattern analysis (`analyze`).
    AiAnalysis,
    /// A submitted theory (`theory <text>`).
    Theory,
}

impl EvidenceCategory {
    /// Categories opened by the four data-gathering commands, in the order
    /// the subtle hint suggests them.
    pub const DATA_SOURCES: &'static [Self] = &[
        Self::SystemLogs,
        Self::EmailRecords,
        Self::ChatLogs,
        Self::FileMetadata,
    ];

    /// Points and credits for the first unlock.
    pub fn reward(&self) -> Reward {
        let (progress, credits) = match self {
            Self::SystemLogs => (15, 150),
            Self::EmailRecords => (20, 200),
            Self::ChatLogs => (15, 150),
            Self::FileMetadata => (25, 250),
            Self::Profile(_) => (10, 100),
            Self::AiAnalysis => (10, 100),
            Self::Theory => (5, 50),
        };
        Reward { progress, credits }
    }

    /// Human-readable name of the category.
    pub fn title(&self) -> &'static str {
        match self {
            Self::SystemLogs => "System Access Logs",
            Self::EmailRecords => "Email Communications",
            Self::ChatLogs => "Encrypted Communications",
            Self::FileMetadata => "System Files",
            Self::Profile(_) => "Suspect Profile",
            Self::AiAnalysis => "AI Analysis",
            Self::Theory => "Theory Submission",
        }
    }

    /// The command that unlocks this category.
    pub fn command(&self) -> &'static str {
        match self {
            Self::SystemLogs => "logs",
            Self::EmailRecords => "intercept",
            Self::ChatLogs => "decrypt",
            Self::FileMetadata => "forensics",
            Self::Profile(_) => "suspect <name>",
            Self::AiAnalysis => "analyze",
            Self::Theory => "theory <text>",
        }
    }
}

impl fmt::Display for EvidenceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SystemLogs => write!(f, "system_logs"),
            Self::EmailRecords => write!(f, "email_records"),
            Self::ChatLogs => write!(f, "chat_logs"),
            Self::FileMetadata => write!(f, "file_metadata"),
            Self::Profile(id) => write!(f, "profile_{id}"),
            Self::AiAnalysis => write!(f, "ai_analysis"),
            Self::Theory => write!(f, "theory_submission"),
        }
    }
}

/// Result of an unlock attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unlock {
    /// The category was already in the store; no reward is due.
    pub already_unlocked: bool,
}

/// Set of evidence unlocked in the current case, in discovery order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvidenceStore {
    unlocked: Vec<EvidenceCategory>,
}

impl EvidenceStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `category`. Idempotent.
    pub fn unlock(&mut self, category: EvidenceCategory) -> Unlock {
        let already_unlocked = self.contains(category);
        if !already_unlocked {
            self.unlocked.push(category);
        }
        Unlock { already_unlocked }
    }

    /// Whether `category` has been unlocked.
    pub fn contains(&self, category: EvidenceCategory) -> bool {
        self.unlocked.contains(&category)
    }

    /// Unlocked categories in discovery order.
    pub fn categories(&self) -> &[EvidenceCategory] {
        &self.unlocked
    }

    /// Number of unlocked categories.
    pub fn len(&self) -> usize {
        self.unlocked.len()
    }

    /// Whether nothing has been unlocked.
    pub fn is_empty(&self) -> bool {
        self.unlocked.is_empty()
    }

    /// Forget everything.
    pub fn clear(&mut self) {
        self.unlocked.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlock_is_idempotent() {
        let mut store = EvidenceStore::new();
        assert!(!store.unlock(EvidenceCategory::SystemLogs).already_unlocked);
        assert!(store.unlock(EvidenceCategory::SystemLogs).already_unlocked);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn profiles_are_distinct_per_suspect() {
        let mut store = EvidenceStore::new();
        store.unlock(EvidenceCategory::Profile(SuspectId(0)));
        assert!(
            !store
                .unlock(EvidenceCategory::Profile(SuspectId(1)))
                .already_unlocked
        );
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn discovery_order_kept() {
        let mut store = EvidenceStore::new();
        store.unlock(EvidenceCategory::FileMetadata);
        store.unlock(EvidenceCategory::SystemLogs);
        assert_eq!(
            store.categories(),
            &[EvidenceCategory::FileMetadata, EvidenceCategory::SystemLogs]
        );
        store.clear();
        assert!(store.is_empty());
    }

    #[test]
    fn rewards() {
        assert_eq!(EvidenceCategory::SystemLogs.reward().progress, 15);
        assert_eq!(EvidenceCategory::EmailRecords.reward().credits, 200);
        assert_eq!(EvidenceCategory::FileMetadata.reward().progress, 25);
        assert_eq!(EvidenceCategory::Theory.reward().progress, 5);
        let total: u32 = EvidenceCategory::DATA_SOURCES
            .iter()
            .map(|c| u32::from(c.reward().progress))
            .sum();
        assert_eq!(total, 75);
    }

    #[test]
    fn labels() {
        assert_eq!(EvidenceCategory::SystemLogs.to_string(), "system_logs");
        assert_eq!(
            EvidenceCategory::Profile(SuspectId(4)).to_string(),
            "profile_suspect_4"
        );
        assert_eq!(EvidenceCategory::Theory.to_string(), "theory_submission");
    }
}
