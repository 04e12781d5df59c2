//! Digital artifacts recovered during an investigation.
//!
//! Access logs, intercepted email, chat transcripts and file metadata. Each
//! collection is generated per case and never modified afterwards.

use std::collections::BTreeMap;
use std::fmt;
use std::net::Ipv4Addr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::suspect::SuspectId;

/// Format a timestamp the way the terminal shows it: `YYYY-MM-DD HH:MM:SS`.
pub fn display_time(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Operation recorded in an access log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogAction {
    /// Interactive login.
    Login,
    /// Logout.
    Logout,
    /// File read.
    FileAccess,
    /// File write.
    FileModify,
    /// File deletion.
    FileDelete,
    /// Administrative system operation.
    SystemAdmin,
    /// Bulk data export.
    DataExport,
    /// VPN session opened.
    VpnConnect,
    /// Rights elevated beyond the account's clearance.
    PrivilegeEscalation,
    /// Database query.
    DatabaseQuery,
}

impl LogAction {
    /// Every action, in catalog order.
    pub const ALL: &'static [Self] = &[
        Self::Login,
        Self::Logout,
        Self::FileAccess,
        Self::FileModify,
        Self::FileDelete,
        Self::SystemAdmin,
        Self::DataExport,
        Self::VpnConnect,
        Self::PrivilegeEscalation,
        Self::DatabaseQuery,
    ];

    /// Actions favoured by the culprit's suspicious entries.
    pub const SUSPICIOUS: &'static [Self] = &[
        Self::DataExport,
        Self::PrivilegeEscalation,
        Self::FileDelete,
    ];

    /// Whether this action is one of the tell-tale suspicious kinds.
    pub fn is_suspicious(self) -> bool {
        Self::SUSPICIOUS.contains(&self)
    }
}

impl fmt::Display for LogAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Login => "LOGIN",
            Self::Logout => "LOGOUT",
            Self::FileAccess => "FILE_ACCESS",
            Self::FileModify => "FILE_MODIFY",
            Self::FileDelete => "FILE_DELETE",
            Self::SystemAdmin => "SYSTEM_ADMIN",
            Self::DataExport => "DATA_EXPORT",
            Self::VpnConnect => "VPN_CONNECT",
            Self::PrivilegeEscalation => "PRIVILEGE_ESCALATION",
            Self::DatabaseQuery => "DATABASE_QUERY",
        };
        f.write_str(s)
    }
}

/// Outcome of a logged operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogStatus {
    /// The operation succeeded.
    Success,
    /// The operation was refused or errored.
    Failed,
}

impl fmt::Display for LogStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "SUCCESS"),
            Self::Failed => write!(f, "FAILED"),
        }
    }
}

/// One access log line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// When the operation happened.
    pub timestamp: DateTime<Utc>,
    /// Account name of the author.
    pub user: String,
    /// Suspect who authored the entry.
    pub author: SuspectId,
    /// Source address. Differs from the author's usual address when spoofed.
    pub ip: Ipv4Addr,
    /// Operation kind.
    pub action: LogAction,
    /// Resource path.
    pub resource: String,
    /// Outcome.
    pub status: LogStatus,
    /// Free-text detail.
    pub detail: String,
}

/// One intercepted email.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Email {
    /// Identifier, e.g. `email_3`.
    pub id: String,
    /// Sender address.
    pub from: String,
    /// Recipient address, never equal to `from`.
    pub to: String,
    /// Subject line.
    pub subject: String,
    /// Message body.
    pub body: String,
    /// When the mail was sent.
    pub timestamp: DateTime<Utc>,
    /// Header bag: `Message-ID`, `X-Originating-IP`, `User-Agent`, `X-Priority`.
    pub headers: BTreeMap<String, String>,
    /// Whether the body came from a suspicious template.
    pub suspicious: bool,
}

/// One decrypted chat message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// When the message was posted.
    pub timestamp: DateTime<Utc>,
    /// Account name of the author.
    pub user: String,
    /// Channel, e.g. `#security`.
    pub channel: String,
    /// Message text.
    pub message: String,
    /// Whether the message was edited after posting.
    pub edited: bool,
    /// Whether the text came from a suspicious template.
    pub suspicious: bool,
}

/// Forensic metadata for one file.
///
/// The three timestamps are drawn independently; `created <= modified <=
/// accessed` is not guaranteed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileMetadata {
    /// File name, unique within a case.
    pub filename: String,
    /// Content hash, `sha256:` followed by 64 hex digits.
    pub hash: String,
    /// Size in bytes.
    pub size: u64,
    /// Creation time.
    pub created: DateTime<Utc>,
    /// Last modification time.
    pub modified: DateTime<Utc>,
    /// Last access time.
    pub accessed: DateTime<Utc>,
    /// Owning account name.
    pub owner: String,
    /// Octal permission string.
    pub permissions: String,
}
