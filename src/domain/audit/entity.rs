// src/domain/audit/entity.rs
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::value::RawValue;

/// A single immutable record of a past action, as stored by the backend.
///
/// `details` is carried as raw JSON so the payload passes through unparsed.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEntry {
    pub id: String,
    #[serde(default)]
    pub session_id: String,
    #[serde(default)]
    pub user_id: String,
    pub action: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub details: Option<Box<RawValue>>,
    #[serde(default)]
    pub ip_address: Option<String>,
    #[serde(default)]
    pub user_agent: Option<String>,
}

/// Minimal session projection, just enough to decide ownership.
#[derive(Debug, Clone, Deserialize)]
pub struct Session {
    pub id: String,
    pub user_id: String,
}

/// Row proving a share token grants access to a session.
///
/// `expires_at` is decoded but not enforced; a matching row is sufficient.
#[derive(Debug, Clone, Deserialize)]
pub struct ShareGrant {
    pub token: String,
    pub session_id: String,
    #[serde(default)]
    pub expires_at: Option<String>,
}

/// Well-known action tags. The set is open; these are the ones other
/// systems are known to write.
pub mod actions {
    pub const CREATE: &str = "create";
    pub const EDIT: &str = "edit";
    pub const MERGE: &str = "merge";
    pub const REORDER: &str = "reorder";
    pub const COMMENT: &str = "comment";
    pub const EXPORT: &str = "export";
    pub const SHARE: &str = "share";
    pub const UNSHARE: &str = "unshare";
    pub const VIEW: &str = "view";
}
