use crate::domain::audit::AuditEntry;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::value::RawValue;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuditEntryDto {
    pub id: String,
    pub session_id: String,
    pub user_id: String,
    pub action: String,
    pub timestamp: DateTime<Utc>,
    /// Opaque payload, re-emitted exactly as the backend returned it.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub details: Option<Box<RawValue>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl From<AuditEntry> for AuditEntryDto {
    fn from(entry: AuditEntry) -> Self {
        Self {
            id: entry.id,
            session_id: entry.session_id,
            user_id: entry.user_id,
            action: entry.action,
            timestamp: entry.timestamp,
            details: entry.details,
            ip_address: entry.ip_address,
            user_agent: entry.user_agent,
        }
    }
}

/// One page of audit history. `total_count` is the backend-reported number
/// of matching rows, not the length of `items`; `items` is always present.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuditHistoryDto {
    pub total_count: u64,
    pub items: Vec<AuditEntryDto>,
}
