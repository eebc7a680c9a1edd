//! Aggregate row produced by the summary query.

use helpdesk_core::{ConversationKey, RoleGroup, SummaryRow};
use serde::{Deserialize, Serialize};

use super::parse_timestamp;
use crate::error::StorageError;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SummaryRecord {
    pub room_number: String,
    pub guest_username: String,
    pub recipient_role: String,
    pub last_created: String,
    pub unread_count: i64,
}

impl TryFrom<SummaryRecord> for SummaryRow {
    type Error = StorageError;

    fn try_from(record: SummaryRecord) -> Result<Self, Self::Error> {
        let recipient_role = record.recipient_role.parse::<RoleGroup>()?;
        Ok(SummaryRow {
            key: ConversationKey::new(record.guest_username, record.room_number, recipient_role),
            last_message_at: parse_timestamp(&record.last_created)?,
            unread_count: record.unread_count.max(0) as u64,
        })
    }
}
