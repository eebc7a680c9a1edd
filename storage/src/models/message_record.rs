//! Message record model for persistence.
//!
//! Maps to the `help_chats` table and is used by SqliteMessageStore.

use helpdesk_core::{ConversationKey, Message, RoleGroup, SenderType};
use serde::{Deserialize, Serialize};

use super::parse_timestamp;
use crate::error::StorageError;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct MessageRecord {
    pub id: i64,
    pub room_number: String,
    pub guest_username: String,
    pub recipient_role: String,
    pub recipient_username: Option<String>,
    pub sender_type: String,
    pub sender_username: String,
    pub message: String,
    pub created_at: String,
    pub read_by_staff: bool,
}

impl TryFrom<MessageRecord> for Message {
    type Error = StorageError;

    fn try_from(record: MessageRecord) -> Result<Self, Self::Error> {
        let recipient_role = record.recipient_role.parse::<RoleGroup>()?;
        let sender_type = record.sender_type.parse::<SenderType>()?;
        let created_at = parse_timestamp(&record.created_at)?;

        Ok(Message {
            id: record.id,
            key: ConversationKey::new(record.guest_username, record.room_number, recipient_role),
            sender_type,
            sender_username: record.sender_username,
            recipient_username: record.recipient_username,
            body: record.message,
            created_at,
            read_by_staff: record.read_by_staff,
        })
    }
}
