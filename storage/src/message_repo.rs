//! SQLite message store: persistence and queries for help-desk threads.
//!
//! Uses SqlitePoolManager and the row models (MessageRecord, SummaryRecord).
//! Ids come from `INTEGER PRIMARY KEY AUTOINCREMENT`; SQLite's writer lock serializes appends,
//! so ids are unique and strictly increasing.

use std::collections::BTreeSet;

use async_trait::async_trait;
use chrono::Utc;
use helpdesk_core::{ConversationKey, Message, NewMessage, RoleGroup, SenderType, SummaryRow};
use tracing::{debug, info};

use crate::error::StorageError;
use crate::models::{format_timestamp, truncate_to_micros, MessageRecord, SummaryRecord};
use crate::repository::MessageStore;
use crate::sqlite_pool::SqlitePoolManager;

const SELECT_CONVERSATION: &str = r#"
    SELECT id, room_number, guest_username, recipient_role, recipient_username,
           sender_type, sender_username, message, created_at, read_by_staff
    FROM help_chats
    WHERE guest_username = ? AND room_number = ? AND recipient_role = ?
    ORDER BY created_at ASC, id ASC
"#;

#[derive(Clone)]
pub struct SqliteMessageStore {
    pool_manager: SqlitePoolManager,
}

impl SqliteMessageStore {
    pub async fn new(database_url: &str) -> Result<Self, StorageError> {
        let pool_manager = SqlitePoolManager::new(database_url).await?;
        let store = Self { pool_manager };
        store.init().await?;
        Ok(store)
    }

    async fn init(&self) -> Result<(), StorageError> {
        info!("Creating help_chats table if not exist");

        let pool = self.pool_manager.pool();

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS help_chats (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                room_number TEXT NOT NULL,
                guest_username TEXT NOT NULL,
                recipient_role TEXT NOT NULL
                    CHECK (recipient_role IN ('RECEPTIONIST', 'MANAGER', 'ADMIN')),
                recipient_username TEXT,
                sender_type TEXT NOT NULL CHECK (sender_type IN ('GUEST', 'STAFF')),
                sender_username TEXT NOT NULL,
                message TEXT NOT NULL,
                created_at TEXT NOT NULL,
                read_by_staff INTEGER NOT NULL DEFAULT 0
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_help_chats_key
                ON help_chats(guest_username, room_number, recipient_role);
            CREATE INDEX IF NOT EXISTS idx_help_chats_recipient_role
                ON help_chats(recipient_role);
            "#,
        )
        .execute(pool)
        .await?;

        info!("help_chats table ready");
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn pool_manager_for_tests(&self) -> &SqlitePoolManager {
        &self.pool_manager
    }
}

#[async_trait]
impl MessageStore for SqliteMessageStore {
    async fn append(&self, message: NewMessage) -> Result<Message, StorageError> {
        let pool = self.pool_manager.pool();
        let created_at = truncate_to_micros(message.created_at.unwrap_or_else(Utc::now));

        let result = sqlx::query(
            r#"
            INSERT INTO help_chats (room_number, guest_username, recipient_role, recipient_username,
                                    sender_type, sender_username, message, created_at, read_by_staff)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&message.key.room_number)
        .bind(&message.key.guest_username)
        .bind(message.key.recipient_role.as_str())
        .bind(&message.recipient_username)
        .bind(message.sender_type.as_str())
        .bind(&message.sender_username)
        .bind(&message.body)
        .bind(format_timestamp(&created_at))
        .bind(message.read_by_staff)
        .execute(pool)
        .await?;

        let id = result.last_insert_rowid();
        info!(
            "Saved help chat message: id={}, key={}, sender={}",
            id, message.key, message.sender_username
        );

        Ok(message.into_message(id, created_at))
    }

    async fn find_conversation(
        &self,
        key: &ConversationKey,
    ) -> Result<Vec<Message>, StorageError> {
        let pool = self.pool_manager.pool();

        let records: Vec<MessageRecord> = sqlx::query_as(SELECT_CONVERSATION)
            .bind(&key.guest_username)
            .bind(&key.room_number)
            .bind(key.recipient_role.as_str())
            .fetch_all(pool)
            .await?;

        debug!("Retrieved {} messages for {}", records.len(), key);

        records.into_iter().map(Message::try_from).collect()
    }

    async fn mark_read_by_staff(&self, key: &ConversationKey) -> Result<u64, StorageError> {
        let pool = self.pool_manager.pool();

        let result = sqlx::query(
            r#"
            UPDATE help_chats SET read_by_staff = 1
            WHERE guest_username = ? AND room_number = ? AND recipient_role = ?
              AND sender_type = ? AND read_by_staff = 0
            "#,
        )
        .bind(&key.guest_username)
        .bind(&key.room_number)
        .bind(key.recipient_role.as_str())
        .bind(SenderType::Guest.as_str())
        .execute(pool)
        .await?;

        debug!("Marked {} messages read for {}", result.rows_affected(), key);
        Ok(result.rows_affected())
    }

    async fn find_summaries(
        &self,
        role_groups: &BTreeSet<RoleGroup>,
    ) -> Result<Vec<SummaryRow>, StorageError> {
        if role_groups.is_empty() {
            return Ok(Vec::new());
        }

        let pool = self.pool_manager.pool();
        let placeholders = vec!["?"; role_groups.len()].join(", ");
        let sql = format!(
            r#"
            SELECT room_number, guest_username, recipient_role,
                   MAX(created_at) AS last_created,
                   SUM(CASE WHEN sender_type = 'GUEST' AND read_by_staff = 0 THEN 1 ELSE 0 END)
                       AS unread_count
            FROM help_chats
            WHERE recipient_role IN ({})
            GROUP BY room_number, guest_username, recipient_role
            ORDER BY last_created DESC, room_number ASC, guest_username ASC, recipient_role ASC
            "#,
            placeholders
        );

        let mut query = sqlx::query_as::<_, SummaryRecord>(&sql);
        for group in role_groups {
            query = query.bind(group.as_str());
        }

        let records = query.fetch_all(pool).await?;
        debug!("Retrieved {} conversation summaries", records.len());

        let mut rows = records
            .into_iter()
            .map(SummaryRow::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        // Role names sort differently as text than as RoleGroup; settle ties on the typed key.
        rows.sort_by(SummaryRow::inbox_order);
        Ok(rows)
    }
}
