//! # In-Memory Message Store
//!
//! In-memory implementation of [`MessageStore`] for tests and ephemeral runs. Data is lost on
//! restart.
//!
//! ## Thread Safety
//!
//! State sits behind `Arc<RwLock<>>`. Ids are assigned while the write lock is held, so
//! concurrent appends never share an id and ids grow with insertion order.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use helpdesk_core::{ConversationKey, Message, NewMessage, RoleGroup, SenderType, SummaryRow};
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::StorageError;
use crate::models::truncate_to_micros;
use crate::repository::MessageStore;

#[derive(Debug, Default)]
struct State {
    messages: Vec<Message>,
    last_id: i64,
}

/// In-memory message store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMessageStore {
    state: Arc<RwLock<State>>,
}

impl InMemoryMessageStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MessageStore for InMemoryMessageStore {
    async fn append(&self, message: NewMessage) -> Result<Message, StorageError> {
        let created_at = truncate_to_micros(message.created_at.unwrap_or_else(Utc::now));

        let mut state = self.state.write().await;
        state.last_id += 1;
        let stored = message.into_message(state.last_id, created_at);
        state.messages.push(stored.clone());

        debug!("Appended in-memory message id={} key={}", stored.id, stored.key);
        Ok(stored)
    }

    async fn find_conversation(
        &self,
        key: &ConversationKey,
    ) -> Result<Vec<Message>, StorageError> {
        let state = self.state.read().await;
        let mut thread: Vec<Message> = state
            .messages
            .iter()
            .filter(|m| &m.key == key)
            .cloned()
            .collect();
        thread.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(thread)
    }

    async fn mark_read_by_staff(&self, key: &ConversationKey) -> Result<u64, StorageError> {
        let mut state = self.state.write().await;
        let mut changed = 0;
        for message in state
            .messages
            .iter_mut()
            .filter(|m| &m.key == key && m.sender_type == SenderType::Guest && !m.read_by_staff)
        {
            message.read_by_staff = true;
            changed += 1;
        }
        Ok(changed)
    }

    async fn find_summaries(
        &self,
        role_groups: &BTreeSet<RoleGroup>,
    ) -> Result<Vec<SummaryRow>, StorageError> {
        if role_groups.is_empty() {
            return Ok(Vec::new());
        }

        let state = self.state.read().await;
        let mut grouped: BTreeMap<&ConversationKey, (DateTime<Utc>, u64)> = BTreeMap::new();
        for message in state
            .messages
            .iter()
            .filter(|m| role_groups.contains(&m.key.recipient_role))
        {
            let unread = u64::from(message.sender_type == SenderType::Guest && !message.read_by_staff);
            grouped
                .entry(&message.key)
                .and_modify(|(last, count)| {
                    if message.created_at > *last {
                        *last = message.created_at;
                    }
                    *count += unread;
                })
                .or_insert((message.created_at, unread));
        }

        let mut rows: Vec<SummaryRow> = grouped
            .into_iter()
            .map(|(key, (last_message_at, unread_count))| SummaryRow {
                key: key.clone(),
                last_message_at,
                unread_count,
            })
            .collect();
        rows.sort_by(SummaryRow::inbox_order);
        Ok(rows)
    }
}
