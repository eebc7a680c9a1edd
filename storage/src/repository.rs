//! # Message Store
//!
//! Append-only log of help-desk messages, queried by [`ConversationKey`].
//!
//! Contract shared by every backend:
//!
//! - `append` assigns the next id (unique, strictly increasing) and fills `created_at` when
//!   unset. One call is one atomic write.
//! - `find_conversation` returns the thread ascending by `(created_at, id)`.
//! - `mark_read_by_staff` flips unread guest messages of one key to read and returns how many
//!   changed. Zero is not an error.
//! - `find_summaries` groups by key for the given role groups, with `unread_count` counting
//!   guest messages not yet read by staff, ordered by [`SummaryRow::inbox_order`]. An empty
//!   role-group set yields no rows.

use std::collections::BTreeSet;

use async_trait::async_trait;
use helpdesk_core::{ConversationKey, Message, NewMessage, RoleGroup, SummaryRow};

use crate::error::StorageError;

/// Trait for storing and querying help-desk messages.
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Persists a message and returns it with `id` and `created_at` assigned.
    async fn append(&self, message: NewMessage) -> Result<Message, StorageError>;

    /// Full history of one thread, oldest first. Empty when the key has no messages.
    async fn find_conversation(&self, key: &ConversationKey)
        -> Result<Vec<Message>, StorageError>;

    /// Marks every unread guest message of `key` as read by staff.
    async fn mark_read_by_staff(&self, key: &ConversationKey) -> Result<u64, StorageError>;

    /// One row per thread addressed to any of `role_groups`.
    async fn find_summaries(
        &self,
        role_groups: &BTreeSet<RoleGroup>,
    ) -> Result<Vec<SummaryRow>, StorageError>;
}
