//! MockMessageStore
//!
//! - Wraps an [`InMemoryMessageStore`] and counts every call, so tests can assert which
//!   operations reached storage.
//! - `failing()` builds a store whose every call returns `StorageError::Database`.

use std::collections::BTreeSet;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use async_trait::async_trait;
use helpdesk_core::{ConversationKey, Message, NewMessage, RoleGroup, SummaryRow};
use storage::{InMemoryMessageStore, MessageStore, StorageError};

#[derive(Debug, Clone, Default)]
pub struct MockMessageStore {
    inner: InMemoryMessageStore,
    fail: bool,
    append_calls: Arc<AtomicUsize>,
    summary_calls: Arc<AtomicUsize>,
}

impl MockMessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn append_calls(&self) -> usize {
        self.append_calls.load(Ordering::SeqCst)
    }

    pub fn summary_calls(&self) -> usize {
        self.summary_calls.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<(), StorageError> {
        if self.fail {
            Err(StorageError::Database("database is locked".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl MessageStore for MockMessageStore {
    async fn append(&self, message: NewMessage) -> Result<Message, StorageError> {
        self.append_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.inner.append(message).await
    }

    async fn find_conversation(
        &self,
        key: &ConversationKey,
    ) -> Result<Vec<Message>, StorageError> {
        self.check()?;
        self.inner.find_conversation(key).await
    }

    async fn mark_read_by_staff(&self, key: &ConversationKey) -> Result<u64, StorageError> {
        self.check()?;
        self.inner.mark_read_by_staff(key).await
    }

    async fn find_summaries(
        &self,
        role_groups: &BTreeSet<RoleGroup>,
    ) -> Result<Vec<SummaryRow>, StorageError> {
        self.summary_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.inner.find_summaries(role_groups).await
    }
}
