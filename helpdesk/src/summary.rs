//! Staff inbox: one row per thread addressed to the caller's reachable role groups.

use std::collections::BTreeSet;
use std::sync::Arc;

use helpdesk_core::{ConversationKey, ConversationSummary, Principal, RoleGroup};
use storage::MessageStore;
use tracing::debug;

use crate::directory::GuestDirectory;
use crate::error::Result;

pub struct SummaryAggregator {
    store: Arc<dyn MessageStore>,
    guests: Arc<dyn GuestDirectory>,
}

impl SummaryAggregator {
    pub fn new(store: Arc<dyn MessageStore>, guests: Arc<dyn GuestDirectory>) -> Self {
        Self { store, guests }
    }

    /// Inbox rows for `role_groups`, newest activity first, ties by room then guest then role.
    ///
    /// An empty set returns no rows and never reaches the store.
    pub async fn get_staff_conversation_summaries(
        &self,
        role_groups: &BTreeSet<RoleGroup>,
    ) -> Result<Vec<ConversationSummary>> {
        if role_groups.is_empty() {
            return Ok(Vec::new());
        }

        let rows = self.store.find_summaries(role_groups).await?;
        let mut summaries = Vec::with_capacity(rows.len());
        for row in rows {
            let guest_display_name = self
                .guests
                .display_name(&row.key.guest_username, &row.key.room_number)
                .await?
                .filter(|name| !name.trim().is_empty())
                .unwrap_or_else(|| row.key.guest_username.clone());
            summaries.push(ConversationSummary {
                key: row.key,
                guest_display_name,
                last_message_at: row.last_message_at,
                unread_count: row.unread_count,
            });
        }

        debug!(
            groups = role_groups.len(),
            rows = summaries.len(),
            "Aggregated staff inbox"
        );
        Ok(summaries)
    }

    /// The staff inbox of `principal`: role router, then aggregation. Guests get an empty inbox.
    pub async fn inbox_for(&self, principal: &Principal) -> Result<Vec<ConversationSummary>> {
        self.get_staff_conversation_summaries(&principal.reachable_role_groups())
            .await
    }
}

/// Which thread stays selected after an inbox refresh: the previous one if still listed,
/// otherwise the first row, otherwise none.
pub fn reselect(
    previous: Option<&ConversationKey>,
    rows: &[ConversationSummary],
) -> Option<ConversationKey> {
    previous
        .and_then(|key| rows.iter().find(|row| &row.key == key))
        .or_else(|| rows.first())
        .map(|row| row.key.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn row(guest: &str, room: &str) -> ConversationSummary {
        ConversationSummary {
            key: ConversationKey::new(guest, room, RoleGroup::Receptionist),
            guest_display_name: guest.to_string(),
            last_message_at: Utc::now(),
            unread_count: 0,
        }
    }

    #[test]
    fn test_reselect_keeps_previous_when_present() {
        let rows = vec![row("g1", "101"), row("g2", "102")];
        let previous = rows[1].key.clone();
        assert_eq!(reselect(Some(&previous), &rows), Some(previous));
    }

    #[test]
    fn test_reselect_falls_back_to_first() {
        let rows = vec![row("g1", "101"), row("g2", "102")];
        let gone = ConversationKey::new("g9", "909", RoleGroup::Admin);
        assert_eq!(reselect(Some(&gone), &rows), Some(rows[0].key.clone()));
        assert_eq!(reselect(None, &rows), Some(rows[0].key.clone()));
    }

    #[test]
    fn test_reselect_empty_inbox() {
        let previous = ConversationKey::new("g1", "101", RoleGroup::Manager);
        assert_eq!(reselect(Some(&previous), &[]), None);
    }
}
