//! Conversation service: the orchestration layer between callers and the message store.
//!
//! Validation happens here, once, before anything reaches storage. Role names arrive as text
//! and become [`RoleGroup`] values or a `Validation` error.

use std::sync::Arc;

use helpdesk_core::error::require_non_blank;
use helpdesk_core::{ConversationKey, Message, NewMessage, Principal};
use storage::MessageStore;
use tracing::{debug, info, instrument};

use crate::directory::RoomDirectory;
use crate::error::{HelpdeskError, Result};

pub struct ConversationService {
    store: Arc<dyn MessageStore>,
    rooms: Arc<dyn RoomDirectory>,
}

impl ConversationService {
    pub fn new(store: Arc<dyn MessageStore>, rooms: Arc<dyn RoomDirectory>) -> Self {
        Self { store, rooms }
    }

    /// Guest opens or continues a thread addressed to `recipient_role`.
    ///
    /// Fails with `Validation` on blank fields or an unknown role group, and with `NotFound`
    /// when the room does not exist.
    #[instrument(skip(self, body))]
    pub async fn send_guest_message(
        &self,
        guest_username: &str,
        room_number: &str,
        recipient_role: &str,
        body: &str,
    ) -> Result<Message> {
        require_non_blank(guest_username, "Guest username")?;
        require_non_blank(room_number, "Room number")?;
        require_non_blank(body, "Message")?;
        let key = ConversationKey::parse(guest_username, room_number, recipient_role)?;

        if !self.rooms.room_exists(&key.room_number).await? {
            return Err(HelpdeskError::NotFound("Room not found".to_string()));
        }

        let stored = self.store.append(NewMessage::from_guest(key, body)).await?;
        info!(id = stored.id, key = %stored.key, "Guest message sent");
        Ok(stored)
    }

    /// Staff reply into an existing thread. The room is not looked up again.
    #[instrument(skip(self, body))]
    pub async fn send_staff_message(
        &self,
        guest_username: &str,
        room_number: &str,
        recipient_role: &str,
        staff_username: &str,
        body: &str,
    ) -> Result<Message> {
        require_non_blank(staff_username, "Staff username")?;
        require_non_blank(body, "Message")?;
        let key = ConversationKey::parse(guest_username, room_number, recipient_role)?;

        let stored = self
            .store
            .append(NewMessage::from_staff(key, staff_username.trim(), body))
            .await?;
        info!(id = stored.id, key = %stored.key, staff = staff_username, "Staff reply sent");
        Ok(stored)
    }

    /// Full thread, oldest first. A key with no messages yields an empty list.
    pub async fn get_conversation(&self, key: &ConversationKey) -> Result<Vec<Message>> {
        let thread = self.store.find_conversation(key).await?;
        debug!(key = %key, messages = thread.len(), "Loaded conversation");
        Ok(thread)
    }

    /// Marks the thread's unread guest messages as read by staff. Idempotent.
    ///
    /// A guest message appended while this runs may stay unread; the next refresh shows it.
    pub async fn mark_conversation_as_read(&self, key: &ConversationKey) -> Result<()> {
        let changed = self.store.mark_read_by_staff(key).await?;
        debug!(key = %key, changed, "Marked conversation read");
        Ok(())
    }

    /// [`Self::send_guest_message`] on behalf of a guest-side principal.
    pub async fn send_as_guest(
        &self,
        principal: &Principal,
        room_number: &str,
        recipient_role: &str,
        body: &str,
    ) -> Result<Message> {
        if !principal.is_guest_side() {
            return Err(HelpdeskError::Forbidden(
                "Only guests can start a help chat".to_string(),
            ));
        }
        self.send_guest_message(&principal.username, room_number, recipient_role, body)
            .await
    }

    /// [`Self::send_staff_message`] on behalf of a staff principal who can reach the key's role group.
    pub async fn reply_as_staff(
        &self,
        principal: &Principal,
        key: &ConversationKey,
        body: &str,
    ) -> Result<Message> {
        ensure_staff_reach(principal, key)?;
        self.send_staff_message(
            &key.guest_username,
            &key.room_number,
            key.recipient_role.as_str(),
            &principal.username,
            body,
        )
        .await
    }

    /// [`Self::mark_conversation_as_read`] on behalf of a staff principal who can reach the key's
    /// role group.
    pub async fn mark_read_as_staff(
        &self,
        principal: &Principal,
        key: &ConversationKey,
    ) -> Result<()> {
        ensure_staff_reach(principal, key)?;
        self.mark_conversation_as_read(key).await
    }

    /// Loads a thread for `principal`.
    ///
    /// Guests may open only their own threads and never change read state. Staff who can reach
    /// the key's role group mark a non-empty thread read after loading it; the returned history
    /// is the snapshot taken before that.
    pub async fn open_conversation(
        &self,
        principal: &Principal,
        key: &ConversationKey,
    ) -> Result<Vec<Message>> {
        if principal.is_guest_side() {
            if principal.username != key.guest_username {
                return Err(HelpdeskError::Forbidden(
                    "You can only view your own conversations".to_string(),
                ));
            }
            return self.get_conversation(key).await;
        }

        ensure_staff_reach(principal, key)?;
        let thread = self.get_conversation(key).await?;
        if !thread.is_empty() {
            self.mark_conversation_as_read(key).await?;
        }
        Ok(thread)
    }
}

fn ensure_staff_reach(principal: &Principal, key: &ConversationKey) -> Result<()> {
    if principal.reachable_role_groups().contains(&key.recipient_role) {
        Ok(())
    } else {
        Err(HelpdeskError::Forbidden(format!(
            "{} conversations are not in your inbox",
            key.recipient_role
        )))
    }
}
