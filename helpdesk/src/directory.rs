//! Collaborators owned by the hotel side of the application: which rooms exist and what a
//! guest is called. The help desk only reads them.

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use storage::StorageError;

/// Room-existence check used when a guest opens a thread.
#[async_trait]
pub trait RoomDirectory: Send + Sync {
    async fn room_exists(&self, room_number: &str) -> Result<bool, StorageError>;
}

/// Display names for the staff inbox.
#[async_trait]
pub trait GuestDirectory: Send + Sync {
    /// Name for `guest_username` in `room_number`, if the hotel knows one.
    async fn display_name(
        &self,
        guest_username: &str,
        room_number: &str,
    ) -> Result<Option<String>, StorageError>;
}

/// Fixed set of room numbers, e.g. from `HELPDESK_ROOMS`.
#[derive(Debug, Clone, Default)]
pub struct StaticRoomDirectory {
    rooms: BTreeSet<String>,
}

impl StaticRoomDirectory {
    pub fn new<I, S>(rooms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rooms: rooms.into_iter().map(Into::into).collect(),
        }
    }
}

#[async_trait]
impl RoomDirectory for StaticRoomDirectory {
    async fn room_exists(&self, room_number: &str) -> Result<bool, StorageError> {
        Ok(self.rooms.contains(room_number.trim()))
    }
}

/// In-process guest names. A per-room entry wins over a guest-wide one.
#[derive(Debug, Clone, Default)]
pub struct StaticGuestDirectory {
    by_room: HashMap<(String, String), String>,
    by_guest: HashMap<String, String>,
}

impl StaticGuestDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name used for `guest_username` in `room_number` only (e.g. the booking's guest name).
    pub fn with_room_name(
        mut self,
        guest_username: impl Into<String>,
        room_number: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        self.by_room
            .insert((guest_username.into(), room_number.into()), name.into());
        self
    }

    /// Name used for `guest_username` in any room without a per-room entry.
    pub fn with_name(mut self, guest_username: impl Into<String>, name: impl Into<String>) -> Self {
        self.by_guest.insert(guest_username.into(), name.into());
        self
    }

    /// Parses `guest@room=Name` and `guest=Name` entries separated by commas.
    /// Malformed entries are skipped.
    pub fn parse(entries: &str) -> Self {
        let mut directory = Self::new();
        for entry in entries.split(',') {
            let Some((who, name)) = entry.split_once('=') else {
                continue;
            };
            let (who, name) = (who.trim(), name.trim());
            if who.is_empty() || name.is_empty() {
                continue;
            }
            directory = match who.split_once('@') {
                Some((guest, room)) => directory.with_room_name(guest.trim(), room.trim(), name),
                None => directory.with_name(who, name),
            };
        }
        directory
    }

    pub fn is_empty(&self) -> bool {
        self.by_room.is_empty() && self.by_guest.is_empty()
    }
}

#[async_trait]
impl GuestDirectory for StaticGuestDirectory {
    async fn display_name(
        &self,
        guest_username: &str,
        room_number: &str,
    ) -> Result<Option<String>, StorageError> {
        let per_room = self
            .by_room
            .get(&(guest_username.to_string(), room_number.to_string()));
        Ok(per_room
            .or_else(|| self.by_guest.get(guest_username))
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_room_directory() {
        let rooms = StaticRoomDirectory::new(["101", "102"]);
        assert!(rooms.room_exists("101").await.unwrap());
        assert!(rooms.room_exists(" 102 ").await.unwrap());
        assert!(!rooms.room_exists("999").await.unwrap());
    }

    #[tokio::test]
    async fn test_guest_directory_prefers_room_entry() {
        let guests = StaticGuestDirectory::parse("g1=Alice Moreau, g1@205=Alice M. (suite),bad,=x");

        assert_eq!(
            guests.display_name("g1", "205").await.unwrap().as_deref(),
            Some("Alice M. (suite)")
        );
        assert_eq!(
            guests.display_name("g1", "101").await.unwrap().as_deref(),
            Some("Alice Moreau")
        );
        assert_eq!(guests.display_name("g2", "101").await.unwrap(), None);
    }

    #[test]
    fn test_empty_string_parses_to_empty_directory() {
        assert!(StaticGuestDirectory::parse("").is_empty());
    }
}
