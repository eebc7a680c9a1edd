//! Core types: role groups, principal roles, conversation key, message, and inbox summary rows.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{require_non_blank, CoreError, Result};

/// Staff category a guest thread is addressed to. Guests are never a recipient group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoleGroup {
    Receptionist,
    Manager,
    Admin,
}

impl RoleGroup {
    pub const ALL: [RoleGroup; 3] = [RoleGroup::Receptionist, RoleGroup::Manager, RoleGroup::Admin];

    /// Stored and displayed form, e.g. `RECEPTIONIST`.
    pub fn as_str(&self) -> &'static str {
        match self {
            RoleGroup::Receptionist => "RECEPTIONIST",
            RoleGroup::Manager => "MANAGER",
            RoleGroup::Admin => "ADMIN",
        }
    }
}

impl fmt::Display for RoleGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoleGroup {
    type Err = CoreError;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim();
        RoleGroup::ALL
            .into_iter()
            .find(|group| group.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| CoreError::UnknownRoleGroup(s.to_string()))
    }
}

/// Role held by an authenticated principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Guest,
    Receptionist,
    Housekeeping,
    Manager,
    Admin,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Guest,
        Role::Receptionist,
        Role::Housekeeping,
        Role::Manager,
        Role::Admin,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Guest => "GUEST",
            Role::Receptionist => "RECEPTIONIST",
            Role::Housekeeping => "HOUSEKEEPING",
            Role::Manager => "MANAGER",
            Role::Admin => "ADMIN",
        }
    }

    /// True for the roles that own a help-desk inbox.
    pub fn is_help_desk_staff(&self) -> bool {
        matches!(self, Role::Receptionist | Role::Manager | Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim();
        Role::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| CoreError::UnknownRole(s.to_string()))
    }
}

/// Which side of the thread wrote a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SenderType {
    Guest,
    Staff,
}

impl SenderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SenderType::Guest => "GUEST",
            SenderType::Staff => "STAFF",
        }
    }
}

impl fmt::Display for SenderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SenderType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "GUEST" => Ok(SenderType::Guest),
            "STAFF" => Ok(SenderType::Staff),
            _ => Err(CoreError::UnknownSenderType(s.to_string())),
        }
    }
}

/// Identity of one thread: (guest, room, addressed role group).
///
/// Ordered by room, then guest, then role group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConversationKey {
    pub room_number: String,
    pub guest_username: String,
    pub recipient_role: RoleGroup,
}

impl ConversationKey {
    pub fn new(
        guest_username: impl Into<String>,
        room_number: impl Into<String>,
        recipient_role: RoleGroup,
    ) -> Self {
        Self {
            room_number: room_number.into(),
            guest_username: guest_username.into(),
            recipient_role,
        }
    }

    /// Builds a key from caller-supplied text, rejecting blank fields and unknown role groups.
    /// Guest and room are stored trimmed.
    pub fn parse(guest_username: &str, room_number: &str, recipient_role: &str) -> Result<Self> {
        require_non_blank(guest_username, "Guest username")?;
        require_non_blank(room_number, "Room number")?;
        let recipient_role = recipient_role.parse::<RoleGroup>()?;
        Ok(Self::new(
            guest_username.trim(),
            room_number.trim(),
            recipient_role,
        ))
    }
}

impl PartialOrd for ConversationKey {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ConversationKey {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.room_number
            .cmp(&other.room_number)
            .then_with(|| self.guest_username.cmp(&other.guest_username))
            .then_with(|| self.recipient_role.cmp(&other.recipient_role))
    }
}

impl fmt::Display for ConversationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "room {} / {} / {}",
            self.room_number, self.guest_username, self.recipient_role
        )
    }
}

/// A stored help-desk message. Append-only apart from `read_by_staff`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: i64,
    pub key: ConversationKey,
    pub sender_type: SenderType,
    pub sender_username: String,
    /// Reserved for a named staff addressee; never populated by the current send paths.
    pub recipient_username: Option<String>,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub read_by_staff: bool,
}

/// Input to `MessageStore::append`; the store assigns `id` and, when missing, `created_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    pub key: ConversationKey,
    pub sender_type: SenderType,
    pub sender_username: String,
    pub recipient_username: Option<String>,
    pub body: String,
    pub created_at: Option<DateTime<Utc>>,
    pub read_by_staff: bool,
}

impl NewMessage {
    /// Guest-origin message: starts unread by staff.
    pub fn from_guest(key: ConversationKey, body: impl Into<String>) -> Self {
        let sender_username = key.guest_username.clone();
        Self {
            key,
            sender_type: SenderType::Guest,
            sender_username,
            recipient_username: None,
            body: body.into(),
            created_at: None,
            read_by_staff: false,
        }
    }

    /// Staff-origin message: a staff reply is already seen by staff.
    pub fn from_staff(
        key: ConversationKey,
        staff_username: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            key,
            sender_type: SenderType::Staff,
            sender_username: staff_username.into(),
            recipient_username: None,
            body: body.into(),
            created_at: None,
            read_by_staff: true,
        }
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Completes the record with the values assigned at persistence time.
    pub fn into_message(self, id: i64, created_at: DateTime<Utc>) -> Message {
        Message {
            id,
            key: self.key,
            sender_type: self.sender_type,
            sender_username: self.sender_username,
            recipient_username: self.recipient_username,
            body: self.body,
            created_at,
            read_by_staff: self.read_by_staff,
        }
    }
}

/// Per-thread aggregate as computed by a store, before display names are resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub key: ConversationKey,
    pub last_message_at: DateTime<Utc>,
    pub unread_count: u64,
}

impl SummaryRow {
    /// Inbox order: newest activity first, then by key (room, guest, role group) ascending.
    pub fn inbox_order(a: &SummaryRow, b: &SummaryRow) -> std::cmp::Ordering {
        b.last_message_at
            .cmp(&a.last_message_at)
            .then_with(|| a.key.cmp(&b.key))
    }
}

/// One staff-inbox row. Derived on every query, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationSummary {
    pub key: ConversationKey,
    pub guest_display_name: String,
    pub last_message_at: DateTime<Utc>,
    pub unread_count: u64,
}

/// The acting party, supplied by the caller on every principal-aware call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub username: String,
    pub roles: BTreeSet<Role>,
}

impl Principal {
    pub fn new(username: impl Into<String>, roles: impl IntoIterator<Item = Role>) -> Self {
        Self {
            username: username.into(),
            roles: roles.into_iter().collect(),
        }
    }

    /// Parses role names case-insensitively; any unknown name rejects the whole principal.
    pub fn from_role_names<I, S>(username: &str, role_names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        require_non_blank(username, "Username")?;
        let mut roles = BTreeSet::new();
        for name in role_names {
            let name = name.as_ref().trim();
            if name.is_empty() {
                continue;
            }
            roles.insert(name.parse::<Role>()?);
        }
        Ok(Self {
            username: username.to_string(),
            roles,
        })
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// GUEST and none of the help-desk staff roles.
    pub fn is_guest_side(&self) -> bool {
        self.has_role(Role::Guest) && !self.roles.iter().any(Role::is_help_desk_staff)
    }

    pub fn reachable_role_groups(&self) -> BTreeSet<RoleGroup> {
        crate::router::reachable_role_groups(&self.roles)
    }
}
