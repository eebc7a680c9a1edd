//! # helpdesk
//!
//! In-app help desk: guests message a staff *role group*, staff read a per-role inbox.
//!
//! ## Modules
//!
//! - [`service`] – [`ConversationService`]: validated sends, thread retrieval, mark-read
//! - [`summary`] – [`SummaryAggregator`]: staff inbox rows and selection across refreshes
//! - [`directory`] – room-existence and guest display-name collaborators
//! - [`transcript`] – display lines for a thread
//! - [`config`] / [`components`] – environment config and store assembly
//! - [`error`] – [`HelpdeskError`]
//!
//! ## External Interactions
//!
//! - **Storage**: any [`storage::MessageStore`] (SQLite or in-memory)
//! - **Identity**: the caller supplies a [`helpdesk_core::Principal`]; nothing here authenticates

pub mod components;
pub mod config;
pub mod directory;
pub mod error;
pub mod service;
pub mod summary;
pub mod transcript;

pub use components::{create_message_store, HelpdeskComponents};
pub use config::{HelpdeskConfig, StoreType};
pub use directory::{GuestDirectory, RoomDirectory, StaticGuestDirectory, StaticRoomDirectory};
pub use error::{HelpdeskError, Result};
pub use service::ConversationService;
pub use summary::{reselect, SummaryAggregator};
pub use transcript::{format_line, format_transcript};
