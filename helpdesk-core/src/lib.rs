//! # helpdesk-core
//!
//! Core types for the hotel help desk: [`ConversationKey`], [`RoleGroup`], [`Message`],
//! summary rows, the acting [`Principal`], the pure role router, and tracing initialization.
//! Storage-agnostic; used by the storage, service and CLI crates.

pub mod error;
pub mod logger;
pub mod router;
pub mod types;

pub use error::{CoreError, Result};
pub use logger::init_tracing;
pub use router::reachable_role_groups;
pub use types::{
    ConversationKey, ConversationSummary, Message, NewMessage, Principal, Role, RoleGroup,
    SenderType, SummaryRow,
};
