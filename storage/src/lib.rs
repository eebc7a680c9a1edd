//! Storage crate: help-desk message persistence behind the [`MessageStore`] trait.
//!
//! ## Modules
//!
//! - [`error`] – Storage error types
//! - [`models`] – MessageRecord, SummaryRecord and timestamp encoding
//! - [`repository`] – MessageStore trait
//! - [`message_repo`] – SqliteMessageStore (SQLite)
//! - [`inmemory_store`] – InMemoryMessageStore
//! - [`sqlite_pool`] – SqlitePoolManager

mod error;
mod inmemory_store;
mod message_repo;
mod models;
mod repository;
mod sqlite_pool;


pub use error::StorageError;
pub use inmemory_store::InMemoryMessageStore;
pub use message_repo::SqliteMessageStore;
pub use models::{MessageRecord, SummaryRecord};
pub use repository::MessageStore;
pub use sqlite_pool::SqlitePoolManager;
