//! Component factory: builds the help desk services from config. Isolates assembly from the CLI.

use std::sync::Arc;

use anyhow::Result;
use storage::{InMemoryMessageStore, MessageStore, SqliteMessageStore};
use tracing::{error, info, instrument};

use crate::config::{HelpdeskConfig, StoreType};
use crate::directory::{StaticGuestDirectory, StaticRoomDirectory};
use crate::service::ConversationService;
use crate::summary::SummaryAggregator;

/// Services sharing one message store.
pub struct HelpdeskComponents {
    pub store: Arc<dyn MessageStore>,
    pub conversations: ConversationService,
    pub summaries: SummaryAggregator,
}

impl HelpdeskComponents {
    pub async fn from_config(config: &HelpdeskConfig) -> Result<Self> {
        let store = create_message_store(config).await?;
        Ok(Self::with_store(store, config))
    }

    /// Wires the services around an existing store, with directories from `config`.
    pub fn with_store(store: Arc<dyn MessageStore>, config: &HelpdeskConfig) -> Self {
        let rooms = Arc::new(StaticRoomDirectory::new(config.rooms.iter().cloned()));
        let guests = Arc::new(StaticGuestDirectory::parse(&config.guest_names));
        Self {
            conversations: ConversationService::new(store.clone(), rooms),
            summaries: SummaryAggregator::new(store.clone(), guests),
            store,
        }
    }
}

/// Creates the message store selected by `HELPDESK_STORE_TYPE`.
#[instrument(skip(config))]
pub async fn create_message_store(config: &HelpdeskConfig) -> Result<Arc<dyn MessageStore>> {
    let store: Arc<dyn MessageStore> = match config.store_type {
        StoreType::Sqlite => {
            info!(database_url = %config.database_url, "Using SQLite message store");
            Arc::new(
                SqliteMessageStore::new(&config.database_url)
                    .await
                    .map_err(|e| {
                        error!(error = %e, "Failed to initialize SQLite message store");
                        anyhow::anyhow!("Failed to initialize SQLite message store: {}", e)
                    })?,
            )
        }
        StoreType::Memory => {
            info!("Using in-memory message store");
            Arc::new(InMemoryMessageStore::new())
        }
    };
    Ok(store)
}
