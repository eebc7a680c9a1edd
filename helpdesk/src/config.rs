//! Help desk config, loaded from environment variables.

use anyhow::Result;
use std::env;
use std::str::FromStr;

/// Message store backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreType {
    Sqlite,
    Memory,
}

impl FromStr for StoreType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlite" => Ok(StoreType::Sqlite),
            "memory" => Ok(StoreType::Memory),
            other => anyhow::bail!(
                "HELPDESK_STORE_TYPE must be 'sqlite' or 'memory', got '{}'",
                other
            ),
        }
    }
}

#[derive(Debug, Clone)]
pub struct HelpdeskConfig {
    /// DATABASE_URL
    pub database_url: String,
    /// HELPDESK_LOG_FILE
    pub log_file: String,
    /// HELPDESK_STORE_TYPE
    pub store_type: StoreType,
    /// HELPDESK_ROOMS, comma separated
    pub rooms: Vec<String>,
    /// HELPDESK_GUEST_NAMES, `guest@room=Name` or `guest=Name`, comma separated
    pub guest_names: String,
}

impl HelpdeskConfig {
    pub fn load() -> Result<Self> {
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "file:./helpdesk.db".to_string());
        let log_file =
            env::var("HELPDESK_LOG_FILE").unwrap_or_else(|_| "logs/helpdesk.log".to_string());
        let store_type: StoreType = env::var("HELPDESK_STORE_TYPE")
            .map(|s| s.parse())
            .unwrap_or(Ok(StoreType::Sqlite))?;
        let rooms: Vec<String> = env::var("HELPDESK_ROOMS")
            .map(|s| {
                s.split(',')
                    .map(str::trim)
                    .filter(|room| !room.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        let guest_names = env::var("HELPDESK_GUEST_NAMES").unwrap_or_default();

        Ok(Self {
            database_url,
            log_file,
            store_type,
            rooms,
            guest_names,
        })
    }
}
