//! SQLite connection pool wrapper for the storage crate.

use std::path::Path;
use std::str::FromStr;

use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};
use tracing::info;

/// Manages a single SQLite pool; creates the DB file if missing.
#[derive(Clone)]
pub struct SqlitePoolManager {
    pool: SqlitePool,
}

impl SqlitePoolManager {
    /// Creates a pool for the given database URL.
    ///
    /// Accepts a plain path, `file:`/`sqlite:`/`sqlite://` prefixed paths, or `sqlite::memory:`
    /// (also `:memory:`). An in-memory database lives in one connection, so its pool is capped
    /// at a single connection.
    pub async fn new(database_url: &str) -> Result<Self, sqlx::Error> {
        info!("Initializing SQLite pool: {}", database_url);

        let pool = if is_memory_url(database_url) {
            let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await?
        } else {
            let path = Path::new(strip_scheme(database_url));
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            let options = SqliteConnectOptions::new()
                .create_if_missing(true)
                .filename(path);
            SqlitePool::connect_with(options).await?
        };

        Ok(Self { pool })
    }

    /// Returns the underlying pool for running queries.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn is_memory_url(database_url: &str) -> bool {
    matches!(database_url.trim(), "sqlite::memory:" | ":memory:" | "sqlite://:memory:")
}

fn strip_scheme(database_url: &str) -> &str {
    let url = database_url.trim();
    ["sqlite://", "sqlite:", "file://", "file:"]
        .iter()
        .find_map(|prefix| url.strip_prefix(prefix))
        .unwrap_or(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_scheme() {
        assert_eq!(strip_scheme("file:./helpdesk.db"), "./helpdesk.db");
        assert_eq!(strip_scheme("sqlite:///tmp/h.db"), "/tmp/h.db");
        assert_eq!(strip_scheme("sqlite:data/h.db"), "data/h.db");
        assert_eq!(strip_scheme("helpdesk.db"), "helpdesk.db");
    }

    #[test]
    fn test_is_memory_url() {
        assert!(is_memory_url("sqlite::memory:"));
        assert!(is_memory_url(":memory:"));
        assert!(!is_memory_url("file:./helpdesk.db"));
    }
}
