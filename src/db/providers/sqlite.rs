use anyhow::Result;
use async_trait::async_trait;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection};

use super::registry::{DbProvider, DbProviderId, pool_options};
use crate::config::DatabaseConfig;

const SQLITE_BUSY_TIMEOUT_MS: u64 = 5_000;

pub struct SqliteDbProvider;

impl SqliteDbProvider {
    fn is_memory(url: &str) -> bool {
        url.to_ascii_lowercase().contains(":memory:") || url.contains("mode=memory")
    }
}

#[async_trait]
impl DbProvider for SqliteDbProvider {
    fn id(&self) -> DbProviderId {
        DbProviderId::Sqlite
    }

    fn schemes(&self) -> &'static [&'static str] {
        &["sqlite:"]
    }

    async fn connect(&self, cfg: &DatabaseConfig) -> Result<DatabaseConnection> {
        // Each connection to an in-memory database opens a fresh, empty one.
        let (max_connections, min_idle) = if Self::is_memory(&cfg.url) {
            if cfg.max_connections > 1 {
                tracing::warn!(
                    requested = cfg.max_connections,
                    "in-memory sqlite is limited to a single pooled connection"
                );
            }
            (1, 1)
        } else {
            (cfg.max_connections, cfg.min_idle)
        };

        let db = Database::connect(pool_options(&cfg.url, max_connections, min_idle)).await?;
        Ok(db)
    }

    async fn post_connect(&self, db: &DatabaseConnection, _cfg: &DatabaseConfig) -> Result<()> {
        // todos.list_id -> lists.id is only enforced with this pragma on.
        db.execute_unprepared("PRAGMA foreign_keys = ON").await?;
        db.execute_unprepared(&format!("PRAGMA busy_timeout = {SQLITE_BUSY_TIMEOUT_MS}"))
            .await?;
        Ok(())
    }
}
