use anyhow::Result;
use async_trait::async_trait;
use sea_orm::{Database, DatabaseConnection};

use super::registry::{DbProvider, DbProviderId, pool_options};
use crate::config::DatabaseConfig;

pub struct PostgresDbProvider;

#[async_trait]
impl DbProvider for PostgresDbProvider {
    fn id(&self) -> DbProviderId {
        DbProviderId::Postgres
    }

    fn schemes(&self) -> &'static [&'static str] {
        &["postgres://", "postgresql://"]
    }

    async fn connect(&self, cfg: &DatabaseConfig) -> Result<DatabaseConnection> {
        let options = pool_options(&cfg.url, cfg.max_connections, cfg.min_idle);
        Ok(Database::connect(options).await?)
    }
}
