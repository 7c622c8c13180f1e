use sea_orm::DatabaseConnection;
use tracing::info;

use crate::{config::DatabaseConfig, db::providers};

/// Opens the pool for `cfg.url` and creates or updates the `lists` and `todos` tables.
pub async fn connect(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let db = providers::default_registry()?.connect(cfg).await?;
    sync_schema(&db).await?;
    Ok(db)
}

pub async fn sync_schema(db: &DatabaseConnection) -> anyhow::Result<()> {
    info!("syncing database schema from entities");
    db.get_schema_registry("todo_server::db::entities::*")
        .sync(db)
        .await?;
    Ok(())
}
