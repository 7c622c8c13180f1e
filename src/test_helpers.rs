use std::sync::Arc;

use axum::Router;
use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase};

use crate::{
    config::{AppConfig, DatabaseConfig},
    db::connection,
    routes::router,
    state::AppState,
};

/// Fresh in-memory SQLite database with the schema applied.
pub async fn memory_db() -> anyhow::Result<DatabaseConnection> {
    connection::connect(&DatabaseConfig::sqlite_memory()).await
}

pub fn test_state(db: DatabaseConnection) -> Arc<AppState> {
    let cfg = AppConfig {
        database: DatabaseConfig::sqlite_memory(),
        ..AppConfig::default()
    };
    AppState::new(cfg, db)
}

pub fn test_router(db: DatabaseConnection) -> Router {
    router(test_state(db))
}

/// Router over a mock connection that fails any query it was not primed for.
pub fn mock_router(mock: MockDatabase) -> Router {
    test_router(mock.into_connection())
}

pub fn empty_mock() -> MockDatabase {
    MockDatabase::new(DatabaseBackend::Sqlite)
}
