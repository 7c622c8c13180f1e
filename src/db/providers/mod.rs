//! Backends selected by the scheme of `APP_DATABASE__URL`.

mod postgres;
mod registry;
mod sqlite;

use std::sync::Arc;

pub use registry::{DbProvider, DbProviderId, DbProviders};

/// SQLite for local files and tests, Postgres for deployments.
pub fn default_registry() -> anyhow::Result<DbProviders> {
    let mut providers = DbProviders::new();
    providers.add(Arc::new(sqlite::SqliteDbProvider))?;
    providers.add(Arc::new(postgres::PostgresDbProvider))?;
    Ok(providers)
}
