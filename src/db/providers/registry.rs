use std::{fmt, sync::Arc, time::Duration};

use anyhow::{Context, Result, anyhow, bail};
use async_trait::async_trait;
use sea_orm::{ConnectOptions, DatabaseConnection};

use crate::config::DatabaseConfig;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DbProviderId {
    Postgres,
    Sqlite,
}

impl fmt::Display for DbProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Postgres => "postgres",
            Self::Sqlite => "sqlite",
        })
    }
}

/// A database backend the server can store lists and todos in.
#[async_trait]
pub trait DbProvider: Send + Sync {
    fn id(&self) -> DbProviderId;

    /// URL prefixes this provider accepts, lowercase.
    fn schemes(&self) -> &'static [&'static str];

    fn supports_url(&self, url: &str) -> bool {
        let url = url.trim().to_ascii_lowercase();
        self.schemes().iter().any(|scheme| url.starts_with(scheme))
    }

    async fn connect(&self, cfg: &DatabaseConfig) -> Result<DatabaseConnection>;

    /// Per-backend session setup, run once after the pool opens.
    async fn post_connect(&self, _db: &DatabaseConnection, _cfg: &DatabaseConfig) -> Result<()> {
        Ok(())
    }
}

#[derive(Default)]
pub struct DbProviders {
    providers: Vec<Arc<dyn DbProvider>>,
}

impl DbProviders {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_provider(mut self, provider: Arc<dyn DbProvider>) -> Result<Self> {
        self.add(provider)?;
        Ok(self)
    }

    pub fn add(&mut self, provider: Arc<dyn DbProvider>) -> Result<()> {
        let id = provider.id();
        if self.providers.iter().any(|existing| existing.id() == id) {
            bail!("database provider {id} is already registered");
        }
        self.providers.push(provider);
        Ok(())
    }

    pub fn provider_for_url(&self, url: &str) -> Result<Arc<dyn DbProvider>> {
        if let Some(provider) = self.providers.iter().find(|p| p.supports_url(url)) {
            return Ok(Arc::clone(provider));
        }

        let known: Vec<&str> = self
            .providers
            .iter()
            .flat_map(|provider| provider.schemes().iter().copied())
            .collect();
        Err(anyhow!(
            "no database provider for '{}' (known schemes: {})",
            redact_url(url),
            if known.is_empty() {
                "none".to_string()
            } else {
                known.join(", ")
            }
        ))
    }

    pub async fn connect(&self, cfg: &DatabaseConfig) -> Result<DatabaseConnection> {
        let provider = self.provider_for_url(&cfg.url)?;
        let id = provider.id();
        let url = redact_url(&cfg.url);
        tracing::info!(provider = %id, %url, "opening database pool");

        let db = provider
            .connect(cfg)
            .await
            .with_context(|| format!("{id}: could not connect to {url}"))?;
        provider
            .post_connect(&db, cfg)
            .await
            .with_context(|| format!("{id}: session setup failed"))?;
        Ok(db)
    }
}

pub(super) fn pool_options(url: &str, max_connections: u32, min_idle: u32) -> ConnectOptions {
    let mut options = ConnectOptions::new(url.to_string());
    options
        .max_connections(max_connections)
        .min_connections(min_idle)
        .connect_timeout(CONNECT_TIMEOUT)
        .sqlx_logging(false);
    options
}

/// Keeps the scheme and drops everything that may hold credentials.
fn redact_url(url: &str) -> String {
    let url = url.trim();
    match url.split_once("://") {
        Some((scheme, _)) => format!("{scheme}://***"),
        None => match url.split_once(':') {
            Some((scheme, _)) => format!("{scheme}:***"),
            None => "<malformed>".to_string(),
        },
    }
}
