use std::{collections::HashMap, path::Path};

use ::config::{Config, Environment};
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

/// A config struct read from `APP_`-prefixed variables.
///
/// Nesting uses `__`: `APP_DATABASE__URL=sqlite::memory:` sets `database.url`.
/// Values are parsed, so `APP_GENERAL__PORT=8080` lands in a `u16`.
pub trait EnvConfig: Sized + DeserializeOwned {
    const PREFIX: &'static str = "APP";
    const SEPARATOR: &'static str = "__";

    fn validate(&self) -> Result<()> {
        Ok(())
    }

    /// Reads `.env` (crate root, then the working directory) and the process environment.
    fn from_env() -> Result<Self> {
        load_dotenv();
        Self::from_source(Self::environment())
    }

    /// Same as [`EnvConfig::from_env`] over an explicit variable map.
    fn from_vars(vars: HashMap<String, String>) -> Result<Self> {
        Self::from_source(Self::environment().source(Some(vars)))
    }

    fn environment() -> Environment {
        Environment::with_prefix(Self::PREFIX)
            .prefix_separator("_")
            .separator(Self::SEPARATOR)
            .try_parsing(true)
    }

    fn from_source(env: Environment) -> Result<Self> {
        let cfg: Self = Config::builder()
            .add_source(env)
            .build()
            .context("failed to read config variables")?
            .try_deserialize()
            .context("failed to deserialize config")?;
        cfg.validate()?;
        Ok(cfg)
    }
}

fn load_dotenv() {
    let crate_env = Path::new(env!("CARGO_MANIFEST_DIR")).join(".env");
    if dotenvy::from_filename(&crate_env).is_err() {
        // A missing .env is normal in tests and containers.
        dotenvy::dotenv().ok();
    }
}
