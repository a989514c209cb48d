//! Load `AppConfig` from a JSON file named by `CONFIG_PATH`, or from environment variables.

use crate::config::{AppConfig, Environment};
use crate::error::ConfigError;
use std::path::Path;

pub const CONFIG_PATH_VAR: &str = "CONFIG_PATH";

impl AppConfig {
    /// Reads `.env` if present, then the file at `CONFIG_PATH` when set, else the environment.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        match std::env::var(CONFIG_PATH_VAR) {
            Ok(path) if !path.trim().is_empty() => Self::from_file(path.trim()),
            _ => Self::from_lookup(|key| std::env::var(key).ok()),
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Load(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let cfg: AppConfig =
            serde_json::from_str(raw).map_err(|e| ConfigError::Load(e.to_string()))?;
        cfg.check()
    }

    /// Build from a key lookup (normally `std::env::var`).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let env = match get("APP_ENV") {
            Some(v) => v.parse::<Environment>()?,
            None => Environment::default(),
        };
        let database_url = get("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let auth_token = get("AUTH_TOKEN").ok_or(ConfigError::Missing("AUTH_TOKEN"))?;
        let max_connections = match get("DB_MAX_CONNECTIONS") {
            Some(v) => v.parse().map_err(|_| ConfigError::Invalid {
                key: "DB_MAX_CONNECTIONS",
                value: v,
            })?,
            None => 5,
        };
        let listen_addr = get("LISTEN_ADDR").unwrap_or_else(|| "0.0.0.0:8080".into());
        let bootstrap_schema = match get("BOOTSTRAP_SCHEMA") {
            Some(v) => parse_bool(&v).ok_or(ConfigError::Invalid {
                key: "BOOTSTRAP_SCHEMA",
                value: v,
            })?,
            None => true,
        };

        AppConfig {
            env,
            database_url,
            max_connections,
            listen_addr,
            auth_token,
            bootstrap_schema,
        }
        .check()
    }

    fn check(self) -> Result<Self, ConfigError> {
        if self.database_url.trim().is_empty() {
            return Err(ConfigError::Missing("database_url"));
        }
        if self.auth_token.trim().is_empty() {
            return Err(ConfigError::Missing("auth_token"));
        }
        if self.max_connections == 0 {
            return Err(ConfigError::Invalid {
                key: "max_connections",
                value: "0".into(),
            });
        }
        Ok(self)
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
