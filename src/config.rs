use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    /// Full connection string; takes precedence over the individual parts.
    pub url: Option<String>,
    pub max_connections: u32,
}

impl DbConfig {
    pub fn connection_url(&self) -> String {
        match &self.url {
            Some(url) => url.clone(),
            None => format!(
                "postgres://{}:{}@{}:{}/{}",
                self.user, self.password, self.host, self.port, self.name
            ),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub db: DbConfig,
    pub store_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let db = DbConfig {
            host: std::env::var("DB_HOST").unwrap_or_else(|_| "db".into()),
            port: parse_var("DB_PORT", 5432)?,
            user: std::env::var("DB_USER").unwrap_or_else(|_| "postgres".into()),
            password: std::env::var("DB_PASS").unwrap_or_else(|_| "mipassword".into()),
            name: std::env::var("DB_NAME").unwrap_or_else(|_| "miapp".into()),
            url: std::env::var("DATABASE_URL").ok(),
            max_connections: parse_var("DB_MAX_CONNECTIONS", 10)?,
        };
        Ok(Self {
            host: std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: parse_var("PORT", 3000)?,
            db,
            store_timeout: Duration::from_secs(parse_var("STORE_TIMEOUT_SECS", 5)?),
        })
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw.parse::<T>().with_context(|| format!("invalid {key}: {raw:?}")),
        Err(_) => Ok(default),
    }
}
