use std::{sync::Arc, time::Instant};

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;

use crate::{
    auth::credentials::CredentialTable,
    config::AppConfig,
    visits::repo::{PgVisitStore, VisitStore},
};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn VisitStore>,
    pub config: Arc<AppConfig>,
    pub credentials: Arc<CredentialTable>,
    pub started_at: Instant,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        // Lazy so the service can come up (and report health) while the database is down.
        let db = PgPoolOptions::new()
            .max_connections(config.db.max_connections)
            .acquire_timeout(config.store_timeout)
            .connect_lazy(&config.db.connection_url())
            .context("build database pool")?;

        let store = Arc::new(PgVisitStore::new(db, config.store_timeout)) as Arc<dyn VisitStore>;

        Ok(Self::from_parts(store, config))
    }

    pub fn from_parts(store: Arc<dyn VisitStore>, config: Arc<AppConfig>) -> Self {
        Self {
            store,
            config,
            credentials: Arc::new(CredentialTable::demo()),
            started_at: Instant::now(),
        }
    }

    /// State backed by an in-memory store; the store handle is returned so tests can inspect it
    /// or take it offline.
    #[cfg(test)]
    pub fn fake() -> (Self, Arc<crate::visits::memory::MemoryVisitStore>) {
        use crate::config::DbConfig;
        use crate::visits::memory::MemoryVisitStore;
        use std::time::Duration;

        let memory = Arc::new(MemoryVisitStore::new());
        let config = Arc::new(AppConfig {
            host: "127.0.0.1".into(),
            port: 3000,
            db: DbConfig {
                host: "localhost".into(),
                port: 5432,
                user: "postgres".into(),
                password: "postgres".into(),
                name: "postgres".into(),
                url: None,
                max_connections: 1,
            },
            store_timeout: Duration::from_secs(1),
        });

        let store = memory.clone() as Arc<dyn VisitStore>;
        (Self::from_parts(store, config), memory)
    }
}
