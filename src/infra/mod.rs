use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::adapter::crypto::argon2::ArgonPasswordHasher;
use crate::adapter::db::gateway::session::PgSessionStore;
use crate::adapter::db::gateway::user::UserGateway;
use crate::adapter::memory::session::MemorySessionStore;
use crate::adapter::memory::user::MemoryUserGateway;
use crate::application::interface::gateway::session::SessionStore;
use crate::infra::config::{AppConfig, StorageBackend};
use crate::infra::db::init_db;
use crate::infra::state::AppState;

pub mod app;
pub mod config;
pub mod db;
pub mod setup;
pub mod state;

pub fn argon2_password_hasher() -> ArgonPasswordHasher {
    ArgonPasswordHasher::default()
}

pub fn init_memory_state(config: &AppConfig) -> AppState {
    let users = Arc::new(MemoryUserGateway::new());
    AppState {
        config: Arc::new(config.clone()),
        hasher: Arc::new(argon2_password_hasher()),
        sessions: Arc::new(MemorySessionStore::new()),
        user_reader: users.clone(),
        user_writer: users,
    }
}

pub async fn init_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    match config.storage.backend {
        StorageBackend::Memory => {
            info!("Using in-memory storage, data is lost on restart");
            Ok(init_memory_state(config))
        }
        StorageBackend::Postgres => {
            let db_config = config
                .db
                .as_ref()
                .ok_or_else(|| anyhow::anyhow!("`[db]` section is missing"))?;
            let pool = init_db(db_config).await?;
            let users = Arc::new(UserGateway::new(pool.clone()));
            Ok(AppState {
                config: Arc::new(config.clone()),
                hasher: Arc::new(argon2_password_hasher()),
                sessions: Arc::new(PgSessionStore::new(pool)),
                user_reader: users.clone(),
                user_writer: users,
            })
        }
    }
}

/// Periodically drops expired sessions so the store does not grow unbounded.
pub fn spawn_session_purger(store: Arc<dyn SessionStore>, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        // first tick completes immediately
        ticker.tick().await;
        loop {
            ticker.tick().await;
            match store.purge_expired().await {
                Ok(0) => {}
                Ok(purged) => info!("Purged {} expired sessions", purged),
                Err(e) => error!("Failed to purge expired sessions: {}", e),
            }
        }
    })
}
