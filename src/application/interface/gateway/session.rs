use crate::{
    application::app_error::AppResult,
    domain::entities::{id::Id, session::Session},
};
use async_trait::async_trait;
use chrono::Duration;

/// Key-value persistence for sessions. Records written with `set` vanish from
/// `get` once `ttl` has passed without another write.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, session_id: &Id<Session>) -> AppResult<Option<Session>>;
    async fn set(&self, session: &Session, ttl: Duration) -> AppResult<()>;
    async fn delete(&self, session_id: &Id<Session>) -> AppResult<()>;
    /// Drops every expired record and returns how many were removed.
    async fn purge_expired(&self) -> AppResult<u64>;
}
