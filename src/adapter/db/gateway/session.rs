use async_trait::async_trait;
use chrono::Duration;
use sqlx::types::Json;
use sqlx::{PgPool, Row};

use crate::application::app_error::{AppError, AppResult};
use crate::application::interface::gateway::session::SessionStore;
use crate::domain::entities::id::Id;
use crate::domain::entities::session::{Session, UserRef};

fn store_error(err: sqlx::Error) -> AppError {
    AppError::SessionStoreError(err.to_string())
}

#[derive(Clone)]
pub struct PgSessionStore {
    pool: PgPool,
}

impl PgSessionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionStore for PgSessionStore {
    async fn get(&self, session_id: &Id<Session>) -> AppResult<Option<Session>> {
        let result = sqlx::query(
            r#"
                SELECT
                    id, user_ref, created_at, last_accessed_at
                FROM
                    sessions
                WHERE
                    id = $1 AND expires_at > now()
            "#,
        )
        .bind(session_id.value)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?;

        match result {
            Some(row) => {
                let user: Option<Json<UserRef>> = row.try_get("user_ref").map_err(store_error)?;
                Ok(Some(Session {
                    id: Id::new(row.try_get("id").map_err(store_error)?),
                    user: user.map(|Json(user)| user),
                    created_at: row.try_get("created_at").map_err(store_error)?,
                    last_accessed_at: row.try_get("last_accessed_at").map_err(store_error)?,
                }))
            }
            None => Ok(None),
        }
    }

    async fn set(&self, session: &Session, ttl: Duration) -> AppResult<()> {
        // expiry is measured on the database clock, same as the filters
        let ttl_secs = ttl.num_milliseconds() as f64 / 1_000.0;
        sqlx::query(
            r#"
                INSERT INTO sessions
                    (id, user_ref, created_at, last_accessed_at, expires_at)
                VALUES ($1, $2, $3, $4, now() + make_interval(secs => $5))
                ON CONFLICT (id) DO UPDATE
                SET
                    user_ref = EXCLUDED.user_ref,
                    last_accessed_at = EXCLUDED.last_accessed_at,
                    expires_at = EXCLUDED.expires_at
            "#,
        )
        .bind(session.id.value)
        .bind(session.user.as_ref().map(Json))
        .bind(session.created_at)
        .bind(session.last_accessed_at)
        .bind(ttl_secs)
        .execute(&self.pool)
        .await
        .map_err(store_error)?;
        Ok(())
    }

    async fn delete(&self, session_id: &Id<Session>) -> AppResult<()> {
        sqlx::query("DELETE FROM sessions WHERE id = $1")
            .bind(session_id.value)
            .execute(&self.pool)
            .await
            .map_err(store_error)?;
        Ok(())
    }

    async fn purge_expired(&self) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= now()")
            .execute(&self.pool)
            .await
            .map_err(store_error)?;
        Ok(result.rows_affected())
    }
}
