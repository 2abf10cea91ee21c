use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::application::app_error::{AppError, AppResult};
use crate::application::interface::gateway::user::{UserReader, UserWriter};
use crate::domain::entities::id::Id;
use crate::domain::entities::user::User;

const UNIQUE_VIOLATION: &str = "23505";

#[derive(Clone)]
pub struct UserGateway {
    pool: PgPool,
}

impl UserGateway {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn find_user(result: Option<PgRow>) -> AppResult<Option<User>> {
        match result {
            Some(row) => Ok(Some(User {
                id: Id::new(row.try_get("id")?),
                display_name: row.try_get("display_name")?,
                email: row.try_get("email")?,
                password: row.try_get("password")?,
                created_at: row.try_get("created_at")?,
                updated_at: row.try_get("updated_at")?,
            })),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl UserWriter for UserGateway {
    async fn insert(&self, user: User) -> AppResult<Id<User>> {
        let result = sqlx::query(
            r#"
                INSERT INTO users
                    (id, display_name, email, password, created_at, updated_at)
                VALUES
                    ($1, $2, $3, $4, $5, $6)
                RETURNING
                    id
            "#,
        )
        .bind(user.id.value)
        .bind(&user.display_name)
        .bind(&user.email)
        .bind(&user.password)
        .bind(user.created_at)
        .bind(user.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.code().as_deref() == Some(UNIQUE_VIOLATION) => {
                AppError::UserAlreadyExists
            }
            _ => AppError::DatabaseError(e),
        })?;
        let id: Uuid = result.try_get("id")?;
        Ok(Id::new(id))
    }
}

#[async_trait]
impl UserReader for UserGateway {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let result = sqlx::query(
            r#"
                SELECT
                    id, display_name, email, password, created_at, updated_at
                FROM
                    users
                WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Self::find_user(result)
    }

    async fn exists_by_email(&self, email: &str) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
            .bind(email)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }
}
