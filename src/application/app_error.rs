use axum::extract::rejection::FormRejection;
use axum::http::header::InvalidHeaderValue;
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid id: {0}")]
    InvalidId(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User with this email already exists")]
    UserAlreadyExists,

    #[error("Validation failed: {0}")]
    ValidationError(#[from] ValidationErrors),

    #[error("Malformed form: {0}")]
    FormRejection(#[from] FormRejection),

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Session store unavailable: {0}")]
    SessionStoreError(String),

    #[error("Password hashing failed")]
    PasswordHashError,

    #[error("Invalid header value: {0}")]
    InvalidHeaderValue(#[from] InvalidHeaderValue),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type AppResult<T> = Result<T, AppError>;
