use crate::application::app_error::AppError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::InvalidId(_) => (StatusCode::BAD_REQUEST, None),
            AppError::FormRejection(rejection) => (StatusCode::BAD_REQUEST, Some(rejection.body_text())),
            AppError::ValidationError(errors) => (StatusCode::UNPROCESSABLE_ENTITY, Some(errors.to_string())),
            AppError::InvalidCredentials => (StatusCode::UNAUTHORIZED, Some("Invalid Credentials".to_string())),
            AppError::UserAlreadyExists => (StatusCode::CONFLICT, Some(self.to_string())),
            AppError::DatabaseError(_)
            | AppError::SessionStoreError(_)
            | AppError::PasswordHashError
            | AppError::InvalidHeaderValue(_)
            | AppError::Internal(_) => {
                error!("Request failed: {}", self);
                (StatusCode::INTERNAL_SERVER_ERROR, None)
            }
        };

        let error = match message {
            Some(msg) => msg,
            None => status.canonical_reason().unwrap_or("Unknown error").to_string(),
        };

        (status, Json(ErrorResponse { error })).into_response()
    }
}
