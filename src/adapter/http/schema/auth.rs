use serde::Deserialize;
use serde_email::Email;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[schema(value_type = String, format = Email, example = "user@example.com")]
    pub email: Email,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}
