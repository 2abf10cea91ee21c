use serde::Deserialize;
use serde_email::Email;
use utoipa::ToSchema;
use validator::Validate;

use crate::adapter::http::schema::ValidPassword;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    #[validate(length(
        min = 2,
        max = 50,
        message = "Display name must be between 2 and 50 characters"
    ))]
    #[serde(deserialize_with = "crate::adapter::http::schema::trimmed")]
    #[schema(example = "Jane Baker")]
    pub display_name: String,
    #[schema(value_type = String, format = Email, example = "user@example.com")]
    pub email: Email,
    #[validate(nested)]
    pub password: ValidPassword,
}
