pub mod auth;
pub mod page;
pub mod user;

use serde::{Deserialize, Deserializer};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

const SPECIAL_CHARS: &str = "!@#$%^&*()_+-=[]{}|;:,.<>?~`";

#[derive(Debug, Validate, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(
    description = "Password: at least 8 characters with an uppercase letter, a digit and a special character."
)]
pub struct ValidPassword {
    #[validate(
        length(min = 8, max = 128, message = "Password must be between 8 and 128 characters long"),
        custom(
            function = "has_uppercase_letter",
            message = "Password must contain at least one uppercase letter (A-Z)"
        ),
        custom(function = "has_digit", message = "Password must contain at least one digit (0-9)"),
        custom(
            function = "has_special_char",
            message = "Password must contain at least one special character (!@#$%^&* etc.)"
        )
    )]
    value: String,
}

impl ValidPassword {
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Strips surrounding whitespace so length rules see the stored value.
pub fn trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    Ok(value.trim().to_string())
}

fn has_uppercase_letter(password: &str) -> Result<(), ValidationError> {
    if password.chars().any(|c| c.is_ascii_uppercase()) {
        return Ok(());
    }
    Err(ValidationError::new("password_no_uppercase"))
}

fn has_digit(password: &str) -> Result<(), ValidationError> {
    if password.chars().any(|c| c.is_ascii_digit()) {
        return Ok(());
    }
    Err(ValidationError::new("password_no_digit"))
}

fn has_special_char(password: &str) -> Result<(), ValidationError> {
    if password.chars().any(|c| SPECIAL_CHARS.contains(c)) {
        return Ok(());
    }
    Err(ValidationError::new("password_no_special_char"))
}
