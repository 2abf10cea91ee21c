use std::sync::Arc;

use tracing::{info, warn};

use crate::application::app_error::{AppError, AppResult};
use crate::application::dto::auth::LoginDTO;
use crate::application::interface::crypto::CredentialsHasher;
use crate::application::interface::gateway::user::UserReader;
use crate::domain::entities::session::UserRef;

#[derive(Clone)]
pub struct LoginInteractor {
    user_reader: Arc<dyn UserReader>,
    hasher: Arc<dyn CredentialsHasher>,
}

impl LoginInteractor {
    pub fn new(user_reader: Arc<dyn UserReader>, hasher: Arc<dyn CredentialsHasher>) -> Self {
        Self { user_reader, hasher }
    }

    /// Checks the credentials and returns the identity to bind to the session.
    pub async fn execute(&self, dto: LoginDTO) -> AppResult<UserRef> {
        let email = dto.email.trim().to_lowercase();
        let user = self.user_reader.find_by_email(&email).await?.ok_or_else(|| {
            warn!("Login attempt with non-existent email: {}", email);
            AppError::InvalidCredentials
        })?;
        let is_valid = self.hasher.verify_password(&dto.password, &user.password).await?;
        if !is_valid {
            warn!("Invalid password for user: {}", user.id);
            return Err(AppError::InvalidCredentials);
        }
        info!("User {} logged in successfully", user.id);
        Ok(user.to_ref())
    }
}
