use crate::application::app_error::{AppError, AppResult};
use crate::application::dto::user::CreateUserDTO;
use crate::application::interface::crypto::CredentialsHasher;
use crate::application::interface::gateway::user::{UserReader, UserWriter};
use crate::domain::entities::session::UserRef;
use crate::domain::entities::user::User;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Clone)]
pub struct CreateUserInteractor {
    user_reader: Arc<dyn UserReader>,
    user_writer: Arc<dyn UserWriter>,
    hasher: Arc<dyn CredentialsHasher>,
}

impl CreateUserInteractor {
    pub fn new(
        user_reader: Arc<dyn UserReader>,
        user_writer: Arc<dyn UserWriter>,
        hasher: Arc<dyn CredentialsHasher>,
    ) -> Self {
        Self {
            user_reader,
            user_writer,
            hasher,
        }
    }

    pub async fn execute(&self, dto: CreateUserDTO) -> AppResult<UserRef> {
        let email = dto.email.trim().to_lowercase();
        if self.user_reader.exists_by_email(&email).await? {
            warn!("Registration attempt with taken email: {}", email);
            return Err(AppError::UserAlreadyExists);
        }
        let hashed = self.hasher.hash_password(&dto.password).await?;
        let user = User::new(dto.display_name.trim().to_string(), email, hashed);
        let user_ref = user.to_ref();
        self.user_writer.insert(user).await?;
        info!("User {} registered", user_ref.id);
        Ok(user_ref)
    }
}
